// src/api/parser.rs
//! Turns raw Notion API responses into domain values or typed errors.
//!
//! Success bodies are decoded with serde; error bodies with notion-client's
//! error object so the upstream `message` reaches the caller unchanged.

use super::adapter::{convert_blocks, RawBlock};
use super::client::ApiResponse;
use super::responses::{NotionError, PaginatedResponse};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode};
use crate::model::{Block, PageMetadata};
use reqwest::StatusCode;

/// Parse any Notion API response, mapping non-2xx statuses to errors.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success_body(&result.data, &result.url)
    } else {
        Err(parse_error_body(&result.data, result.status, &result.url))
    }
}

/// Parse a successful response body
fn parse_success_body<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!("{} (body: {})", e, preview(body)))
    })
}

/// Build the error for a non-success response
fn parse_error_body(body: &str, status: StatusCode, url: &str) -> AppError {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        log::error!(
            "Notion API error from {}: {} {} ({})",
            url,
            status,
            notion_error.code,
            notion_error.message
        );
        return AppError::NotionService {
            code: NotionErrorCode::from_api_response(&notion_error.code),
            message: notion_error.message,
            status,
        };
    }

    // Fallback to generic error with HTTP status code
    log::error!("Unparseable Notion error from {}: {}", url, status);
    AppError::NotionService {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}", status, url),
        status,
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}

/// Parse a page metadata response
pub fn parse_page_response(result: ApiResponse<String>) -> Result<PageMetadata, AppError> {
    parse_api_response(result)
}

/// Parse a block-children listing and adapt every block
pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, AppError> {
    let response: PaginatedResponse<RawBlock> = parse_api_response(result)?;
    let blocks = convert_blocks(response.results)?;

    Ok(PaginatedResponse {
        object: response.object,
        results: blocks,
        next_cursor: response.next_cursor,
        has_more: response.has_more,
    })
}

/// Parse a search listing of pages
pub fn parse_pages_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<PageMetadata>, AppError> {
    parse_api_response(result)
}
