// src/api/client.rs
//! Pure HTTP client wrapper for the Notion API.
//!
//! Handles authentication and the raw request/response exchange. Parsing
//! lives in `parser`; this module never looks inside a response body.

use crate::constants::{NOTION_API_BASE_URL, NOTION_API_PAGE_SIZE, NOTION_VERSION};
use crate::error::AppError;
use crate::model::{Block, PageMetadata};
use crate::types::{AccessToken, NotionId};
use reqwest::{header, Client, Response};
use serde::Serialize;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
}

impl NotionHttpClient {
    /// Creates a client authenticated with the given token against the public API.
    pub fn new(token: &AccessToken) -> Result<Self, AppError> {
        Self::with_base_url(token, NOTION_API_BASE_URL)
    }

    /// Creates a client against an alternative API root (proxies, test servers).
    pub fn with_base_url(token: &AccessToken, base_url: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(token)?)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(token: &AccessToken) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", token.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::Validation(format!("Invalid Notion access token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to the specified endpoint (path without base URL).
    pub async fn get(&self, endpoint: &str) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        log::debug!("GET {} -> {}", endpoint, response.status());

        Ok(response)
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("POST {}", url);

        let response = self.client.post(url).json(body).send().await?;
        log::debug!("POST {} -> {}", endpoint, response.status());

        Ok(response)
    }
}

#[async_trait::async_trait]
impl super::NotionRepository for NotionHttpClient {
    async fn retrieve_page(&self, id: &NotionId) -> Result<PageMetadata, AppError> {
        let endpoint = format!("pages/{}", id.to_hyphenated());
        let response = self.get(&endpoint).await?;
        let result = extract_response_text(response).await?;
        super::parser::parse_page_response(result)
    }

    async fn retrieve_children(
        &self,
        parent: &NotionId,
        page_size: Option<usize>,
    ) -> Result<Vec<Block>, AppError> {
        let endpoint = match page_size {
            Some(size) => format!("blocks/{}/children?page_size={}", parent.to_hyphenated(), size),
            None => format!("blocks/{}/children", parent.to_hyphenated()),
        };
        let response = self.get(&endpoint).await?;
        let result = extract_response_text(response).await?;
        let page = super::parser::parse_blocks_pagination(result)?;
        if page.has_more {
            log::debug!(
                "Children of {} continue past the first page; remaining blocks are not read",
                parent
            );
        }
        Ok(page.results)
    }

    async fn search_pages(&self, query: Option<&str>) -> Result<Vec<PageMetadata>, AppError> {
        let mut body = serde_json::json!({
            "filter": { "value": "page", "property": "object" },
            "page_size": NOTION_API_PAGE_SIZE,
        });
        if let Some(query) = query.filter(|q| !q.trim().is_empty()) {
            body["query"] = serde_json::json!(query.trim());
        }
        let response = self.post("search", &body).await?;
        let result = extract_response_text(response).await?;
        Ok(super::parser::parse_pages_pagination(result)?.results)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
