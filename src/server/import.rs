use axum::{body::Bytes, extract::State, Json};
use serde::de::DeserializeOwned;

use super::response::{ApiResponse, ImportResponse, IntoApiResponse, PagesResponse};
use super::ApiState;
use crate::error::AppError;
use crate::pipeline::{ImportRequest, PageListRequest};

/// Import a Notion page into a project as a note
pub async fn post_import(
    State(state): State<ApiState>,
    body: Bytes,
) -> ApiResponse<Json<ImportResponse>> {
    let request: ImportRequest = parse_body(&body).into_api_response("Rejected import request")?;

    let outcome = state
        .import
        .import(request)
        .await
        .into_api_response("Notion import failed")?;

    Ok(Json(ImportResponse {
        success: true,
        message: outcome.message(),
        note: outcome.note,
    }))
}

/// List the Notion pages a user can import
pub async fn post_pages(
    State(state): State<ApiState>,
    body: Bytes,
) -> ApiResponse<Json<PagesResponse>> {
    let request: PageListRequest =
        parse_body(&body).into_api_response("Rejected page list request")?;

    let pages = state
        .import
        .list_pages(request)
        .await
        .into_api_response("Listing Notion pages failed")?;

    Ok(Json(PagesResponse {
        success: true,
        pages,
    }))
}

/// Decodes a JSON body; an empty body reads as `{}`.
fn parse_body<T>(body: &[u8]) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid JSON body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_reads_as_empty_request() {
        let request: ImportRequest = parse_body(b"  ").unwrap();
        assert!(request.user_id.is_none());
    }

    #[test]
    fn malformed_json_is_a_validation_error() {
        let err = parse_body::<ImportRequest>(b"{not json").unwrap_err();
        assert!(err.to_string().starts_with("Invalid JSON body"));
    }
}
