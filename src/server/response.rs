use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::error::AppError;
use crate::pipeline::PageSummary;
use crate::store::PersistedNote;

/// A failed request; always rendered as `400 {success: false, error}`.
#[derive(Debug)]
pub struct ApiError(pub String);

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorBody {
            success: false,
            error: &self.0,
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        ApiError(error.to_string())
    }
}

pub type ApiResponse<T> = Result<T, ApiError>;

pub(super) trait IntoApiResponse<T> {
    /// Logs the failure with `context`, then converts it for the caller.
    fn into_api_response(self, context: &str) -> ApiResponse<T>;
}

impl<T> IntoApiResponse<T> for Result<T, AppError> {
    fn into_api_response(self, context: &str) -> ApiResponse<T> {
        self.map_err(|e| {
            if e.is_client_error() {
                log::warn!("{}: {}", context, e);
            } else {
                log::error!("{}: {}", context, e);
            }
            ApiError::from(e)
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub note: PersistedNote,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct PagesResponse {
    pub success: bool,
    pub pages: Vec<PageSummary>,
}
