// src/server/mod.rs
//! HTTP surface of the import service.
//!
//! Every endpoint answers with the `{success, ...}` envelope and accepts a
//! bare `OPTIONS` request with an empty 200. CORS headers are added to all
//! responses.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::pipeline::NotionImport;

pub mod healthz;
pub mod import;
pub mod not_found;
mod response;

pub use response::{ApiError, ApiResponse, ImportResponse, PagesResponse};

#[derive(Clone)]
pub struct ApiState {
    pub import: NotionImport,
}

impl ApiState {
    pub fn new(import: NotionImport) -> Self {
        Self { import }
    }
}

/// Builds the service router.
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route(
            "/notion-import",
            post(import::post_import).options(preflight),
        )
        .route(
            "/notion-pages",
            post(import::post_pages).options(preflight),
        )
        .route("/healthz", get(healthz::get_health).options(preflight))
        .fallback(not_found::get_404)
        .with_state(state)
        .layer(CorsLayer::permissive())
}

async fn preflight() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}
