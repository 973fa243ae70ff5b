// src/api/mod.rs
//! Notion API interaction: the ability to read a user's pages.
//!
//! HTTP transport, response parsing, block adaptation and the recursive
//! tree fetch live in separate modules; business logic only ever sees the
//! [`NotionRepository`] trait.

pub mod adapter;
pub mod client;
pub mod fetcher;
pub mod parser;
mod responses;

use std::sync::Arc;

use crate::error::AppError;
use crate::model::{Block, PageMetadata};
use crate::types::{AccessToken, NotionId, ValidatedUrl};

/// The ability to read content from a Notion workspace.
///
/// Business logic depends on this trait, never on HTTP details.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    /// `GET /pages/{id}`
    async fn retrieve_page(&self, id: &NotionId) -> Result<PageMetadata, AppError>;

    /// `GET /blocks/{id}/children`, first page of results only.
    ///
    /// `page_size` is forwarded as a query parameter when given.
    async fn retrieve_children(
        &self,
        parent: &NotionId,
        page_size: Option<usize>,
    ) -> Result<Vec<Block>, AppError>;

    /// `POST /search` restricted to pages, first page of results only.
    async fn search_pages(&self, query: Option<&str>) -> Result<Vec<PageMetadata>, AppError>;
}

/// Opens a [`NotionRepository`] acting with a particular user's token.
pub trait NotionConnector: Send + Sync {
    fn connect(&self, token: &AccessToken) -> Result<Arc<dyn NotionRepository>, AppError>;
}

/// Connects to the Notion REST API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpNotionConnector {
    base_url: ValidatedUrl,
}

impl HttpNotionConnector {
    pub fn new(base_url: ValidatedUrl) -> Self {
        Self { base_url }
    }
}

impl NotionConnector for HttpNotionConnector {
    fn connect(&self, token: &AccessToken) -> Result<Arc<dyn NotionRepository>, AppError> {
        let client = NotionHttpClient::with_base_url(token, self.base_url.as_base())?;
        Ok(Arc::new(client))
    }
}

// Re-export the public interface
pub use client::{ApiResponse, NotionHttpClient};
pub use fetcher::{FetchStats, FetchedPage, NotionFetcher};
