// src/api/fetcher.rs
//! Recursive retrieval of a page and its block tree.
//!
//! Requests are issued one at a time in document order. Only the top-level
//! listing is fatal when it fails; a failed nested listing is recorded on
//! the parent block as [`Children::Failed`] and the walk carries on.

use super::NotionRepository;
use crate::constants::{NOTION_API_PAGE_SIZE, NOTION_MAX_FETCH_DEPTH};
use crate::error::AppError;
use crate::model::{Block, Children, PageMetadata};
use crate::types::NotionId;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;

/// Counters gathered while walking one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// HTTP requests issued, page metadata included.
    pub requests: usize,
    pub blocks_fetched: usize,
    /// Deepest nesting level holding at least one block (top level is 0).
    pub deepest_level: usize,
    /// Blocks whose children could not be loaded.
    pub nested_failures: usize,
}

/// A page's metadata together with its fully resolved block tree.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub metadata: PageMetadata,
    pub blocks: Vec<Block>,
    pub stats: FetchStats,
}

/// Sequential, depth-first fetcher over a [`NotionRepository`].
pub struct NotionFetcher {
    client: Arc<dyn NotionRepository>,
    max_depth: usize,
}

impl NotionFetcher {
    pub fn new(client: Arc<dyn NotionRepository>) -> Self {
        Self {
            client,
            max_depth: NOTION_MAX_FETCH_DEPTH,
        }
    }

    /// Caps how deep the walk descends before children are given up on.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Fetches page metadata and the block tree beneath it.
    ///
    /// Fails only when the page itself or its first page of top-level blocks
    /// cannot be read.
    pub async fn fetch_page(&self, page_id: &NotionId) -> Result<FetchedPage, AppError> {
        let mut stats = FetchStats::default();

        let metadata = self.client.retrieve_page(page_id).await?;
        stats.requests += 1;

        let top_level = self
            .client
            .retrieve_children(page_id, Some(NOTION_API_PAGE_SIZE))
            .await?;
        stats.requests += 1;
        stats.blocks_fetched += top_level.len();
        log::debug!("Fetched {} top-level blocks for page {}", top_level.len(), page_id);

        let blocks = self.resolve_children(top_level, 0, &mut stats).await;

        log::info!(
            "Fetched page {}: {} blocks in {} requests (depth {}, {} nested failures)",
            page_id,
            stats.blocks_fetched,
            stats.requests,
            stats.deepest_level,
            stats.nested_failures
        );

        Ok(FetchedPage {
            metadata,
            blocks,
            stats,
        })
    }

    /// Resolves the children of every block in `blocks`, which sit at `level`.
    fn resolve_children<'a>(
        &'a self,
        blocks: Vec<Block>,
        level: usize,
        stats: &'a mut FetchStats,
    ) -> BoxFuture<'a, Vec<Block>> {
        async move {
            if !blocks.is_empty() {
                stats.deepest_level = stats.deepest_level.max(level);
            }

            let mut resolved = Vec::with_capacity(blocks.len());
            for block in blocks {
                if !block.has_children() {
                    resolved.push(block);
                    continue;
                }

                if level + 1 > self.max_depth {
                    log::warn!(
                        "Not descending into block {}: depth limit {} reached",
                        block.id(),
                        self.max_depth
                    );
                    stats.nested_failures += 1;
                    let reason = format!("depth limit {} reached", self.max_depth);
                    resolved.push(block.with_children(Children::Failed { reason }));
                    continue;
                }

                let parent = NotionId::from(block.id());
                stats.requests += 1;
                match self.client.retrieve_children(&parent, None).await {
                    Ok(children) => {
                        log::debug!(
                            "Fetched {} children for block {} at level {}",
                            children.len(),
                            parent,
                            level + 1
                        );
                        stats.blocks_fetched += children.len();
                        let children = self.resolve_children(children, level + 1, stats).await;
                        resolved.push(block.with_children(Children::Loaded(children)));
                    }
                    Err(e) => {
                        log::warn!("Failed to fetch children of block {}: {}", parent, e);
                        stats.nested_failures += 1;
                        resolved.push(block.with_children(Children::Failed {
                            reason: e.to_string(),
                        }));
                    }
                }
            }
            resolved
        }
        .boxed()
    }
}
