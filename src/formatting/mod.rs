// src/formatting/mod.rs
//! Turns a fetched block tree into an importable document.

pub mod cleanup;
pub mod convert;
pub mod title;

pub use cleanup::{tidy_markdown, CleanupRule, CLEANUP_RULES};
pub use convert::{convert_block, convert_blocks};
pub use title::{property_title, resolve_title};

use crate::api::FetchedPage;
use crate::error::AppError;
use crate::model::{ImportedDocument, Provenance};
use crate::types::PageId;
use chrono::NaiveDate;

/// Resolves the title, converts the tree and tidies the result.
///
/// `source` is the page id the caller asked for; it is recorded as the
/// note's provenance.
pub fn compose_document(
    page: &FetchedPage,
    source: &PageId,
    today: NaiveDate,
) -> Result<ImportedDocument, AppError> {
    let title = resolve_title(&page.metadata, &page.blocks, today);
    let converted = convert_blocks(&page.blocks)?;
    let body = tidy_markdown(&converted);

    log::debug!(
        "Composed '{}': {} converted bytes, {} after cleanup",
        title,
        converted.len(),
        body.len()
    );

    let provenance = Provenance::notion(page.metadata.url.clone(), title.clone(), source);
    Ok(ImportedDocument {
        title,
        body,
        provenance,
    })
}
