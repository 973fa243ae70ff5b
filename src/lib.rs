// src/lib.rs
//! notion-import library: imports Notion pages into project notes.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `NotionErrorCode`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `ServiceConfig`
//! - **Domain model**: `Block`, `Children`, `PageMetadata`, `ImportedDocument`
//! - **Domain types**: `NotionId`, `PageId`, `BlockId`, `AccessToken`, `UserId`, `ProjectId`
//! - **API client**: `NotionRepository`, `NotionHttpClient`, `NotionFetcher`
//! - **Formatting**: `resolve_title`, `convert_blocks`, `tidy_markdown`
//! - **Store**: `NotesStore`, `SupabaseStore`
//! - **Pipeline**: `NotionImport` and its request types
//! - **Server**: `build_router`, `ApiState`

mod analytics;
pub mod api;
mod config;
mod constants;
mod error;
pub mod formatting;
pub mod model;
mod pipeline;
pub mod server;
pub mod store;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, ServiceConfig};

// --- Domain Model ---
pub use crate::model::{
    Block, BlockCommon, Children, ImportedDocument, PageMetadata, PageProperty, Provenance,
    RichTextItem,
};

// --- Block Types ---
pub use crate::model::blocks::{
    BulletedListItemBlock, CalloutBlock, ChildPageBlock, CodeBlock, ColumnListBlock,
    DividerBlock, HeadingBlock, NumberedListItemBlock, ParagraphBlock, QuoteBlock, TableBlock,
    TextBlockContent, ToDoBlock, ToggleBlock, UnsupportedBlock,
};

// --- Domain Types ---
pub use crate::types::{
    AccessToken, BlockId, NotionId, PageId, ProjectId, UserId, ValidatedUrl,
};

// --- API Client ---
pub use crate::api::{
    FetchStats, FetchedPage, HttpNotionConnector, NotionConnector, NotionFetcher,
    NotionHttpClient, NotionRepository,
};

// --- Formatting ---
pub use crate::formatting::{
    compose_document, convert_block, convert_blocks, resolve_title, tidy_markdown,
};

// --- Analytics ---
pub use crate::analytics::{measure_content, ContentSummary};

// --- Store ---
pub use crate::store::{NewNote, NotesStore, PersistedNote, SupabaseStore};

// --- Pipeline ---
pub use crate::pipeline::{
    ContentSource, DocumentComposer, ImportOutcome, ImportRequest, NoteDelivery, NotionImport,
    PageListRequest, PageSummary, ValidImportRequest,
};

// --- Server ---
pub use crate::server::{build_router, ApiState};

// --- Constants ---
pub use crate::constants::{NOTION_API_BASE_URL, NOTION_MAX_FETCH_DEPTH, NOTION_VERSION};
