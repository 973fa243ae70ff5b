// src/pipeline.rs
//! Pipeline capability traits and the import orchestration built on them.
//!
//! An import runs three stages: fetch the page tree, compose a document from
//! it, deliver the document to the notes store. Each stage is a trait so it
//! can be exercised in isolation.

use crate::analytics::measure_content_detailed;
use crate::api::{FetchStats, FetchedPage, NotionConnector, NotionFetcher, NotionRepository};
use crate::constants::NOTION_MAX_FETCH_DEPTH;
use crate::error::AppError;
use crate::formatting::{compose_document, property_title};
use crate::model::{ImportedDocument, PageMetadata};
use crate::store::{NewNote, NotesStore, PersistedNote};
use crate::types::{NotionId, PageId, ProjectId, UserId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Retrieves a page and its block tree.
#[async_trait::async_trait]
pub trait ContentSource {
    async fn fetch(&self, id: &NotionId) -> Result<FetchedPage, AppError>;
}

/// Transforms a fetched page into an importable document.
pub trait DocumentComposer {
    fn compose(&self, page: &FetchedPage) -> Result<ImportedDocument, AppError>;
}

/// Files a document as a note.
#[async_trait::async_trait]
pub trait NoteDelivery {
    async fn deliver(&self, document: ImportedDocument) -> Result<PersistedNote, AppError>;
}

// --- Requests ---

const MISSING_IMPORT_PARAMETERS: &str = "Missing required parameters: userId, pageId, and projectId";
const MISSING_USER_ID: &str = "Missing required parameter: userId";

/// Body of an import request as the caller sent it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub user_id: Option<String>,
    pub page_id: Option<String>,
    pub project_id: Option<String>,
}

/// An import request with every field present and parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidImportRequest {
    pub user_id: UserId,
    pub page_id: NotionId,
    pub project_id: ProjectId,
}

impl ImportRequest {
    /// Checks every field is present, then parses the page reference.
    ///
    /// `pageId` may be a bare id, a dashed UUID or a Notion page URL.
    pub fn validate(self) -> Result<ValidImportRequest, AppError> {
        let present = |field: Option<String>| field.filter(|value| !value.trim().is_empty());

        match (
            present(self.user_id),
            present(self.page_id),
            present(self.project_id),
        ) {
            (Some(user_id), Some(page_id), Some(project_id)) => Ok(ValidImportRequest {
                user_id: UserId::new(user_id)?,
                page_id: NotionId::parse(page_id.trim())?,
                project_id: ProjectId::new(project_id)?,
            }),
            _ => Err(AppError::Validation(MISSING_IMPORT_PARAMETERS.to_string())),
        }
    }
}

/// Body of a page-picker request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageListRequest {
    pub user_id: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
}

impl PageListRequest {
    pub fn user(&self) -> Result<UserId, AppError> {
        let value = self
            .user_id
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| AppError::Validation(MISSING_USER_ID.to_string()))?;
        Ok(UserId::new(value)?)
    }
}

// --- Results ---

/// The outcome of one successful import.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub title: String,
    pub note: PersistedNote,
    pub stats: FetchStats,
}

impl ImportOutcome {
    /// Human-readable confirmation for the caller.
    pub fn message(&self) -> String {
        format!("Successfully imported \"{}\" from Notion", self.title)
    }
}

/// One entry of the page picker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub id: String,
    pub title: String,
    pub url: String,
    pub last_edited_time: Option<String>,
}

impl From<&PageMetadata> for PageSummary {
    fn from(page: &PageMetadata) -> Self {
        Self {
            id: NotionId::from(&page.id).to_hyphenated(),
            title: property_title(page).unwrap_or_else(|| "Untitled".to_string()),
            url: page.url.clone(),
            last_edited_time: page.last_edited_time.clone(),
        }
    }
}

// --- Orchestration ---

/// Runs imports against the notes store and Notion on behalf of users.
#[derive(Clone)]
pub struct NotionImport {
    store: Arc<dyn NotesStore>,
    notion: Arc<dyn NotionConnector>,
    max_depth: usize,
}

impl NotionImport {
    pub fn new(store: Arc<dyn NotesStore>, notion: Arc<dyn NotionConnector>) -> Self {
        Self {
            store,
            notion,
            max_depth: NOTION_MAX_FETCH_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Imports one page into a project: fetch, compose, deliver.
    pub async fn import(&self, request: ImportRequest) -> Result<ImportOutcome, AppError> {
        let request = request.validate()?;
        log::info!(
            "Importing Notion page {} into project {} for user {}",
            request.page_id,
            request.project_id,
            request.user_id
        );

        let repository = self.connect(&request.user_id).await?;
        let session = ImportSession {
            fetcher: NotionFetcher::new(repository).with_max_depth(self.max_depth),
            store: self.store.as_ref(),
            page_id: PageId::from(&request.page_id),
            user_id: &request.user_id,
            project_id: &request.project_id,
        };

        let page = session.fetch(&request.page_id).await?;
        let document = session.compose(&page)?;
        let title = document.title.clone();
        let note = session.deliver(document).await?;

        let stats = page.stats;
        log::info!(
            "Imported '{}' as note {} ({} blocks, depth {}, {} nested failures)",
            title,
            note.id,
            stats.blocks_fetched,
            stats.deepest_level,
            stats.nested_failures
        );

        Ok(ImportOutcome { title, note, stats })
    }

    /// Lists the pages shared with the user's Notion integration.
    pub async fn list_pages(&self, request: PageListRequest) -> Result<Vec<PageSummary>, AppError> {
        let user_id = request.user()?;
        let repository = self.connect(&user_id).await?;

        let pages = repository.search_pages(request.query.as_deref()).await?;
        log::info!("Found {} Notion pages for user {}", pages.len(), user_id);

        Ok(pages
            .iter()
            .filter(|page| !page.archived)
            .map(PageSummary::from)
            .collect())
    }

    /// Opens Notion with the user's stored access token.
    async fn connect(&self, user_id: &UserId) -> Result<Arc<dyn NotionRepository>, AppError> {
        let token = self
            .store
            .notion_access_token(user_id)
            .await?
            .ok_or_else(|| AppError::ConnectionNotFound {
                user_id: user_id.to_string(),
            })?;
        log::debug!("Using Notion token {} for user {}", token, user_id);
        self.notion.connect(&token)
    }
}

/// The per-request state of one import.
struct ImportSession<'a> {
    fetcher: NotionFetcher,
    store: &'a dyn NotesStore,
    page_id: PageId,
    user_id: &'a UserId,
    project_id: &'a ProjectId,
}

#[async_trait::async_trait]
impl ContentSource for ImportSession<'_> {
    async fn fetch(&self, id: &NotionId) -> Result<FetchedPage, AppError> {
        let page = self.fetcher.fetch_page(id).await?;

        if log::log_enabled!(log::Level::Debug) {
            let detailed = measure_content_detailed(&page.blocks);
            log::debug!(
                "Block kinds for {}: {:?} ({} unsupported)",
                id,
                detailed.kinds,
                detailed.unsupported_blocks
            );
        }

        Ok(page)
    }
}

impl DocumentComposer for ImportSession<'_> {
    fn compose(&self, page: &FetchedPage) -> Result<ImportedDocument, AppError> {
        compose_document(page, &self.page_id, chrono::Local::now().date_naive())
    }
}

#[async_trait::async_trait]
impl NoteDelivery for ImportSession<'_> {
    async fn deliver(&self, document: ImportedDocument) -> Result<PersistedNote, AppError> {
        let note = NewNote::imported(document, self.project_id.clone(), self.user_id.clone());
        self.store.insert_note(note).await
    }
}
