// src/store/mod.rs
//! The notes collaborator store.
//!
//! Owns durable state the import reads and writes: each user's Notion access
//! token and the notes filed into projects.

mod supabase;

pub use supabase::SupabaseStore;

use crate::constants::IMPORTED_NOTE_TAGS;
use crate::error::AppError;
use crate::model::{ImportedDocument, Provenance};
use crate::types::{AccessToken, ProjectId, UserId};
use serde::{Deserialize, Serialize};

/// Durable storage used by the import.
#[async_trait::async_trait]
pub trait NotesStore: Send + Sync {
    /// The user's Notion access token, `None` when they never connected.
    async fn notion_access_token(&self, user: &UserId) -> Result<Option<AccessToken>, AppError>;

    /// Inserts one note and returns the stored row.
    async fn insert_note(&self, note: NewNote) -> Result<PersistedNote, AppError>;
}

/// A note row about to be inserted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewNote {
    pub project_id: ProjectId,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub source_metadata: Provenance,
}

impl NewNote {
    /// Files an imported document under a project, tagged as a Notion import.
    pub fn imported(document: ImportedDocument, project_id: ProjectId, user_id: UserId) -> Self {
        Self {
            project_id,
            user_id,
            title: document.title,
            content: document.body,
            tags: IMPORTED_NOTE_TAGS.iter().map(|tag| tag.to_string()).collect(),
            source_metadata: document.provenance,
        }
    }
}

/// A note row as returned by the store.
///
/// Columns the import does not know about are kept in `extra` so the row
/// reaches the caller intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedNote {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub source_metadata: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
