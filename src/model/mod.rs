mod block;
pub mod blocks;
pub mod common;

pub use block::Block;
pub use blocks::*;
pub use common::*;

use crate::constants::NOTION_SOURCE_TYPE;
use crate::types::PageId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A Notion page's metadata object (`GET /v1/pages/{id}`).
///
/// Properties keep the order in which Notion sent them, which is what the
/// "first title-typed property" title rule relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub id: PageId,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub last_edited_time: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub properties: IndexMap<String, PageProperty>,
}

/// One entry of a page's `properties` map. Only `title` payloads are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageProperty {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Vec<RichTextItem>>,
}

impl PageProperty {
    /// Builds a `title`-typed property from plain runs.
    pub fn title(runs: Vec<RichTextItem>) -> Self {
        Self {
            id: Some("title".to_string()),
            property_type: "title".to_string(),
            title: Some(runs),
        }
    }

    pub fn is_title(&self) -> bool {
        self.property_type == "title"
    }

    /// The concatenated text of a `title` property, `None` for other types.
    pub fn title_text(&self) -> Option<String> {
        if !self.is_title() {
            return None;
        }
        self.title.as_deref().map(plain_text)
    }
}

/// Where an imported document came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    #[serde(rename = "type")]
    pub source_type: String,
    pub url: String,
    pub name: String,
    pub id: String,
}

impl Provenance {
    pub fn notion(url: impl Into<String>, name: impl Into<String>, page_id: &PageId) -> Self {
        Self {
            source_type: NOTION_SOURCE_TYPE.to_string(),
            url: url.into(),
            name: name.into(),
            id: page_id.as_str().to_string(),
        }
    }
}

/// The converted page, ready to be filed as a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedDocument {
    pub title: String,
    pub body: String,
    pub provenance: Provenance,
}
