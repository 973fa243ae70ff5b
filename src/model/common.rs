use super::Block;
use crate::types::BlockId;
use serde::{Deserialize, Serialize};

/// A styled run of text. Only the plain text is consumed downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextItem {
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
}

impl RichTextItem {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
            href: None,
        }
    }
}

/// Concatenates runs in order with no separator.
pub fn plain_text(items: &[RichTextItem]) -> String {
    items.iter().map(|item| item.plain_text.as_str()).collect()
}

/// What is known about a block's children after the fetch stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Children {
    /// The block reports no children, or nobody asked for them yet.
    #[default]
    NotFetched,
    /// Children in document order.
    Loaded(Vec<Block>),
    /// The nested fetch failed; the reason is kept for logs only.
    Failed { reason: String },
}

impl Children {
    pub fn blocks(&self) -> &[Block] {
        match self {
            Children::Loaded(blocks) => blocks,
            _ => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Children::Failed { .. })
    }
}

/// Common fields for all blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockCommon {
    pub id: BlockId,
    pub has_children: bool,
    pub children: Children,
}

impl BlockCommon {
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            has_children: false,
            children: Children::NotFetched,
        }
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.has_children = !children.is_empty();
        self.children = Children::Loaded(children);
        self
    }

    /// Marks the block as having children whose fetch failed.
    pub fn with_failed_children(mut self, reason: impl Into<String>) -> Self {
        self.has_children = true;
        self.children = Children::Failed {
            reason: reason.into(),
        };
        self
    }
}

impl Default for BlockCommon {
    fn default() -> Self {
        Self::new(BlockId::new_v4())
    }
}
