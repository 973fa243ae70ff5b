// src/api/adapter.rs
//! Adapter layer from raw Notion block JSON to the domain [`Block`] type.
//!
//! Notion tags each block with `type` and nests the kind-specific payload
//! under a key of the same name. The raw shape is decoded generically, then
//! dispatched on the tag into a closed set of variants; anything unknown
//! becomes [`Block::Unsupported`] carrying the original tag.

use crate::error::AppError;
use crate::model::blocks::*;
use crate::model::common::{BlockCommon, Children, RichTextItem};
use crate::model::Block;
use crate::types::BlockId;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A block object exactly as Notion sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBlock {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// The union of payload fields the converter consumes.
#[derive(Debug, Default, Deserialize)]
struct RawContent {
    #[serde(default)]
    rich_text: Vec<RichTextItem>,
    #[serde(default)]
    checked: Option<bool>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    icon: Option<Value>,
    #[serde(default)]
    title: Option<String>,
}

/// Convert a batch of raw blocks, preserving order
pub fn convert_blocks(raw: Vec<RawBlock>) -> Result<Vec<Block>, AppError> {
    raw.into_iter().map(convert_block).collect()
}

/// Convert a single raw block into the domain model
pub fn convert_block(mut raw: RawBlock) -> Result<Block, AppError> {
    let content = take_content(&mut raw)?;
    let common = BlockCommon {
        id: raw.id,
        has_children: raw.has_children,
        children: Children::NotFetched,
    };
    let text = TextBlockContent::new(content.rich_text);

    let block = match raw.kind.as_str() {
        "paragraph" => Block::Paragraph(ParagraphBlock {
            common,
            content: text,
        }),
        "heading_1" | "heading_2" | "heading_3" => Block::Heading(HeadingBlock {
            common,
            level: heading_level(&raw.kind),
            content: text,
        }),
        "bulleted_list_item" => Block::BulletedListItem(BulletedListItemBlock {
            common,
            content: text,
        }),
        "numbered_list_item" => Block::NumberedListItem(NumberedListItemBlock {
            common,
            content: text,
        }),
        "to_do" => Block::ToDo(ToDoBlock {
            common,
            content: text,
            checked: content.checked.unwrap_or(false),
        }),
        "toggle" => Block::Toggle(ToggleBlock {
            common,
            content: text,
        }),
        "child_page" => Block::ChildPage(ChildPageBlock {
            common,
            title: content.title.unwrap_or_default(),
        }),
        "quote" => Block::Quote(QuoteBlock {
            common,
            content: text,
        }),
        "code" => Block::Code(CodeBlock {
            common,
            language: content.language.filter(|l| !l.trim().is_empty()),
            content: text,
        }),
        "divider" => Block::Divider(DividerBlock { common }),
        "callout" => Block::Callout(CalloutBlock {
            common,
            emoji: content.icon.as_ref().and_then(emoji_of),
            content: text,
        }),
        "table" => Block::Table(TableBlock { common }),
        "column_list" => Block::ColumnList(ColumnListBlock { common }),
        _ => Block::Unsupported(UnsupportedBlock {
            common,
            kind: raw.kind,
        }),
    };

    Ok(block)
}

/// Pull the payload stored under the block's own `type` key.
fn take_content(raw: &mut RawBlock) -> Result<RawContent, AppError> {
    match raw.payload.remove(&raw.kind) {
        Some(Value::Object(map)) => serde_json::from_value(Value::Object(map)).map_err(|e| {
            AppError::MalformedResponse(format!(
                "Block {} has an invalid {} payload: {}",
                raw.id, raw.kind, e
            ))
        }),
        _ => Ok(RawContent::default()),
    }
}

fn heading_level(kind: &str) -> u8 {
    match kind {
        "heading_1" => 1,
        "heading_2" => 2,
        _ => 3,
    }
}

/// The emoji of an `{"type": "emoji", "emoji": "💡"}` icon object
fn emoji_of(icon: &Value) -> Option<String> {
    icon.get("emoji")
        .and_then(Value::as_str)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
}
