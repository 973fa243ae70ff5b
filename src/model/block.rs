use super::blocks::*;
use super::common::{BlockCommon, Children};
use crate::types::BlockId;
use serde::{Deserialize, Serialize};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::ChildPage($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Divider($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::Table($pattern) => $result,
            Block::ColumnList($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

/// The Notion block kinds the import knows how to convert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Heading(HeadingBlock),
    BulletedListItem(BulletedListItemBlock),
    NumberedListItem(NumberedListItemBlock),
    ToDo(ToDoBlock),
    Toggle(ToggleBlock),
    ChildPage(ChildPageBlock),
    Quote(QuoteBlock),
    Code(CodeBlock),
    Divider(DividerBlock),
    Callout(CalloutBlock),
    Table(TableBlock),
    ColumnList(ColumnListBlock),
    Unsupported(UnsupportedBlock),
}

impl Block {
    /// Get the block's ID
    pub fn id(&self) -> &BlockId {
        match_all_blocks!(self, b => &b.common.id)
    }

    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    pub fn common_mut(&mut self) -> &mut BlockCommon {
        match_all_blocks!(self, b => &mut b.common)
    }

    /// Whether Notion reports nested content under this block
    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    /// Get the block's children as resolved by the fetch stage
    pub fn children(&self) -> &Children {
        &self.common().children
    }

    /// Replaces the resolved children, returning the block.
    pub fn with_children(mut self, children: Children) -> Self {
        self.common_mut().children = children;
        self
    }

    /// The Notion `type` tag of this block.
    pub fn kind_name(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading(h) => match h.level {
                1 => "heading_1",
                2 => "heading_2",
                _ => "heading_3",
            },
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Toggle(_) => "toggle",
            Block::ChildPage(_) => "child_page",
            Block::Quote(_) => "quote",
            Block::Code(_) => "code",
            Block::Divider(_) => "divider",
            Block::Callout(_) => "callout",
            Block::Table(_) => "table",
            Block::ColumnList(_) => "column_list",
            Block::Unsupported(b) => b.kind.as_str(),
        }
    }

    /// The block's own text, for kinds that carry a rich-text payload.
    pub fn text_content(&self) -> Option<&TextBlockContent> {
        match self {
            Block::Paragraph(b) => Some(&b.content),
            Block::Heading(b) => Some(&b.content),
            Block::BulletedListItem(b) => Some(&b.content),
            Block::NumberedListItem(b) => Some(&b.content),
            Block::ToDo(b) => Some(&b.content),
            Block::Toggle(b) => Some(&b.content),
            Block::Quote(b) => Some(&b.content),
            Block::Code(b) => Some(&b.content),
            Block::Callout(b) => Some(&b.content),
            Block::ChildPage(_)
            | Block::Divider(_)
            | Block::Table(_)
            | Block::ColumnList(_)
            | Block::Unsupported(_) => None,
        }
    }
}
