// src/formatting/convert.rs
//! Block-to-text conversion.
//!
//! Each block kind maps to one fixed fragment template, indented two spaces
//! per nesting level. Children are appended directly after their parent at
//! `level + 1`, in the order the fetch returned them.

use crate::constants::{CHARS_PER_BLOCK_ESTIMATE, INDENT_SPACES, NESTED_CONTENT_ERROR};
use crate::error::AppError;
use crate::model::{Block, Children};
use std::fmt::Write;

/// Converts a page's top-level blocks into one text document.
pub fn convert_blocks(blocks: &[Block]) -> Result<String, AppError> {
    let mut output = String::with_capacity(blocks.len() * CHARS_PER_BLOCK_ESTIMATE);
    for block in blocks {
        write_block(&mut output, block, 0)?;
    }
    log::debug!("Converted {} top-level blocks into {} bytes", blocks.len(), output.len());
    Ok(output)
}

/// Converts a single block, and everything beneath it, at `level`.
pub fn convert_block(block: &Block, level: usize) -> Result<String, AppError> {
    let mut output = String::with_capacity(CHARS_PER_BLOCK_ESTIMATE);
    write_block(&mut output, block, level)?;
    Ok(output)
}

fn write_block(out: &mut String, block: &Block, level: usize) -> Result<(), AppError> {
    let indent = " ".repeat(level * INDENT_SPACES);
    let text = block
        .text_content()
        .map(|content| content.plain_text())
        .unwrap_or_default();

    match block {
        Block::Paragraph(_) => {
            if text.is_empty() {
                write!(out, "{}\n\n", indent)?;
            } else {
                write!(out, "{}{}\n\n", indent, text)?;
            }
        }
        Block::Heading(heading) if !text.is_empty() => {
            let marker = "#".repeat(usize::from(heading.level.clamp(1, 3)));
            write!(out, "{}{} {}\n\n", indent, marker, text)?;
        }
        Block::BulletedListItem(_) if !text.is_empty() => {
            writeln!(out, "{}- {}", indent, text)?;
        }
        Block::NumberedListItem(_) if !text.is_empty() => {
            writeln!(out, "{}1. {}", indent, text)?;
        }
        Block::ToDo(todo) if !text.is_empty() => {
            let mark = if todo.checked { "x" } else { " " };
            writeln!(out, "{}- [{}] {}", indent, mark, text)?;
        }
        Block::Toggle(_) if !text.is_empty() => {
            write!(out, "{}**Toggle: {}**\n\n", indent, text)?;
        }
        Block::ChildPage(child) if !child.title.is_empty() => {
            write!(out, "{}**Child Page: {}**\n\n", indent, child.title)?;
        }
        Block::Quote(_) if !text.is_empty() => {
            write!(out, "{}> {}\n\n", indent, text)?;
        }
        Block::Code(code) if !text.is_empty() => {
            let language = code
                .language
                .as_deref()
                .filter(|lang| *lang != "plain text")
                .unwrap_or("");
            write!(
                out,
                "{indent}```{language}\n{text}\n{indent}```\n\n",
                indent = indent,
                language = language,
                text = text
            )?;
        }
        Block::Divider(_) => {
            write!(out, "{}---\n\n", indent)?;
        }
        Block::Callout(callout) if !text.is_empty() => {
            let emoji = callout.emoji.as_deref().unwrap_or_default();
            write!(out, "{}> {}**Callout:** {}\n\n", indent, emoji, text)?;
        }
        Block::Table(_) => {
            write!(out, "{}[Table content - not fully supported]\n\n", indent)?;
        }
        Block::ColumnList(_) => {
            write!(out, "{}[Column layout - not fully supported]\n\n", indent)?;
        }
        Block::Unsupported(unsupported) => {
            write!(
                out,
                "{}[{} block type not supported]\n\n",
                indent, unsupported.kind
            )?;
        }
        // Text-bearing kinds with no text emit nothing of their own.
        _ => {}
    }

    match block.children() {
        Children::Loaded(children) => {
            for child in children {
                write_block(out, child, level + 1)?;
            }
        }
        Children::Failed { .. } => {
            let child_indent = " ".repeat((level + 1) * INDENT_SPACES);
            write!(out, "{}{}\n\n", child_indent, NESTED_CONTENT_ERROR)?;
        }
        Children::NotFetched => {}
    }

    Ok(())
}
