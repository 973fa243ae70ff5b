// src/formatting/title.rs
//! Title resolution for imported pages.

use crate::constants::TITLE_PREVIEW_CHARS;
use crate::model::{Block, PageMetadata};
use chrono::NaiveDate;

/// Resolves a non-empty title for a page.
///
/// Tiers, first non-empty wins:
/// 1. the `title`-typed property named `title`
/// 2. the `title`-typed property named `Name`
/// 3. the first `title`-typed property in page order
/// 4. the text of the first top-level `heading_1`
/// 5. the first top-level paragraph, cut to 40 characters plus `...`
/// 6. `Notion Page (<today>)`
pub fn resolve_title(metadata: &PageMetadata, blocks: &[Block], today: NaiveDate) -> String {
    property_title(metadata)
        .or_else(|| first_heading_title(blocks))
        .or_else(|| first_paragraph_title(blocks))
        .unwrap_or_else(|| fallback_title(today))
}

/// Tiers 1 to 3: a title taken from the page's own properties.
pub fn property_title(metadata: &PageMetadata) -> Option<String> {
    let named = |name: &str| {
        metadata
            .properties
            .get(name)
            .and_then(|property| property.title_text())
            .filter(|text| !text.is_empty())
    };

    named("title").or_else(|| named("Name")).or_else(|| {
        metadata
            .properties
            .values()
            .filter(|property| property.is_title())
            .find_map(|property| property.title_text().filter(|text| !text.is_empty()))
    })
}

fn first_heading_title(blocks: &[Block]) -> Option<String> {
    blocks.iter().find_map(|block| match block {
        Block::Heading(heading) if heading.level == 1 => {
            Some(heading.content.plain_text()).filter(|text| !text.is_empty())
        }
        _ => None,
    })
}

fn first_paragraph_title(blocks: &[Block]) -> Option<String> {
    blocks.iter().find_map(|block| match block {
        Block::Paragraph(paragraph) => {
            let text = paragraph.content.plain_text();
            let text = text.trim();
            (!text.is_empty()).then(|| preview(text))
        }
        _ => None,
    })
}

fn preview(text: &str) -> String {
    if text.chars().count() > TITLE_PREVIEW_CHARS {
        let cut: String = text.chars().take(TITLE_PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

fn fallback_title(today: NaiveDate) -> String {
    format!("Notion Page ({})", today.format("%-m/%-d/%Y"))
}
