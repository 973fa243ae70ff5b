// src/analytics/mod.rs
//! Content measurement for fetched block trees.

use crate::model::{Block, Children};
use std::collections::BTreeMap;

/// Quick statistics for the one-line import summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSummary {
    pub total_blocks: usize,
    pub deepest_nesting: usize,
    /// Branches rendered as the nested-content placeholder.
    pub failed_branches: usize,
}

/// Detailed breakdown for verbose logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentMeasurement {
    pub summary: ContentSummary,
    /// Block count per Notion `type` tag.
    pub kinds: BTreeMap<String, usize>,
    pub unsupported_blocks: usize,
}

/// Measures basic content statistics for a page's blocks.
pub fn measure_content(blocks: &[Block]) -> ContentSummary {
    ContentSummary {
        total_blocks: count_blocks(blocks),
        deepest_nesting: blocks_max_depth(blocks, 1),
        failed_branches: count_failed_branches(blocks),
    }
}

/// Measures detailed content metrics for a page's blocks.
pub fn measure_content_detailed(blocks: &[Block]) -> ContentMeasurement {
    let mut measurement = ContentMeasurement {
        summary: measure_content(blocks),
        ..Default::default()
    };
    walk_blocks(&mut measurement, blocks);
    measurement
}

/// Counts blocks recursively.
pub fn count_blocks(blocks: &[Block]) -> usize {
    blocks.len()
        + blocks
            .iter()
            .map(|b| count_blocks(b.children().blocks()))
            .sum::<usize>()
}

/// Gets the maximum depth of a block tree; an empty tree has depth 0.
pub fn blocks_max_depth(blocks: &[Block], current_depth: usize) -> usize {
    blocks
        .iter()
        .map(|block| {
            let children = block.children().blocks();
            if children.is_empty() {
                current_depth
            } else {
                blocks_max_depth(children, current_depth + 1)
            }
        })
        .max()
        .unwrap_or(current_depth.saturating_sub(1))
}

fn count_failed_branches(blocks: &[Block]) -> usize {
    blocks
        .iter()
        .map(|block| match block.children() {
            Children::Failed { .. } => 1,
            Children::Loaded(children) => count_failed_branches(children),
            Children::NotFetched => 0,
        })
        .sum()
}

fn walk_blocks(measurement: &mut ContentMeasurement, blocks: &[Block]) {
    for block in blocks {
        *measurement
            .kinds
            .entry(block.kind_name().to_string())
            .or_insert(0) += 1;
        if matches!(block, Block::Unsupported(_)) {
            measurement.unsupported_blocks += 1;
        }
        walk_blocks(measurement, block.children().blocks());
    }
}
