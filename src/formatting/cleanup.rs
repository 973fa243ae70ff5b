// src/formatting/cleanup.rs
//! Post-processing pass over an assembled document.
//!
//! The pass is an ordered list of independent rewrite rules. Each rule sees
//! the output of the one before it, so the order in [`CLEANUP_RULES`] is part
//! of the contract. Running the whole pass on its own output changes nothing.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EXCESS_NEWLINES: Regex = Regex::new(r"\n{3,}").unwrap();
    static ref BULLET_MARKER: Regex = Regex::new(r"(?m)^([ \t]*)[-*•][ \t]+").unwrap();
    static ref LINE_BEFORE_HEADING: Regex = Regex::new(r"([^\n])\n([ \t]*#{1,6} )").unwrap();
    static ref LINE_AFTER_HEADING: Regex =
        Regex::new(r"(?m)^([ \t]*#{1,6} [^\n]*)\n([^\n])").unwrap();
    static ref SPACE_RUN: Regex = Regex::new(r" {2,}").unwrap();
}

/// One named rewrite step of the cleanup pass.
#[derive(Clone, Copy)]
pub struct CleanupRule {
    pub name: &'static str,
    apply: fn(&str) -> String,
}

impl CleanupRule {
    pub fn apply(&self, text: &str) -> String {
        (self.apply)(text)
    }
}

impl std::fmt::Debug for CleanupRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CleanupRule").field("name", &self.name).finish()
    }
}

/// The rules in the order they run.
pub const CLEANUP_RULES: [CleanupRule; 7] = [
    CleanupRule {
        name: "collapse_blank_lines",
        apply: collapse_blank_lines,
    },
    CleanupRule {
        name: "normalize_bullets",
        apply: normalize_bullets,
    },
    CleanupRule {
        name: "blank_line_before_heading",
        apply: blank_line_before_heading,
    },
    CleanupRule {
        name: "blank_line_after_heading",
        apply: blank_line_after_heading,
    },
    CleanupRule {
        name: "separate_paragraph_lines",
        apply: separate_paragraph_lines,
    },
    CleanupRule {
        name: "collapse_spaces",
        apply: collapse_spaces,
    },
    CleanupRule {
        name: "trim",
        apply: trim,
    },
];

/// Runs every cleanup rule, in order, over `text`.
pub fn tidy_markdown(text: &str) -> String {
    CLEANUP_RULES
        .iter()
        .fold(text.to_string(), |current, rule| rule.apply(&current))
}

/// `\n\n\n+` becomes exactly `\n\n`.
fn collapse_blank_lines(text: &str) -> String {
    EXCESS_NEWLINES.replace_all(text, "\n\n").into_owned()
}

/// A leading `-`, `*` or `•` followed by whitespace becomes `• `; indentation is kept.
fn normalize_bullets(text: &str) -> String {
    BULLET_MARKER.replace_all(text, "${1}• ").into_owned()
}

/// A heading line directly under a non-empty line gets a blank line above it.
fn blank_line_before_heading(text: &str) -> String {
    LINE_BEFORE_HEADING
        .replace_all(text, "${1}\n\n${2}")
        .into_owned()
}

/// A heading line directly followed by a non-empty line gets a blank line below it.
fn blank_line_after_heading(text: &str) -> String {
    LINE_AFTER_HEADING
        .replace_all(text, "${1}\n\n${2}")
        .into_owned()
}

/// Two adjacent non-empty lines are split by a blank line unless the second
/// starts with `#`, `•` or whitespace.
fn separate_paragraph_lines(text: &str) -> String {
    let mut output = String::with_capacity(text.len() + text.len() / 8);
    let mut previous_non_empty = false;

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            let continues = line.starts_with(&['#', '•'][..]) || line.starts_with(char::is_whitespace);
            if previous_non_empty && !line.is_empty() && !continues {
                output.push('\n');
            }
            output.push('\n');
        }
        output.push_str(line);
        previous_non_empty = !line.is_empty();
    }

    output
}

/// Runs of two or more spaces become one.
fn collapse_spaces(text: &str) -> String {
    SPACE_RUN.replace_all(text, " ").into_owned()
}

fn trim(text: &str) -> String {
    text.trim().to_string()
}
