// src/constants.rs
//! Domain constants that define the operational boundaries of the import.
//!
//! Each constant is named for the domain concept it constrains. Reading them
//! top to bottom tells you how a page is fetched, rendered and filed.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// The `Notion-Version` header sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Base URL of the public Notion REST API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// How many objects the Notion API returns per page of results.
///
/// Only the first page of a page's top-level children is read.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Default nesting depth at which the recursive fetch stops descending.
///
/// Notion itself puts no bound on block nesting; 50 levels is far deeper
/// than any real document.
pub const NOTION_MAX_FETCH_DEPTH: usize = 50;

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Number of spaces per nesting level in converted text.
pub const INDENT_SPACES: usize = 2;

/// Paragraph-derived titles are cut to this many characters.
pub const TITLE_PREVIEW_CHARS: usize = 40;

/// Emitted in place of children that could not be loaded.
pub const NESTED_CONTENT_ERROR: &str = "*[Error loading nested content]*";

/// Estimated characters per block, used to pre-allocate output strings.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 256;

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

/// Tags attached to every imported note.
pub const IMPORTED_NOTE_TAGS: [&str; 3] = ["notion", "imported", "notion-import"];

/// Provenance `type` recorded on imported notes.
pub const NOTION_SOURCE_TYPE: &str = "notion";

/// Table holding the notes of a project.
pub const NOTES_TABLE: &str = "project_notes";

/// Table holding each user's Notion OAuth connection.
pub const NOTION_CONNECTIONS_TABLE: &str = "notion_connections";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing unparseable response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
