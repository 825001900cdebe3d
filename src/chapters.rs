//! The fixed chapter table.
//!
//! A book is a fixed, ordered list of chapters. Each entry pairs the
//! chapter's directory name (its identifier) with the title shown in the
//! table of contents:
//!
//! ```text
//! chapters/
//! ├── 01-introduction/README.md     → "รู้จักกับ Next.js"
//! ├── 02-pages-routing/README.md    → "Pages และ Routing"
//! └── ...
//! ```
//!
//! Identifiers and titles live in one list of records so the order and the
//! lookup can never disagree.

/// One section of the combined document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chapter {
    /// Directory name under the chapters directory, e.g. `01-introduction`.
    pub id: &'static str,
    /// Title for the table of contents. `None` falls back to `id`.
    pub title: Option<&'static str>,
}

impl Chapter {
    pub const fn new(id: &'static str, title: &'static str) -> Self {
        Self {
            id,
            title: Some(title),
        }
    }

    /// A chapter with no title entry; displays as its identifier.
    pub const fn untitled(id: &'static str) -> Self {
        Self { id, title: None }
    }

    /// Title to display, falling back to the raw identifier.
    pub fn display_title(&self) -> &'static str {
        self.title.unwrap_or(self.id)
    }
}

/// The book's chapters, in reading order.
pub const CHAPTERS: &[Chapter] = &[
    Chapter::new("01-introduction", "รู้จักกับ Next.js"),
    Chapter::new("02-pages-routing", "Pages และ Routing"),
    Chapter::new("03-components", "Components และ Props"),
    Chapter::new("04-styling", "Styling"),
    Chapter::new("05-data-fetching", "Data Fetching"),
    Chapter::new("06-api-routes", "API Routes"),
    Chapter::new("07-state-management", "State Management"),
    Chapter::new("08-forms", "Forms และ Validation"),
    Chapter::new("09-authentication", "Authentication"),
    Chapter::new("10-deployment", "Deployment และ Production"),
];

/// Resolve a chapter identifier to its display title.
///
/// Unknown identifiers are returned unchanged.
pub fn resolve_title(id: &str) -> &str {
    resolve_title_in(CHAPTERS, id)
}

/// Like [`resolve_title`], against an arbitrary chapter table.
pub fn resolve_title_in<'a>(table: &[Chapter], id: &'a str) -> &'a str {
    match table.iter().find(|c| c.id == id) {
        Some(chapter) => chapter.display_title(),
        None => id,
    }
}
