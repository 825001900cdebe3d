//! Table of contents generation.
//!
//! One link line per chapter, numbered from 1:
//!
//! ```text
//! ## 📖 สารบัญ
//!
//! - [บทที่ 1: รู้จักกับ Next.js](#บทที่-1-รู้จักกับ-next.js)
//! - [บทที่ 2: Pages และ Routing](#บทที่-2-pages-และ-routing)
//! ```
//!
//! Anchors follow the heading-id convention of the downstream renderer:
//! lowercase, whitespace runs collapsed to a single `-`. Two titles that
//! normalize to the same slug produce the same anchor; nothing disambiguates
//! them.

use crate::chapters::{Chapter, resolve_title_in};

/// Heading that opens the table of contents. The overview document uses the
/// same heading, which is how its introduction is delimited.
pub const TOC_HEADING: &str = "## 📖 สารบัญ";

/// Word used to label chapters in link text and anchors.
const CHAPTER_LABEL: &str = "บทที่";

/// Lowercase `title` and replace each run of whitespace with one `-`.
///
/// Leading and trailing whitespace runs become dashes too.
pub fn anchor_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_whitespace = false;
    for c in title.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
                in_whitespace = true;
            }
        } else {
            slug.push(c);
            in_whitespace = false;
        }
    }
    slug
}

/// Format one TOC link line (with trailing newline) for a 1-based position.
pub fn toc_line(number: usize, title: &str) -> String {
    format!(
        "- [{label} {number}: {title}](#{label}-{number}-{slug})\n",
        label = CHAPTER_LABEL,
        slug = anchor_slug(title),
    )
}

/// Build the full table of contents: heading, blank line, one line per chapter.
///
/// Titles are resolved against `chapters` itself, so an entry without a
/// title is listed under its identifier.
pub fn build_table_of_contents(chapters: &[Chapter]) -> String {
    let mut toc = format!("{TOC_HEADING}\n\n");
    for (i, chapter) in chapters.iter().enumerate() {
        toc.push_str(&toc_line(i + 1, resolve_title_in(chapters, chapter.id)));
    }
    toc
}
