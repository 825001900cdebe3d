//! Shared test utilities.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! remove_chapter(tmp.path(), "04-styling");
//! let report = assemble(tmp.path(), &BookConfig::default()).unwrap();
//! assert!(!find_entry(&report, "04-styling").included);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::assemble::{AssembleReport, ChapterEntry};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/book/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/book");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Delete a chapter's directory from a fixture book.
pub fn remove_chapter(root: &Path, id: &str) {
    std::fs::remove_dir_all(root.join("chapters").join(id)).unwrap();
}

// =========================================================================
// Readers
// =========================================================================

/// The combined document at the stock output path.
pub fn read_output(root: &Path) -> String {
    std::fs::read_to_string(root.join("nextjs-book-combined.md")).unwrap()
}

/// A chapter's source text from a fixture book.
pub fn read_chapter(root: &Path, id: &str) -> String {
    std::fs::read_to_string(root.join("chapters").join(id).join("README.md")).unwrap()
}

// =========================================================================
// Report lookups
// =========================================================================

/// Find a chapter entry by identifier. Panics if not found.
pub fn find_entry<'a>(report: &'a AssembleReport, id: &str) -> &'a ChapterEntry {
    report
        .chapters
        .iter()
        .find(|c| c.id == id)
        .unwrap_or_else(|| {
            let ids: Vec<&str> = report.chapters.iter().map(|c| c.id.as_str()).collect();
            panic!("chapter '{id}' not found. Available: {ids:?}")
        })
}
