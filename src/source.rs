//! Source document loading.
//!
//! Reading is best-effort: an unreadable file is logged and treated as
//! absent so the rest of the book still assembles. A missing chapter drops
//! out of the combined document; a missing appendix is simply not appended.
//!
//! [`Layout`] resolves every source path from the book root and the
//! [`SourcesConfig`], so the assembler never builds paths itself.

use crate::chapters::Chapter;
use crate::config::{BookConfig, SourcesConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Outcome of reading a source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// The file was read. May be empty.
    Content(String),
    /// The file is missing or could not be read.
    Absent,
}

impl Source {
    /// Read `path` as text, logging and returning [`Source::Absent`] on failure.
    ///
    /// Invalid UTF-8 is not a failure: bad sequences become U+FFFD and the
    /// document is still used.
    pub fn load(path: &Path) -> Self {
        match fs::read(path) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => Source::Content(text),
                Err(err) => {
                    warn!(path = %path.display(), "source is not valid UTF-8, decoding lossily");
                    Source::Content(String::from_utf8_lossy(err.as_bytes()).into_owned())
                }
            },
            Err(err) => {
                warn!(path = %path.display(), error = %err, "error reading source file");
                Source::Absent
            }
        }
    }

    /// Like [`Source::load`], but a path that does not exist is silently absent.
    pub fn load_if_exists(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "optional source not present");
            return Source::Absent;
        }
        Self::load(path)
    }

    /// The text, if the source was read and is not empty.
    pub fn non_empty(&self) -> Option<&str> {
        match self {
            Source::Content(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }

    pub fn is_present(&self) -> bool {
        self.non_empty().is_some()
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Source::Content(text.to_string())
    }
}

/// Resolved filesystem locations for one book.
#[derive(Debug, Clone)]
pub struct Layout {
    pub root: PathBuf,
    pub overview: PathBuf,
    pub chapters_dir: PathBuf,
    pub chapter_file: String,
    pub glossary: PathBuf,
    pub quick_reference: PathBuf,
    pub output: PathBuf,
}

impl Layout {
    pub fn new(root: &Path, config: &BookConfig) -> Self {
        let SourcesConfig {
            overview,
            chapters_dir,
            chapter_file,
            glossary,
            quick_reference,
        } = &config.sources;
        Self {
            root: root.to_path_buf(),
            overview: root.join(overview),
            chapters_dir: root.join(chapters_dir),
            chapter_file: chapter_file.clone(),
            glossary: root.join(glossary),
            quick_reference: root.join(quick_reference),
            output: root.join(&config.output),
        }
    }

    /// `<chapters_dir>/<id>/<chapter_file>`
    pub fn chapter_path(&self, chapter: &Chapter) -> PathBuf {
        self.chapters_dir.join(chapter.id).join(&self.chapter_file)
    }

    /// `path` relative to the book root, for display.
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}
