//! Book configuration module.
//!
//! Handles loading and validating an optional `book.toml` in the book
//! root. Without one, the stock defaults describe the standard layout:
//!
//! ```text
//! book/
//! ├── book.toml                   # Optional overrides
//! ├── README.md                   # Overview (introduction + TOC)
//! ├── chapters/
//! │   ├── 01-introduction/
//! │   │   └── README.md
//! │   └── ...
//! ├── GLOSSARY.md                 # Optional appendix
//! ├── QUICK_REFERENCE.md          # Optional appendix
//! └── nextjs-book-combined.md     # Output (overwritten each run)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "หนังสือสอนเขียน Front-end ด้วย Next.js"
//! output = "nextjs-book-combined.md"
//!
//! [sources]
//! overview = "README.md"
//! chapters_dir = "chapters"
//! chapter_file = "README.md"
//! glossary = "GLOSSARY.md"
//! quick_reference = "QUICK_REFERENCE.md"
//! ```
//!
//! Config files are sparse. Unknown keys are rejected to catch typos early.
//! The chapter list is not configurable; see [`crate::chapters::CHAPTERS`].

use crate::chapters::CHAPTERS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the book root.
pub const CONFIG_FILE: &str = "book.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Book configuration loaded from `book.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookConfig {
    /// Cover heading of the combined document.
    pub title: String,
    /// Output file, relative to the book root.
    pub output: String,
    /// Where the source documents live.
    pub sources: SourcesConfig,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            title: "หนังสือสอนเขียน Front-end ด้วย Next.js".to_string(),
            output: "nextjs-book-combined.md".to_string(),
            sources: SourcesConfig::default(),
        }
    }
}

/// Source document locations, all relative to the book root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    /// Overview document; its text before the TOC heading becomes the introduction.
    pub overview: String,
    /// Directory holding one subdirectory per chapter identifier.
    pub chapters_dir: String,
    /// File name of the document inside each chapter directory.
    pub chapter_file: String,
    /// Glossary appendix (skipped when missing).
    pub glossary: String,
    /// Quick-reference appendix (skipped when missing).
    pub quick_reference: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            overview: "README.md".to_string(),
            chapters_dir: "chapters".to_string(),
            chapter_file: "README.md".to_string(),
            glossary: "GLOSSARY.md".to_string(),
            quick_reference: "QUICK_REFERENCE.md".to_string(),
        }
    }
}

impl BookConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        if self.output.trim().is_empty() {
            return Err(ConfigError::Validation("output must not be empty".into()));
        }
        if self.sources.chapter_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "sources.chapter_file must not be empty".into(),
            ));
        }
        let output = normalize(Path::new(&self.output));
        if self.protected_paths().iter().any(|p| *p == output) {
            return Err(ConfigError::Validation(format!(
                "output '{}' would overwrite a source document",
                self.output
            )));
        }
        Ok(())
    }

    /// Every book-relative path the output must never replace, normalized.
    fn protected_paths(&self) -> Vec<PathBuf> {
        let s = &self.sources;
        let mut paths: Vec<PathBuf> = [&s.overview, &s.glossary, &s.quick_reference]
            .into_iter()
            .map(|p| normalize(Path::new(p)))
            .collect();
        let chapters_dir = Path::new(&s.chapters_dir);
        paths.extend(
            CHAPTERS
                .iter()
                .map(|c| normalize(&chapters_dir.join(c.id).join(&s.chapter_file))),
        );
        paths.push(PathBuf::from(CONFIG_FILE));
        paths
    }
}

/// Lexically normalize a book-relative path: drop `.` and resolve `..`.
///
/// Does not touch the filesystem, so it works for files that do not exist yet.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Load the book config from `root`.
///
/// A missing `book.toml` yields the stock defaults. Keys left out of the
/// file keep their default values; unknown keys are rejected.
pub fn load_config(root: &Path) -> Result<BookConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    let config = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        toml::from_str::<BookConfig>(&content)?
    } else {
        BookConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `book.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r###"# book-combiner configuration
# ===========================
# All settings are optional. Remove any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Cover heading of the combined document.
title = "หนังสือสอนเขียน Front-end ด้วย Next.js"

# Combined output file, relative to the book root. Overwritten on every run.
output = "nextjs-book-combined.md"

# ---------------------------------------------------------------------------
# Source documents (relative to the book root)
# ---------------------------------------------------------------------------
[sources]
# Overview. Text before the "## 📖 สารบัญ" heading becomes the introduction.
overview = "README.md"

# One subdirectory per chapter, e.g. chapters/01-introduction/README.md
chapters_dir = "chapters"
chapter_file = "README.md"

# Appendices, included only when present and non-empty.
glossary = "GLOSSARY.md"
quick_reference = "QUICK_REFERENCE.md"
"###
}
