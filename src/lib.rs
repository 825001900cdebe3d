//! # Book Combiner
//!
//! Combines a chaptered markdown book into one document, ready for a
//! markdown-to-PDF toolchain such as pandoc.
//!
//! # Pipeline
//!
//! ```text
//! README.md + chapters/*/README.md + appendices  →  nextjs-book-combined.md
//! ```
//!
//! A single linear pass that writes the output file exactly once.
//! Reading is best-effort (an unreadable source is logged and skipped), so
//! the only failure that stops a run is being unable to write the output.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`chapters`] | The fixed chapter table and title resolution |
//! | [`source`] | Best-effort loading and the resolved file layout |
//! | [`toc`] | Table of contents and anchor slugs |
//! | [`assemble`] | Introduction extraction, rendering, writing the output |
//! | [`config`] | Optional `book.toml` layered over stock defaults |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Fixed Chapter Order
//!
//! The chapter list is a constant, not a directory scan. Chapter directories
//! that are not in the table are ignored; chapters in the table whose file is
//! missing still get a table-of-contents line so the numbering stays stable
//! while a book is being written.
//!
//! ## Absent, Not Failed
//!
//! [`source::Source`] distinguishes read content from an absent file. The
//! assembler branches on that value instead of handling I/O errors, which
//! keeps [`assemble::render`] a pure function that tests can drive with
//! in-memory sources.

pub mod assemble;
pub mod chapters;
pub mod config;
pub mod output;
pub mod source;
pub mod toc;

#[cfg(test)]
pub(crate) mod test_helpers;
