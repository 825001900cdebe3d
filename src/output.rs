//! CLI output formatting.
//!
//! Output leads with what the book contains (chapter number and title), with
//! the source file as an indented `Source:` line underneath:
//!
//! ```text
//! Introduction
//!     Source: README.md
//!
//! Chapters
//! 001 รู้จักกับ Next.js
//!     Source: chapters/01-introduction/README.md
//! 002 Pages และ Routing (missing)
//!     Source: chapters/02-pages-routing/README.md
//!
//! Resources
//!     GLOSSARY.md
//!     QUICK_REFERENCE.md
//!
//! ✅ Combined markdown created: /book/nextjs-book-combined.md
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::assemble::AssembleReport;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Lines shared by `combine` and `check`: introduction, chapters, resources.
pub fn format_report(report: &AssembleReport) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Introduction".to_string());
    match &report.introduction {
        Some(path) => lines.push(format!("    Source: {}", path.display())),
        None => lines.push("    (none)".to_string()),
    }

    lines.push(String::new());
    lines.push("Chapters".to_string());
    for chapter in &report.chapters {
        let marker = if chapter.included { "" } else { " (missing)" };
        lines.push(format!(
            "{} {}{}",
            format_index(chapter.number),
            chapter.title,
            marker
        ));
        lines.push(format!("    Source: {}", chapter.source.display()));
    }

    lines.push(String::new());
    lines.push("Resources".to_string());
    let resources: Vec<_> = [&report.glossary, &report.quick_reference]
        .into_iter()
        .flatten()
        .collect();
    if resources.is_empty() {
        lines.push("    (none)".to_string());
    }
    for path in resources {
        lines.push(format!("    {}", path.display()));
    }

    lines
}

/// The confirmation printed once the combined document is written.
pub fn format_success(output: &Path) -> String {
    format!("\u{2705} Combined markdown created: {}", output.display())
}

/// Format the result of a `combine` run.
pub fn format_combine_output(report: &AssembleReport) -> Vec<String> {
    let mut lines = format_report(report);
    lines.push(String::new());
    lines.push(format_success(&report.output));
    lines
}

/// Format the result of a `check` run.
pub fn format_check_output(report: &AssembleReport) -> Vec<String> {
    let mut lines = format_report(report);
    lines.push(String::new());
    lines.push(format!(
        "{} of {} chapters present",
        report.included_count(),
        report.chapters.len()
    ));
    lines
}

/// Print combine output to stdout.
pub fn print_combine_output(report: &AssembleReport) {
    for line in format_combine_output(report) {
        println!("{}", line);
    }
}

/// Print the success confirmation to stdout.
pub fn print_success(output: &Path) {
    println!("{}", format_success(output));
}

/// Print check output to stdout.
pub fn print_check_output(report: &AssembleReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}
