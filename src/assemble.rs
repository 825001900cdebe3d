//! Combined document assembly.
//!
//! Builds the combined markdown buffer and writes it once.
//!
//! ## Document Structure
//!
//! ```text
//! # <title>                         cover
//! ---
//! <overview text before TOC>        introduction (only if the TOC heading is found)
//! ---
//! ## 📖 สารบัญ                      table of contents, one line per chapter
//! ---
//! <chapter 1>                       no page break before the first chapter
//! ---
//! \newpage
//! <chapter 2>
//! ---
//! ...
//! \newpage
//! # 📚 แหล่งข้อมูลเพิ่มเติม          additional resources
//! <glossary>                        only if present and non-empty
//! ---
//! <quick reference>                 only if present and non-empty
//! ```
//!
//! Missing chapters are skipped without a page break or placeholder, but
//! keep their line in the table of contents.
//!
//! ## Architecture
//!
//! [`gather`] does all reading, [`render`] is a pure function from loaded
//! sources to the output text, and [`assemble`] writes the result. Only the
//! final write can fail.

use crate::chapters::{CHAPTERS, Chapter, resolve_title_in};
use crate::config::{self, BookConfig};
use crate::output;
use crate::source::{Layout, Source};
use crate::toc::{self, TOC_HEADING};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Page-break directive understood by the PDF toolchain (pandoc/LaTeX).
pub const PAGE_BREAK: &str = "\\newpage\n\n";

/// Heading that opens the appendices.
pub const RESOURCES_HEADING: &str = "# 📚 แหล่งข้อมูลเพิ่มเติม";

/// Separator appended after the introduction, each chapter and the glossary.
const SECTION_SEPARATOR: &str = "\n\n---\n\n";

#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Every source document of a book, already loaded.
#[derive(Debug, Clone)]
pub struct BookSources {
    pub overview: Source,
    /// Chapters in reading order, each with its loaded document.
    pub chapters: Vec<(Chapter, Source)>,
    pub glossary: Source,
    pub quick_reference: Source,
}

/// What a run included, for operator output.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembleReport {
    /// Where the combined document was (or would be) written.
    pub output: PathBuf,
    /// Overview path relative to the book root, if an introduction was extracted.
    pub introduction: Option<PathBuf>,
    pub chapters: Vec<ChapterEntry>,
    /// Glossary path relative to the book root, if included.
    pub glossary: Option<PathBuf>,
    /// Quick-reference path relative to the book root, if included.
    pub quick_reference: Option<PathBuf>,
}

/// One chapter's line in the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterEntry {
    /// 1-based position in the table of contents.
    pub number: usize,
    pub id: String,
    pub title: String,
    /// Chapter document path relative to the book root.
    pub source: PathBuf,
    /// False when the document was missing, unreadable, or empty.
    pub included: bool,
}

impl AssembleReport {
    pub fn included_count(&self) -> usize {
        self.chapters.iter().filter(|c| c.included).count()
    }
}

/// Text of `overview` before the first TOC heading.
///
/// `None` when the heading does not occur. The heading is matched literally
/// anywhere in the text, not only at the start of a line.
pub fn extract_introduction(overview: &str) -> Option<&str> {
    overview.find(TOC_HEADING).map(|pos| &overview[..pos])
}

/// Load every source document named by `layout` for `chapters`.
pub fn gather(layout: &Layout, chapters: &[Chapter]) -> BookSources {
    BookSources {
        overview: Source::load(&layout.overview),
        chapters: chapters
            .iter()
            .map(|chapter| (*chapter, Source::load(&layout.chapter_path(chapter))))
            .collect(),
        glossary: Source::load_if_exists(&layout.glossary),
        quick_reference: Source::load_if_exists(&layout.quick_reference),
    }
}

/// Render the combined markdown document from loaded sources.
pub fn render(title: &str, sources: &BookSources) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {title}\n\n"));
    out.push_str("---\n\n");

    if let Some(intro) = sources.overview.non_empty().and_then(extract_introduction) {
        out.push_str(intro);
        out.push_str(SECTION_SEPARATOR);
    }

    let chapters: Vec<Chapter> = sources.chapters.iter().map(|(c, _)| *c).collect();
    out.push_str(&toc::build_table_of_contents(&chapters));
    out.push_str("\n---\n\n");

    for (index, (chapter, source)) in sources.chapters.iter().enumerate() {
        let Some(text) = source.non_empty() else {
            debug!(chapter = chapter.id, "skipping chapter without content");
            continue;
        };
        info!(chapter = chapter.id, "adding chapter");
        if index > 0 {
            out.push_str(PAGE_BREAK);
        }
        out.push_str(text);
        out.push_str(SECTION_SEPARATOR);
    }

    out.push_str(PAGE_BREAK);
    out.push_str(&format!("{RESOURCES_HEADING}\n\n"));

    if let Some(glossary) = sources.glossary.non_empty() {
        out.push_str(glossary);
        out.push_str(SECTION_SEPARATOR);
    }

    if let Some(quick_ref) = sources.quick_reference.non_empty() {
        out.push_str(quick_ref);
        out.push_str("\n\n");
    }

    out
}

/// Describe what [`render`] includes for these sources.
pub fn report(layout: &Layout, sources: &BookSources) -> AssembleReport {
    let rel = |path: &Path| layout.relative(path).to_path_buf();
    let table: Vec<Chapter> = sources.chapters.iter().map(|(c, _)| *c).collect();
    let has_intro = sources
        .overview
        .non_empty()
        .and_then(extract_introduction)
        .is_some();

    AssembleReport {
        output: layout.output.clone(),
        introduction: has_intro.then(|| rel(&layout.overview)),
        chapters: sources
            .chapters
            .iter()
            .enumerate()
            .map(|(i, (chapter, source))| ChapterEntry {
                number: i + 1,
                id: chapter.id.to_string(),
                title: resolve_title_in(&table, chapter.id).to_string(),
                source: rel(&layout.chapter_path(chapter)),
                included: source.is_present(),
            })
            .collect(),
        glossary: sources.glossary.is_present().then(|| rel(&layout.glossary)),
        quick_reference: sources
            .quick_reference
            .is_present()
            .then(|| rel(&layout.quick_reference)),
    }
}

/// Write the combined document, replacing any previous output.
pub fn write_output(path: &Path, markdown: &str) -> Result<(), AssembleError> {
    fs::write(path, markdown).map_err(|source| AssembleError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Assemble the book under `root` and write the combined document.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn assemble(root: &Path, config: &BookConfig) -> Result<AssembleReport, AssembleError> {
    let layout = Layout::new(root, config);
    let sources = gather(&layout, CHAPTERS);
    let markdown = render(&config.title, &sources);
    write_output(&layout.output, &markdown)?;
    let report = report(&layout, &sources);
    info!(
        output = %layout.output.display(),
        chapters = report.included_count(),
        bytes = markdown.len(),
        "combined markdown written"
    );
    Ok(report)
}

/// Load every source and report what would be included, without writing.
pub fn check(root: &Path, config: &BookConfig) -> AssembleReport {
    let layout = Layout::new(root, config);
    let sources = gather(&layout, CHAPTERS);
    report(&layout, &sources)
}

/// Combine the book under `root` using its `book.toml` (or stock defaults).
///
/// Prints the success line naming the output to stdout and returns the
/// path of the written document. Per-source diagnostics are `tracing`
/// events; install a subscriber to see them. Use [`assemble`] to get the
/// full [`AssembleReport`] instead.
pub fn combine(root: &Path) -> Result<PathBuf, AssembleError> {
    let config = config::load_config(root)?;
    let report = assemble(root, &config)?;
    output::print_success(&report.output);
    Ok(report.output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn sources(overview: &str, chapters: &[(Chapter, Source)]) -> BookSources {
        BookSources {
            overview: Source::from(overview),
            chapters: chapters.to_vec(),
            glossary: Source::Absent,
            quick_reference: Source::Absent,
        }
    }

    const A: Chapter = Chapter::new("01-a", "Alpha");
    const B: Chapter = Chapter::new("02-b", "Beta");
    const C: Chapter = Chapter::new("03-c", "Gamma");

    // =========================================================================
    // extract_introduction
    // =========================================================================

    #[test]
    fn introduction_is_text_before_marker() {
        assert_eq!(
            extract_introduction("Intro text\n## 📖 สารบัญ\nignored"),
            Some("Intro text\n")
        );
    }

    #[test]
    fn introduction_absent_without_marker() {
        assert_eq!(extract_introduction("Intro text\n## Contents\n"), None);
    }

    #[test]
    fn introduction_uses_first_marker() {
        assert_eq!(
            extract_introduction("a\n## 📖 สารบัญ\nb\n## 📖 สารบัญ\n"),
            Some("a\n")
        );
    }

    #[test]
    fn introduction_marker_need_not_start_a_line() {
        assert_eq!(extract_introduction("see ## 📖 สารบัญ"), Some("see "));
    }

    #[test]
    fn introduction_marker_at_start_is_empty() {
        assert_eq!(extract_introduction("## 📖 สารบัญ\n- x"), Some(""));
    }

    // =========================================================================
    // render
    // =========================================================================

    #[test]
    fn render_full_document_exactly() {
        let mut s = sources(
            "Welcome\n## 📖 สารบัญ\n- old toc",
            &[(A, "# A".into()), (B, "# B".into())],
        );
        s.glossary = "G".into();
        s.quick_reference = "Q".into();

        let expected = "# Book\n\n---\n\n\
            Welcome\n\n\n---\n\n\
            ## 📖 สารบัญ\n\n\
            - [บทที่ 1: Alpha](#บทที่-1-alpha)\n\
            - [บทที่ 2: Beta](#บทที่-2-beta)\n\
            \n---\n\n\
            # A\n\n---\n\n\
            \\newpage\n\n# B\n\n---\n\n\
            \\newpage\n\n# 📚 แหล่งข้อมูลเพิ่มเติม\n\n\
            G\n\n---\n\n\
            Q\n\n";
        assert_eq!(render("Book", &s), expected);
    }

    #[test]
    fn render_skips_missing_chapter_without_page_break() {
        let s = sources(
            "",
            &[(A, "# A".into()), (B, Source::Absent), (C, "# C".into())],
        );
        let out = render("Book", &s);
        assert_eq!(out.matches("\\newpage").count(), 2); // before C and resources
        assert!(out.contains("# A\n\n---\n\n\\newpage\n\n# C"));
    }

    #[test]
    fn render_empty_chapter_is_skipped() {
        let s = sources("", &[(A, "".into()), (B, "# B".into())]);
        let out = render("Book", &s);
        // B is not first in sequence, so it keeps its page break
        assert!(out.contains("\n---\n\n\\newpage\n\n# B"));
    }

    #[test]
    fn render_first_chapter_missing_second_still_breaks() {
        let s = sources("", &[(A, Source::Absent), (B, "# B".into())]);
        let out = render("Book", &s);
        assert!(out.contains("\\newpage\n\n# B"));
    }

    #[test]
    fn render_toc_lists_missing_chapters() {
        let s = sources("", &[(A, Source::Absent), (B, Source::Absent)]);
        let out = render("Book", &s);
        assert!(out.contains("- [บทที่ 1: Alpha]"));
        assert!(out.contains("- [บทที่ 2: Beta]"));
    }

    #[test]
    fn render_without_marker_has_no_introduction() {
        let s = sources("Just an overview", &[]);
        let out = render("Book", &s);
        assert!(!out.contains("Just an overview"));
        assert!(out.starts_with("# Book\n\n---\n\n## 📖 สารบัญ\n\n"));
    }

    #[test]
    fn render_absent_overview_has_no_introduction() {
        let mut s = sources("", &[]);
        s.overview = Source::Absent;
        assert!(render("Book", &s).starts_with("# Book\n\n---\n\n## 📖 สารบัญ"));
    }

    #[test]
    fn render_marker_at_start_emits_empty_introduction() {
        let s = sources("## 📖 สารบัญ\n", &[]);
        assert!(render("Book", &s).starts_with("# Book\n\n---\n\n\n\n---\n\n## 📖 สารบัญ"));
    }

    #[test]
    fn render_without_glossary_goes_straight_to_quick_reference() {
        let mut s = sources("", &[]);
        s.quick_reference = "Q".into();
        assert!(render("Book", &s).ends_with("# 📚 แหล่งข้อมูลเพิ่มเติม\n\nQ\n\n"));
    }

    #[test]
    fn render_without_appendices_ends_at_resources_heading() {
        let s = sources("", &[]);
        assert!(render("Book", &s).ends_with("\\newpage\n\n# 📚 แหล่งข้อมูลเพิ่มเติม\n\n"));
    }

    #[test]
    fn render_empty_glossary_is_skipped() {
        let mut s = sources("", &[]);
        s.glossary = "".into();
        assert!(render("Book", &s).ends_with("# 📚 แหล่งข้อมูลเพิ่มเติม\n\n"));
    }

    #[test]
    fn render_chapters_appear_once_in_order() {
        let s = sources(
            "",
            &[(A, "alpha-body".into()), (B, "beta-body".into()), (C, "gamma-body".into())],
        );
        let out = render("Book", &s);
        for body in ["alpha-body", "beta-body", "gamma-body"] {
            assert_eq!(out.matches(body).count(), 1, "{body}");
        }
        let a = out.find("alpha-body").unwrap();
        let b = out.find("beta-body").unwrap();
        let c = out.find("gamma-body").unwrap();
        assert!(a < b && b < c);
    }

    // =========================================================================
    // assemble / check against fixtures
    // =========================================================================

    #[test]
    fn assemble_fixture_book() {
        let tmp = setup_fixtures();
        let report = assemble(tmp.path(), &BookConfig::default()).unwrap();

        assert_eq!(report.output, tmp.path().join("nextjs-book-combined.md"));
        assert_eq!(report.included_count(), CHAPTERS.len());
        assert_eq!(report.introduction, Some(PathBuf::from("README.md")));
        assert_eq!(report.glossary, Some(PathBuf::from("GLOSSARY.md")));
        assert_eq!(
            report.quick_reference,
            Some(PathBuf::from("QUICK_REFERENCE.md"))
        );

        let out = read_output(tmp.path());
        for chapter in CHAPTERS {
            let text = read_chapter(tmp.path(), chapter.id);
            assert_eq!(out.matches(text.as_str()).count(), 1, "{}", chapter.id);
        }
    }

    #[test]
    fn assemble_reports_missing_chapter() {
        let tmp = setup_fixtures();
        remove_chapter(tmp.path(), "04-styling");

        let report = assemble(tmp.path(), &BookConfig::default()).unwrap();
        let styling = find_entry(&report, "04-styling");
        assert!(!styling.included);
        assert_eq!(styling.number, 4);
        assert_eq!(report.included_count(), CHAPTERS.len() - 1);
        // Still listed in the TOC
        assert!(read_output(tmp.path()).contains("- [บทที่ 4: Styling](#บทที่-4-styling)"));
    }

    #[test]
    fn assemble_overwrites_previous_output() {
        let tmp = setup_fixtures();
        let output = tmp.path().join("nextjs-book-combined.md");
        fs::write(&output, "stale content that should disappear").unwrap();
        assemble(tmp.path(), &BookConfig::default()).unwrap();
        assert!(!read_output(tmp.path()).contains("stale content"));
    }

    #[test]
    fn assemble_write_failure_is_error() {
        let tmp = setup_fixtures();
        let config = BookConfig {
            output: "no-such-dir/out.md".into(),
            ..BookConfig::default()
        };
        let err = assemble(tmp.path(), &config).unwrap_err();
        assert!(matches!(err, AssembleError::Write { .. }));
        assert!(err.to_string().contains("out.md"));
    }

    #[test]
    fn report_lists_untitled_chapter_under_identifier() {
        let layout = Layout::new(Path::new("/book"), &BookConfig::default());
        let s = sources("", &[(Chapter::untitled("01-introduction"), "# A".into())]);
        let report = report(&layout, &s);
        assert_eq!(report.chapters[0].title, "01-introduction");
        assert_eq!(
            report.chapters[0].source,
            PathBuf::from("chapters/01-introduction/README.md")
        );
    }

    #[test]
    fn check_does_not_write() {
        let tmp = setup_fixtures();
        let report = check(tmp.path(), &BookConfig::default());
        assert_eq!(report.included_count(), CHAPTERS.len());
        assert!(!report.output.exists());
    }

    #[test]
    fn combine_honours_book_toml() {
        let tmp = setup_fixtures();
        fs::write(
            tmp.path().join("book.toml"),
            "title = \"Custom\"\noutput = \"out.md\"\n",
        )
        .unwrap();
        let path = combine(tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join("out.md"));
        assert!(fs::read_to_string(path).unwrap().starts_with("# Custom\n\n---\n\n"));
    }

    #[test]
    fn combine_rejects_invalid_book_toml() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("book.toml"), "bogus = 1\n").unwrap();
        assert!(matches!(
            combine(tmp.path()),
            Err(AssembleError::Config(_))
        ));
    }
}
