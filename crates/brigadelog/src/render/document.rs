//! Paginated document primitives.
//!
//! A [`Document`] is a sequence of fixed-height pages of plain text lines.
//! The [`PageBuilder`] tracks a running vertical cursor, starts a new page
//! when a block would cross the safe height, and stamps the footer
//! disclaimer on every page when finishing.

use std::path::Path;

use regex::Regex;

use crate::error::{Error, Result};

/// Footer disclaimer stamped on every page.
pub const FOOTER: &str = "Collected for brigade resupply planning. Quantities are self-reported.";

/// Placeholder used when the brigade name is empty.
pub const FILENAME_PLACEHOLDER: &str = "brigade";

/// Filename prefix of generated documents.
pub const FILENAME_PREFIX: &str = "supply-needs";

/// Layout options for the generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Lines per page, including the footer.
    pub page_height: usize,
    /// Columns per page.
    pub page_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_height: 60,
            page_width: 96,
        }
    }
}

impl RenderOptions {
    /// Build options from the document configuration.
    #[must_use]
    pub fn from_config(config: &crate::config::DocumentConfig) -> Self {
        Self {
            page_height: config.page_height,
            page_width: config.page_width,
        }
    }
}

/// One fixed-height page of text lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    lines: Vec<String>,
}

impl Page {
    /// The page's lines, top to bottom.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// A rendered, paginated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pages: Vec<Page>,
}

impl Document {
    /// The document's pages.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Render the whole document as one string, pages separated by a form
    /// feed.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.lines.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\u{c}\n")
    }

    /// Write the document to a file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns a document error when the file cannot be written; draft
    /// state and remote data are never affected.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|err| {
                    Error::document(format!(
                        "failed to create directory {}: {err}",
                        parent.display()
                    ))
                })?;
            }
        }
        std::fs::write(path, self.to_text())
            .map_err(|err| Error::document(format!("failed to write {}: {err}", path.display())))
    }
}

/// Accumulates lines into fixed-height pages.
#[derive(Debug)]
pub struct PageBuilder {
    height: usize,
    width: usize,
    pages: Vec<Page>,
    current: Vec<String>,
}

impl PageBuilder {
    /// Start building with the given layout options.
    #[must_use]
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            height: options.page_height,
            width: options.page_width,
            pages: Vec::new(),
            current: Vec::new(),
        }
    }

    /// The page width in columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Lines still fitting on the current page above the footer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.usable().saturating_sub(self.current.len())
    }

    /// True when the current page has no content yet.
    #[must_use]
    pub fn at_page_start(&self) -> bool {
        self.current.is_empty()
    }

    /// Append one line, starting a new page when the safe height is hit.
    pub fn push_line(&mut self, line: impl Into<String>) {
        if self.remaining() == 0 {
            self.break_page();
        }
        self.current.push(line.into());
    }

    /// Append a blank spacer line, unless at the top of a page.
    pub fn push_spacer(&mut self) {
        if !self.at_page_start() && self.remaining() > 0 {
            self.current.push(String::new());
        }
    }

    /// Start a new page before emitting the next block unless the current
    /// page still has room for `lines` more lines.
    pub fn ensure_room(&mut self, lines: usize) {
        if !self.at_page_start() && self.remaining() < lines {
            self.break_page();
        }
    }

    /// Close the current page and start a fresh one.
    pub fn break_page(&mut self) {
        let mut lines = std::mem::take(&mut self.current);
        pad_and_stamp(&mut lines, self.usable(), self.width);
        self.pages.push(Page { lines });
    }

    /// Finish the document, stamping the footer on the last page.
    #[must_use]
    pub fn finish(mut self) -> Document {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.break_page();
        }
        Document { pages: self.pages }
    }

    // Two lines are reserved under the content: spacer and footer.
    fn usable(&self) -> usize {
        self.height.saturating_sub(2)
    }
}

fn pad_and_stamp(lines: &mut Vec<String>, usable: usize, width: usize) {
    while lines.len() < usable {
        lines.push(String::new());
    }
    lines.push(String::new());
    lines.push(truncate(FOOTER, width));
}

/// Truncate a line to `width` characters, marking the cut with an ellipsis.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Sanitize a brigade name for use in a filename.
///
/// Runs of non-alphanumeric characters collapse to single dashes; an empty
/// result falls back to a fixed placeholder.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    // Unwrap is fine: the pattern is a compile-time constant.
    let pattern = Regex::new("[^A-Za-z0-9]+").expect("valid literal pattern");
    let sanitized = pattern
        .replace_all(name, "-")
        .trim_matches('-')
        .to_lowercase();
    if sanitized.is_empty() {
        FILENAME_PLACEHOLDER.to_string()
    } else {
        sanitized
    }
}

/// The suggested output filename for a brigade's document.
#[must_use]
pub fn suggested_filename(brigade_name: &str) -> String {
    format!("{FILENAME_PREFIX}-{}.txt", sanitize_filename(brigade_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_options() -> RenderOptions {
        RenderOptions {
            page_height: 10,
            page_width: 40,
        }
    }

    #[test]
    fn test_single_page_padded_to_height() {
        let mut builder = PageBuilder::new(&small_options());
        builder.push_line("hello");
        let doc = builder.finish();

        assert_eq!(doc.pages().len(), 1);
        let lines = doc.pages()[0].lines();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "hello");
        assert_eq!(lines[8], "");
        assert_eq!(lines[9], truncate(FOOTER, 40));
    }

    #[test]
    fn test_footer_on_every_page() {
        let mut builder = PageBuilder::new(&small_options());
        for i in 0..20 {
            builder.push_line(format!("line {i}"));
        }
        let doc = builder.finish();

        assert!(doc.pages().len() > 1);
        for page in doc.pages() {
            assert_eq!(page.lines().len(), 10);
            assert_eq!(page.lines()[9], truncate(FOOTER, 40));
        }
    }

    #[test]
    fn test_page_breaks_at_safe_height() {
        let mut builder = PageBuilder::new(&small_options());
        // Usable space is height - 2 = 8 lines.
        for i in 0..9 {
            builder.push_line(format!("line {i}"));
        }
        let doc = builder.finish();

        assert_eq!(doc.pages().len(), 2);
        assert_eq!(doc.pages()[0].lines()[7], "line 7");
        assert_eq!(doc.pages()[1].lines()[0], "line 8");
    }

    #[test]
    fn test_ensure_room_starts_new_page() {
        let mut builder = PageBuilder::new(&small_options());
        for i in 0..6 {
            builder.push_line(format!("line {i}"));
        }
        builder.ensure_room(5);
        builder.push_line("block start");
        let doc = builder.finish();

        assert_eq!(doc.pages().len(), 2);
        assert_eq!(doc.pages()[1].lines()[0], "block start");
    }

    #[test]
    fn test_ensure_room_noop_at_page_start() {
        let mut builder = PageBuilder::new(&small_options());
        builder.ensure_room(100);
        builder.push_line("first");
        let doc = builder.finish();
        assert_eq!(doc.pages().len(), 1);
    }

    #[test]
    fn test_empty_document_still_has_one_page() {
        let builder = PageBuilder::new(&small_options());
        let doc = builder.finish();
        assert_eq!(doc.pages().len(), 1);
    }

    #[test]
    fn test_spacer_not_emitted_at_page_start() {
        let mut builder = PageBuilder::new(&small_options());
        builder.push_spacer();
        builder.push_line("first");
        let doc = builder.finish();
        assert_eq!(doc.pages()[0].lines()[0], "first");
    }

    #[test]
    fn test_to_text_separates_pages_with_form_feed() {
        let mut builder = PageBuilder::new(&small_options());
        for i in 0..9 {
            builder.push_line(format!("line {i}"));
        }
        let text = builder.finish().to_text();
        assert!(text.contains('\u{c}'));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly ten", 11), "exactly ten");
        assert_eq!(truncate("a very long line indeed", 10), "a very ...");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Brigada Test"), "brigada-test");
        assert_eq!(sanitize_filename("  Brigada   #3 (Sur)  "), "brigada-3-sur");
        assert_eq!(sanitize_filename("---"), FILENAME_PLACEHOLDER);
        assert_eq!(sanitize_filename(""), FILENAME_PLACEHOLDER);
    }

    #[test]
    fn test_suggested_filename() {
        assert_eq!(
            suggested_filename("Brigada Test"),
            "supply-needs-brigada-test.txt"
        );
        assert_eq!(suggested_filename(""), "supply-needs-brigade.txt");
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = std::env::temp_dir().join(format!("briglog_doc_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let mut builder = PageBuilder::new(&small_options());
        builder.push_line("content");
        let doc = builder.finish();

        let path = dir.join("nested").join("out.txt");
        doc.save(&path).unwrap();
        assert!(path.exists());

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("content"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
