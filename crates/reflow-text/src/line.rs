#![forbid(unsafe_code)]

//! Line and paragraph value types plus cell-width measurement.
//!
//! Every strategy sees its input through the same two shapes:
//! - [`LineParts`]: one line split into leading whitespace and content.
//! - [`Paragraph`]: a maximal run of non-blank lines.
//!
//! Widths are measured in terminal cells over extended grapheme clusters,
//! so a grapheme (emoji, ZWJ sequence, combining mark) is never split and
//! wide CJK characters count as two cells.
//!
//! # Example
//! ```
//! use reflow_text::line::{LineParts, display_width};
//!
//! let parts = LineParts::split("    let x = 1;");
//! assert_eq!(parts.indent, "    ");
//! assert_eq!(parts.content, "let x = 1;");
//! assert_eq!(display_width("你好"), 4);
//! ```

use smallvec::SmallVec;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

// =============================================================================
// Width measurement
// =============================================================================

/// Returns `Some(width)` if text is printable ASCII only, `None` otherwise.
///
/// For printable ASCII (0x20-0x7E) the cell width equals the byte length,
/// which skips grapheme segmentation entirely.
#[inline]
#[must_use]
pub fn ascii_width(text: &str) -> Option<usize> {
    text.bytes()
        .all(|b| (0x20..=0x7E).contains(&b))
        .then_some(text.len())
}

/// Cell width of a single grapheme cluster.
///
/// Any single ASCII byte (tab included) is one cell; tabs are not expanded.
#[inline]
#[must_use]
pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.len() == 1 {
        return 1;
    }
    UnicodeWidthStr::width(grapheme)
}

/// Cell width of a string.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    if let Some(width) = ascii_width(text) {
        return width;
    }
    text.graphemes(true).map(grapheme_width).sum()
}

/// Number of grapheme clusters in a string.
#[inline]
#[must_use]
pub fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

#[inline]
pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[inline]
fn is_whitespace_grapheme(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}

// =============================================================================
// LineParts / Paragraph
// =============================================================================

/// A single line decomposed into its leading whitespace and the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineParts<'a> {
    /// Leading whitespace, verbatim.
    pub indent: &'a str,
    /// Everything after the indent (trailing whitespace untouched).
    pub content: &'a str,
}

impl<'a> LineParts<'a> {
    /// Split a line at the end of its leading whitespace.
    #[must_use]
    pub fn split(line: &'a str) -> Self {
        let content = line.trim_start();
        let indent = &line[..line.len() - content.len()];
        Self { indent, content }
    }

    /// Whether the line has no content (empty or whitespace-only).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.content.trim_end().is_empty()
    }

    /// Cell width of the indent.
    #[must_use]
    pub fn indent_width(&self) -> usize {
        display_width(self.indent)
    }
}

/// A maximal run of non-blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph<'a> {
    lines: SmallVec<[LineParts<'a>; 8]>,
}

impl<'a> Paragraph<'a> {
    /// Group text into paragraphs. Blank lines only separate; they never
    /// produce empty paragraphs.
    #[must_use]
    pub fn collect(text: &'a str) -> Vec<Self> {
        let mut paragraphs = Vec::new();
        let mut current: SmallVec<[LineParts<'a>; 8]> = SmallVec::new();

        for line in text.split('\n') {
            let parts = LineParts::split(line);
            if parts.is_blank() {
                if !current.is_empty() {
                    paragraphs.push(Self {
                        lines: std::mem::take(&mut current),
                    });
                }
                continue;
            }
            current.push(parts);
        }

        if !current.is_empty() {
            paragraphs.push(Self { lines: current });
        }

        paragraphs
    }

    /// The lines of this paragraph in order.
    #[must_use]
    pub fn lines(&self) -> &[LineParts<'a>] {
        &self.lines
    }

    /// Indent of the first line.
    #[must_use]
    pub fn first_indent(&self) -> &'a str {
        self.lines.first().map_or("", |parts| parts.indent)
    }

    /// Contents of every line joined by single spaces.
    #[must_use]
    pub fn merged_content(&self) -> String {
        let mut merged = String::new();
        for parts in &self.lines {
            let content = parts.content.trim_end();
            if content.is_empty() {
                continue;
            }
            if !merged.is_empty() {
                merged.push(' ');
            }
            merged.push_str(content);
        }
        merged
    }
}

// =============================================================================
// Cells: grapheme-indexed view of a string
// =============================================================================

/// Grapheme-indexed view of a string with cumulative cell offsets.
///
/// Index `i` addresses the i-th grapheme; ranges are half-open grapheme
/// ranges. Used by strategies that scan for break positions.
#[derive(Debug)]
pub(crate) struct Cells<'a> {
    text: &'a str,
    /// Byte offset of each grapheme start, plus `text.len()` at the end.
    bytes: Vec<usize>,
    /// Cell offset of each grapheme start, plus the total width at the end.
    cols: Vec<usize>,
}

impl<'a> Cells<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let mut bytes = Vec::with_capacity(text.len() + 1);
        let mut cols = Vec::with_capacity(text.len() + 1);
        let mut col = 0;
        for (offset, grapheme) in text.grapheme_indices(true) {
            bytes.push(offset);
            cols.push(col);
            col += grapheme_width(grapheme);
        }
        bytes.push(text.len());
        cols.push(col);
        Self { text, bytes, cols }
    }

    /// Number of graphemes.
    pub(crate) fn len(&self) -> usize {
        self.bytes.len() - 1
    }

    pub(crate) fn grapheme(&self, index: usize) -> &'a str {
        &self.text[self.bytes[index]..self.bytes[index + 1]]
    }

    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[self.bytes[start]..self.bytes[end]]
    }

    pub(crate) fn width(&self, start: usize, end: usize) -> usize {
        self.cols[end] - self.cols[start]
    }

    pub(crate) fn is_whitespace(&self, index: usize) -> bool {
        is_whitespace_grapheme(self.grapheme(index))
    }

    /// Width of `start..end` once trailing whitespace is dropped.
    pub(crate) fn trimmed_width(&self, start: usize, end: usize) -> usize {
        let mut last = end;
        while last > start && self.is_whitespace(last - 1) {
            last -= 1;
        }
        self.width(start, last)
    }

    /// Largest `end` such that `start..end` fits in `avail` cells, but
    /// always at least one grapheme so callers make progress.
    pub(crate) fn fit(&self, start: usize, avail: usize) -> usize {
        let limit = self.cols[start] + avail;
        // cols is monotone, so partition_point finds the first start past the limit.
        let end = self.cols[start..].partition_point(|&c| c <= limit) + start - 1;
        end.clamp(start + 1, self.len())
    }

    /// First non-whitespace grapheme at or after `index`.
    pub(crate) fn skip_whitespace(&self, mut index: usize) -> usize {
        while index < self.len() && self.is_whitespace(index) {
            index += 1;
        }
        index
    }
}
