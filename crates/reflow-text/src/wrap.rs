#![forbid(unsafe_code)]

//! Fixed-width wrap strategies.
//!
//! Four strategies share one options value:
//! - [`WrapMode::Word`]: greedy packing at whitespace.
//! - [`WrapMode::Char`]: exact width-sized chunks, indentation included.
//! - [`WrapMode::Smart`]: breaks picked from a window around the width,
//!   avoiding breaks right after an opening bracket or quote.
//! - [`WrapMode::Code`]: per-line, indentation-preserving, breaking after
//!   whitespace, `,`, `;` or a closing bracket.
//!
//! Word and smart wrap either each line on its own (`preserve_lines`) or
//! whole paragraphs. A captured indent prefixes every produced line and
//! counts toward the width.
//!
//! # Example
//! ```
//! use reflow_text::wrap::{WrapMode, WrapOptions, wrap_lines};
//!
//! let lines = wrap_lines("Hello world foo bar", &WrapOptions::new(10));
//! assert_eq!(lines, vec!["Hello", "world foo", "bar"]);
//!
//! let lines = wrap_lines("abcdefghij", &WrapOptions::new(4).mode(WrapMode::Char));
//! assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::trace;

use crate::line::{Cells, LineParts, Paragraph, display_width};

/// Smart mode scans this many cells either side of the width.
pub const SMART_WINDOW: usize = 10;

/// Code mode looks back at most this many graphemes for a break point.
pub const CODE_LOOKBACK: usize = 15;

// =============================================================================
// WrapMode
// =============================================================================

/// Wrap strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WrapMode {
    /// Greedy packing at word boundaries.
    #[default]
    Word,
    /// Hard split every line into width-sized chunks.
    Char,
    /// Visually balanced breaks near the width.
    Smart,
    /// Indentation-aware wrapping for source code.
    Code,
}

impl WrapMode {
    /// Every mode, in display order.
    pub const ALL: [Self; 4] = [Self::Word, Self::Char, Self::Smart, Self::Code];

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Char => "char",
            Self::Smart => "smart",
            Self::Code => "code",
        }
    }
}

impl fmt::Display for WrapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown wrap mode name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown wrap mode `{0}` (expected word, char, smart or code)")]
pub struct ParseWrapModeError(pub String);

impl FromStr for WrapMode {
    type Err = ParseWrapModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "word" => Ok(Self::Word),
            "char" | "character" => Ok(Self::Char),
            "smart" => Ok(Self::Smart),
            "code" => Ok(Self::Code),
            _ => Err(ParseWrapModeError(s.to_string())),
        }
    }
}

// =============================================================================
// WidthPreset
// =============================================================================

/// Common column widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidthPreset {
    /// 50 columns.
    Narrow,
    /// 72 columns (plain-text email).
    Email,
    /// 80 columns (terminal).
    Terminal,
    /// 100 columns.
    Wide,
    /// 120 columns.
    ExtraWide,
}

impl WidthPreset {
    /// Every preset, narrowest first.
    pub const ALL: [Self; 5] = [
        Self::Narrow,
        Self::Email,
        Self::Terminal,
        Self::Wide,
        Self::ExtraWide,
    ];

    /// Column count for this preset.
    #[must_use]
    pub const fn columns(self) -> usize {
        match self {
            Self::Narrow => 50,
            Self::Email => 72,
            Self::Terminal => 80,
            Self::Wide => 100,
            Self::ExtraWide => 120,
        }
    }

    /// Preset with exactly this column count, if any.
    #[must_use]
    pub fn from_columns(columns: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.columns() == columns)
    }
}

// =============================================================================
// WrapOptions
// =============================================================================

/// Options shared by every strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WrapOptions {
    /// Wrap strategy.
    pub mode: WrapMode,
    /// Maximum width in cells. Must be at least 1.
    pub width: usize,
    /// Reserved; no strategy reads it yet.
    pub hyphenate: bool,
    /// Wrap each input line on its own instead of merging paragraphs.
    pub preserve_lines: bool,
    /// Merge hard-wrapped lines into paragraphs before wrapping.
    pub unwrap_first: bool,
    /// Reuse a line's or paragraph's leading whitespace on every output line.
    pub preserve_indentation: bool,
    /// Split a token that alone exceeds the width.
    pub force_break_long_words: bool,
}

impl WrapOptions {
    /// Word-mode options for the given width, every flag off.
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            mode: WrapMode::Word,
            width,
            hyphenate: false,
            preserve_lines: false,
            unwrap_first: false,
            preserve_indentation: false,
            force_break_long_words: false,
        }
    }

    /// Set the wrap mode.
    #[must_use]
    pub fn mode(mut self, mode: WrapMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the width.
    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set the width from a preset.
    #[must_use]
    pub fn preset(mut self, preset: WidthPreset) -> Self {
        self.width = preset.columns();
        self
    }

    /// Set the reserved hyphenation flag.
    #[must_use]
    pub fn hyphenate(mut self, hyphenate: bool) -> Self {
        self.hyphenate = hyphenate;
        self
    }

    /// Set whether lines are wrapped independently.
    #[must_use]
    pub fn preserve_lines(mut self, preserve: bool) -> Self {
        self.preserve_lines = preserve;
        self
    }

    /// Set whether paragraphs are unwrapped before wrapping.
    #[must_use]
    pub fn unwrap_first(mut self, unwrap: bool) -> Self {
        self.unwrap_first = unwrap;
        self
    }

    /// Set whether indentation is reapplied to produced lines.
    #[must_use]
    pub fn preserve_indentation(mut self, preserve: bool) -> Self {
        self.preserve_indentation = preserve;
        self
    }

    /// Set whether overlong tokens are split.
    #[must_use]
    pub fn force_break_long_words(mut self, force: bool) -> Self {
        self.force_break_long_words = force;
        self
    }
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self::new(80)
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Wrap normalized text (LF line endings) with the selected strategy.
///
/// A width of 0 disables wrapping and returns the lines unchanged.
#[must_use]
pub fn wrap_lines(text: &str, options: &WrapOptions) -> Vec<String> {
    if options.width == 0 {
        return text.split('\n').map(str::to_string).collect();
    }

    let lines = match options.mode {
        WrapMode::Word => wrap_words(text, options),
        WrapMode::Char => wrap_chars(text, options),
        WrapMode::Smart => wrap_smart(text, options),
        WrapMode::Code => wrap_code(text, options),
    };
    trace!(mode = %options.mode, width = options.width, lines = lines.len(), "wrapped");
    lines
}

/// Width left for content once `indent` is placed. Never below 1.
#[inline]
fn available_width(width: usize, indent: &str) -> usize {
    width.saturating_sub(display_width(indent)).max(1)
}

#[inline]
fn prefixed(indent: &str, content: &str) -> String {
    let mut line = String::with_capacity(indent.len() + content.len());
    line.push_str(indent);
    line.push_str(content);
    line
}

type UnitWrapper = fn(&str, &str, usize, &WrapOptions, &mut Vec<String>);

/// Feed per-line or per-paragraph units to `wrap_unit`.
///
/// Each unit is `(indent, content, available width)`. Blank lines pass
/// through in per-line mode; paragraphs are rejoined with one blank line.
fn wrap_units(text: &str, options: &WrapOptions, wrap_unit: UnitWrapper) -> Vec<String> {
    let mut lines = Vec::new();

    if options.preserve_lines {
        for line in text.split('\n') {
            let parts = LineParts::split(line);
            if parts.is_blank() {
                lines.push(String::new());
                continue;
            }
            let indent = if options.preserve_indentation {
                parts.indent
            } else {
                ""
            };
            let avail = available_width(options.width, indent);
            wrap_unit(indent, parts.content.trim_end(), avail, options, &mut lines);
        }
        return lines;
    }

    for (idx, paragraph) in Paragraph::collect(text).iter().enumerate() {
        if idx > 0 {
            lines.push(String::new());
        }
        let indent = if options.preserve_indentation {
            paragraph.first_indent()
        } else {
            ""
        };
        let avail = available_width(options.width, indent);
        wrap_unit(indent, &paragraph.merged_content(), avail, options, &mut lines);
    }
    lines
}

// =============================================================================
// Word mode
// =============================================================================

/// Greedy word packing.
#[must_use]
pub fn wrap_words(text: &str, options: &WrapOptions) -> Vec<String> {
    wrap_units(text, options, wrap_word_unit)
}

fn wrap_word_unit(
    indent: &str,
    content: &str,
    avail: usize,
    options: &WrapOptions,
    lines: &mut Vec<String>,
) {
    let mut current = String::new();
    let mut current_width = 0;

    for word in content.split_whitespace() {
        let word_width = display_width(word);

        if !current.is_empty() {
            if current_width + 1 + word_width <= avail {
                current.push(' ');
                current.push_str(word);
                current_width += 1 + word_width;
                continue;
            }
            lines.push(prefixed(indent, &current));
            current.clear();
            current_width = 0;
        }

        if word_width <= avail {
            current.push_str(word);
            current_width = word_width;
        } else if options.force_break_long_words {
            break_long_word(indent, word, avail, lines);
        } else {
            lines.push(prefixed(indent, word));
        }
    }

    if !current.is_empty() {
        lines.push(prefixed(indent, &current));
    }
}

/// Split a word wider than `avail` into grapheme-safe chunks, one per line.
fn break_long_word(indent: &str, word: &str, avail: usize, lines: &mut Vec<String>) {
    let cells = Cells::new(word);
    let mut start = 0;
    while start < cells.len() {
        let end = cells.fit(start, avail);
        lines.push(prefixed(indent, cells.slice(start, end)));
        start = end;
    }
}

// =============================================================================
// Char mode
// =============================================================================

/// Split every line into exact width-sized chunks.
///
/// Indentation is not separated from content: leading whitespace is
/// chunked like any other character, which is what fixed-width character
/// grids want. Empty lines pass through.
#[must_use]
pub fn wrap_chars(text: &str, options: &WrapOptions) -> Vec<String> {
    let mut lines = Vec::new();
    for line in text.split('\n') {
        if line.is_empty() {
            lines.push(String::new());
            continue;
        }
        let cells = Cells::new(line);
        let mut start = 0;
        while start < cells.len() {
            let end = cells.fit(start, options.width);
            lines.push(cells.slice(start, end).to_string());
            start = end;
        }
    }
    lines
}

// =============================================================================
// Smart mode
// =============================================================================

/// Balanced breaks chosen from a window around the width.
#[must_use]
pub fn wrap_smart(text: &str, options: &WrapOptions) -> Vec<String> {
    wrap_units(text, options, wrap_smart_unit)
}

/// Openers a line should not end on.
fn is_opener(grapheme: &str) -> bool {
    matches!(
        grapheme,
        "(" | "[" | "{" | "\u{201C}" | "\u{2018}" | "\u{00AB}" | "\u{201E}" | "\u{201A}"
    )
}

fn wrap_smart_unit(
    indent: &str,
    content: &str,
    avail: usize,
    options: &WrapOptions,
    lines: &mut Vec<String>,
) {
    let cells = Cells::new(content);
    let n = cells.len();
    let mut start = cells.skip_whitespace(0);

    while start < n && cells.width(start, n) > avail {
        let (end, next) = smart_break(&cells, start, avail, options.force_break_long_words);
        lines.push(prefixed(indent, cells.slice(start, end).trim_end()));
        start = cells.skip_whitespace(next);
    }

    if start < n {
        lines.push(prefixed(indent, cells.slice(start, n).trim_end()));
    }
}

/// Pick a break for the remainder starting at `start`.
///
/// Returns `(chunk_end, next_start)` as grapheme indices.
fn smart_break(cells: &Cells<'_>, start: usize, avail: usize, force: bool) -> (usize, usize) {
    let n = cells.len();
    let fits = |i: usize| cells.is_whitespace(i) && cells.trimmed_width(start, i) <= avail;

    // Far end of the window inward.
    let far = cells.fit(start, avail + SMART_WINDOW).min(n - 1);
    let near = cells.fit(start, avail.saturating_sub(SMART_WINDOW));
    if let Some(i) = (near..=far)
        .rev()
        .find(|&i| fits(i) && !is_opener(cells.grapheme(i - 1)))
    {
        return (i, i + 1);
    }

    // Nothing in the window: nearest fitting space below it.
    if let Some(i) = (start + 1..near).rev().find(|&i| fits(i)) {
        return (i, i + 1);
    }

    let at_width = cells.fit(start, avail);
    if force {
        return (at_width, at_width);
    }

    // Never split a word unless asked: run on to the next space.
    match (at_width..n).find(|&i| cells.is_whitespace(i)) {
        Some(i) => (i, i + 1),
        None => (n, n),
    }
}

// =============================================================================
// Code mode
// =============================================================================

/// Per-line, indentation-preserving wrap for source code.
///
/// Lines are never merged and indentation is always kept, whatever
/// `preserve_lines` and `preserve_indentation` say.
#[must_use]
pub fn wrap_code(text: &str, options: &WrapOptions) -> Vec<String> {
    let mut lines = Vec::new();
    for line in text.split('\n') {
        let parts = LineParts::split(line);
        if parts.is_blank() {
            lines.push(String::new());
            continue;
        }
        let avail = available_width(options.width, parts.indent);
        wrap_code_line(
            parts.indent,
            parts.content.trim_end(),
            avail,
            options.force_break_long_words,
            &mut lines,
        );
    }
    lines
}

fn is_code_break(grapheme: &str) -> bool {
    matches!(grapheme, "," | ";" | ")" | "]" | "}") || grapheme.chars().all(char::is_whitespace)
}

fn wrap_code_line(indent: &str, content: &str, avail: usize, force: bool, lines: &mut Vec<String>) {
    let cells = Cells::new(content);
    let n = cells.len();
    let mut start = 0;

    while start < n && cells.width(start, n) > avail {
        let top = cells.fit(start, avail);
        let upper = top.min(n - 1);
        let floor = top.saturating_sub(CODE_LOOKBACK).max(start);

        let fits = |i: usize| {
            is_code_break(cells.grapheme(i)) && cells.trimmed_width(start, i + 1) <= avail
        };

        let found = match (floor..=upper).rev().find(|&i| fits(i)) {
            Some(i) => Some(i),
            None if force => None,
            // Unforced: nearest fitting break below the lookback, else the
            // first break past the width so only the unbreakable run is long.
            None => (start..floor)
                .rev()
                .find(|&i| fits(i))
                .or_else(|| (top..n).find(|&i| is_code_break(cells.grapheme(i)))),
        };

        match found {
            Some(i) => {
                lines.push(prefixed(indent, cells.slice(start, i + 1).trim_end()));
                start = cells.skip_whitespace(i + 1);
            }
            None if force => {
                lines.push(prefixed(indent, cells.slice(start, top).trim_end()));
                start = cells.skip_whitespace(top);
            }
            None => break,
        }
    }

    if start < n {
        lines.push(prefixed(indent, cells.slice(start, n)));
    }
}
