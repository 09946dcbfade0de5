#![forbid(unsafe_code)]

//! Text statistics used to validate wrap input and output.
//!
//! Every count is derived fresh from the text; nothing is cached.
//!
//! # Example
//! ```
//! use reflow_text::stats::TextStats;
//!
//! let stats = TextStats::from_text("Hello, World!\n\nNew paragraph.");
//! assert_eq!(stats.words, 4);
//! assert_eq!(stats.sentences, 2);
//! assert_eq!(stats.paragraphs, 2);
//! assert_eq!(stats.lines, 3);
//! ```

use std::fmt;

use unicode_segmentation::UnicodeSegmentation;

use crate::normalize::normalize_line_endings;

/// Derived metrics for a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextStats {
    /// Grapheme clusters after line-ending normalization (newlines included).
    pub chars: usize,
    /// Grapheme clusters that are not whitespace.
    pub chars_no_spaces: usize,
    /// Maximal runs of non-whitespace.
    pub words: usize,
    /// Runs of text ending in `.`, `!` or `?`.
    pub sentences: usize,
    /// Non-blank blocks separated by two or more newlines.
    pub paragraphs: usize,
    /// Newline-delimited segments (0 for a single all-blank line).
    pub lines: usize,
    /// `chars / lines`, rounded.
    pub avg_line_length: usize,
}

impl TextStats {
    /// Compute statistics for raw text.
    ///
    /// Line endings are normalized first, independently of any caller
    /// normalization. Total over every input.
    #[must_use]
    pub fn from_text(raw: &str) -> Self {
        let text = normalize_line_endings(raw);
        if text.is_empty() {
            return Self::default();
        }

        let mut chars = 0;
        let mut chars_no_spaces = 0;
        for grapheme in text.graphemes(true) {
            chars += 1;
            if !grapheme.chars().all(char::is_whitespace) {
                chars_no_spaces += 1;
            }
        }

        let words = text.split_whitespace().count();
        let sentences = count_sentences(&text);
        let paragraphs = count_paragraphs(&text);

        let segments = text.split('\n').count();
        let lines = if segments == 1 && text.trim().is_empty() {
            0
        } else {
            segments
        };

        let avg_line_length = if lines == 0 {
            0
        } else {
            (chars as f64 / lines as f64).round() as usize
        };

        Self {
            chars,
            chars_no_spaces,
            words,
            sentences,
            paragraphs,
            lines,
            avg_line_length,
        }
    }

    /// Whether every count is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for TextStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} chars ({} non-space), {} words, {} sentences, {} paragraphs, {} lines, avg {}/line",
            self.chars,
            self.chars_no_spaces,
            self.words,
            self.sentences,
            self.paragraphs,
            self.lines,
            self.avg_line_length
        )
    }
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// A sentence is a run of non-terminators closed by one or more terminators.
/// Any non-empty text holds at least one, even when it is all whitespace.
fn count_sentences(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut has_body = false;
    for c in text.chars() {
        if is_terminator(c) {
            if has_body {
                count += 1;
                has_body = false;
            }
        } else {
            has_body = true;
        }
    }

    count.max(1)
}

fn count_paragraphs(text: &str) -> usize {
    let mut count = 0;
    let mut block_has_content = false;
    let mut newlines = 0;

    for c in text.chars() {
        if c == '\n' {
            newlines += 1;
            continue;
        }
        if newlines >= 2 {
            if block_has_content {
                count += 1;
            }
            block_has_content = false;
        }
        newlines = 0;
        if !c.is_whitespace() {
            block_has_content = true;
        }
    }

    if block_has_content {
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_all_zero() {
        let stats = TextStats::from_text("");
        assert_eq!(stats, TextStats::default());
        assert!(stats.is_empty());
    }

    #[test]
    fn single_blank_line_has_zero_lines() {
        let stats = TextStats::from_text("   ");
        assert_eq!(stats.lines, 0);
        assert_eq!(stats.words, 0);
        assert_eq!(stats.sentences, 1);
        assert_eq!(stats.avg_line_length, 0);
        assert_eq!(stats.chars, 3);
        assert_eq!(stats.chars_no_spaces, 0);
    }

    #[test]
    fn blank_multi_line_counts_segments() {
        let stats = TextStats::from_text("\n\n");
        assert_eq!(stats.lines, 3);
        assert_eq!(stats.paragraphs, 0);
    }

    #[test]
    fn crlf_counts_as_single_newline() {
        let lf = TextStats::from_text("a\nb");
        let crlf = TextStats::from_text("a\r\nb");
        assert_eq!(lf, crlf);
        assert_eq!(crlf.chars, 3);
        assert_eq!(crlf.lines, 2);
    }

    #[test]
    fn words_are_whitespace_runs() {
        let stats = TextStats::from_text("  one\ttwo   three\n four ");
        assert_eq!(stats.words, 4);
    }

    #[test]
    fn sentences_collapse_terminator_runs() {
        assert_eq!(TextStats::from_text("Wait... What?! Yes.").sentences, 3);
    }

    #[test]
    fn sentence_defaults_to_one_without_terminator() {
        assert_eq!(TextStats::from_text("no punctuation here").sentences, 1);
    }

    #[test]
    fn terminators_only_still_one_sentence() {
        assert_eq!(TextStats::from_text("...").sentences, 1);
    }

    #[test]
    fn whitespace_only_text_is_one_sentence() {
        assert_eq!(TextStats::from_text(" \t\n ").sentences, 1);
        assert_eq!(TextStats::from_text("\n\n").sentences, 1);
        assert_eq!(TextStats::from_text("").sentences, 0);
    }

    #[test]
    fn paragraphs_need_two_newlines() {
        assert_eq!(TextStats::from_text("a\nb").paragraphs, 1);
        assert_eq!(TextStats::from_text("a\n\nb").paragraphs, 2);
        assert_eq!(TextStats::from_text("a\n\n\n\nb\n\n").paragraphs, 2);
        assert_eq!(TextStats::from_text("\n\na").paragraphs, 1);
    }

    #[test]
    fn paragraph_split_requires_adjacent_newlines() {
        // A whitespace-only line between newlines is not a split point.
        assert_eq!(TextStats::from_text("a\n \nb").paragraphs, 1);
    }

    #[test]
    fn average_line_length_rounds() {
        // 7 chars over 2 lines = 3.5 -> 4
        let stats = TextStats::from_text("abc\ndef");
        assert_eq!(stats.chars, 7);
        assert_eq!(stats.lines, 2);
        assert_eq!(stats.avg_line_length, 4);
    }

    #[test]
    fn chars_count_graphemes() {
        let stats = TextStats::from_text("e\u{0301} 你");
        assert_eq!(stats.chars, 3);
        assert_eq!(stats.chars_no_spaces, 2);
    }

    #[test]
    fn display_summary() {
        let text = TextStats::from_text("Hi.").to_string();
        assert!(text.starts_with("3 chars (3 non-space), 1 words, 1 sentences"));
    }
}
