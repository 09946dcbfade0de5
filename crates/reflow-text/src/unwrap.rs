#![forbid(unsafe_code)]

//! Paragraph reconstruction for text that is already hard-wrapped.
//!
//! Consecutive non-blank lines are merged into one line per paragraph;
//! blank lines are re-emitted one for one, so blank-line runs survive
//! exactly.
//!
//! # Example
//! ```
//! use reflow_text::unwrap::unwrap_paragraphs;
//!
//! let text = "textwrap: a small\nlibrary for\nwrapping text.\n\n\nNext.";
//! assert_eq!(
//!     unwrap_paragraphs(text, false),
//!     "textwrap: a small library for wrapping text.\n\n\nNext."
//! );
//! ```

use tracing::trace;

use crate::line::{LineParts, display_width, is_blank};
use crate::normalize::normalize;

/// Lines shorter than this many cells count as "short" by default.
pub const DEFAULT_SHORT_LINE_THRESHOLD: usize = 50;

/// Share of short lines above which text looks pre-wrapped.
const SHORT_LINE_RATIO: f64 = 0.4;

/// Merge hard-wrapped lines back into one line per paragraph.
///
/// With `preserve_indentation`, the first line's leading whitespace is kept
/// as the merged paragraph's prefix. Later lines are always trimmed before
/// joining.
#[must_use]
pub fn unwrap_paragraphs(text: &str, preserve_indentation: bool) -> String {
    let normalized = normalize(text);
    let mut out: Vec<String> = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();

    for line in normalized.split('\n') {
        if is_blank(line) {
            flush(&mut buffer, preserve_indentation, &mut out);
            out.push(String::new());
        } else {
            buffer.push(line);
        }
    }
    flush(&mut buffer, preserve_indentation, &mut out);

    trace!(lines = out.len(), "unwrapped paragraphs");
    out.join("\n")
}

fn flush(buffer: &mut Vec<&str>, preserve_indentation: bool, out: &mut Vec<String>) {
    let Some(first) = buffer.first() else {
        return;
    };

    let mut merged = if preserve_indentation {
        LineParts::split(first).indent.to_string()
    } else {
        String::new()
    };
    let prefix_len = merged.len();

    for word in buffer.iter().flat_map(|line| line.split_whitespace()) {
        if merged.len() > prefix_len {
            merged.push(' ');
        }
        merged.push_str(word);
    }

    out.push(merged);
    buffer.clear();
}

/// Advisory check: does this text look already hard-wrapped?
///
/// True when more than 40% of the non-blank lines are shorter than
/// [`DEFAULT_SHORT_LINE_THRESHOLD`] cells.
#[must_use]
pub fn detect_if_already_wrapped(text: &str) -> bool {
    detect_if_already_wrapped_with(text, DEFAULT_SHORT_LINE_THRESHOLD)
}

/// [`detect_if_already_wrapped`] with a custom short-line threshold.
#[must_use]
pub fn detect_if_already_wrapped_with(text: &str, threshold: usize) -> bool {
    let normalized = normalize(text);
    let mut total = 0usize;
    let mut short = 0usize;

    for line in normalized.split('\n').filter(|line| !is_blank(line)) {
        total += 1;
        if display_width(line.trim()) < threshold {
            short += 1;
        }
    }

    if total == 0 {
        return false;
    }
    short as f64 / total as f64 > SHORT_LINE_RATIO
}
