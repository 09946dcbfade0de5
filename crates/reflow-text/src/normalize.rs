#![forbid(unsafe_code)]

//! Line-ending unification and trailing-whitespace trimming.
//!
//! # Example
//! ```
//! use reflow_text::normalize::normalize;
//!
//! assert_eq!(normalize("a  \r\n\r\n  b\t\rc"), "a\n\n  b\nc");
//! ```

/// Convert CRLF and lone CR line endings to LF.
#[must_use]
pub fn normalize_line_endings(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    out
}

/// Strip trailing spaces and tabs from every line.
///
/// Leading whitespace and runs of blank lines are left alone. Expects LF
/// line endings.
#[must_use]
pub fn trim_trailing_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (idx, line) in text.split('\n').enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        out.push_str(line.trim_end_matches([' ', '\t']));
    }
    out
}

/// Unify line endings, then trim trailing spaces/tabs per line.
#[must_use]
pub fn normalize(text: &str) -> String {
    trim_trailing_whitespace(&normalize_line_endings(text))
}
