#![forbid(unsafe_code)]

//! The reflow pipeline: normalize, optionally unwrap, wrap, measure.
//!
//! # Example
//! ```
//! use reflow_text::{WrapMode, WrapOptions, reflow};
//!
//! let options = WrapOptions::new(20).mode(WrapMode::Word).unwrap_first(true);
//! let result = reflow("Hello\n\nWorld", &options).unwrap();
//! assert_eq!(result.wrapped(), "Hello\n\nWorld");
//! assert_eq!(result.stats_output().paragraphs, 2);
//! ```

use std::fmt;

use tracing::{debug, debug_span, warn};

use crate::error::{Result, WrapError};
use crate::line::display_width;
use crate::normalize::normalize;
use crate::stats::TextStats;
use crate::unwrap::unwrap_paragraphs;
use crate::wrap::{WrapMode, WrapOptions, wrap_lines};

/// Default ceiling on input size (4 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 4 * 1024 * 1024;

// =============================================================================
// EngineLimits
// =============================================================================

/// Resource guards applied before any work is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineLimits {
    /// Largest accepted input, in bytes. Every strategy materializes its
    /// full output in memory.
    pub max_input_bytes: usize,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

// =============================================================================
// WrapNotice
// =============================================================================

/// Policy signals raised while producing a result. Never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum WrapNotice {
    /// `unwrap_first` was requested in code mode and skipped so that
    /// meaningful line breaks survive.
    UnwrapSkippedForCode,
    /// Lines left wider than the width (unsplittable tokens or indents).
    OverlongLines {
        /// How many lines exceed the width.
        count: usize,
    },
}

impl fmt::Display for WrapNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnwrapSkippedForCode => {
                f.write_str("unwrap skipped: code mode keeps original line breaks")
            }
            Self::OverlongLines { count } => write!(f, "{count} line(s) exceed the wrap width"),
        }
    }
}

// =============================================================================
// WrapResult
// =============================================================================

/// Immutable outcome of one reflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WrapResult {
    original: String,
    wrapped: String,
    options: WrapOptions,
    stats_input: TextStats,
    stats_output: TextStats,
    notices: Vec<WrapNotice>,
}

impl WrapResult {
    /// The raw input, exactly as given.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The wrapped output, lines joined with `\n`.
    #[must_use]
    pub fn wrapped(&self) -> &str {
        &self.wrapped
    }

    /// Output lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.wrapped.split('\n')
    }

    /// Snapshot of the options used.
    #[must_use]
    pub fn options(&self) -> &WrapOptions {
        &self.options
    }

    /// Statistics over the raw input.
    #[must_use]
    pub fn stats_input(&self) -> &TextStats {
        &self.stats_input
    }

    /// Statistics over the final output.
    #[must_use]
    pub fn stats_output(&self) -> &TextStats {
        &self.stats_output
    }

    /// Policy notices raised during the run.
    #[must_use]
    pub fn notices(&self) -> &[WrapNotice] {
        &self.notices
    }

    /// Consume the result, keeping only the wrapped text.
    #[must_use]
    pub fn into_wrapped(self) -> String {
        self.wrapped
    }
}

// =============================================================================
// WrapEngine
// =============================================================================

/// Stateless reflow pipeline with resource limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WrapEngine {
    limits: EngineLimits,
}

impl WrapEngine {
    /// Engine with the given limits.
    #[must_use]
    pub fn new(limits: EngineLimits) -> Self {
        Self { limits }
    }

    /// Limits in force.
    #[must_use]
    pub fn limits(&self) -> &EngineLimits {
        &self.limits
    }

    /// Run the pipeline.
    ///
    /// Statistics are taken over the raw input and the final output, never
    /// over intermediate forms. Identical input and options always give an
    /// identical result.
    pub fn run(&self, text: &str, options: &WrapOptions) -> Result<WrapResult> {
        if options.width == 0 {
            return Err(WrapError::InvalidWidth {
                width: options.width,
            });
        }
        if text.len() > self.limits.max_input_bytes {
            return Err(WrapError::InputTooLarge {
                len: text.len(),
                limit: self.limits.max_input_bytes,
            });
        }

        let _span = debug_span!("reflow", mode = %options.mode, width = options.width).entered();
        let mut notices = Vec::new();

        let normalized = normalize(text);
        let prepared = match (options.unwrap_first, options.mode) {
            (true, WrapMode::Code) => {
                warn!("unwrap_first ignored in code mode");
                notices.push(WrapNotice::UnwrapSkippedForCode);
                normalized
            }
            (true, _) => unwrap_paragraphs(&normalized, options.preserve_indentation),
            (false, _) => normalized,
        };

        let lines = wrap_lines(&prepared, options);
        let overlong = lines
            .iter()
            .filter(|line| display_width(line) > options.width)
            .count();
        if overlong > 0 {
            debug!(count = overlong, "lines left wider than the width");
            notices.push(WrapNotice::OverlongLines { count: overlong });
        }

        let wrapped = lines.join("\n");
        let stats_input = TextStats::from_text(text);
        let stats_output = TextStats::from_text(&wrapped);
        debug!(
            input_bytes = text.len(),
            input_lines = stats_input.lines,
            output_lines = stats_output.lines,
            "reflow complete"
        );

        Ok(WrapResult {
            original: text.to_string(),
            wrapped,
            options: *options,
            stats_input,
            stats_output,
            notices,
        })
    }
}

/// Run the pipeline with default limits.
pub fn reflow(text: &str, options: &WrapOptions) -> Result<WrapResult> {
    WrapEngine::default().run(text, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn rejects_zero_width() {
        let err = reflow("text", &WrapOptions::new(0)).unwrap_err();
        assert_eq!(err, WrapError::InvalidWidth { width: 0 });
    }

    #[test]
    fn rejects_oversized_input() {
        let engine = WrapEngine::new(EngineLimits { max_input_bytes: 4 });
        let err = engine.run("12345", &WrapOptions::new(10)).unwrap_err();
        assert_eq!(err, WrapError::InputTooLarge { len: 5, limit: 4 });
        assert!(engine.run("1234", &WrapOptions::new(10)).is_ok());
    }

    #[test]
    fn empty_input_gives_empty_output_and_zero_stats() {
        let result = reflow("", &WrapOptions::new(10)).unwrap();
        assert_eq!(result.wrapped(), "");
        assert!(result.stats_input().is_empty());
        assert!(result.stats_output().is_empty());
        assert!(result.notices().is_empty());
    }

    #[test]
    fn stats_use_raw_input_not_normalized() {
        let raw = "alpha   \r\nbeta";
        let options = WrapOptions::new(40).preserve_lines(true);
        let result = reflow(raw, &options).unwrap();
        assert_eq!(result.original(), raw);
        // Trailing spaces survive in the input stats.
        assert_eq!(result.stats_input().chars, 13);
        assert_eq!(result.stats_output().chars, 10);
        assert_eq!(result.wrapped(), "alpha\nbeta");
    }

    #[test]
    fn unwrap_first_merges_before_wrapping() {
        let options = WrapOptions::new(40)
            .preserve_lines(true)
            .unwrap_first(true);
        let result = reflow("one\ntwo\n\nthree", &options).unwrap();
        assert_eq!(result.wrapped(), "one two\n\nthree");
    }

    #[test]
    fn options_snapshot_kept() {
        let options = WrapOptions::new(33).mode(WrapMode::Smart).hyphenate(true);
        let result = reflow("x", &options).unwrap();
        assert_eq!(result.options(), &options);
    }

    #[test]
    fn overlong_lines_reported() {
        let result = reflow("a supercalifragilistic b", &WrapOptions::new(10)).unwrap();
        assert_eq!(result.notices(), &[WrapNotice::OverlongLines { count: 1 }]);
        assert_eq!(result.lines().count(), 3);
    }

    #[test]
    fn forced_breaks_leave_no_overlong_lines() {
        let options = WrapOptions::new(10).force_break_long_words(true);
        let result = reflow("a supercalifragilistic b", &options).unwrap();
        assert!(result.notices().is_empty());
    }

    #[traced_test]
    #[test]
    fn code_mode_skips_unwrap_with_notice() {
        let options = WrapOptions::new(40).mode(WrapMode::Code).unwrap_first(true);
        let result = reflow("let a = 1;\nlet b = 2;", &options).unwrap();
        assert_eq!(result.wrapped(), "let a = 1;\nlet b = 2;");
        assert_eq!(result.notices(), &[WrapNotice::UnwrapSkippedForCode]);
        assert!(logs_contain("unwrap_first ignored in code mode"));
    }

    #[test]
    fn deterministic() {
        let options = WrapOptions::new(12).mode(WrapMode::Smart);
        let text = "Identical input and options give identical results.";
        assert_eq!(reflow(text, &options), reflow(text, &options));
    }

    #[test]
    fn notice_display() {
        assert_eq!(
            WrapNotice::OverlongLines { count: 2 }.to_string(),
            "2 line(s) exceed the wrap width"
        );
    }

    #[test]
    fn into_wrapped_returns_text() {
        let result = reflow("a b", &WrapOptions::new(1)).unwrap();
        assert_eq!(result.into_wrapped(), "a\nb");
    }
}
