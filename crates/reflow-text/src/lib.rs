#![forbid(unsafe_code)]

//! Text reflow engine.
//!
//! # Role
//! `reflow-text` rewraps arbitrary text or source code to a fixed column
//! width. It is pure and synchronous: no I/O, no shared state, so calls may
//! run in parallel and results may be memoized by `(text, options)`.
//!
//! # Pipeline
//! 1. [`normalize`]: unify line endings, trim trailing spaces/tabs.
//! 2. [`unwrap`]: optionally merge hard-wrapped lines into paragraphs.
//! 3. [`wrap`]: one of four strategies ([`WrapMode`]).
//! 4. [`stats`]: metrics over the raw input and the final output.
//!
//! [`engine::WrapEngine`] runs the whole pipeline and returns an immutable
//! [`WrapResult`].
//!
//! # Example
//! ```
//! use reflow_text::{WrapMode, WrapOptions, reflow};
//!
//! let options = WrapOptions::new(10).mode(WrapMode::Word);
//! let result = reflow("The quick brown fox jumps over the lazy dog", &options).unwrap();
//! assert_eq!(
//!     result.lines().collect::<Vec<_>>(),
//!     vec!["The quick", "brown fox", "jumps over", "the lazy", "dog"]
//! );
//! ```

#[cfg(feature = "config")]
pub mod config;
pub mod engine;
pub mod error;
pub mod line;
pub mod normalize;
pub mod stats;
pub mod unwrap;
pub mod wrap;

pub use engine::{EngineLimits, WrapEngine, WrapNotice, WrapResult, reflow};
pub use error::{Result, WrapError};
pub use stats::TextStats;
pub use unwrap::{detect_if_already_wrapped, unwrap_paragraphs};
pub use wrap::{WidthPreset, WrapMode, WrapOptions};
