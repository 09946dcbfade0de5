#![forbid(unsafe_code)]

//! Layered configuration: defaults, then a TOML/JSON file, then the
//! environment.
//!
//! ```toml
//! # reflow.toml
//! [wrap]
//! mode = "smart"
//! width = 72
//! preserve_indentation = true
//!
//! [limits]
//! max_input_bytes = 1048576
//! ```
//!
//! ```rust,ignore
//! let config = ReflowConfig::from_toml_file("reflow.toml")?
//!     .with_env_overrides()?
//!     .validated()?;
//! let result = config.engine().run(text, &config.wrap)?;
//! ```
//!
//! Every field defaults to the library defaults, so partial files work.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{EngineLimits, WrapEngine};
use crate::wrap::{WrapMode, WrapOptions};

/// Wrap width environment variable.
pub const ENV_WIDTH: &str = "REFLOW_WIDTH";
/// Wrap mode environment variable (`word`, `char`, `smart`, `code`).
pub const ENV_MODE: &str = "REFLOW_MODE";
/// Per-line wrapping toggle environment variable.
pub const ENV_PRESERVE_LINES: &str = "REFLOW_PRESERVE_LINES";
/// Unwrap-before-wrap toggle environment variable.
pub const ENV_UNWRAP_FIRST: &str = "REFLOW_UNWRAP_FIRST";
/// Indentation-preserving toggle environment variable.
pub const ENV_PRESERVE_INDENTATION: &str = "REFLOW_PRESERVE_INDENTATION";
/// Long-token splitting toggle environment variable.
pub const ENV_FORCE_BREAK: &str = "REFLOW_FORCE_BREAK";
/// Reserved hyphenation toggle environment variable.
pub const ENV_HYPHENATE: &str = "REFLOW_HYPHENATE";
/// Input size limit environment variable, in bytes.
pub const ENV_MAX_INPUT_BYTES: &str = "REFLOW_MAX_INPUT_BYTES";

/// Widest width accepted from configuration.
pub const MAX_WIDTH: usize = 10_000;

/// Errors that can occur when loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for {key}: `{value}`")]
    InvalidEnv { key: String, value: String },

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Everything a caller needs to run the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflowConfig {
    /// Wrap options.
    pub wrap: WrapOptions,
    /// Engine resource limits.
    pub limits: EngineLimits,
}

impl ReflowConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load from a file, picking the format from the extension
    /// (`.json` is JSON, anything else TOML).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Apply `REFLOW_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_env_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply `REFLOW_*` overrides using a custom lookup (for tests).
    pub fn with_env_overrides_from<F>(mut self, get_env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = get_env(ENV_WIDTH) {
            self.wrap.width = parse_usize(ENV_WIDTH, &value)?;
        }
        if let Some(value) = get_env(ENV_MODE) {
            self.wrap.mode = value
                .parse::<WrapMode>()
                .map_err(|_| invalid(ENV_MODE, &value))?;
        }
        if let Some(value) = get_env(ENV_PRESERVE_LINES) {
            self.wrap.preserve_lines = parse_bool(ENV_PRESERVE_LINES, &value)?;
        }
        if let Some(value) = get_env(ENV_UNWRAP_FIRST) {
            self.wrap.unwrap_first = parse_bool(ENV_UNWRAP_FIRST, &value)?;
        }
        if let Some(value) = get_env(ENV_PRESERVE_INDENTATION) {
            self.wrap.preserve_indentation = parse_bool(ENV_PRESERVE_INDENTATION, &value)?;
        }
        if let Some(value) = get_env(ENV_FORCE_BREAK) {
            self.wrap.force_break_long_words = parse_bool(ENV_FORCE_BREAK, &value)?;
        }
        if let Some(value) = get_env(ENV_HYPHENATE) {
            self.wrap.hyphenate = parse_bool(ENV_HYPHENATE, &value)?;
        }
        if let Some(value) = get_env(ENV_MAX_INPUT_BYTES) {
            self.limits.max_input_bytes = parse_usize(ENV_MAX_INPUT_BYTES, &value)?;
        }
        Ok(self)
    }

    /// Check every parameter. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.wrap.width == 0 {
            errors.push("wrap.width must be > 0".into());
        } else if self.wrap.width > MAX_WIDTH {
            errors.push(format!(
                "wrap.width must be <= {MAX_WIDTH}, got {}",
                self.wrap.width
            ));
        }

        if self.limits.max_input_bytes == 0 {
            errors.push("limits.max_input_bytes must be > 0".into());
        }

        errors
    }

    /// `self` if valid, otherwise every problem at once.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Engine built from the configured limits.
    #[must_use]
    pub fn engine(&self) -> WrapEngine {
        WrapEngine::new(self.limits)
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidEnv {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse().map_err(|_| invalid(key, value))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_library_defaults() {
        let config = ReflowConfig::default();
        assert_eq!(config.wrap, WrapOptions::default());
        assert_eq!(config.limits, EngineLimits::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ReflowConfig::from_toml_str("[wrap]\nmode = \"smart\"\nwidth = 72\n").unwrap();
        assert_eq!(config.wrap.mode, WrapMode::Smart);
        assert_eq!(config.wrap.width, 72);
        assert!(!config.wrap.preserve_lines);
        assert_eq!(config.limits, EngineLimits::default());
    }

    #[test]
    fn full_toml() {
        let toml = r#"
            [wrap]
            mode = "code"
            width = 100
            hyphenate = true
            preserve_lines = true
            unwrap_first = false
            preserve_indentation = true
            force_break_long_words = true

            [limits]
            max_input_bytes = 2048
        "#;
        let config = ReflowConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.wrap.mode, WrapMode::Code);
        assert!(config.wrap.force_break_long_words);
        assert_eq!(config.limits.max_input_bytes, 2048);
        assert_eq!(config.engine().limits().max_input_bytes, 2048);
    }

    #[test]
    fn json_round_trip() {
        let config = ReflowConfig {
            wrap: WrapOptions::new(50).mode(WrapMode::Char),
            limits: EngineLimits { max_input_bytes: 99 },
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"mode\":\"char\""));
        assert_eq!(ReflowConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn bad_toml_is_reported() {
        let err = ReflowConfig::from_toml_str("[wrap]\nmode = \"justify\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ReflowConfig::from_file("/nonexistent/reflow.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn env_overrides_apply() {
        let config = ReflowConfig::default()
            .with_env_overrides_from(env(&[
                (ENV_WIDTH, "64"),
                (ENV_MODE, "Smart"),
                (ENV_PRESERVE_LINES, "yes"),
                (ENV_UNWRAP_FIRST, "1"),
                (ENV_PRESERVE_INDENTATION, "on"),
                (ENV_FORCE_BREAK, "true"),
                (ENV_HYPHENATE, "0"),
                (ENV_MAX_INPUT_BYTES, "512"),
            ]))
            .unwrap();
        assert_eq!(config.wrap.width, 64);
        assert_eq!(config.wrap.mode, WrapMode::Smart);
        assert!(config.wrap.preserve_lines);
        assert!(config.wrap.unwrap_first);
        assert!(config.wrap.preserve_indentation);
        assert!(config.wrap.force_break_long_words);
        assert!(!config.wrap.hyphenate);
        assert_eq!(config.limits.max_input_bytes, 512);
    }

    #[test]
    fn env_absent_changes_nothing() {
        let config = ReflowConfig::default()
            .with_env_overrides_from(|_| None)
            .unwrap();
        assert_eq!(config, ReflowConfig::default());
    }

    #[test]
    fn env_invalid_values_rejected() {
        let err = ReflowConfig::default()
            .with_env_overrides_from(env(&[(ENV_WIDTH, "wide")]))
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidEnv { ref key, ref value } if key == ENV_WIDTH && value == "wide")
        );

        let err = ReflowConfig::default()
            .with_env_overrides_from(env(&[(ENV_FORCE_BREAK, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));
    }

    #[test]
    fn validation_collects_every_problem() {
        let config = ReflowConfig {
            wrap: WrapOptions::new(0),
            limits: EngineLimits { max_input_bytes: 0 },
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        let err = config.validated().unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation errors: wrap.width must be > 0; limits.max_input_bytes must be > 0"
        );
    }

    #[test]
    fn width_upper_bound() {
        let config = ReflowConfig {
            wrap: WrapOptions::new(MAX_WIDTH + 1),
            ..ReflowConfig::default()
        };
        assert_eq!(config.validate().len(), 1);
    }
}
