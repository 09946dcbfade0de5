use std::path::PathBuf;

use clap::Args;
use reflow_text::unwrap::{DEFAULT_SHORT_LINE_THRESHOLD, detect_if_already_wrapped_with};
use serde::Serialize;

use crate::error::{CliError, Result};
use crate::io::{read_input, write_output};

#[derive(Debug, Clone, Args)]
pub struct DetectArgs {
    /// Input file (stdin when omitted or `-`).
    pub input: Option<PathBuf>,

    /// Lines narrower than this many columns count as short.
    #[arg(long, default_value_t = DEFAULT_SHORT_LINE_THRESHOLD)]
    pub threshold: usize,

    /// Print the verdict as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectReport {
    pub already_wrapped: bool,
    pub threshold: usize,
}

pub fn detect(text: &str, threshold: usize) -> Result<DetectReport> {
    if threshold == 0 {
        return Err(CliError::invalid("--threshold must be at least 1"));
    }
    Ok(DetectReport {
        already_wrapped: detect_if_already_wrapped_with(text, threshold),
        threshold,
    })
}

pub fn run_detect(args: DetectArgs) -> Result<()> {
    let input = read_input(args.input.as_deref())?;
    let report = detect(&input, args.threshold)?;
    let body = if args.json {
        serde_json::to_string_pretty(&report)?
    } else if report.already_wrapped {
        "already wrapped".to_string()
    } else {
        "not wrapped".to_string()
    };
    write_output(None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lines_are_wrapped() {
        let report = detect("a\nb\nc", DEFAULT_SHORT_LINE_THRESHOLD).unwrap();
        assert!(report.already_wrapped);
    }

    #[test]
    fn threshold_changes_verdict() {
        let text = "twelve chars\ntwelve chars";
        assert!(detect(text, 20).unwrap().already_wrapped);
        assert!(!detect(text, 5).unwrap().already_wrapped);
    }

    #[test]
    fn zero_threshold_rejected() {
        let err = detect("x", 0).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
