use std::path::PathBuf;

use clap::Args;
use reflow_text::TextStats;

use crate::error::Result;
use crate::io::{read_input, write_output};

#[derive(Debug, Clone, Default, Args)]
pub struct StatsArgs {
    /// Input file (stdin when omitted or `-`).
    pub input: Option<PathBuf>,

    /// Print the statistics as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn render_stats(text: &str, json: bool) -> Result<String> {
    let stats = TextStats::from_text(text);
    if json {
        Ok(serde_json::to_string_pretty(&stats)?)
    } else {
        Ok(stats.to_string())
    }
}

pub fn run_stats(args: StatsArgs) -> Result<()> {
    let input = read_input(args.input.as_deref())?;
    write_output(None, &render_stats(&input, args.json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_summary() {
        let out = render_stats("Hi there. Bye!", false).unwrap();
        assert!(out.starts_with("14 chars (12 non-space), 3 words, 2 sentences"));
    }

    #[test]
    fn json_has_every_field() {
        let out = render_stats("", true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        for key in [
            "chars",
            "chars_no_spaces",
            "words",
            "sentences",
            "paragraphs",
            "lines",
            "avg_line_length",
        ] {
            assert_eq!(value[key], 0, "{key}");
        }
    }
}
