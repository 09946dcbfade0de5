use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{Args, ValueEnum};
use reflow_text::config::ReflowConfig;
use reflow_text::{WidthPreset, WrapMode, WrapResult, detect_if_already_wrapped};
use tracing::{debug, info};

use crate::error::Result;
use crate::io::{read_input, write_output};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
    /// 50 columns.
    Narrow,
    /// 72 columns.
    Email,
    /// 80 columns.
    Terminal,
    /// 100 columns.
    Wide,
    /// 120 columns.
    ExtraWide,
}

impl From<PresetArg> for WidthPreset {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Narrow => Self::Narrow,
            PresetArg::Email => Self::Email,
            PresetArg::Terminal => Self::Terminal,
            PresetArg::Wide => Self::Wide,
            PresetArg::ExtraWide => Self::ExtraWide,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct WrapArgs {
    /// Input file (stdin when omitted or `-`).
    pub input: Option<PathBuf>,

    /// Target width in columns.
    #[arg(long, short = 'w', conflicts_with = "preset")]
    pub width: Option<usize>,

    /// Named width.
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Strategy: word, char, smart or code.
    #[arg(long, short = 'm', value_name = "MODE")]
    pub mode: Option<WrapMode>,

    /// Wrap each input line on its own instead of merging paragraphs.
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
        value_name = "BOOL"
    )]
    pub preserve_lines: Option<bool>,

    /// Merge hard-wrapped lines into paragraphs before wrapping.
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
        value_name = "BOOL"
    )]
    pub unwrap_first: Option<bool>,

    /// Keep leading indentation on wrapped lines.
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
        value_name = "BOOL"
    )]
    pub preserve_indentation: Option<bool>,

    /// Split tokens wider than the width.
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
        value_name = "BOOL"
    )]
    pub force_break_long_words: Option<bool>,

    /// Reserved; accepted and recorded but has no effect.
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
        value_name = "BOOL"
    )]
    pub hyphenate: Option<bool>,

    /// Unwrap first when the input looks hard-wrapped.
    #[arg(long)]
    pub auto_unwrap: bool,

    /// TOML or JSON config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the full result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Write the wrapped text to this file.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Layer defaults, config file, environment and flags, in that order.
pub fn resolve_config<F>(args: &WrapArgs, get_env: F) -> Result<ReflowConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let base = match &args.config {
        Some(path) => ReflowConfig::from_file(path)?,
        None => ReflowConfig::default(),
    };
    let mut config = base.with_env_overrides_from(get_env)?;

    let wrap = &mut config.wrap;
    if let Some(width) = args.width {
        wrap.width = width;
    }
    if let Some(preset) = args.preset {
        wrap.width = WidthPreset::from(preset).columns();
    }
    if let Some(mode) = args.mode {
        wrap.mode = mode;
    }
    if let Some(value) = args.preserve_lines {
        wrap.preserve_lines = value;
    }
    if let Some(value) = args.unwrap_first {
        wrap.unwrap_first = value;
    }
    if let Some(value) = args.preserve_indentation {
        wrap.preserve_indentation = value;
    }
    if let Some(value) = args.force_break_long_words {
        wrap.force_break_long_words = value;
    }
    if let Some(value) = args.hyphenate {
        wrap.hyphenate = value;
    }

    Ok(config.validated()?)
}

/// Run the engine, turning on `unwrap_first` for hard-wrapped prose when
/// `auto_unwrap` is set.
pub fn reflow_input(config: &ReflowConfig, auto_unwrap: bool, input: &str) -> Result<WrapResult> {
    let mut options = config.wrap;
    if auto_unwrap
        && !options.unwrap_first
        && options.mode != WrapMode::Code
        && detect_if_already_wrapped(input)
    {
        debug!("input looks hard-wrapped; unwrapping first");
        options.unwrap_first = true;
    }
    Ok(config.engine().run(input, &options)?)
}

pub fn run_wrap(args: WrapArgs) -> Result<()> {
    let config = resolve_config(&args, |key| std::env::var(key).ok())?;
    let input = read_input(args.input.as_deref())?;
    let result = reflow_input(&config, args.auto_unwrap, &input)?;

    for notice in result.notices() {
        info!(%notice, "reflow notice");
    }

    if let Some(path) = &args.output {
        write_output(Some(path), result.wrapped())?;
    }
    if args.json {
        write_output(None, &serde_json::to_string_pretty(&result)?)?;
    } else if args.output.is_none() {
        write_output(None, result.wrapped())?;
    }
    Ok(())
}
