use clap::{ArgAction, Parser, Subcommand};

use crate::detect::{DetectArgs, run_detect};
use crate::error::Result;
use crate::stats::{StatsArgs, run_stats};
use crate::unwrap::{UnwrapArgs, run_unwrap};
use crate::wrap::{WrapArgs, run_wrap};

#[derive(Debug, Parser)]
#[command(
    name = "reflow",
    about = "Rewrap prose and source code to a fixed column width",
    version
)]
pub struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Whether errors should be reported as JSON.
    #[must_use]
    pub fn wants_json(&self) -> bool {
        match &self.command {
            Commands::Wrap(args) => args.json,
            Commands::Stats(args) => args.json,
            Commands::Detect(args) => args.json,
            Commands::Unwrap(_) => false,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Wrap text to a width with one of four strategies.
    Wrap(WrapArgs),

    /// Merge hard-wrapped lines back into paragraphs.
    Unwrap(UnwrapArgs),

    /// Print character, word, sentence, paragraph and line counts.
    Stats(StatsArgs),

    /// Report whether text already looks hard-wrapped.
    Detect(DetectArgs),
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Wrap(args) => run_wrap(args),
        Commands::Unwrap(args) => run_unwrap(args),
        Commands::Stats(args) => run_stats(args),
        Commands::Detect(args) => run_detect(args),
    }
}
