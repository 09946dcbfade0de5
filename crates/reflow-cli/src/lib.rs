#![forbid(unsafe_code)]

pub mod cli;
pub mod detect;
pub mod error;
pub mod io;
pub mod logging;
pub mod stats;
pub mod unwrap;
pub mod wrap;

pub use cli::{Cli, Commands, run};
pub use error::{CliError, Result};
