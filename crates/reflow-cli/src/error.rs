use reflow_text::WrapError;
use reflow_text::config::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

/// Exit status for usage and configuration problems.
pub const EXIT_USAGE: i32 = 2;
/// Exit status for everything else.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Wrap(#[from] WrapError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl CliError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::InvalidArgument { .. } => EXIT_USAGE,
            Self::Wrap(WrapError::InvalidWidth { .. }) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
