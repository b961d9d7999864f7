//! Failures of an invocation and the exit codes they map to.

use thiserror::Error;

/// Exit code of a successful run or of `--help`.
pub const EXIT_SUCCESS: u8 = 0;

/// A user input error. Reported together with the usage text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// No arguments at all
    #[error("expected a command and an input file, got {0} arguments")]
    ArgCount(usize),

    /// A command or a mandatory option is missing after parsing
    #[error("required argument not found: {0}")]
    RequiredArgNotFound(String),

    /// A value option is not followed by a value
    #[error("missing value for option {0}")]
    MissingArg(String),

    /// The quality is not an integer
    #[error("quality must be an integer, got {0:?}")]
    QualityFormat(String),

    /// The token names no command or option
    #[error("unknown argument: {0}")]
    UnknownArg(String),
}

impl UsageError {
    pub fn exit_code(&self) -> u8 {
        match self {
            UsageError::ArgCount(_) => 2,
            UsageError::RequiredArgNotFound(_) => 3,
            UsageError::MissingArg(_) => 4,
            UsageError::QualityFormat(_) => 5,
            UsageError::UnknownArg(_) => 6,
        }
    }
}

/// Everything that ends an invocation with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("error: {0}")]
    Usage(#[from] UsageError),

    /// The compress or decompress task failed
    #[error("error: {0:#}")]
    Task(anyhow::Error),
}

impl CliError {
    /// Exit code of a failed task.
    pub const TASK_FAILED: u8 = 7;

    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Usage(err) => err.exit_code(),
            CliError::Task(_) => Self::TASK_FAILED,
        }
    }

    /// Whether the usage text should be printed along with the message.
    pub fn shows_usage(&self) -> bool {
        matches!(self, CliError::Usage(_))
    }
}
