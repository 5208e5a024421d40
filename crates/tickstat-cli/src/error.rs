use thiserror::Error;
use tickstat_core::{CoreError, ValidationError};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("failed to initialize logging: {0}")]
    Logging(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::Core(CoreError::Validation(_)) => 2,
            Self::Core(CoreError::DataUnavailable { .. } | CoreError::InsufficientData { .. }) => 3,
            Self::Serialization(_) => 4,
            Self::Core(CoreError::Source(_)) => 6,
            Self::Logging(_) | Self::Io(_) | Self::Core(CoreError::Io(_)) => 10,
        }
    }
}
