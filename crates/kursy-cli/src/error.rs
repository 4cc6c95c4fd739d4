use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
///
/// Rate failures are not in here: they travel in the envelope's `errors`
/// array and the process exits with 3.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] kursy_core::ValidationError),

    #[error(transparent)]
    Core(#[from] kursy_core::CoreError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Core(_) | Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
