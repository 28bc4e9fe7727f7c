use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Domain(#[from] rideshare_core::DomainError),

    #[error(transparent)]
    Core(#[from] rideshare_core::CoreError),

    #[error("invalid input: {0}")]
    Input(String),

    #[error(transparent)]
    Invalid(#[from] rideshare_core::ValidationErrors),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("api request failed: {0}")]
    Api(#[from] rideshare_core::ApiError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Domain(_) => 2,
            Self::Core(rideshare_core::CoreError::Serialization(_)) => 4,
            Self::Core(_) => 2,
            Self::Input(_) => 2,
            Self::Invalid(_) => 3,
            Self::Serialization(_) => 4,
            Self::Api(_) => 5,
            Self::Io(_) => 10,
        }
    }
}

impl From<rideshare_core::SubmitError> for CliError {
    fn from(error: rideshare_core::SubmitError) -> Self {
        match error {
            rideshare_core::SubmitError::Invalid(errors) => Self::Invalid(errors),
            rideshare_core::SubmitError::Transport(error) => Self::Api(error),
        }
    }
}
