use thiserror::Error;

/// Domain construction errors raised by the typed constructors in [`crate::domain`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("address cannot be empty")]
    EmptyAddress,
    #[error("latitude {value} is outside [-90, 90]")]
    LatitudeOutOfRange { value: String },
    #[error("longitude {value} is outside [-180, 180]")]
    LongitudeOutOfRange { value: String },
    #[error("invalid coordinates '{value}', expected LAT,LNG")]
    InvalidCoordinates { value: String },

    #[error("invalid parcel size '{value}', expected one of small, medium, large")]
    InvalidParcelSize { value: String },
    #[error("invalid resource status '{value}'")]
    InvalidStatus { value: String },
    #[error("invalid resource kind '{value}', expected ride or parcel")]
    InvalidKind { value: String },

    #[error("resource id cannot be empty")]
    EmptyResourceId,

    #[error("candidate record must be a JSON object, found {found}")]
    CandidateNotObject { found: &'static str },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },
}

/// Top-level error type for core helpers that are not part of the
/// validation or transport result shapes.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}
