use thiserror::Error;

use crate::CurrencyCode;

/// Validation and contract errors exposed by `kursy-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("currency code cannot be empty")]
    EmptyCurrencyCode,
    #[error("currency code contains invalid character {ch:?} at index {index}")]
    CurrencyCodeInvalidChar { ch: char, index: usize },

    #[error("date must be formatted as YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be positive")]
    NonPositiveValue { field: &'static str },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },

    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Typed failure returned by every rate operation.
///
/// Nothing in the crate coerces one of these into a default rate; callers
/// either get a value or one of these variants.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RateError {
    /// Both tables answered with a clean "not found" for the code.
    #[error("no rate published for '{code}' in table A or B")]
    RateNotFound { code: CurrencyCode },

    /// The upstream service could not be reached, or returned something the
    /// arithmetic cannot use (a zero rate, a non-finite result).
    #[error("rate source unavailable: {message}")]
    SourceUnavailable { message: String },

    #[error("historical query requires both a start and an end date")]
    MissingDateRange,

    #[error("end date {end} is before start date {start}")]
    InvalidDateRange { start: String, end: String },

    /// A success response whose body does not match the upstream contract.
    #[error("upstream payload rejected: {message}")]
    InvalidPayload { message: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl RateError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            message: message.into(),
        }
    }

    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::RateNotFound { .. } => "rate.not_found",
            Self::SourceUnavailable { .. } => "rate.source_unavailable",
            Self::MissingDateRange => "rate.missing_date_range",
            Self::InvalidDateRange { .. } => "rate.invalid_date_range",
            Self::InvalidPayload { .. } => "rate.invalid_payload",
            Self::Validation(_) => "rate.validation",
        }
    }
}

/// Top-level error type for envelope and serialization work.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
