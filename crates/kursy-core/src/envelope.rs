use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{CoreError, RateError, ValidationError};

/// Schema version stamped on every envelope.
pub const SCHEMA_VERSION: &str = "v1.0.0";

/// Standard response envelope for all `kursy` machine-readable outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: T,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<EnvelopeError>,
}

impl<T> Envelope<T> {
    pub fn with_errors(
        meta: EnvelopeMeta,
        data: T,
        errors: Vec<EnvelopeError>,
    ) -> Result<Self, ValidationError> {
        meta.validate()?;
        for error in &errors {
            error.validate()?;
        }

        Ok(Self { meta, data, errors })
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl<T: Serialize> Envelope<T> {
    pub fn to_json(&self, pretty: bool) -> Result<String, CoreError> {
        let payload = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(payload)
    }
}

/// Metadata attached to every envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    pub schema_version: String,
    /// RFC3339, UTC.
    pub generated_at: String,
    pub latency_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EnvelopeMeta {
    /// Fresh v4 request id and the current schema version.
    pub fn generate(latency_ms: u64) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            schema_version: SCHEMA_VERSION.to_owned(),
            generated_at: now_rfc3339(),
            latency_ms,
            warnings: Vec::new(),
        }
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.request_id.trim().len() < 8 {
            return Err(ValidationError::InvalidRequestId);
        }

        if !is_valid_schema_version(&self.schema_version) {
            return Err(ValidationError::InvalidSchemaVersion {
                value: self.schema_version.clone(),
            });
        }

        Ok(())
    }
}

/// Structured error payload for failed responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

impl EnvelopeError {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.code.trim().is_empty() {
            return Err(ValidationError::EmptyErrorCode);
        }

        if self.message.trim().is_empty() {
            return Err(ValidationError::EmptyErrorMessage);
        }

        Ok(())
    }
}

impl From<&RateError> for EnvelopeError {
    fn from(error: &RateError) -> Self {
        Self {
            code: error.code().to_owned(),
            message: error.to_string(),
            retryable: Some(matches!(error, RateError::SourceUnavailable { .. })),
        }
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("<unformattable>"))
}

fn is_valid_schema_version(value: &str) -> bool {
    let Some(version) = value.strip_prefix('v') else {
        return false;
    };

    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|segment| !segment.is_empty() && segment.chars().all(|ch| ch.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CurrencyCode;

    fn meta_with(request_id: &str, schema_version: &str) -> EnvelopeMeta {
        let mut meta = EnvelopeMeta::generate(11);
        meta.request_id = request_id.to_owned();
        meta.schema_version = schema_version.to_owned();
        meta
    }

    #[test]
    fn generated_meta_is_valid() {
        let meta = EnvelopeMeta::generate(3);
        assert!(meta.validate().is_ok());
        assert_eq!(meta.schema_version, SCHEMA_VERSION);
        assert!(meta.generated_at.ends_with('Z'));
    }

    #[test]
    fn rejects_bad_schema_version() {
        let err = meta_with("request-12345", "1.0.0").validate().expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidSchemaVersion { .. }));

        let err = meta_with("request-12345", "v1.0").validate().expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidSchemaVersion { .. }));
    }

    #[test]
    fn rejects_short_request_id() {
        let err = meta_with("abc", "v1.0.0").validate().expect_err("must fail");
        assert_eq!(err, ValidationError::InvalidRequestId);
    }

    #[test]
    fn rejects_blank_error_fields() {
        let unavailable = RateError::unavailable("timeout");
        let mut error = EnvelopeError::from(&unavailable);
        error.code = String::from(" ");
        let err = Envelope::with_errors(EnvelopeMeta::generate(0), (), vec![error])
            .expect_err("must fail");
        assert_eq!(err, ValidationError::EmptyErrorCode);

        let mut error = EnvelopeError::from(&unavailable);
        error.message.clear();
        assert_eq!(error.validate(), Err(ValidationError::EmptyErrorMessage));
    }

    #[test]
    fn rate_errors_carry_stable_codes() {
        let not_found = RateError::RateNotFound {
            code: CurrencyCode::parse("XYZ").expect("valid code"),
        };
        let error = EnvelopeError::from(&not_found);
        assert_eq!(error.code, "rate.not_found");
        assert_eq!(error.retryable, Some(false));

        let error = EnvelopeError::from(&RateError::unavailable("timeout"));
        assert_eq!(error.retryable, Some(true));
    }

    #[test]
    fn errors_are_omitted_when_empty() {
        let envelope = Envelope::with_errors(EnvelopeMeta::generate(0), 1_u8, Vec::new())
            .expect("valid envelope");
        assert!(!envelope.has_errors());

        let json: serde_json::Value =
            serde_json::from_str(&envelope.to_json(false).expect("serializes")).expect("parses");
        assert!(json.get("errors").is_none());
        assert!(json["meta"].get("warnings").is_none());
    }
}
