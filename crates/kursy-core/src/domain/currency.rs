use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Code of the currency every published rate is quoted in.
pub const REFERENCE_CODE: &str = "PLN";

/// Display name used for the reference currency, which the tables never list.
pub const REFERENCE_DISPLAY_NAME: &str = "Polski Złoty";

/// Opaque currency identifier, kept exactly as the caller supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parse a code without normalizing case; only empty input and
    /// whitespace/control characters are rejected.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError::EmptyCurrencyCode);
        }

        for (index, ch) in input.chars().enumerate() {
            if ch.is_whitespace() || ch.is_control() {
                return Err(ValidationError::CurrencyCodeInvalidChar { ch, index });
            }
        }

        Ok(Self(input.to_owned()))
    }

    pub fn reference() -> Self {
        Self(String::from(REFERENCE_CODE))
    }

    pub fn is_reference(&self) -> bool {
        self.0 == REFERENCE_CODE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for CurrencyCode {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(value: CurrencyCode) -> Self {
        value.0
    }
}

/// One selectable row of the currency catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyEntry {
    pub code: CurrencyCode,
    pub display_name: String,
}

impl CurrencyEntry {
    pub fn new(code: CurrencyCode, display_name: impl Into<String>) -> Self {
        Self {
            code,
            display_name: display_name.into(),
        }
    }

    pub fn reference() -> Self {
        Self::new(CurrencyCode::reference(), REFERENCE_DISPLAY_NAME)
    }

    /// Label shown next to a selectable option, e.g. `dolar amerykański (USD)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.display_name, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_case_as_supplied() {
        let code = CurrencyCode::parse("usd").expect("code should parse");
        assert_eq!(code.as_str(), "usd");
        assert!(!code.is_reference());
    }

    #[test]
    fn only_exact_pln_is_reference() {
        assert!(CurrencyCode::parse("PLN").expect("valid").is_reference());
        assert!(!CurrencyCode::parse("pln").expect("valid").is_reference());
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(matches!(
            CurrencyCode::parse(""),
            Err(ValidationError::EmptyCurrencyCode)
        ));
        assert!(matches!(
            CurrencyCode::parse("US D"),
            Err(ValidationError::CurrencyCodeInvalidChar { index: 2, .. })
        ));
    }

    #[test]
    fn entry_label_matches_selector_format() {
        let entry = CurrencyEntry::new(
            CurrencyCode::parse("USD").expect("valid"),
            "dolar amerykański",
        );
        assert_eq!(entry.label(), "dolar amerykański (USD)");
        assert_eq!(CurrencyEntry::reference().label(), "Polski Złoty (PLN)");
    }
}
