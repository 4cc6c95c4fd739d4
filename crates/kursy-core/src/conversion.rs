//! Currency conversion through the reference currency.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::rate_source::RateSource;
use crate::{CurrencyCode, Rate, RateError, ValidationError};

/// Represents a completed currency conversion.
///
/// `value` keeps full precision; rounding to two decimal places happens only
/// in [`rounded_value`](Conversion::rounded_value) and the `Display` impl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub amount: f64,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub rate_from: Rate,
    pub rate_to: Rate,
    pub value: f64,
}

impl Conversion {
    /// Units of `to` received per unit of `from`.
    pub fn effective_rate(&self) -> f64 {
        self.rate_from.value / self.rate_to.value
    }

    pub fn rounded_value(&self) -> f64 {
        (self.value * 100.0).round() / 100.0
    }
}

impl Display for Conversion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} = {:.2} {}",
            self.amount, self.from, self.value, self.to
        )
    }
}

/// Converts amounts between any two currencies via their reference rates.
#[derive(Clone)]
pub struct ConversionEngine {
    source: Arc<dyn RateSource>,
}

impl ConversionEngine {
    pub fn new(source: Arc<dyn RateSource>) -> Self {
        Self { source }
    }

    /// `amount * rate(from) / rate(to)`, both rates fetched concurrently.
    ///
    /// Zero and negative amounts pass through unchanged; only non-finite
    /// amounts are rejected.
    ///
    /// # Errors
    ///
    /// Either rate lookup failing fails the whole conversion with that error.
    /// A zero rate or a non-finite result is reported as
    /// [`RateError::SourceUnavailable`].
    #[instrument(skip(self, from, to), fields(from = %from, to = %to))]
    pub async fn convert(
        &self,
        amount: f64,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Conversion, RateError> {
        if !amount.is_finite() {
            return Err(ValidationError::NonFiniteValue { field: "amount" }.into());
        }

        let (rate_from, rate_to) = tokio::try_join!(
            self.source.current_rate(from),
            self.source.current_rate(to),
        )?;

        if rate_to.value == 0.0 {
            return Err(RateError::unavailable(format!(
                "rate for '{to}' is zero; conversion is undefined"
            )));
        }

        let value = amount * rate_from.value / rate_to.value;
        if !value.is_finite() {
            return Err(RateError::unavailable(format!(
                "conversion {from}->{to} produced a non-finite value"
            )));
        }

        let conversion = Conversion {
            amount,
            from: from.clone(),
            to: to.clone(),
            rate_from,
            rate_to,
            value,
        };

        info!(
            effective_rate = conversion.effective_rate(),
            value = conversion.value,
            "conversion completed"
        );

        Ok(conversion)
    }
}
