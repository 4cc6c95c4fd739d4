use serde::{Deserialize, Serialize};

use crate::{CurrencyCode, DateRange, RateDate, ValidationError};

/// Price of one unit of a currency in the reference currency, as of a date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    pub value: f64,
    pub effective_date: RateDate,
}

impl Rate {
    pub fn new(value: f64, effective_date: RateDate) -> Result<Self, ValidationError> {
        validate_positive("value", value)?;
        Ok(Self {
            value,
            effective_date,
        })
    }

    /// The reference currency priced in itself.
    pub const fn unit(effective_date: RateDate) -> Self {
        Self {
            value: 1.0,
            effective_date,
        }
    }
}

/// Rates for one currency ordered by ascending effective date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencySeries {
    pub code: CurrencyCode,
    pub rates: Vec<Rate>,
}

impl CurrencySeries {
    pub fn new(code: CurrencyCode, rates: Vec<Rate>) -> Self {
        Self { code, rates }
    }

    pub fn empty(code: CurrencyCode) -> Self {
        Self::new(code, Vec::new())
    }

    /// Dense series of unit rates, one per calendar day of `range`.
    pub fn reference(range: &DateRange) -> Self {
        Self::new(
            CurrencyCode::reference(),
            range.days().map(Rate::unit).collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// How the two input series of a cross-rate are paired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Pair entry `i` with entry `i`. Only correct when both tables share a
    /// publication calendar.
    #[default]
    Positional,
    /// Pair entries carrying the same effective date.
    ByDate,
}

/// One derived cross-rate observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossRatePoint {
    pub date: RateDate,
    pub ratio: f64,
}

/// Cross-rate time series between two currencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossRateSeries {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub alignment: Alignment,
    pub points: Vec<CrossRatePoint>,
    /// Positional pairs whose two effective dates differ.
    pub mismatched_dates: usize,
}

impl CrossRateSeries {
    /// Series label in `FROM/TO` form.
    pub fn label(&self) -> String {
        format!("{}/{}", self.from, self.to)
    }

    /// Parallel label/value vectors for a line chart.
    pub fn chart_data(&self) -> (Vec<String>, Vec<f64>) {
        self.points
            .iter()
            .map(|point| (point.date.format_iso(), point.ratio))
            .unzip()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn validate_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(())
}
