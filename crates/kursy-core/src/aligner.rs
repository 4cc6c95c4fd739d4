//! Cross-rate series derivation.
//!
//! Two historical series are fetched independently and divided entry by
//! entry. The default [`Alignment::Positional`] pairs the i-th entry of each
//! series, which is only correct while both tables publish on the same days;
//! a holiday present in one table and not the other shifts every later pair.
//! Such shifts are counted in [`CrossRateSeries::mismatched_dates`] and logged.
//! [`Alignment::ByDate`] is the opt-in alternative and gives different output
//! on real data.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::rate_source::RateSource;
use crate::{
    Alignment, CrossRatePoint, CrossRateSeries, CurrencyCode, CurrencySeries, DateRange,
    RateError,
};

/// Derives cross-rate series for a currency pair over a date range.
#[derive(Clone)]
pub struct SeriesAligner {
    source: Arc<dyn RateSource>,
    alignment: Alignment,
}

impl SeriesAligner {
    pub fn new(source: Arc<dyn RateSource>) -> Self {
        Self {
            source,
            alignment: Alignment::default(),
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Cross-rate `from/to` for every paired entry between `start` and `end`.
    ///
    /// Dates are raw `YYYY-MM-DD` caller input and are checked before any
    /// upstream call.
    ///
    /// # Errors
    ///
    /// - [`RateError::MissingDateRange`] if either bound is blank
    /// - [`RateError::Validation`] / [`RateError::InvalidDateRange`] for bad bounds
    /// - any failure of either historical fetch; no partial series is returned
    ///
    /// A currency neither table publishes yields an empty series, not an error.
    pub async fn aligned_series(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
        start: &str,
        end: &str,
    ) -> Result<CrossRateSeries, RateError> {
        let range = DateRange::parse(start, end)?;

        let (series_from, series_to) = tokio::try_join!(
            self.fetch_or_empty(from, range),
            self.fetch_or_empty(to, range),
        )?;

        let series = align(&series_from, &series_to, self.alignment);
        if series.mismatched_dates > 0 {
            warn!(
                pair = %series.label(),
                mismatched = series.mismatched_dates,
                "positional pairing crossed differing publication dates"
            );
        }

        info!(
            pair = %series.label(),
            from_len = series_from.len(),
            to_len = series_to.len(),
            points = series.len(),
            "cross-rate series derived"
        );

        Ok(series)
    }

    async fn fetch_or_empty(
        &self,
        code: &CurrencyCode,
        range: DateRange,
    ) -> Result<CurrencySeries, RateError> {
        match self.source.historical_rates(code, range).await {
            Err(RateError::RateNotFound { code }) => {
                warn!(code = %code, "no historical rates published; using empty series");
                Ok(CurrencySeries::empty(code))
            }
            other => other,
        }
    }
}

/// Divide `from` by `to` under the given pairing rule.
///
/// Output length never exceeds the shorter input; unmatched entries are
/// dropped rather than interpolated.
pub fn align(from: &CurrencySeries, to: &CurrencySeries, alignment: Alignment) -> CrossRateSeries {
    let (points, mismatched_dates) = match alignment {
        Alignment::Positional => {
            let mut mismatched = 0;
            let points = from
                .rates
                .iter()
                .zip(&to.rates)
                .map(|(numerator, denominator)| {
                    if numerator.effective_date != denominator.effective_date {
                        mismatched += 1;
                    }
                    CrossRatePoint {
                        date: numerator.effective_date,
                        ratio: numerator.value / denominator.value,
                    }
                })
                .collect();
            (points, mismatched)
        }
        Alignment::ByDate => {
            let by_date: HashMap<_, _> = to
                .rates
                .iter()
                .map(|rate| (rate.effective_date, rate.value))
                .collect();
            let points = from
                .rates
                .iter()
                .filter_map(|numerator| {
                    by_date
                        .get(&numerator.effective_date)
                        .map(|denominator| CrossRatePoint {
                            date: numerator.effective_date,
                            ratio: numerator.value / denominator,
                        })
                })
                .collect();
            (points, 0)
        }
    };

    CrossRateSeries {
        from: from.code.clone(),
        to: to.code.clone(),
        alignment,
        points,
        mismatched_dates,
    }
}
