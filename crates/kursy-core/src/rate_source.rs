//! Rate source contract and table-resolution combinator.
//!
//! The upstream service publishes every currency in exactly one of two
//! tables and does not say which. A [`RateSource`] hides that: callers ask for
//! a code and get a rate, or a typed [`RateError`].
//!
//! Each per-table attempt produces a [`TableLookup`]. [`resolve_across_tables`]
//! walks [`RateTable::SEARCH_ORDER`] and applies the fallback rule:
//!
//! | Table outcome | Effect |
//! |---------------|--------|
//! | `Found` | stop, return the value |
//! | `CleanMiss` | try the next table |
//! | `HardFailure` | stop, return the error; later tables are not tried |
//!
//! If every table cleanly misses the result is [`RateError::RateNotFound`].

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::{CurrencyCode, CurrencyEntry, CurrencySeries, DateRange, Rate, RateError, RateTable};

/// Boxed future returned by [`RateSource`] methods.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, RateError>> + Send + 'a>>;

/// Outcome of asking one table for one code.
#[derive(Debug, Clone, PartialEq)]
pub enum TableLookup<T> {
    Found(T),
    /// The table answered cleanly that it does not publish the code.
    CleanMiss,
    /// The table could not be asked, or answered with garbage.
    HardFailure(RateError),
}

impl<T> TableLookup<T> {
    /// Apply a fallible conversion to a found value.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Result<U, RateError>) -> TableLookup<U> {
        match self {
            Self::Found(value) => match f(value) {
                Ok(mapped) => TableLookup::Found(mapped),
                Err(error) => TableLookup::HardFailure(error),
            },
            Self::CleanMiss => TableLookup::CleanMiss,
            Self::HardFailure(error) => TableLookup::HardFailure(error),
        }
    }
}

/// Try each table in search order until one finds `code` or fails hard.
///
/// Tables are consulted sequentially: the second is only asked after the
/// first has cleanly missed.
pub async fn resolve_across_tables<T, F, Fut>(
    code: &CurrencyCode,
    mut lookup: F,
) -> Result<T, RateError>
where
    F: FnMut(RateTable) -> Fut,
    Fut: Future<Output = TableLookup<T>>,
{
    for table in RateTable::SEARCH_ORDER {
        match lookup(table).await {
            TableLookup::Found(value) => {
                debug!(code = %code, table = %table, "rate resolved");
                return Ok(value);
            }
            TableLookup::CleanMiss => {
                debug!(code = %code, table = %table, "table does not publish code");
            }
            TableLookup::HardFailure(error) => {
                debug!(code = %code, table = %table, error = %error, "table lookup failed");
                return Err(error);
            }
        }
    }

    Err(RateError::RateNotFound { code: code.clone() })
}

/// Exchange-rate source contract.
///
/// Implementations must answer the reference currency locally (unit rate,
/// no upstream call) and must not retry.
///
/// | Method | Description |
/// |--------|-------------|
/// | [`current_rate`](RateSource::current_rate) | Latest published rate |
/// | [`historical_rates`](RateSource::historical_rates) | Rates over a date range |
/// | [`table_entries`](RateSource::table_entries) | Currencies listed in one table |
pub trait RateSource: Send + Sync {
    /// Latest published rate for `code`.
    ///
    /// # Errors
    ///
    /// - [`RateError::RateNotFound`] if neither table publishes the code
    /// - [`RateError::SourceUnavailable`] on a transport failure
    /// - [`RateError::InvalidPayload`] if a table answers with an unusable body
    fn current_rate<'a>(&'a self, code: &'a CurrencyCode) -> SourceFuture<'a, Rate>;

    /// Rates for `code` published within `range`, ascending by date.
    ///
    /// # Errors
    ///
    /// Same as [`current_rate`](RateSource::current_rate).
    fn historical_rates<'a>(
        &'a self,
        code: &'a CurrencyCode,
        range: DateRange,
    ) -> SourceFuture<'a, CurrencySeries>;

    /// Currencies currently listed in `table`.
    ///
    /// # Errors
    ///
    /// [`RateError::SourceUnavailable`] if the table cannot be fetched; there
    /// is no fallback for listings.
    fn table_entries<'a>(&'a self, table: RateTable) -> SourceFuture<'a, Vec<CurrencyEntry>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn usd() -> CurrencyCode {
        CurrencyCode::parse("USD").expect("valid code")
    }

    #[tokio::test]
    async fn clean_miss_falls_through_to_next_table() {
        let asked = RefCell::new(Vec::new());
        let result = resolve_across_tables(&usd(), |table| {
            asked.borrow_mut().push(table);
            let outcome = match table {
                RateTable::A => TableLookup::CleanMiss,
                RateTable::B => TableLookup::Found(4.1),
            };
            async move { outcome }
        })
        .await;

        assert_eq!(result, Ok(4.1));
        assert_eq!(*asked.borrow(), vec![RateTable::A, RateTable::B]);
    }

    #[tokio::test]
    async fn hard_failure_stops_resolution() {
        let asked = RefCell::new(Vec::new());
        let result: Result<f64, RateError> = resolve_across_tables(&usd(), |table| {
            asked.borrow_mut().push(table);
            async move { TableLookup::HardFailure(RateError::unavailable("connection reset")) }
        })
        .await;

        assert!(matches!(result, Err(RateError::SourceUnavailable { .. })));
        assert_eq!(*asked.borrow(), vec![RateTable::A]);
    }

    #[tokio::test]
    async fn double_miss_is_rate_not_found() {
        let result: Result<f64, RateError> =
            resolve_across_tables(&usd(), |_| async { TableLookup::CleanMiss }).await;

        assert_eq!(result, Err(RateError::RateNotFound { code: usd() }));
    }

    #[test]
    fn and_then_turns_conversion_errors_into_hard_failures() {
        let lookup: TableLookup<f64> = TableLookup::Found(-1.0);
        let mapped = lookup.and_then(|value| {
            if value > 0.0 {
                Ok(value)
            } else {
                Err(RateError::invalid_payload("negative mid"))
            }
        });
        assert!(matches!(mapped, TableLookup::HardFailure(RateError::InvalidPayload { .. })));
    }
}
