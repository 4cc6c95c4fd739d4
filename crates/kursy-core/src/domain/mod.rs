//! # Domain Models
//!
//! Canonical types for exchange-rate resolution.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`CurrencyCode`] | Opaque, case-preserving currency identifier |
//! | [`CurrencyEntry`] | Catalog row with display name |
//! | [`RateDate`] | `YYYY-MM-DD` calendar date |
//! | [`DateRange`] | Validated inclusive date range |
//! | [`Rate`] | Positive rate in the reference currency |
//! | [`CurrencySeries`] | Historical rates for one currency |
//! | [`CrossRateSeries`] | Derived ratio series for a currency pair |
//! | [`RateTable`] | Upstream partition (A or B) |
//!
//! Constructors validate their invariants, so a [`Rate`] in hand is always
//! positive and finite and a [`DateRange`] never runs backwards.

mod currency;
mod date;
mod models;
mod table;

pub use currency::{CurrencyCode, CurrencyEntry, REFERENCE_CODE, REFERENCE_DISPLAY_NAME};
pub use date::{DateRange, RateDate};
pub use models::{Alignment, CrossRatePoint, CrossRateSeries, CurrencySeries, Rate};
pub use table::RateTable;
