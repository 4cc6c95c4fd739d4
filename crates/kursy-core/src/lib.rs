//! # Kursy Core
//!
//! Exchange-rate resolution against the NBP public rate tables.
//!
//! ## Overview
//!
//! - **Rate resolution** with table A → table B fallback
//! - **Reference currency** (PLN) answered locally at rate 1
//! - **Currency catalog** merged from both tables
//! - **Conversion** between any two currencies through the reference rates
//! - **Cross-rate series** for a currency pair over a date range
//! - **Response envelope** with metadata and structured errors
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Upstream adapters (NBP) |
//! | [`aligner`] | Cross-rate series derivation |
//! | [`catalog`] | Currency listing |
//! | [`conversion`] | Amount conversion |
//! | [`domain`] | Currency codes, dates, rates, series |
//! | [`envelope`] | Response envelope with metadata |
//! | [`error`] | Validation and rate errors |
//! | [`http_client`] | HTTP client abstraction |
//! | [`rate_source`] | Rate source trait and table fallback |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kursy_core::{ConversionEngine, CurrencyCode, NbpAdapter};
//!
//! let engine = ConversionEngine::new(Arc::new(NbpAdapter::default()));
//! let usd = CurrencyCode::parse("USD")?;
//! let pln = CurrencyCode::reference();
//! let conversion = engine.convert(100.0, &usd, &pln).await?;
//! println!("{conversion}");
//! ```

pub mod adapters;
pub mod aligner;
pub mod catalog;
pub mod conversion;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod http_client;
pub mod rate_source;

pub use adapters::{NbpAdapter, NBP_BASE_URL};
pub use aligner::{align, SeriesAligner};
pub use catalog::{dedup_by_code, CurrencyCatalog};
pub use conversion::{Conversion, ConversionEngine};
pub use domain::{
    Alignment, CrossRatePoint, CrossRateSeries, CurrencyCode, CurrencyEntry, CurrencySeries,
    DateRange, Rate, RateDate, RateTable, REFERENCE_CODE, REFERENCE_DISPLAY_NAME,
};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta, SCHEMA_VERSION};
pub use error::{CoreError, RateError, ValidationError};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, ScriptedHttpClient,
    DEFAULT_TIMEOUT_MS,
};
pub use rate_source::{resolve_across_tables, RateSource, SourceFuture, TableLookup};
