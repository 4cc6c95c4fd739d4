use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::http_client::{
    HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient, DEFAULT_TIMEOUT_MS,
};
use crate::rate_source::{resolve_across_tables, RateSource, SourceFuture, TableLookup};
use crate::{
    CurrencyCode, CurrencyEntry, CurrencySeries, DateRange, Rate, RateDate, RateError, RateTable,
};

/// Root of the NBP exchange-rate API.
pub const NBP_BASE_URL: &str = "https://api.nbp.pl/api/exchangerates";

/// [`RateSource`] backed by the NBP (Narodowy Bank Polski) rate tables.
#[derive(Clone)]
pub struct NbpAdapter {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl Default for NbpAdapter {
    fn default() -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()))
    }
}

impl NbpAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn table_url(table: RateTable) -> String {
        format!("{NBP_BASE_URL}/tables/{table}?format=json")
    }

    pub fn rate_url(table: RateTable, code: &CurrencyCode) -> String {
        format!(
            "{NBP_BASE_URL}/rates/{table}/{}?format=json",
            urlencoding::encode(code.as_str())
        )
    }

    pub fn history_url(table: RateTable, code: &CurrencyCode, range: &DateRange) -> String {
        format!(
            "{NBP_BASE_URL}/rates/{table}/{}/{}/{}?format=json",
            urlencoding::encode(code.as_str()),
            range.start(),
            range.end()
        )
    }

    async fn fetch(&self, url: String) -> Result<HttpResponse, RateError> {
        debug!(url = %url, "requesting nbp");
        let request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms);

        self.http_client
            .execute(request)
            .await
            .map_err(|error| {
                RateError::unavailable(format!("nbp transport error: {}", error.message()))
            })
    }

    /// Fetch a `/rates/...` resource; a non-success status is a clean miss.
    async fn lookup<P: DeserializeOwned>(&self, url: String) -> TableLookup<P> {
        let response = match self.fetch(url).await {
            Ok(response) => response,
            Err(error) => return TableLookup::HardFailure(error),
        };

        if !response.is_success() {
            debug!(status = response.status, "nbp answered without data");
            return TableLookup::CleanMiss;
        }

        match serde_json::from_str(&response.body) {
            Ok(payload) => TableLookup::Found(payload),
            Err(error) => TableLookup::HardFailure(RateError::invalid_payload(format!(
                "failed to parse nbp rates response: {error}"
            ))),
        }
    }
}

impl RateSource for NbpAdapter {
    fn current_rate<'a>(&'a self, code: &'a CurrencyCode) -> SourceFuture<'a, Rate> {
        Box::pin(async move {
            if code.is_reference() {
                return Ok(Rate::unit(RateDate::today()));
            }

            resolve_across_tables(code, move |table| async move {
                self.lookup::<NbpRatesPayload>(Self::rate_url(table, code))
                    .await
                    .and_then(|payload| latest_rate(code, payload))
            })
            .await
        })
    }

    fn historical_rates<'a>(
        &'a self,
        code: &'a CurrencyCode,
        range: DateRange,
    ) -> SourceFuture<'a, CurrencySeries> {
        Box::pin(async move {
            if code.is_reference() {
                return Ok(CurrencySeries::reference(&range));
            }

            resolve_across_tables(code, move |table| async move {
                self.lookup::<NbpRatesPayload>(Self::history_url(table, code, &range))
                    .await
                    .and_then(|payload| normalize_series(code, payload))
            })
            .await
        })
    }

    fn table_entries<'a>(&'a self, table: RateTable) -> SourceFuture<'a, Vec<CurrencyEntry>> {
        Box::pin(async move {
            let response = self.fetch(Self::table_url(table)).await?;
            if !response.is_success() {
                return Err(RateError::unavailable(format!(
                    "nbp table {table} returned status {}",
                    response.status
                )));
            }

            let payload: Vec<NbpTablePayload> =
                serde_json::from_str(&response.body).map_err(|error| {
                    RateError::invalid_payload(format!(
                        "failed to parse nbp table {table} response: {error}"
                    ))
                })?;

            let listing = payload.into_iter().next().ok_or_else(|| {
                RateError::invalid_payload(format!("nbp table {table} response is empty"))
            })?;

            listing
                .rates
                .into_iter()
                .map(|entry| {
                    let code = CurrencyCode::parse(&entry.code).map_err(|error| {
                        RateError::invalid_payload(format!("nbp table {table}: {error}"))
                    })?;
                    Ok(CurrencyEntry::new(code, entry.currency))
                })
                .collect()
        })
    }
}

// NBP API response structures
#[derive(Debug, Clone, Deserialize)]
struct NbpRatesPayload {
    rates: Vec<NbpRatePoint>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NbpRatePoint {
    mid: Option<f64>,
    effective_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct NbpTablePayload {
    rates: Vec<NbpTableEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct NbpTableEntry {
    currency: String,
    code: String,
}

fn latest_rate(code: &CurrencyCode, payload: NbpRatesPayload) -> Result<Rate, RateError> {
    let point = payload.rates.into_iter().last().ok_or_else(|| {
        RateError::invalid_payload(format!("nbp returned no rates for '{code}'"))
    })?;
    normalize_point(code, point, Some(RateDate::today()))
}

/// Points without a `mid` are left out of the series; any other defect in a
/// point rejects the whole payload.
fn normalize_series(
    code: &CurrencyCode,
    payload: NbpRatesPayload,
) -> Result<CurrencySeries, RateError> {
    let mut rates = Vec::with_capacity(payload.rates.len());
    for point in payload.rates {
        if point.mid.is_none() {
            debug!(
                code = %code,
                effective_date = point.effective_date.as_deref().unwrap_or("?"),
                "nbp history point without mid skipped"
            );
            continue;
        }
        rates.push(normalize_point(code, point, None)?);
    }
    rates.sort_by_key(|rate| rate.effective_date);
    Ok(CurrencySeries::new(code.clone(), rates))
}

fn normalize_point(
    code: &CurrencyCode,
    point: NbpRatePoint,
    default_date: Option<RateDate>,
) -> Result<Rate, RateError> {
    let mid = point
        .mid
        .ok_or_else(|| RateError::invalid_payload(format!("nbp rate for '{code}' has no mid")))?;

    let effective_date = match (point.effective_date, default_date) {
        (Some(raw), _) => RateDate::parse(&raw).map_err(|error| {
            RateError::invalid_payload(format!("nbp rate for '{code}': {error}"))
        })?,
        (None, Some(date)) => date,
        (None, None) => {
            return Err(RateError::invalid_payload(format!(
                "nbp rate for '{code}' has no effectiveDate"
            )))
        }
    };

    Rate::new(mid, effective_date)
        .map_err(|error| RateError::invalid_payload(format!("nbp rate for '{code}': {error}")))
}
