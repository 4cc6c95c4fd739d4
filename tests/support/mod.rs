//! Shared fixtures for the behavior suites: NBP-shaped response bodies and a
//! scripted adapter that records every request.

#![allow(dead_code)]

use std::sync::Arc;

use kursy_core::{CurrencyCode, DateRange, NbpAdapter, RateTable, ScriptedHttpClient};

pub fn code(value: &str) -> CurrencyCode {
    CurrencyCode::parse(value).expect("valid code")
}

pub fn range(start: &str, end: &str) -> DateRange {
    DateRange::parse(start, end).expect("valid range")
}

/// Body of `GET /rates/{table}/{code}[/{start}/{end}]`.
pub fn rates_body(table: RateTable, code: &str, points: &[(&str, f64)]) -> String {
    let rates = points
        .iter()
        .enumerate()
        .map(|(index, (date, mid))| {
            serde_json::json!({
                "no": format!("{:03}/{}/NBP/2024", index + 1, table),
                "effectiveDate": date,
                "mid": mid,
            })
        })
        .collect::<Vec<_>>();

    serde_json::json!({
        "table": table.as_str(),
        "currency": "waluta",
        "code": code,
        "rates": rates,
    })
    .to_string()
}

/// Body of `GET /tables/{table}`.
pub fn table_body(table: RateTable, entries: &[(&str, &str)]) -> String {
    let rates = entries
        .iter()
        .map(|(code, currency)| {
            serde_json::json!({ "currency": currency, "code": code, "mid": 1.2345 })
        })
        .collect::<Vec<_>>();

    serde_json::json!([{
        "table": table.as_str(),
        "no": "010/A/NBP/2024",
        "effectiveDate": "2024-01-16",
        "rates": rates,
    }])
    .to_string()
}

/// Adapter over a scripted transport; keep the transport handle to inspect
/// the requests afterwards.
pub fn scripted_adapter(
    client: ScriptedHttpClient,
) -> (Arc<ScriptedHttpClient>, Arc<NbpAdapter>) {
    let client = Arc::new(client);
    let adapter = Arc::new(NbpAdapter::with_http_client(client.clone()));
    (client, adapter)
}
