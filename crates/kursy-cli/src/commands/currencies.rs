use std::sync::Arc;

use kursy_core::{CurrencyCatalog, CurrencyEntry, RateSource};
use serde::Serialize;

use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct CurrencyRow {
    code: String,
    display_name: String,
    label: String,
}

#[derive(Debug, Serialize)]
struct CurrenciesResponseData {
    currencies: Vec<CurrencyRow>,
}

impl From<CurrencyEntry> for CurrencyRow {
    fn from(entry: CurrencyEntry) -> Self {
        Self {
            label: entry.label(),
            code: entry.code.to_string(),
            display_name: entry.display_name,
        }
    }
}

pub async fn run(source: Arc<dyn RateSource>) -> Result<CommandResult, CliError> {
    match CurrencyCatalog::new(source).list_currencies().await {
        Ok(entries) => {
            let data = serde_json::to_value(CurrenciesResponseData {
                currencies: entries.into_iter().map(CurrencyRow::from).collect(),
            })?;
            Ok(CommandResult::ok(data))
        }
        Err(error) => Ok(CommandResult::failed(&error)),
    }
}
