use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::rate_source::RateSource;
use crate::{CurrencyEntry, RateError, RateTable};

/// Builds the list of selectable currencies from both rate tables.
#[derive(Clone)]
pub struct CurrencyCatalog {
    source: Arc<dyn RateSource>,
}

impl CurrencyCatalog {
    pub fn new(source: Arc<dyn RateSource>) -> Self {
        Self { source }
    }

    /// Fetch both tables together and merge them.
    ///
    /// Entries keep first-seen order (table A before table B); a code listed
    /// twice keeps its first entry. The reference currency is appended last.
    ///
    /// # Errors
    ///
    /// Fails with the first table error instead of returning a partial or
    /// empty list.
    pub async fn list_currencies(&self) -> Result<Vec<CurrencyEntry>, RateError> {
        let (table_a, table_b) = tokio::try_join!(
            self.source.table_entries(RateTable::A),
            self.source.table_entries(RateTable::B),
        )?;

        let listed = table_a.len() + table_b.len();
        let mut entries = dedup_by_code(table_a.into_iter().chain(table_b));
        if entries.iter().all(|entry| !entry.code.is_reference()) {
            entries.push(CurrencyEntry::reference());
        }

        info!(listed, unique = entries.len(), "currency catalog built");
        Ok(entries)
    }
}

/// Keep the first entry for every code, preserving encounter order.
pub fn dedup_by_code(entries: impl IntoIterator<Item = CurrencyEntry>) -> Vec<CurrencyEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| {
            let fresh = seen.insert(entry.code.clone());
            if !fresh {
                debug!(code = %entry.code, "duplicate catalog entry dropped");
            }
            fresh
        })
        .collect()
}
