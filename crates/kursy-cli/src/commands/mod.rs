mod convert;
mod currencies;
mod history;

use std::sync::Arc;
use std::time::Instant;

use kursy_core::{Envelope, EnvelopeError, EnvelopeMeta, NbpAdapter, RateError, RateSource};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// No data; the rate error is reported in the envelope.
    pub fn failed(error: &RateError) -> Self {
        Self {
            data: Value::Null,
            warnings: Vec::new(),
            errors: vec![EnvelopeError::from(error)],
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

pub async fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let source: Arc<dyn RateSource> =
        Arc::new(NbpAdapter::default().with_timeout_ms(cli.timeout_ms));
    let started = Instant::now();

    let CommandResult {
        data,
        warnings,
        errors,
    } = match &cli.command {
        Command::Currencies => currencies::run(source).await?,
        Command::Convert(args) => convert::run(args, source).await?,
        Command::History(args) => history::run(args, source).await?,
    };

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let mut meta = EnvelopeMeta::generate(latency_ms);
    for warning in warnings {
        meta.push_warning(warning);
    }

    Envelope::with_errors(meta, data, errors).map_err(CliError::from)
}
