use std::sync::Arc;

use kursy_core::{Alignment, CrossRatePoint, CurrencyCode, RateSource, SeriesAligner};
use serde::Serialize;

use crate::cli::HistoryArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct HistoryResponseData {
    label: String,
    alignment: Alignment,
    labels: Vec<String>,
    values: Vec<f64>,
    points: Vec<CrossRatePoint>,
    mismatched_dates: usize,
}

pub async fn run(
    args: &HistoryArgs,
    source: Arc<dyn RateSource>,
) -> Result<CommandResult, CliError> {
    let from = CurrencyCode::parse(&args.from)?;
    let to = CurrencyCode::parse(&args.to)?;

    let aligner = SeriesAligner::new(source).with_alignment(args.align.into());
    let series = match aligner
        .aligned_series(&from, &to, &args.start, &args.end)
        .await
    {
        Ok(series) => series,
        Err(error) => return Ok(CommandResult::failed(&error)),
    };

    let (labels, values) = series.chart_data();
    let mismatched_dates = series.mismatched_dates;
    let empty = values.is_empty();
    let data = serde_json::to_value(HistoryResponseData {
        label: series.label(),
        alignment: series.alignment,
        labels,
        values,
        points: series.points,
        mismatched_dates,
    })?;

    let mut result = CommandResult::ok(data);
    if mismatched_dates > 0 {
        result = result.with_warning(format!(
            "{mismatched_dates} positional pair(s) combine rates from different dates; \
             use --align by-date to pair matching dates only"
        ));
    }
    if empty {
        result = result.with_warning("no overlapping rates in the requested range");
    }
    Ok(result)
}
