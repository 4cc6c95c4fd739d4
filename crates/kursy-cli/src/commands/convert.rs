use std::sync::Arc;

use kursy_core::{Conversion, ConversionEngine, CurrencyCode, RateSource};
use serde::Serialize;

use crate::cli::ConvertArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct ConvertResponseData {
    conversion: Conversion,
    effective_rate: f64,
    rounded_value: f64,
    display: String,
}

pub async fn run(
    args: &ConvertArgs,
    source: Arc<dyn RateSource>,
) -> Result<CommandResult, CliError> {
    let from = CurrencyCode::parse(&args.from)?;
    let to = CurrencyCode::parse(&args.to)?;

    match ConversionEngine::new(source)
        .convert(args.amount, &from, &to)
        .await
    {
        Ok(conversion) => {
            let data = serde_json::to_value(ConvertResponseData {
                effective_rate: conversion.effective_rate(),
                rounded_value: conversion.rounded_value(),
                display: conversion.to_string(),
                conversion,
            })?;
            Ok(CommandResult::ok(data))
        }
        Err(error) => Ok(CommandResult::failed(&error)),
    }
}
