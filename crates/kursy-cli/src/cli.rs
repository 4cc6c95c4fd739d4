//! CLI argument definitions for kursy.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `currencies` | List currencies from tables A and B plus PLN |
//! | `convert` | Convert an amount between two currencies |
//! | `history` | Cross-rate series for a currency pair |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | `3000` | Per-request timeout in ms |
//!
//! # Examples
//!
//! ```bash
//! kursy convert 100 USD PLN
//! kursy history USD EUR --start 2024-01-01 --end 2024-01-31 --pretty
//! RUST_LOG=kursy_core=debug kursy currencies --format table
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use kursy_core::{Alignment, DEFAULT_TIMEOUT_MS};

/// Exchange rates from the NBP public tables.
#[derive(Debug, Parser)]
#[command(
    name = "kursy",
    author,
    version,
    about = "Exchange rates, conversions and cross-rate history from NBP tables"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Table,
    /// Single JSON envelope.
    Json,
}

/// Pairing rule for the `history` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlignArg {
    /// Pair the i-th published entry of each currency.
    Positional,
    /// Pair only entries published on the same date.
    ByDate,
}

impl From<AlignArg> for Alignment {
    fn from(value: AlignArg) -> Self {
        match value {
            AlignArg::Positional => Alignment::Positional,
            AlignArg::ByDate => Alignment::ByDate,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List selectable currencies.
    ///
    ///   kursy currencies --format table
    Currencies,

    /// Convert an amount between two currencies.
    ///
    ///   kursy convert 100 USD PLN
    ///   kursy convert 12.5 EUR GBP --pretty
    Convert(ConvertArgs),

    /// Cross-rate series FROM/TO over a date range.
    ///
    ///   kursy history USD EUR --start 2024-01-01 --end 2024-01-31
    History(HistoryArgs),
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Amount in the source currency.
    #[arg(allow_negative_numbers = true)]
    pub amount: f64,

    /// Source currency code (e.g., USD).
    pub from: String,

    /// Target currency code (e.g., PLN).
    pub to: String,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Numerator currency code.
    pub from: String,

    /// Denominator currency code.
    pub to: String,

    /// First day, YYYY-MM-DD.
    #[arg(long, default_value = "")]
    pub start: String,

    /// Last day, YYYY-MM-DD.
    #[arg(long, default_value = "")]
    pub end: String,

    /// Pairing rule for the two series.
    #[arg(long, value_enum, default_value_t = AlignArg::Positional)]
    pub align: AlignArg,
}
