//! CLI argument definitions for tickstat.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `prices` | Daily closes and log returns for a ticker |
//! | `stats` | Mean, standard deviation and annualized performance |
//! | `chart` | Render a price or return chart to an SVG file |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `text` | Output format (text, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--mock` | `false` | Use deterministic synthetic prices instead of Yahoo |
//! | `--timeout-ms` | `TICKSTAT_TIMEOUT_MS` or `10000` | Request timeout in ms |
//! | `--verbose` | `false` | Debug logging on stderr |
//!
//! # Examples
//!
//! ```bash
//! tickstat prices AAPL --start 2023-01-01 --end 2023-12-31
//! tickstat stats AAPL --start 2020-01-01 --end 2023-12-31 --frequency m
//! tickstat chart AAPL --start 2023-01-01 --end 2023-12-31 --kind histogram --out aapl.svg
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Log-return statistics and charts for a ticker's daily closes.
#[derive(Debug, Parser)]
#[command(
    name = "tickstat",
    author,
    version,
    about = "Log-return statistics and charts for daily closing prices"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Serve deterministic synthetic prices instead of calling Yahoo Finance.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    /// Request timeout in milliseconds; overrides TICKSTAT_TIMEOUT_MS.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Log debug events to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    Text,
    /// Single JSON object.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print daily closes and log returns.
    ///
    /// # Examples
    ///
    ///   tickstat prices AAPL --start 2023-01-01 --end 2023-03-31
    Prices(PricesArgs),

    /// Print mean return, return dispersion and annualized performance.
    ///
    /// Mean and standard deviation use the resampled returns when
    /// --frequency is given; annualized figures always use daily returns.
    ///
    /// # Examples
    ///
    ///   tickstat stats AAPL --start 2020-01-01 --end 2023-12-31
    ///   tickstat stats AAPL --start 2020-01-01 --end 2023-12-31 --frequency w
    Stats(StatsArgs),

    /// Render a chart to an SVG file.
    ///
    /// # Examples
    ///
    ///   tickstat chart AAPL --start 2023-01-01 --end 2023-12-31 --out prices.svg
    ///   tickstat chart AAPL --start 2023-01-01 --end 2023-12-31 --kind histogram --out hist.svg
    Chart(ChartArgs),
}

/// Ticker and inclusive date range shared by every command.
#[derive(Debug, Args)]
pub struct SeriesArgs {
    /// Ticker symbol (e.g. AAPL, ^GSPC, EURUSD=X).
    pub ticker: String,

    /// First date, YYYY-MM-DD.
    #[arg(long)]
    pub start: String,

    /// Last date (inclusive), YYYY-MM-DD.
    #[arg(long)]
    pub end: String,
}

#[derive(Debug, Args)]
pub struct PricesArgs {
    #[command(flatten)]
    pub series: SeriesArgs,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Resampling frequency: d, w, m, q or y.
    #[arg(long)]
    pub frequency: Option<String>,
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Chart to render.
    #[arg(long, value_enum, default_value_t = ChartKind::Price)]
    pub kind: ChartKind,

    /// Destination SVG file.
    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    /// Closing prices over time.
    Price,
    /// Log returns over time.
    Returns,
    /// Frequency distribution of log returns.
    Histogram,
}
