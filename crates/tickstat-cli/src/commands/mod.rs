mod chart;
mod prices;
mod stats;

use std::sync::Arc;

use serde_json::Value;
use tickstat_core::{DataSource, FixtureSource, PriceSeries, YahooAdapter, YahooConfig};
use tracing::debug;

use crate::cli::{Cli, Command, SeriesArgs};
use crate::error::CliError;

/// Result of a command, renderable as JSON or text.
pub struct CommandOutput {
    pub data: Value,
    pub lines: Vec<String>,
}

pub async fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    let source = build_source(cli);

    match &cli.command {
        Command::Prices(args) => prices::run(args, source).await,
        Command::Stats(args) => stats::run(args, source).await,
        Command::Chart(args) => chart::run(args, source).await,
    }
}

fn build_source(cli: &Cli) -> Arc<dyn DataSource> {
    if cli.mock {
        debug!("using synthetic fixture source");
        return Arc::new(FixtureSource::synthetic());
    }

    let mut config = YahooConfig::from_env();
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }
    debug!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "using yahoo source");
    Arc::new(YahooAdapter::new(config))
}

async fn load_series(
    source: Arc<dyn DataSource>,
    args: &SeriesArgs,
) -> Result<PriceSeries, CliError> {
    let series = PriceSeries::load(source, &args.ticker, &args.start, &args.end).await?;
    Ok(series)
}
