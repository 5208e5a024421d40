use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use tickstat_core::{
    AnnualizedPerformance, DataSource, DateRange, Frequency, PricedInstrument, ReturnAnalytics,
    Symbol,
};

use crate::cli::StatsArgs;
use crate::error::CliError;

use super::{load_series, CommandOutput};

#[derive(Debug, Serialize)]
struct StatsReport<'a> {
    ticker: &'a Symbol,
    range: DateRange,
    frequency: Option<Frequency>,
    observations: usize,
    resampled_observations: usize,
    mean_return: f64,
    std_returns: f64,
    annualized: AnnualizedPerformance,
}

pub async fn run(
    args: &StatsArgs,
    source: Arc<dyn DataSource>,
) -> Result<CommandOutput, CliError> {
    // Reject a bad frequency before any network call.
    let frequency = args
        .frequency
        .as_deref()
        .map(Frequency::from_str)
        .transpose()?;

    let series = load_series(source, &args.series).await?;
    let analytics = ReturnAnalytics::from_series(series, frequency);

    let mean_return = analytics.mean_return()?;
    let std_returns = analytics.std_returns()?;
    let mut report_line = Vec::new();
    let annualized = analytics.report_annualized_perf(&mut report_line)?;

    let report = StatsReport {
        ticker: analytics.ticker(),
        range: analytics.range(),
        frequency,
        observations: analytics.observations().len(),
        resampled_observations: analytics.resampled_prices().len(),
        mean_return,
        std_returns,
        annualized,
    };
    let data = serde_json::to_value(&report)?;

    let mut lines = vec![
        analytics.to_string(),
        format!("mean_return: {mean_return:.6}"),
        format!("std_returns: {std_returns:.6}"),
    ];
    lines.extend(
        String::from_utf8_lossy(&report_line)
            .lines()
            .map(str::to_owned),
    );

    Ok(CommandOutput { data, lines })
}
