use std::sync::Arc;

use serde::Serialize;
use tickstat_core::{
    DataSource, DateRange, LogReturn, PricePoint, PricedInstrument, ProviderId, Symbol,
};

use crate::cli::PricesArgs;
use crate::error::CliError;

use super::{load_series, CommandOutput};

#[derive(Debug, Serialize)]
struct PricesReport<'a> {
    ticker: &'a Symbol,
    range: DateRange,
    source: ProviderId,
    observations: &'a [PricePoint],
    log_returns: &'a [LogReturn],
}

pub async fn run(
    args: &PricesArgs,
    source: Arc<dyn DataSource>,
) -> Result<CommandOutput, CliError> {
    let series = load_series(source, &args.series).await?;

    let report = PricesReport {
        ticker: series.ticker(),
        range: series.range(),
        source: series.source().id(),
        observations: series.observations(),
        log_returns: series.log_returns(),
    };
    let data = serde_json::to_value(&report)?;

    let mut lines = vec![
        series.to_string(),
        format!("{:<10}  {:>12}  {:>12}", "date", "close", "log_return"),
    ];
    if let Some((first, rest)) = report.observations.split_first() {
        lines.push(format!("{:<10}  {:>12.4}  {:>12}", first.date, first.close, "-"));
        for (point, log_return) in rest.iter().zip(report.log_returns) {
            lines.push(format!(
                "{:<10}  {:>12.4}  {:>12.6}",
                point.date, point.close, log_return.value
            ));
        }
    }

    Ok(CommandOutput { data, lines })
}
