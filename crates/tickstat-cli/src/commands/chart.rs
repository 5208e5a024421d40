use std::io;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tickstat_core::{
    ChartSink, DataSource, DateRange, PricedInstrument, ReturnChartKind, SvgChartRenderer, Symbol,
};
use tracing::info;

use crate::cli::{ChartArgs, ChartKind};
use crate::error::CliError;

use super::{load_series, CommandOutput};

#[derive(Debug, Serialize)]
struct ChartReport<'a> {
    ticker: &'a Symbol,
    range: DateRange,
    title: String,
    path: &'a Path,
    bytes: usize,
}

pub async fn run(
    args: &ChartArgs,
    source: Arc<dyn DataSource>,
) -> Result<CommandOutput, CliError> {
    let series = load_series(source, &args.series).await?;

    let mut renderer = SvgChartRenderer::default();
    render(&series, args.kind, &mut renderer);
    let chart = renderer
        .into_rendered()
        .pop()
        .ok_or_else(|| io::Error::other("no chart was rendered"))?;

    std::fs::write(&args.out, &chart.svg)?;
    info!(path = %args.out.display(), title = %chart.title, "wrote chart");

    let report = ChartReport {
        ticker: series.ticker(),
        range: series.range(),
        title: chart.title,
        path: &args.out,
        bytes: chart.svg.len(),
    };
    let lines = vec![format!("wrote {} to {}", report.title, args.out.display())];
    let data = serde_json::to_value(&report)?;

    Ok(CommandOutput { data, lines })
}

fn render(series: &impl PricedInstrument, kind: ChartKind, sink: &mut dyn ChartSink) {
    match kind {
        ChartKind::Price => series.render_price_chart(sink),
        ChartKind::Returns => series.render_return_chart(ReturnChartKind::TimeSeries, sink),
        ChartKind::Histogram => series.render_return_chart(ReturnChartKind::Histogram, sink),
    }
}
