//! Daily closing prices and log returns for one ticker.
//!
//! A [`PriceSeries`] is always fully populated: construction fetches the
//! closes for `[start, end]` and derives the log returns before the value is
//! handed out, and [`PriceSeries::set_ticker`] replaces both together or not
//! at all.

use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

use tracing::{debug, info};

use crate::chart::{Chart, ChartSink, ReturnChartKind};
use crate::data_source::{DataSource, HistoryRequest, SourceError};
use crate::stats::{histogram_bins, log_returns};
use crate::{CoreError, DateRange, LogReturn, PricePoint, Symbol};

/// Closing prices for one symbol over a fixed inclusive date range.
pub struct PriceSeries {
    source: Arc<dyn DataSource>,
    range: DateRange,
    data: SeriesData,
}

/// Everything that is replaced when the ticker changes.
#[derive(Debug, Clone, PartialEq)]
struct SeriesData {
    symbol: Symbol,
    observations: Vec<PricePoint>,
    log_returns: Vec<LogReturn>,
}

impl SeriesData {
    async fn fetch(
        source: &dyn DataSource,
        symbol: Symbol,
        range: DateRange,
    ) -> Result<Self, CoreError> {
        debug!(symbol = %symbol, range = %range, source = %source.id(), "fetching daily closes");

        let closes = source
            .daily_closes(HistoryRequest::new(symbol.clone(), range))
            .await?;
        closes.validate_for(&symbol, range).map_err(|error| {
            SourceError::internal(format!(
                "{} returned invalid closes for {symbol}: {error}",
                source.id()
            ))
        })?;

        if closes.is_empty() {
            return Err(CoreError::DataUnavailable {
                symbol,
                start: range.start(),
                end: range.end(),
            });
        }

        let observations = closes.points;
        let log_returns = log_returns(&observations);
        info!(
            symbol = %symbol,
            observations = observations.len(),
            "loaded price series"
        );

        Ok(Self {
            symbol,
            observations,
            log_returns,
        })
    }
}

impl PriceSeries {
    /// Fetches closes for `symbol` over `range` from `source`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::DataUnavailable`] when the source has no observations
    /// - [`CoreError::Source`] when the source itself fails or answers with
    ///   closes that are non-positive, unordered, outside `range` or for
    ///   another symbol
    pub async fn fetch(
        source: Arc<dyn DataSource>,
        symbol: Symbol,
        range: DateRange,
    ) -> Result<Self, CoreError> {
        let data = SeriesData::fetch(source.as_ref(), symbol, range).await?;
        Ok(Self {
            source,
            range,
            data,
        })
    }

    /// Parses `ticker`, `start` and `end` (`YYYY-MM-DD`) and fetches.
    pub async fn load(
        source: Arc<dyn DataSource>,
        ticker: &str,
        start: &str,
        end: &str,
    ) -> Result<Self, CoreError> {
        let symbol = Symbol::parse(ticker)?;
        let range = DateRange::parse(start, end)?;
        Self::fetch(source, symbol, range).await
    }

    /// Switches to another ticker over the same date range.
    ///
    /// `None`, a blank string or the current symbol leave the series untouched
    /// and return `Ok(false)`. Otherwise the new data is fetched first and
    /// swapped in only on success, so a failed fetch leaves the previous
    /// ticker, observations and returns in place.
    pub async fn set_ticker(&mut self, ticker: Option<&str>) -> Result<bool, CoreError> {
        let Some(raw) = ticker.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Ok(false);
        };

        let symbol = Symbol::parse(raw)?;
        if symbol == self.data.symbol {
            return Ok(false);
        }

        let data = SeriesData::fetch(self.source.as_ref(), symbol, self.range).await?;
        self.data = data;
        Ok(true)
    }

    pub fn source(&self) -> &Arc<dyn DataSource> {
        &self.source
    }

    /// Log return values without their dates.
    pub fn log_return_values(&self) -> Vec<f64> {
        self.data.log_returns.iter().map(|r| r.value).collect()
    }
}

impl Debug for PriceSeries {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriceSeries")
            .field("source", &self.source.id())
            .field("range", &self.range)
            .field("symbol", &self.data.symbol)
            .field("observations", &self.data.observations.len())
            .finish()
    }
}

impl Display for PriceSeries {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PriceSeries(ticker = {}, start = {}, end = {})",
            self.data.symbol,
            self.range.start(),
            self.range.end()
        )
    }
}

/// Read access and charting shared by everything built on a [`PriceSeries`].
pub trait PricedInstrument {
    fn price_series(&self) -> &PriceSeries;

    fn ticker(&self) -> &Symbol {
        &self.price_series().data.symbol
    }

    fn range(&self) -> DateRange {
        self.price_series().range
    }

    /// Observations ascending by date; never empty.
    fn observations(&self) -> &[PricePoint] {
        &self.price_series().data.observations
    }

    /// One return per observation after the first.
    fn log_returns(&self) -> &[LogReturn] {
        &self.price_series().data.log_returns
    }

    /// Sends the closing prices to `sink` as a line chart.
    fn render_price_chart(&self, sink: &mut dyn ChartSink) {
        let points = self
            .observations()
            .iter()
            .map(|point| (point.date, point.close))
            .collect();
        sink.render(&Chart::Line {
            title: format!("Price Chart: {}", self.ticker()),
            points,
        });
    }

    /// Sends the log returns to `sink` as a time series or a histogram.
    fn render_return_chart(&self, kind: ReturnChartKind, sink: &mut dyn ChartSink) {
        let chart = match kind {
            ReturnChartKind::TimeSeries => Chart::Line {
                title: format!("Returns: {}", self.ticker()),
                points: self
                    .log_returns()
                    .iter()
                    .map(|r| (r.date, r.value))
                    .collect(),
            },
            ReturnChartKind::Histogram => Chart::Histogram {
                title: format!("Frequency of Returns: {}", self.ticker()),
                values: self.log_returns().iter().map(|r| r.value).collect(),
                bins: histogram_bins(self.observations().len()),
            },
        };
        sink.render(&chart);
    }
}

impl PricedInstrument for PriceSeries {
    fn price_series(&self) -> &PriceSeries {
        self
    }
}
