use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use time::{Date, Duration, OffsetDateTime, Time};
use tracing::{debug, info, warn};

use crate::config::YahooConfig;
use crate::data_source::{DataSource, HistoryRequest, SourceError};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{DailyCloses, DateRange, PricePoint, ProviderId, Symbol, ValidationError};

/// Yahoo Finance chart-endpoint adapter for daily closes.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    config: YahooConfig,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self::new(YahooConfig::default())
    }
}

impl YahooAdapter {
    pub fn new(config: YahooConfig) -> Self {
        let http_client = Arc::new(ReqwestHttpClient::new(&config.user_agent));
        Self {
            http_client,
            config,
        }
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: YahooConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &YahooConfig {
        &self.config
    }

    fn chart_endpoint(&self, symbol: &Symbol, range: DateRange) -> String {
        let period1 = midnight_utc(range.start()).unix_timestamp();
        // period2 is exclusive upstream; extend by a day to keep `end` inclusive.
        let period2 = midnight_utc(range.end().saturating_add(Duration::days(1))).unix_timestamp();

        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=div%2Csplit&includeAdjustedClose=true",
            self.config.base_url,
            urlencoding::encode(symbol.as_str()),
            period1,
            period2,
        )
    }

    async fn fetch_daily_closes(&self, req: &HistoryRequest) -> Result<DailyCloses, SourceError> {
        let endpoint = self.chart_endpoint(&req.symbol, req.range);
        debug!(symbol = %req.symbol, range = %req.range, "requesting yahoo chart");

        let request = HttpRequest::get(&endpoint)
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(self.config.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|e| {
            SourceError::unavailable(format!("yahoo transport error: {}", e.message()))
        })?;

        if !response.is_success() {
            if let Some(error) = parse_chart_error(&response.body) {
                return Err(chart_error_to_source_error(&req.symbol, error));
            }
            return Err(SourceError::unavailable(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        let closes = parse_chart_response(
            &response.body,
            &req.symbol,
            req.range,
            self.config.adjusted,
        )?;
        info!(
            symbol = %req.symbol,
            observations = closes.len(),
            "fetched yahoo daily closes"
        );
        Ok(closes)
    }
}

impl DataSource for YahooAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn daily_closes<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<DailyCloses, SourceError>> + Send + 'a>> {
        Box::pin(async move { self.fetch_daily_closes(&req).await })
    }
}

// ============================================================================
// Chart payload
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartError {
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    meta: YahooMeta,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct YahooMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
    #[serde(default)]
    adjclose: Vec<YahooAdjClose>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooAdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

fn parse_chart_error(body: &str) -> Option<YahooChartError> {
    serde_json::from_str::<YahooChartResponse>(body)
        .ok()
        .and_then(|response| response.chart.error)
}

fn chart_error_to_source_error(symbol: &Symbol, error: YahooChartError) -> SourceError {
    if error.code.eq_ignore_ascii_case("not found") {
        SourceError::not_found(format!(
            "yahoo has no chart for '{symbol}': {}",
            error.description
        ))
    } else {
        SourceError::unavailable(format!(
            "yahoo chart API error {}: {}",
            error.code, error.description
        ))
    }
}

fn parse_chart_response(
    body: &str,
    symbol: &Symbol,
    range: DateRange,
    adjusted: bool,
) -> Result<DailyCloses, SourceError> {
    let chart_response: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo chart: {e}")))?;

    if let Some(error) = chart_response.chart.error {
        return Err(chart_error_to_source_error(symbol, error));
    }

    let Some(result) = chart_response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
    else {
        return Ok(DailyCloses::empty(symbol.clone()));
    };

    // Ranges without trading days come back without a timestamp array.
    let Some(timestamps) = result.timestamp else {
        return Ok(DailyCloses::empty(symbol.clone()));
    };

    let closes = select_closes(&result.indicators, adjusted);
    let mut points: Vec<PricePoint> = Vec::with_capacity(timestamps.len());
    let mut dropped = 0_usize;

    for (i, &ts_value) in timestamps.iter().enumerate() {
        let date = exchange_date(ts_value, result.meta.gmtoffset)?;
        if !range.contains(date) {
            continue;
        }

        let Some(point) = closes
            .and_then(|values| values.get(i).copied().flatten())
            .and_then(|close| PricePoint::new(date, close).ok())
        else {
            dropped += 1;
            continue;
        };

        // The live session can repeat the last bar; keep the newest value.
        match points.last_mut() {
            Some(last) if last.date == date => *last = point,
            _ => points.push(point),
        }
    }

    if dropped > 0 {
        warn!(%symbol, dropped, "skipped yahoo rows without a usable close");
    }

    DailyCloses::new(symbol.clone(), points).map_err(validation_to_error)
}

fn select_closes(indicators: &YahooChartIndicators, adjusted: bool) -> Option<&Vec<Option<f64>>> {
    let adjusted_closes = indicators
        .adjclose
        .first()
        .map(|series| &series.adjclose)
        .filter(|values| !values.is_empty());

    let raw_closes = indicators.quote.first().map(|quote| &quote.close);

    if adjusted {
        adjusted_closes.or(raw_closes)
    } else {
        raw_closes
    }
}

/// Daily bars are stamped at the session open; shifting by the exchange
/// offset yields the local trading date.
fn exchange_date(ts: i64, gmtoffset: i64) -> Result<Date, SourceError> {
    OffsetDateTime::from_unix_timestamp(ts.saturating_add(gmtoffset))
        .map(OffsetDateTime::date)
        .map_err(|e| SourceError::internal(format!("invalid timestamp {ts}: {e}")))
}

fn midnight_utc(date: Date) -> OffsetDateTime {
    date.with_time(Time::MIDNIGHT).assume_utc()
}

fn validation_to_error(error: ValidationError) -> SourceError {
    SourceError::internal(error.to_string())
}
