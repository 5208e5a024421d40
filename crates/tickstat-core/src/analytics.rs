//! Risk and return statistics on top of a [`PriceSeries`].

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::io::Write;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data_source::DataSource;
use crate::price_series::{PriceSeries, PricedInstrument};
use crate::resample::resample_last;
use crate::stats::{mean, round_to, sample_std, slot_log_returns};
use crate::{CoreError, DateRange, Frequency, PricePoint, Symbol};

/// Trading days per year used for annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Annualized mean log return and volatility, rounded to three decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualizedPerformance {
    pub mean_return: f64,
    pub risk: f64,
}

impl Display for AnnualizedPerformance {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Return:{:?} | Risk:{:?}", self.mean_return, self.risk)
    }
}

/// A price series with an optional resampling frequency.
///
/// With no frequency, statistics use the native daily returns. With a
/// frequency, prices are first reduced to the last close of every period and
/// returns are recomputed from those closes.
#[derive(Debug)]
pub struct ReturnAnalytics {
    series: PriceSeries,
    frequency: Option<Frequency>,
}

impl ReturnAnalytics {
    pub async fn fetch(
        source: Arc<dyn DataSource>,
        symbol: Symbol,
        range: DateRange,
        frequency: Option<Frequency>,
    ) -> Result<Self, CoreError> {
        let series = PriceSeries::fetch(source, symbol, range).await?;
        Ok(Self::from_series(series, frequency))
    }

    pub fn from_series(series: PriceSeries, frequency: Option<Frequency>) -> Self {
        Self { series, frequency }
    }

    pub fn frequency(&self) -> Option<Frequency> {
        self.frequency
    }

    pub fn set_frequency(&mut self, frequency: Option<Frequency>) {
        self.frequency = frequency;
    }

    /// See [`PriceSeries::set_ticker`]. The frequency is kept.
    pub async fn set_ticker(&mut self, ticker: Option<&str>) -> Result<bool, CoreError> {
        self.series.set_ticker(ticker).await
    }

    /// Prices at the configured frequency; the observations themselves when
    /// no frequency is set. Periods without observations are left out.
    pub fn resampled_prices(&self) -> Cow<'_, [PricePoint]> {
        match self.frequency {
            None => Cow::Borrowed(self.observations()),
            Some(frequency) => {
                Cow::Owned(self.resampled(frequency).into_iter().flatten().collect())
            }
        }
    }

    fn resampled(&self, frequency: Frequency) -> Vec<Option<PricePoint>> {
        let slots = resample_last(self.observations(), frequency);
        debug!(
            symbol = %self.ticker(),
            frequency = %frequency,
            observations = self.observations().len(),
            periods = slots.len(),
            empty_periods = slots.iter().filter(|slot| slot.is_none()).count(),
            "resampled price series"
        );
        slots
    }

    /// Log returns at the configured frequency.
    ///
    /// A period with no observation yields no price, so neither the return
    /// into it nor the return out of it is included.
    ///
    /// # Errors
    ///
    /// [`CoreError::InsufficientData`] when fewer than two prices remain
    /// after resampling.
    pub fn effective_returns(&self) -> Result<Vec<f64>, CoreError> {
        let Some(frequency) = self.frequency else {
            let found = self.observations().len();
            if found < 2 {
                return Err(CoreError::InsufficientData { required: 2, found });
            }
            return Ok(self.series.log_return_values());
        };

        let slots = self.resampled(frequency);
        let found = slots.iter().flatten().count();
        if found < 2 {
            return Err(CoreError::InsufficientData { required: 2, found });
        }
        Ok(slot_log_returns(&slots).into_iter().map(|r| r.value).collect())
    }

    /// Arithmetic mean of [`Self::effective_returns`].
    pub fn mean_return(&self) -> Result<f64, CoreError> {
        let returns = self.effective_returns()?;
        mean(&returns).ok_or(CoreError::InsufficientData {
            required: 2,
            found: returns.len() + 1,
        })
    }

    /// Sample standard deviation of [`Self::effective_returns`].
    pub fn std_returns(&self) -> Result<f64, CoreError> {
        let returns = self.effective_returns()?;
        sample_std(&returns).ok_or(CoreError::InsufficientData {
            required: 3,
            found: returns.len() + 1,
        })
    }

    /// Annualized mean and volatility of the daily log returns.
    ///
    /// Always computed on the native daily returns, whatever the frequency.
    pub fn annualized_perf(&self) -> Result<AnnualizedPerformance, CoreError> {
        let daily = self.series.log_return_values();
        let insufficient = CoreError::InsufficientData {
            required: 3,
            found: self.observations().len(),
        };
        let (Some(mean_return), Some(std)) = (mean(&daily), sample_std(&daily)) else {
            return Err(insufficient);
        };

        Ok(AnnualizedPerformance {
            mean_return: round_to(mean_return * TRADING_DAYS_PER_YEAR, 3),
            risk: round_to(std * TRADING_DAYS_PER_YEAR.sqrt(), 3),
        })
    }

    /// Computes [`Self::annualized_perf`] and writes its report line to `out`.
    pub fn report_annualized_perf<W: Write>(
        &self,
        out: &mut W,
    ) -> Result<AnnualizedPerformance, CoreError> {
        let perf = self.annualized_perf()?;
        writeln!(out, "{perf}")?;
        Ok(perf)
    }
}

impl PricedInstrument for ReturnAnalytics {
    fn price_series(&self) -> &PriceSeries {
        &self.series
    }
}

impl Display for ReturnAnalytics {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let range = self.range();
        write!(
            f,
            "ReturnAnalytics(ticker = {}, start = {}, end = {}, frequency = {})",
            self.ticker(),
            range.start(),
            range.end(),
            self.frequency.map_or("none", Frequency::as_str)
        )
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;
    use time::Date;

    use super::*;
    use crate::adapters::FixtureSource;

    fn aapl() -> Symbol {
        Symbol::parse("AAPL").expect("valid symbol")
    }

    fn source(points: &[(Date, f64)]) -> Arc<dyn DataSource> {
        let points = points
            .iter()
            .map(|(date, close)| PricePoint::new(*date, *close).expect("valid point"))
            .collect();
        Arc::new(FixtureSource::new().with_series(aapl(), points))
    }

    fn year_2024() -> DateRange {
        DateRange::new(date!(2024 - 01 - 01), date!(2024 - 12 - 31)).expect("valid range")
    }

    #[tokio::test]
    async fn monthly_returns_use_last_close_of_each_month() {
        let source = source(&[
            (date!(2024 - 01 - 02), 100.0),
            (date!(2024 - 01 - 31), 110.0),
            (date!(2024 - 02 - 15), 90.0),
            (date!(2024 - 02 - 29), 121.0),
            (date!(2024 - 03 - 28), 133.1),
        ]);
        let analytics = ReturnAnalytics::fetch(source, aapl(), year_2024(), Some(Frequency::Monthly))
            .await
            .expect("analytics");

        let prices: Vec<f64> = analytics.resampled_prices().iter().map(|p| p.close).collect();
        assert_eq!(prices, vec![110.0, 121.0, 133.1]);

        let returns = analytics.effective_returns().expect("returns");
        assert_eq!(returns.len(), 2);
        assert!((returns[0] - 1.1_f64.ln()).abs() < 1e-12);
        assert!((returns[1] - 1.1_f64.ln()).abs() < 1e-12);
        assert!((analytics.mean_return().expect("mean") - 1.1_f64.ln()).abs() < 1e-12);
    }

    #[tokio::test]
    async fn empty_month_drops_returns_on_both_sides() {
        let source = source(&[
            (date!(2024 - 01 - 31), 100.0),
            (date!(2024 - 03 - 28), 121.0),
            (date!(2024 - 04 - 30), 133.1),
        ]);
        let analytics = ReturnAnalytics::fetch(source, aapl(), year_2024(), Some(Frequency::Monthly))
            .await
            .expect("analytics");

        assert_eq!(analytics.resampled_prices().len(), 3);
        let returns = analytics.effective_returns().expect("returns");
        assert_eq!(returns.len(), 1);
        assert!((analytics.mean_return().expect("mean") - 1.1_f64.ln()).abs() < 1e-12);
    }

    #[tokio::test]
    async fn daily_frequency_skips_returns_across_weekends() {
        let source = source(&[
            (date!(2024 - 01 - 04), 100.0),
            (date!(2024 - 01 - 05), 101.0),
            (date!(2024 - 01 - 08), 103.0),
            (date!(2024 - 01 - 09), 102.0),
        ]);
        let analytics = ReturnAnalytics::fetch(source, aapl(), year_2024(), Some(Frequency::Daily))
            .await
            .expect("analytics");

        let returns = analytics.effective_returns().expect("returns");
        assert_eq!(returns.len(), 2);
        assert!((returns[0] - (101.0_f64 / 100.0).ln()).abs() < 1e-12);
        assert!((returns[1] - (102.0_f64 / 103.0).ln()).abs() < 1e-12);
        // The native series still links Friday to Monday.
        assert_eq!(analytics.log_returns().len(), 3);
    }

    #[tokio::test]
    async fn single_resampled_point_is_insufficient() {
        let source = source(&[
            (date!(2024 - 03 - 01), 10.0),
            (date!(2024 - 03 - 04), 11.0),
            (date!(2024 - 03 - 05), 12.0),
        ]);
        let analytics =
            ReturnAnalytics::fetch(source, aapl(), year_2024(), Some(Frequency::Quarterly))
                .await
                .expect("analytics");

        let err = analytics.effective_returns().expect_err("must fail");
        assert!(matches!(
            err,
            CoreError::InsufficientData {
                required: 2,
                found: 1
            }
        ));
        // Annualization ignores the frequency.
        assert!(analytics.annualized_perf().is_ok());
    }

    #[tokio::test]
    async fn std_needs_two_returns() {
        let source = source(&[(date!(2024 - 03 - 01), 10.0), (date!(2024 - 03 - 04), 11.0)]);
        let analytics = ReturnAnalytics::fetch(source, aapl(), year_2024(), None)
            .await
            .expect("analytics");

        assert!(analytics.mean_return().is_ok());
        assert!(matches!(
            analytics.std_returns(),
            Err(CoreError::InsufficientData { required: 3, .. })
        ));
    }

    #[tokio::test]
    async fn report_writes_return_and_risk_line() {
        let source = source(&[
            (date!(2024 - 01 - 02), 100.0),
            (date!(2024 - 01 - 03), 101.0),
            (date!(2024 - 01 - 04), 99.5),
            (date!(2024 - 01 - 05), 102.0),
            (date!(2024 - 01 - 08), 103.5),
            (date!(2024 - 01 - 09), 101.0),
        ]);
        let analytics = ReturnAnalytics::fetch(source, aapl(), year_2024(), None)
            .await
            .expect("analytics");

        let mut out = Vec::new();
        let perf = analytics
            .report_annualized_perf(&mut out)
            .expect("report");

        assert_eq!(
            perf,
            AnnualizedPerformance {
                mean_return: 0.501,
                risk: 0.33
            }
        );
        assert_eq!(String::from_utf8(out).expect("utf8"), "Return:0.501 | Risk:0.33\n");
    }

    #[test]
    fn performance_display_keeps_a_decimal_point() {
        let perf = AnnualizedPerformance {
            mean_return: -0.0,
            risk: 1.0,
        };
        assert_eq!(perf.to_string(), "Return:-0.0 | Risk:1.0");
    }

    #[tokio::test]
    async fn display_includes_frequency() {
        let source = source(&[(date!(2024 - 01 - 02), 100.0), (date!(2024 - 01 - 03), 101.0)]);
        let mut analytics = ReturnAnalytics::fetch(source, aapl(), year_2024(), None)
            .await
            .expect("analytics");
        assert_eq!(
            analytics.to_string(),
            "ReturnAnalytics(ticker = AAPL, start = 2024-01-01, end = 2024-12-31, frequency = none)"
        );

        analytics.set_frequency(Some(Frequency::Weekly));
        assert!(analytics.to_string().ends_with("frequency = weekly)"));
    }
}
