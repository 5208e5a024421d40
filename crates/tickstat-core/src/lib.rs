//! Core library for tickstat.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - Market-data source contract and adapters (Yahoo Finance, in-memory fixtures)
//! - Price series with derived log returns
//! - Resampled risk/return analytics and annualized performance
//! - Chart descriptions and an SVG renderer
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use tickstat_core::{
//!     DateRange, Frequency, PricedInstrument, ReturnAnalytics, Symbol, YahooAdapter,
//! };
//!
//! async fn report() -> Result<(), tickstat_core::CoreError> {
//!     let analytics = ReturnAnalytics::fetch(
//!         Arc::new(YahooAdapter::default()),
//!         Symbol::parse("AAPL")?,
//!         DateRange::parse("2023-01-01", "2023-12-31")?,
//!         Some(Frequency::Monthly),
//!     )
//!     .await?;
//!
//!     println!("{analytics}: mean {:.5}", analytics.mean_return()?);
//!     analytics.report_annualized_perf(&mut std::io::stdout())?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod analytics;
pub mod chart;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod price_series;
pub mod resample;
pub mod source;
pub mod stats;

pub use adapters::{FixtureSource, YahooAdapter};
pub use analytics::{AnnualizedPerformance, ReturnAnalytics, TRADING_DAYS_PER_YEAR};
pub use chart::{
    render_svg, Chart, ChartSink, ChartStyle, RenderedChart, ReturnChartKind, SvgChartRenderer,
};
pub use config::YahooConfig;
pub use data_source::{DataSource, HistoryRequest, SourceError, SourceErrorKind};
pub use domain::{
    parse_date, DailyCloses, DateRange, Frequency, LogReturn, PricePoint, Symbol,
};
pub use error::{CoreError, ValidationError};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use price_series::{PriceSeries, PricedInstrument};
pub use resample::resample_last;
pub use source::ProviderId;
