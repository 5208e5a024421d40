//! Market-data source contract.
//!
//! A [`DataSource`] turns a [`HistoryRequest`] (symbol plus inclusive date
//! range) into the [`DailyCloses`] observed over that range. Sources report
//! "no trading data" as an empty series rather than an error; the price
//! series layer decides whether an empty answer is fatal.
//!
//! # Example
//!
//! ```rust,ignore
//! use tickstat_core::{DataSource, DateRange, HistoryRequest, Symbol, YahooAdapter};
//!
//! async fn closes(adapter: &YahooAdapter) -> Result<(), Box<dyn std::error::Error>> {
//!     let request = HistoryRequest::new(
//!         Symbol::parse("AAPL")?,
//!         DateRange::parse("2023-01-01", "2023-12-31")?,
//!     );
//!     let closes = adapter.daily_closes(request).await?;
//!     println!("{} observations", closes.points.len());
//!     Ok(())
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{DailyCloses, DateRange, ProviderId, Symbol};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Transport failure or upstream outage.
    Unavailable,
    /// The upstream does not know the requested symbol.
    NotFound,
    InvalidRequest,
    Internal,
}

/// Structured error returned by data sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::NotFound,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether a later attempt could succeed. Informational only: nothing
    /// in tickstat retries.
    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::NotFound => "source.not_found",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Request payload for a daily close history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub symbol: Symbol,
    pub range: DateRange,
}

impl HistoryRequest {
    pub fn new(symbol: Symbol, range: DateRange) -> Self {
        Self { symbol, range }
    }
}

/// Market-data source contract.
///
/// Implementations must only return points whose dates fall inside the
/// requested range, sorted ascending. [`crate::PriceSeries`] rejects any
/// answer that does not.
pub trait DataSource: Send + Sync {
    /// Returns the provider identifier.
    fn id(&self) -> ProviderId;

    /// Fetches daily closing prices for the requested symbol and range.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if:
    /// - The provider cannot be reached or answers with a failure status
    /// - The provider does not recognize the symbol
    /// - The upstream payload cannot be decoded
    fn daily_closes<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<DailyCloses, SourceError>> + Send + 'a>>;
}
