use thiserror::Error;
use time::Date;

use crate::data_source::SourceError;
use crate::Symbol;

/// Validation and argument errors exposed by `tickstat-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter or '^': '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("date must be formatted as YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
    #[error("date range start {start} is after end {end}")]
    InvalidDateRange { start: Date, end: Date },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be strictly positive")]
    NonPositiveValue { field: &'static str },
    #[error("observations must be strictly ascending by date (offending date {date})")]
    UnorderedObservations { date: Date },

    #[error("observation dated {date} is outside {start}..={end}")]
    ObservationOutOfRange { date: Date, start: Date, end: Date },
    #[error("closes for {found} returned for a request for {expected}")]
    SymbolMismatch { expected: Symbol, found: Symbol },

    #[error("invalid frequency '{value}', expected one of d, w, m, q, y")]
    InvalidFrequency { value: String },
    #[error("invalid chart kind '{value}', expected one of ts, hist")]
    InvalidChartKind { value: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("market data source failed: {0}")]
    Source(#[from] SourceError),

    #[error("no price data available for {symbol} between {start} and {end}")]
    DataUnavailable {
        symbol: Symbol,
        start: Date,
        end: Date,
    },

    #[error("insufficient data: need at least {required} points, found {found}")]
    InsufficientData { required: usize, found: usize },

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
