use serde::{Deserialize, Serialize};
use time::Date;

use super::date_range::iso_date;
use crate::{DateRange, Symbol, ValidationError};

/// Closing price observed on one trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPricePoint")]
pub struct PricePoint {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: Date, close: f64) -> Result<Self, ValidationError> {
        validate_positive("close", close)?;
        Ok(Self { date, close })
    }
}

#[derive(Deserialize)]
struct RawPricePoint {
    #[serde(with = "iso_date")]
    date: Date,
    close: f64,
}

impl TryFrom<RawPricePoint> for PricePoint {
    type Error = ValidationError;

    fn try_from(value: RawPricePoint) -> Result<Self, Self::Error> {
        Self::new(value.date, value.close)
    }
}

/// Log return between the previous observation and `date`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogReturn {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub value: f64,
}

/// Daily closing prices for a single symbol, ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDailyCloses")]
pub struct DailyCloses {
    pub symbol: Symbol,
    pub points: Vec<PricePoint>,
}

impl DailyCloses {
    /// Builds a series, rejecting out-of-order or duplicated dates.
    pub fn new(symbol: Symbol, points: Vec<PricePoint>) -> Result<Self, ValidationError> {
        ensure_ascending(&points)?;
        Ok(Self { symbol, points })
    }

    /// Re-checks every invariant of a series answering a request for
    /// `symbol` over `range`.
    ///
    /// The fields are public, so a series built without [`Self::new`] may
    /// carry non-positive closes, unordered dates or dates outside the range.
    pub fn validate_for(&self, symbol: &Symbol, range: DateRange) -> Result<(), ValidationError> {
        if &self.symbol != symbol {
            return Err(ValidationError::SymbolMismatch {
                expected: symbol.clone(),
                found: self.symbol.clone(),
            });
        }
        for point in &self.points {
            validate_positive("close", point.close)?;
            if !range.contains(point.date) {
                return Err(ValidationError::ObservationOutOfRange {
                    date: point.date,
                    start: range.start(),
                    end: range.end(),
                });
            }
        }
        ensure_ascending(&self.points)
    }

    pub fn empty(symbol: Symbol) -> Self {
        Self {
            symbol,
            points: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

#[derive(Deserialize)]
struct RawDailyCloses {
    symbol: Symbol,
    points: Vec<PricePoint>,
}

impl TryFrom<RawDailyCloses> for DailyCloses {
    type Error = ValidationError;

    fn try_from(value: RawDailyCloses) -> Result<Self, Self::Error> {
        Self::new(value.symbol, value.points)
    }
}

fn ensure_ascending(points: &[PricePoint]) -> Result<(), ValidationError> {
    match points.windows(2).find(|pair| pair[0].date >= pair[1].date) {
        Some(pair) => Err(ValidationError::UnorderedObservations { date: pair[1].date }),
        None => Ok(()),
    }
}

fn validate_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn rejects_non_positive_close() {
        let err = PricePoint::new(date!(2024 - 01 - 02), 0.0).expect_err("must fail");
        assert_eq!(err, ValidationError::NonPositiveValue { field: "close" });

        let err = PricePoint::new(date!(2024 - 01 - 02), f64::NAN).expect_err("must fail");
        assert_eq!(err, ValidationError::NonFiniteValue { field: "close" });
    }

    #[test]
    fn rejects_duplicate_dates() {
        let day = date!(2024 - 01 - 02);
        let points = vec![
            PricePoint::new(day, 10.0).expect("valid"),
            PricePoint::new(day, 11.0).expect("valid"),
        ];
        let err = DailyCloses::new(Symbol::parse("AAPL").expect("valid"), points)
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::UnorderedObservations { .. }));
    }

    #[test]
    fn deserializing_rejects_non_positive_close() {
        let err = serde_json::from_str::<PricePoint>(r#"{"date":"2024-01-02","close":-1.0}"#)
            .expect_err("must fail");
        assert!(err.to_string().contains("strictly positive"));

        let point: PricePoint =
            serde_json::from_str(r#"{"date":"2024-01-02","close":185.64}"#).expect("valid");
        assert_eq!(point.close, 185.64);
    }

    #[test]
    fn deserializing_rejects_unordered_closes() {
        let json = r#"{"symbol":"AAPL","points":[
            {"date":"2024-01-03","close":10.0},
            {"date":"2024-01-02","close":11.0}]}"#;
        assert!(serde_json::from_str::<DailyCloses>(json).is_err());
    }

    #[test]
    fn validate_for_checks_fields_set_directly() {
        let aapl = Symbol::parse("AAPL").expect("valid");
        let range = DateRange::new(date!(2024 - 01 - 01), date!(2024 - 01 - 31)).expect("valid");
        let point = |date, close| PricePoint { date, close };

        let zero_close = DailyCloses {
            symbol: aapl.clone(),
            points: vec![point(date!(2024 - 01 - 02), 10.0), point(date!(2024 - 01 - 03), 0.0)],
        };
        assert_eq!(
            zero_close.validate_for(&aapl, range),
            Err(ValidationError::NonPositiveValue { field: "close" })
        );

        let outside = DailyCloses {
            symbol: aapl.clone(),
            points: vec![point(date!(2024 - 02 - 01), 10.0)],
        };
        assert!(matches!(
            outside.validate_for(&aapl, range),
            Err(ValidationError::ObservationOutOfRange { .. })
        ));

        let unordered = DailyCloses {
            symbol: aapl.clone(),
            points: vec![point(date!(2024 - 01 - 03), 10.0), point(date!(2024 - 01 - 02), 11.0)],
        };
        assert!(matches!(
            unordered.validate_for(&aapl, range),
            Err(ValidationError::UnorderedObservations { .. })
        ));

        let msft = Symbol::parse("MSFT").expect("valid");
        assert!(matches!(
            DailyCloses::empty(msft).validate_for(&aapl, range),
            Err(ValidationError::SymbolMismatch { .. })
        ));
    }

    #[test]
    fn serializes_point_with_iso_date() {
        let point = PricePoint::new(date!(2024 - 01 - 02), 185.64).expect("valid");
        let json = serde_json::to_string(&point).expect("serialize");
        assert_eq!(json, r#"{"date":"2024-01-02","close":185.64}"#);
    }
}
