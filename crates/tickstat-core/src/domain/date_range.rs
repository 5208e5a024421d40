use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::ValidationError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse a calendar date written as `YYYY-MM-DD`.
pub fn parse_date(input: &str) -> Result<Date, ValidationError> {
    Date::parse(input.trim(), DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
        value: input.to_owned(),
    })
}

/// Inclusive calendar range used for every fetch of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange", into = "RawDateRange")]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub const fn start(&self) -> Date {
        self.start
    }

    pub const fn end(&self) -> Date {
        self.end
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

#[derive(Serialize, Deserialize)]
struct RawDateRange {
    #[serde(with = "iso_date")]
    start: Date,
    #[serde(with = "iso_date")]
    end: Date,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = ValidationError;

    fn try_from(value: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(value.start, value.end)
    }
}

impl From<DateRange> for RawDateRange {
    fn from(value: DateRange) -> Self {
        Self {
            start: value.start,
            end: value.end,
        }
    }
}

/// Serde adapter writing dates as `YYYY-MM-DD` strings.
pub(crate) mod iso_date {
    use serde::de::Error as DeError;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(date)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        super::parse_date(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn parses_iso_dates() {
        let range = DateRange::parse("2020-01-01", " 2020-12-31 ").expect("valid range");
        assert_eq!(range.start(), date!(2020 - 01 - 01));
        assert_eq!(range.end(), date!(2020 - 12 - 31));
        assert_eq!(range.to_string(), "2020-01-01..=2020-12-31");
    }

    #[test]
    fn rejects_inverted_range() {
        let err = DateRange::parse("2021-01-01", "2020-01-01").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidDateRange { .. }));
    }

    #[test]
    fn rejects_malformed_date() {
        let err = parse_date("01/02/2020").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidDate { .. }));
    }

    #[test]
    fn single_day_range_is_inclusive() {
        let day = date!(2024 - 03 - 15);
        let range = DateRange::new(day, day).expect("valid range");
        assert!(range.contains(day));
        assert!(!range.contains(date!(2024 - 03 - 16)));
    }

    #[test]
    fn serializes_as_plain_dates() {
        let range = DateRange::parse("2022-06-01", "2022-06-30").expect("valid range");
        let json = serde_json::to_string(&range).expect("serialize");
        assert_eq!(json, r#"{"start":"2022-06-01","end":"2022-06-30"}"#);

        let back: DateRange = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, range);
    }
}
