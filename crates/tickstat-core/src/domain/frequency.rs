use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::ValidationError;

/// Resampling period for return statistics.
///
/// "No resampling" is expressed as `Option::<Frequency>::None` by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }

    /// Position of the calendar period containing `date`.
    ///
    /// Consecutive periods have consecutive indices, so the difference of two
    /// indices counts the periods between them. Weeks are ISO weeks (Monday
    /// through Sunday).
    pub fn period_index(self, date: Date) -> i64 {
        let year = i64::from(date.year());
        let month = i64::from(u8::from(date.month())) - 1;
        match self {
            Self::Daily => i64::from(date.to_julian_day()),
            Self::Weekly => {
                let monday = i64::from(date.to_julian_day())
                    - i64::from(date.weekday().number_days_from_monday());
                monday.div_euclid(7)
            }
            Self::Monthly => year * 12 + month,
            Self::Quarterly => year * 4 + month / 3,
            Self::Yearly => year,
        }
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "d" | "daily" => Ok(Self::Daily),
            "w" | "weekly" => Ok(Self::Weekly),
            "m" | "me" | "monthly" => Ok(Self::Monthly),
            "q" | "qe" | "quarterly" => Ok(Self::Quarterly),
            "y" | "a" | "ye" | "yearly" | "annual" => Ok(Self::Yearly),
            other => Err(ValidationError::InvalidFrequency {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn parses_codes_and_names() {
        assert_eq!(Frequency::from_str("M").expect("code"), Frequency::Monthly);
        assert_eq!(
            Frequency::from_str("quarterly").expect("name"),
            Frequency::Quarterly
        );
        assert_eq!(Frequency::from_str("a").expect("alias"), Frequency::Yearly);
    }

    #[test]
    fn rejects_unknown_code() {
        let err = Frequency::from_str("h").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidFrequency { .. }));
    }

    #[test]
    fn weekly_periods_follow_iso_weeks() {
        let weekly = Frequency::Weekly;
        let monday = weekly.period_index(date!(2024 - 12 - 30));
        let sunday = weekly.period_index(date!(2025 - 01 - 05));
        let friday_before = weekly.period_index(date!(2024 - 12 - 27));

        assert_eq!(monday, sunday);
        assert_eq!(monday - friday_before, 1);
    }

    #[test]
    fn quarters_group_three_months() {
        let q = Frequency::Quarterly;
        assert_eq!(q.period_index(date!(2023 - 01 - 31)), q.period_index(date!(2023 - 03 - 01)));
        assert_eq!(
            q.period_index(date!(2023 - 04 - 03)) - q.period_index(date!(2023 - 03 - 31)),
            1
        );
        assert_eq!(
            q.period_index(date!(2024 - 01 - 02)) - q.period_index(date!(2023 - 11 - 15)),
            1
        );
    }

    #[test]
    fn indices_count_periods_across_year_ends() {
        let m = Frequency::Monthly;
        assert_eq!(m.period_index(date!(2024 - 03 - 01)) - m.period_index(date!(2023 - 12 - 31)), 3);

        let d = Frequency::Daily;
        assert_eq!(d.period_index(date!(2024 - 01 - 08)) - d.period_index(date!(2024 - 01 - 05)), 3);
    }
}
