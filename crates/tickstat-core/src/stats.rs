//! Descriptive statistics over return samples.

use crate::{LogReturn, PricePoint};

/// Log returns of consecutive prices, dated at the later observation.
pub fn log_returns(prices: &[PricePoint]) -> Vec<LogReturn> {
    prices
        .windows(2)
        .map(|pair| LogReturn {
            date: pair[1].date,
            value: (pair[1].close / pair[0].close).ln(),
        })
        .collect()
}

/// Log returns between adjacent period slots.
///
/// A return is produced only where both slots hold a price; an empty slot
/// drops the return into it and the return out of it.
pub fn slot_log_returns(slots: &[Option<PricePoint>]) -> Vec<LogReturn> {
    slots
        .windows(2)
        .filter_map(|pair| match (pair[0], pair[1]) {
            (Some(previous), Some(current)) => Some(LogReturn {
                date: current.date,
                value: (current.close / previous.close).ln(),
            }),
            _ => None,
        })
        .collect()
}

/// Arithmetic mean; `None` for an empty sample.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (N - 1 divisor); `None` below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_sq = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

/// Histogram bin count for `observations` points: `floor(sqrt(n))`.
pub fn histogram_bins(observations: usize) -> usize {
    (observations as f64).sqrt().floor() as usize
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn log_returns_are_dated_at_later_point() {
        let prices = vec![
            PricePoint::new(date!(2024 - 01 - 02), 100.0).expect("valid"),
            PricePoint::new(date!(2024 - 01 - 03), 110.0).expect("valid"),
            PricePoint::new(date!(2024 - 01 - 04), 99.0).expect("valid"),
        ];

        let returns = log_returns(&prices);
        assert_eq!(returns.len(), 2);
        assert_eq!(returns[0].date, date!(2024 - 01 - 03));
        assert!(approx(returns[0].value, (1.1_f64).ln()));
        assert!(approx(returns[1].value, (0.9_f64).ln()));
    }

    #[test]
    fn fewer_than_two_prices_have_no_returns() {
        assert!(log_returns(&[]).is_empty());
        let single = [PricePoint::new(date!(2024 - 01 - 02), 1.0).expect("valid")];
        assert!(log_returns(&single).is_empty());
    }

    #[test]
    fn empty_slots_drop_returns_on_both_sides() {
        let jan = PricePoint::new(date!(2024 - 01 - 31), 100.0).expect("valid");
        let mar = PricePoint::new(date!(2024 - 03 - 28), 121.0).expect("valid");
        let apr = PricePoint::new(date!(2024 - 04 - 30), 133.1).expect("valid");

        let returns = slot_log_returns(&[Some(jan), None, Some(mar), Some(apr)]);
        assert_eq!(returns.len(), 1);
        assert_eq!(returns[0].date, date!(2024 - 04 - 30));
        assert!(approx(returns[0].value, (1.1_f64).ln()));
    }

    #[test]
    fn sample_std_uses_n_minus_one() {
        let values = [0.01, -0.02, 0.015];
        assert!(approx(mean(&values).expect("mean"), 0.005 / 3.0));
        let std = sample_std(&values).expect("std");
        assert!((std - 0.018_929_694_486_000_914).abs() < 1e-12);
    }

    #[test]
    fn degenerate_samples_have_no_statistics() {
        assert_eq!(mean(&[]), None);
        assert_eq!(sample_std(&[0.5]), None);
    }

    #[test]
    fn rounds_to_three_places() {
        assert_eq!(round_to(0.420_000_000_1, 3), 0.42);
        assert_eq!(round_to(0.300_497, 3), 0.3);
        assert_eq!(round_to(-0.123_56, 3), -0.124);
    }

    #[test]
    fn bins_floor_square_root() {
        assert_eq!(histogram_bins(0), 0);
        assert_eq!(histogram_bins(3), 1);
        assert_eq!(histogram_bins(252), 15);
        assert_eq!(histogram_bins(256), 16);
    }
}
