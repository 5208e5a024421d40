//! Period resampling of price series.

use crate::{Frequency, PricePoint};

/// Keeps the last observation of every calendar period.
///
/// The output has one slot per period from the first observation's period to
/// the last one's. Periods without any observation are `None`, so slot `i`
/// and slot `i + 1` are always adjacent calendar periods. `points` must be
/// ascending by date.
pub fn resample_last(points: &[PricePoint], frequency: Frequency) -> Vec<Option<PricePoint>> {
    let Some(first) = points.first() else {
        return Vec::new();
    };
    let origin = frequency.period_index(first.date);

    let mut slots: Vec<Option<PricePoint>> = Vec::new();
    for point in points {
        let Ok(slot) = usize::try_from(frequency.period_index(point.date) - origin) else {
            continue;
        };
        if slots.len() <= slot {
            slots.resize(slot + 1, None);
        }
        slots[slot] = Some(*point);
    }

    slots
}
