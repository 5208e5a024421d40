use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use time::{Date, Duration, Weekday};
use tracing::debug;

use crate::data_source::{DataSource, HistoryRequest, SourceError};
use crate::{DailyCloses, PricePoint, ProviderId, Symbol};

/// In-memory source serving pre-loaded closes.
///
/// In synthetic mode, symbols without loaded data get a deterministic
/// weekday-only random walk seeded from the symbol text.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    series: HashMap<Symbol, Vec<PricePoint>>,
    synthetic: bool,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn synthetic() -> Self {
        Self {
            series: HashMap::new(),
            synthetic: true,
        }
    }

    /// Loads closes for `symbol`, replacing anything loaded before.
    /// Points are sorted by date.
    pub fn with_series(mut self, symbol: Symbol, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|point| point.date);
        self.series.insert(symbol, points);
        self
    }

    fn closes_for(&self, req: &HistoryRequest) -> Result<DailyCloses, SourceError> {
        let points = match self.series.get(&req.symbol) {
            Some(points) => points
                .iter()
                .filter(|point| req.range.contains(point.date))
                .copied()
                .collect(),
            None if self.synthetic => {
                synthetic_walk(&req.symbol, req.range.start(), req.range.end())
            }
            None => Vec::new(),
        };

        debug!(symbol = %req.symbol, observations = points.len(), "served fixture closes");
        DailyCloses::new(req.symbol.clone(), points)
            .map_err(|error| SourceError::internal(error.to_string()))
    }
}

impl DataSource for FixtureSource {
    fn id(&self) -> ProviderId {
        ProviderId::Fixture
    }

    fn daily_closes<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<DailyCloses, SourceError>> + Send + 'a>> {
        Box::pin(async move { self.closes_for(&req) })
    }
}

fn synthetic_walk(symbol: &Symbol, start: Date, end: Date) -> Vec<PricePoint> {
    let seed = symbol_seed(symbol);
    let mut state = seed | 1;
    let mut price = 50.0 + (seed % 200) as f64;
    let mut points = Vec::new();
    let mut date = start;

    while date <= end {
        if !matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday) {
            // xorshift64 step mapped to a daily move within +/-2%.
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let unit = (state % 10_000) as f64 / 10_000.0;
            price *= 1.0 + (unit - 0.5) * 0.04;
            points.push(PricePoint {
                date,
                close: (price * 100.0).round() / 100.0,
            });
        }

        match date.checked_add(Duration::days(1)) {
            Some(next) => date = next,
            None => break,
        }
    }

    points
}

fn symbol_seed(symbol: &Symbol) -> u64 {
    symbol.as_str().bytes().fold(5381_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(byte as u64)
    })
}
