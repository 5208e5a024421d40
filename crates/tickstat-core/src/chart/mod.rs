//! Chart descriptions and the rendering sink contract.
//!
//! Price series never draw anything themselves; they describe a [`Chart`]
//! and hand it to a [`ChartSink`]. Visual settings live in an explicit
//! [`ChartStyle`] owned by the sink.

mod svg;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::ValidationError;

pub use svg::{render_svg, RenderedChart, SvgChartRenderer};

/// How log returns are charted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnChartKind {
    #[default]
    TimeSeries,
    Histogram,
}

impl ReturnChartKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TimeSeries => "ts",
            Self::Histogram => "hist",
        }
    }
}

impl Display for ReturnChartKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReturnChartKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ts" | "time_series" | "timeseries" => Ok(Self::TimeSeries),
            "hist" | "histogram" => Ok(Self::Histogram),
            other => Err(ValidationError::InvalidChartKind {
                value: other.to_owned(),
            }),
        }
    }
}

/// A chart ready to be drawn by a [`ChartSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    /// Values plotted against their dates.
    Line {
        title: String,
        points: Vec<(Date, f64)>,
    },
    /// Frequency distribution of `values` over `bins` equal-width bins.
    Histogram {
        title: String,
        values: Vec<f64>,
        bins: usize,
    },
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Self::Line { title, .. } | Self::Histogram { title, .. } => title,
        }
    }
}

/// Rendering sink. Rendering has no failure contract.
pub trait ChartSink {
    fn render(&mut self, chart: &Chart);
}

/// Visual settings applied by a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub padding: f64,
    pub title_font_size: u32,
    pub background: String,
    pub grid_color: String,
    pub line_color: String,
    pub bar_color: String,
    pub axis_color: String,
}

impl Default for ChartStyle {
    /// Dark-grid palette on a 12x8 inch figure at 100 px per inch.
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            padding: 60.0,
            title_font_size: 15,
            background: String::from("#eaeaf2"),
            grid_color: String::from("#ffffff"),
            line_color: String::from("#4c72b0"),
            bar_color: String::from("#4c72b0"),
            axis_color: String::from("#555555"),
        }
    }
}
