use std::fmt::Write as _;

use time::Date;

use super::{Chart, ChartSink, ChartStyle};

const X_TICKS: usize = 6;
const Y_TICKS: usize = 5;

/// SVG document produced for one chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    pub title: String,
    pub svg: String,
}

/// Sink that renders charts to SVG documents and keeps them in memory.
#[derive(Debug, Clone, Default)]
pub struct SvgChartRenderer {
    style: ChartStyle,
    rendered: Vec<RenderedChart>,
}

impl SvgChartRenderer {
    pub fn new(style: ChartStyle) -> Self {
        Self {
            style,
            rendered: Vec::new(),
        }
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    pub fn rendered(&self) -> &[RenderedChart] {
        &self.rendered
    }

    pub fn into_rendered(self) -> Vec<RenderedChart> {
        self.rendered
    }
}

impl ChartSink for SvgChartRenderer {
    fn render(&mut self, chart: &Chart) {
        let svg = render_svg(chart, &self.style);
        self.rendered.push(RenderedChart {
            title: chart.title().to_owned(),
            svg,
        });
    }
}

/// Renders a chart to a standalone SVG document.
pub fn render_svg(chart: &Chart, style: &ChartStyle) -> String {
    let mut canvas = Canvas::new(style);
    match chart {
        Chart::Line { title, points } => {
            canvas.draw_line(points);
            canvas.finish(title)
        }
        Chart::Histogram {
            title,
            values,
            bins,
        } => {
            canvas.draw_histogram(values, *bins);
            canvas.finish(title)
        }
    }
}

struct Canvas<'a> {
    style: &'a ChartStyle,
    body: String,
}

impl<'a> Canvas<'a> {
    fn new(style: &'a ChartStyle) -> Self {
        let mut body = String::new();
        let _ = write!(
            body,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><style>text{{font-family:Arial,sans-serif;font-size:11px;fill:{axis}}}</style>"#,
            w = style.width,
            h = style.height,
            axis = style.axis_color,
        );
        let _ = write!(
            body,
            r#"<rect x="{p:.2}" y="{p:.2}" width="{pw:.2}" height="{ph:.2}" fill="{bg}" />"#,
            p = style.padding,
            pw = plot_width(style),
            ph = plot_height(style),
            bg = style.background,
        );
        Self { style, body }
    }

    fn finish(mut self, title: &str) -> String {
        let _ = write!(
            self.body,
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" style="font-size:{size}px;fill:#222">{title}</text></svg>"#,
            x = f64::from(self.style.width) / 2.0,
            y = self.style.padding / 2.0,
            size = self.style.title_font_size,
            title = escape_xml(title),
        );
        self.body
    }

    fn draw_line(&mut self, points: &[(Date, f64)]) {
        let values: Vec<f64> = points.iter().map(|(_, value)| *value).collect();
        let Some((min, max)) = finite_extent(&values) else {
            return;
        };

        self.draw_y_grid(min, max);

        let xs = x_positions(points.len(), self.style);
        let coords = xs
            .iter()
            .zip(&values)
            .filter(|(_, value)| value.is_finite())
            .map(|(x, value)| format!("{:.2},{:.2}", x, self.scale_y(*value, min, max)))
            .collect::<Vec<_>>()
            .join(" ");

        let _ = write!(
            self.body,
            r#"<polyline fill="none" stroke="{stroke}" stroke-width="1.5" points="{coords}" />"#,
            stroke = self.style.line_color,
        );

        self.draw_time_axis(points, &xs);
    }

    fn draw_histogram(&mut self, values: &[f64], bins: usize) {
        let Some((min, max)) = finite_extent(values) else {
            return;
        };
        let bins = bins.max(1);

        let counts = bin_counts(values, bins, min, max);
        let max_count = counts.iter().copied().max().unwrap_or(0);
        if max_count == 0 {
            return;
        }

        self.draw_y_grid(0.0, max_count as f64);

        let bar_width = plot_width(self.style) / bins as f64;
        for (index, count) in counts.iter().enumerate() {
            let top = self.scale_y(*count as f64, 0.0, max_count as f64);
            let _ = write!(
                self.body,
                r##"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="{fill}" stroke="#ffffff" stroke-width="0.5" />"##,
                x = self.style.padding + index as f64 * bar_width,
                y = top,
                w = bar_width,
                h = self.bottom() - top,
                fill = self.style.bar_color,
            );
        }

        let label_y = self.bottom() + 16.0;
        for (x, value) in [(self.style.padding, min), (self.right(), max)] {
            let _ = write!(
                self.body,
                r#"<text x="{x:.2}" y="{label_y:.2}" text-anchor="middle">{value:.4}</text>"#,
            );
        }
    }

    fn draw_y_grid(&mut self, min: f64, max: f64) {
        for step in 0..=Y_TICKS {
            let value = min + (max - min) * step as f64 / Y_TICKS as f64;
            let y = self.scale_y(value, min, max);
            let _ = write!(
                self.body,
                r#"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{grid}" stroke-width="1" /><text x="{tx:.2}" y="{ty:.2}" text-anchor="end">{value:.4}</text>"#,
                x1 = self.style.padding,
                x2 = self.right(),
                grid = self.style.grid_color,
                tx = self.style.padding - 6.0,
                ty = y + 4.0,
            );
        }
    }

    fn draw_time_axis(&mut self, points: &[(Date, f64)], xs: &[f64]) {
        if points.is_empty() {
            return;
        }

        let stride = points.len().div_ceil(X_TICKS).max(1);
        let label_y = self.bottom() + 16.0;
        for index in (0..points.len()).step_by(stride) {
            let _ = write!(
                self.body,
                r#"<line x1="{x:.2}" y1="{top:.2}" x2="{x:.2}" y2="{bottom:.2}" stroke="{grid}" stroke-width="1" /><text x="{x:.2}" y="{label_y:.2}" text-anchor="middle">{date}</text>"#,
                x = xs[index],
                top = self.style.padding,
                bottom = self.bottom(),
                grid = self.style.grid_color,
                date = points[index].0,
            );
        }
    }

    fn scale_y(&self, value: f64, min: f64, max: f64) -> f64 {
        let height = plot_height(self.style);
        if max <= min {
            return self.style.padding + height / 2.0;
        }
        self.style.padding + (1.0 - (value - min) / (max - min)) * height
    }

    fn bottom(&self) -> f64 {
        self.style.padding + plot_height(self.style)
    }

    fn right(&self) -> f64 {
        self.style.padding + plot_width(self.style)
    }
}

fn plot_width(style: &ChartStyle) -> f64 {
    (f64::from(style.width) - 2.0 * style.padding).max(1.0)
}

fn plot_height(style: &ChartStyle) -> f64 {
    (f64::from(style.height) - 2.0 * style.padding).max(1.0)
}

fn x_positions(len: usize, style: &ChartStyle) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![style.padding + plot_width(style) / 2.0],
        _ => (0..len)
            .map(|i| style.padding + plot_width(style) * i as f64 / (len - 1) as f64)
            .collect(),
    }
}

fn finite_extent(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|value| value.is_finite())
        .fold(None, |extent, value| match extent {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

/// Equal-width bins over `[min, max]`; the maximum lands in the last bin.
fn bin_counts(values: &[f64], bins: usize, min: f64, max: f64) -> Vec<usize> {
    let mut counts = vec![0_usize; bins];
    let width = (max - min) / bins as f64;

    for value in values.iter().copied().filter(|value| value.is_finite()) {
        let index = if width > 0.0 {
            (((value - min) / width).floor() as usize).min(bins - 1)
        } else {
            0
        };
        counts[index] += 1;
    }

    counts
}

fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
