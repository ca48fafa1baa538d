//! NAV Line Chart
//!
//! Renders the chart window as an inline SVG: a polyline over time with a
//! marker per record. Hovering a marker shows its date and NAV.

use chrono::NaiveDate;
use std::fmt::Write;

use super::format::escape_html;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 320.0;
const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 36.0;
const MARGIN_BOTTOM: f64 = 40.0;
const Y_TICKS: usize = 5;

const LINE_COLOR: &str = "#2196F3";

/// A point on the chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub nav: f64,
}

/// Render a line chart of NAV over time
pub fn line_chart_svg(title: &str, points: &[ChartPoint]) -> String {
    let mut svg = String::new();

    let _ = write!(
        svg,
        r#"<svg class="nav-chart" viewBox="0 0 {w} {h}" width="100%" role="img" aria-label="{t}" xmlns="http://www.w3.org/2000/svg">"#,
        w = WIDTH,
        h = HEIGHT,
        t = escape_html(title)
    );
    let _ = write!(
        svg,
        r#"<text x="{}" y="20" font-size="14" font-weight="bold">{}</text>"#,
        MARGIN_LEFT,
        escape_html(title)
    );

    if points.is_empty() {
        let _ = write!(
            svg,
            r##"<text x="{}" y="{}" text-anchor="middle" fill="#888">No NAV history to plot</text></svg>"##,
            WIDTH / 2.0,
            HEIGHT / 2.0
        );
        return svg;
    }

    let scale = Scale::fit(points);

    // Horizontal grid lines with NAV labels
    for i in 0..=Y_TICKS {
        let value = scale.y_min + (scale.y_max - scale.y_min) * i as f64 / Y_TICKS as f64;
        let y = scale.y(value);
        let _ = write!(
            svg,
            r##"<line x1="{x1}" y1="{y:.1}" x2="{x2}" y2="{y:.1}" stroke="#e0e0e0"/><text x="{lx}" y="{ty:.1}" font-size="11" text-anchor="end">{value:.4}</text>"##,
            x1 = MARGIN_LEFT,
            x2 = WIDTH - MARGIN_RIGHT,
            lx = MARGIN_LEFT - 6.0,
            ty = y + 4.0,
        );
    }

    // Date labels: first, middle and last point
    let mut label_indices = vec![0, points.len() / 2, points.len() - 1];
    label_indices.dedup();
    for idx in label_indices {
        let point = points[idx];
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{}" font-size="11" text-anchor="middle">{}</text>"#,
            scale.x(point.date),
            HEIGHT - MARGIN_BOTTOM + 18.0,
            point.date.format("%Y-%m-%d")
        );
    }

    let path: Vec<String> = points
        .iter()
        .map(|p| format!("{:.1},{:.1}", scale.x(p.date), scale.y(p.nav)))
        .collect();
    let _ = write!(
        svg,
        r#"<polyline fill="none" stroke="{}" stroke-width="2" points="{}"/>"#,
        LINE_COLOR,
        path.join(" ")
    );

    for p in points {
        let _ = write!(
            svg,
            r#"<circle cx="{:.1}" cy="{:.1}" r="3" fill="{}"><title>{}: {:.4}</title></circle>"#,
            scale.x(p.date),
            scale.y(p.nav),
            LINE_COLOR,
            p.date.format("%Y-%m-%d"),
            p.nav
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Maps dates and NAV values onto the plot area
#[derive(Debug, Clone, Copy)]
struct Scale {
    first: NaiveDate,
    span_days: f64,
    y_min: f64,
    y_max: f64,
}

impl Scale {
    /// `points` must not be empty
    fn fit(points: &[ChartPoint]) -> Self {
        let anchor = points[0].date;
        let first = points.iter().map(|p| p.date).min().unwrap_or(anchor);
        let last = points.iter().map(|p| p.date).max().unwrap_or(anchor);

        let low = points.iter().map(|p| p.nav).fold(f64::INFINITY, f64::min);
        let high = points.iter().map(|p| p.nav).fold(f64::NEG_INFINITY, f64::max);

        // Pad the range so the line never touches the frame
        let pad = if high > low {
            (high - low) * 0.05
        } else {
            (low.abs() * 0.01).max(0.0001)
        };

        Self {
            first,
            span_days: (last - first).num_days() as f64,
            y_min: low - pad,
            y_max: high + pad,
        }
    }

    fn x(&self, date: NaiveDate) -> f64 {
        let plot_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        if self.span_days <= 0.0 {
            return MARGIN_LEFT + plot_width / 2.0;
        }
        let offset = (date - self.first).num_days() as f64;
        MARGIN_LEFT + plot_width * offset / self.span_days
    }

    fn y(&self, value: f64) -> f64 {
        let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let fraction = (value - self.y_min) / (self.y_max - self.y_min);
        HEIGHT - MARGIN_BOTTOM - plot_height * fraction
    }
}
