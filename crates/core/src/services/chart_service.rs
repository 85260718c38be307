use crate::models::chart::{fmt_coord, ChartCanvas, ChartGeometry, PixelPoint, Tooltip};
use crate::models::range::DATE_FORMAT;
use crate::models::series::CumulativeProfitPoint;
use crate::models::settings::DEFAULT_CURRENCY_PREFIX;
use crate::services::hover_service;
use crate::services::report_service::format_money_with;

/// Placeholder shown instead of the chart when the period has no data.
pub const NO_DATA_MESSAGE: &str = "Sem dados para exibir o gráfico.";

const BACKGROUND_FILL: &str = "rgba(15,23,42,0.85)";
const AXIS_STROKE: &str = "rgba(148,163,184,0.6)";
const GUIDE_STROKE: &str = "rgba(148,163,184,0.4)";
const LABEL_FILL: &str = "rgba(148,163,184,0.9)";
const LINE_COLOR: &str = "#22c55e";
const AREA_FILL: &str = "rgba(34,197,94,0.18)";
const TOOLTIP_FILL: &str = "rgba(15,23,42,0.95)";

/// Maps a cumulative-profit series onto a fixed logical canvas and renders it.
///
/// Shared by the general and the per-operator dashboards; both pages only
/// differ in where their series comes from.
pub struct ChartService {
    canvas: ChartCanvas,
    currency_prefix: String,
}

impl ChartService {
    pub fn new(canvas: ChartCanvas) -> Self {
        Self {
            canvas,
            currency_prefix: DEFAULT_CURRENCY_PREFIX.to_string(),
        }
    }

    pub fn with_currency_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.currency_prefix = prefix.into();
        self
    }

    pub fn canvas(&self) -> &ChartCanvas {
        &self.canvas
    }

    /// Compute pixel positions, bounds and label ticks for `series`.
    ///
    /// Returns `None` for an empty series: there is nothing to draw and the
    /// host shows [`NO_DATA_MESSAGE`] instead.
    pub fn geometry(&self, series: &[CumulativeProfitPoint]) -> Option<ChartGeometry> {
        if series.is_empty() {
            return None;
        }

        let canvas = self.canvas;
        let count = series.len();

        let min_y = series
            .iter()
            .map(|p| p.cumulative)
            .fold(f64::INFINITY, f64::min);
        let max_y = series
            .iter()
            .map(|p| p.cumulative)
            .fold(f64::NEG_INFINITY, f64::max);

        // A flat series (or a single point) has no spread to normalize by:
        // the range is reported as 1 and every point sits on the vertical center.
        let flat = max_y == min_y;
        let range_y = if flat { 1.0 } else { max_y - min_y };

        let step_x = if count > 1 {
            canvas.plot_width() / (count - 1) as f64
        } else {
            0.0
        };

        let points = series
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let norm = if flat {
                    0.5
                } else {
                    (p.cumulative - min_y) / range_y
                };
                PixelPoint {
                    x: canvas.padding_x + step_x * i as f64,
                    y: canvas.padding_y + (1.0 - norm) * canvas.plot_height(),
                }
            })
            .collect();

        Some(ChartGeometry {
            canvas,
            min_y,
            max_y,
            range_y,
            step_x,
            points,
            tick_indices: tick_indices(count),
        })
    }

    /// Render the chart as a standalone SVG document.
    ///
    /// `hover` is the resolved hover index, if any; out-of-range indices are
    /// ignored. Returns `None` for an empty series.
    pub fn render_svg(
        &self,
        series: &[CumulativeProfitPoint],
        hover: Option<usize>,
    ) -> Option<String> {
        let geometry = self.geometry(series)?;
        let c = geometry.canvas;
        let w = fmt_coord(c.width);
        let h = fmt_coord(c.height);
        let left = fmt_coord(c.padding_x);
        let right = fmt_coord(c.width - c.padding_x);
        let top = fmt_coord(c.padding_y);
        let bottom = fmt_coord(c.baseline_y());

        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {w} {h}\" preserveAspectRatio=\"none\">\n"
        );

        svg.push_str(&format!(
            "  <rect x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" fill=\"{BACKGROUND_FILL}\" rx=\"12\"/>\n"
        ));

        // Axes
        svg.push_str(&format!(
            "  <line x1=\"{left}\" y1=\"{bottom}\" x2=\"{right}\" y2=\"{bottom}\" stroke=\"{AXIS_STROKE}\" stroke-width=\"1\"/>\n"
        ));
        svg.push_str(&format!(
            "  <line x1=\"{left}\" y1=\"{top}\" x2=\"{left}\" y2=\"{bottom}\" stroke=\"{AXIS_STROKE}\" stroke-width=\"1\"/>\n"
        ));

        if let Some(points) = geometry.polyline() {
            svg.push_str(&format!(
                "  <polyline fill=\"none\" stroke=\"{LINE_COLOR}\" stroke-width=\"2.2\" stroke-linejoin=\"round\" stroke-linecap=\"round\" points=\"{points}\"/>\n"
            ));
        }
        if let Some(d) = geometry.area_path() {
            svg.push_str(&format!("  <path d=\"{d}\" fill=\"{AREA_FILL}\"/>\n"));
        }

        for p in &geometry.points {
            svg.push_str(&format!(
                "  <circle cx=\"{}\" cy=\"{}\" r=\"3.2\" fill=\"{LINE_COLOR}\"/>\n",
                fmt_coord(p.x),
                fmt_coord(p.y)
            ));
        }

        if let Some(tooltip) = hover.and_then(|i| hover_service::tooltip_at(&geometry, series, i)) {
            svg.push_str(&self.render_tooltip(&tooltip));
        }

        // Min/max labels left of the y-axis
        let label_x = fmt_coord(c.padding_x - 8.0);
        svg.push_str(&format!(
            "  <text x=\"{label_x}\" y=\"{bottom}\" text-anchor=\"end\" font-size=\"10\" fill=\"{LABEL_FILL}\">{}</text>\n",
            format_money_with(&self.currency_prefix, geometry.min_y)
        ));
        svg.push_str(&format!(
            "  <text x=\"{label_x}\" y=\"{}\" text-anchor=\"end\" font-size=\"10\" fill=\"{LABEL_FILL}\">{}</text>\n",
            fmt_coord(c.padding_y + 4.0),
            format_money_with(&self.currency_prefix, geometry.max_y)
        ));

        // Date labels: first, middle, last
        let tick_y = fmt_coord(c.baseline_y() + 18.0);
        for &idx in &geometry.tick_indices {
            svg.push_str(&format!(
                "  <text x=\"{}\" y=\"{tick_y}\" text-anchor=\"middle\" font-size=\"10\" fill=\"{LABEL_FILL}\">{}</text>\n",
                fmt_coord(geometry.points[idx].x),
                series[idx].date.format(DATE_FORMAT)
            ));
        }

        svg.push_str("</svg>\n");
        Some(svg)
    }

    fn render_tooltip(&self, tooltip: &Tooltip) -> String {
        let c = self.canvas;
        let x = fmt_coord(tooltip.anchor.x);
        let y = fmt_coord(tooltip.anchor.y);
        let rect = tooltip.rect;
        let tx = fmt_coord(rect.x);
        let ty = fmt_coord(rect.y);

        let mut g = String::from("  <g>\n");
        g.push_str(&format!(
            "    <line x1=\"{x}\" y1=\"{}\" x2=\"{x}\" y2=\"{}\" stroke=\"{GUIDE_STROKE}\" stroke-width=\"1\" stroke-dasharray=\"4 4\"/>\n",
            fmt_coord(c.padding_y),
            fmt_coord(c.baseline_y())
        ));
        g.push_str(&format!("    <circle cx=\"{x}\" cy=\"{y}\" r=\"5\" fill=\"{LINE_COLOR}\"/>\n"));
        g.push_str(&format!(
            "    <rect x=\"{tx}\" y=\"{ty}\" width=\"{}\" height=\"{}\" rx=\"8\" ry=\"8\" fill=\"{TOOLTIP_FILL}\" stroke=\"{LINE_COLOR}\" stroke-width=\"0.8\"/>\n",
            fmt_coord(rect.width),
            fmt_coord(rect.height)
        ));
        g.push_str(&format!(
            "    <text x=\"{}\" y=\"{}\" font-size=\"11\" fill=\"#e5e7eb\">{}</text>\n",
            fmt_coord(rect.x + 8.0),
            fmt_coord(rect.y + 15.0),
            tooltip.date.format(DATE_FORMAT)
        ));
        g.push_str(&format!(
            "    <text x=\"{}\" y=\"{}\" font-size=\"11\" fill=\"#a5b4fc\">Acumulado: {}</text>\n",
            fmt_coord(rect.x + 8.0),
            fmt_coord(rect.y + 30.0),
            format_money_with(&self.currency_prefix, tooltip.cumulative)
        ));
        g.push_str("  </g>\n");
        g
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new(ChartCanvas::default())
    }
}

/// First, middle and last index, without repeats.
pub fn tick_indices(count: usize) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }
    let mut ticks = Vec::with_capacity(3);
    for idx in [0, (count - 1) / 2, count - 1] {
        if !ticks.contains(&idx) {
            ticks.push(idx);
        }
    }
    ticks
}
