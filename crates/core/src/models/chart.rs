use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed tooltip box size, in canvas units.
pub const TOOLTIP_WIDTH: f64 = 150.0;
pub const TOOLTIP_HEIGHT: f64 = 40.0;

/// Gap between the hovered point and the tooltip box.
pub const TOOLTIP_GAP: f64 = 8.0;

/// Distance below the point when the box flips under it.
pub const TOOLTIP_FLIP_OFFSET: f64 = 16.0;

/// Logical drawing surface of the cumulative-profit chart.
///
/// All geometry is computed in these units; the host may stretch the
/// rendered SVG freely (`preserveAspectRatio="none"`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartCanvas {
    pub width: f64,
    pub height: f64,
    pub padding_x: f64,
    pub padding_y: f64,
}

impl ChartCanvas {
    pub fn new(width: f64, height: f64, padding_x: f64, padding_y: f64) -> Self {
        Self {
            width,
            height,
            padding_x,
            padding_y,
        }
    }

    /// Horizontal extent available to data points.
    pub fn plot_width(&self) -> f64 {
        self.width - 2.0 * self.padding_x
    }

    /// Vertical extent available to data points.
    pub fn plot_height(&self) -> f64 {
        self.height - 2.0 * self.padding_y
    }

    /// y of the x-axis.
    pub fn baseline_y(&self) -> f64 {
        self.height - self.padding_y
    }
}

impl Default for ChartCanvas {
    fn default() -> Self {
        Self::new(800.0, 260.0, 48.0, 32.0)
    }
}

/// Position of one data point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// Everything needed to draw the chart for one series on one canvas.
///
/// Only meaningful for the canvas it was computed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartGeometry {
    pub canvas: ChartCanvas,

    /// Smallest cumulative value in the series
    pub min_y: f64,

    /// Largest cumulative value in the series
    pub max_y: f64,

    /// `max_y - min_y`, or 1 for a flat series
    pub range_y: f64,

    /// Horizontal distance between consecutive points (0 for a single point)
    pub step_x: f64,

    /// One entry per series point, same order
    pub points: Vec<PixelPoint>,

    /// Indices that get a date label under the x-axis
    pub tick_indices: Vec<usize>,
}

impl ChartGeometry {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// SVG `points` attribute for the line. `None` when there is no line to draw.
    pub fn polyline(&self) -> Option<String> {
        if self.points.len() < 2 {
            return None;
        }
        Some(
            self.points
                .iter()
                .map(|p| format!("{},{}", fmt_coord(p.x), fmt_coord(p.y)))
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    /// Closed SVG path for the area under the line: the line itself, down to
    /// the baseline at the last point, back along the baseline, closed.
    pub fn area_path(&self) -> Option<String> {
        if self.points.len() < 2 {
            return None;
        }
        let first = self.points.first()?;
        let last = self.points.last()?;
        let baseline = fmt_coord(self.canvas.baseline_y());

        let mut d = format!("M {} {}", fmt_coord(first.x), fmt_coord(first.y));
        for p in &self.points[1..] {
            d.push_str(&format!(" L {} {}", fmt_coord(p.x), fmt_coord(p.y)));
        }
        d.push_str(&format!(" L {} {baseline}", fmt_coord(last.x)));
        d.push_str(&format!(" L {} {baseline} Z", fmt_coord(first.x)));
        Some(d)
    }
}

/// Tooltip rectangle in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// What the hover overlay shows for one resolved index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub index: usize,
    pub anchor: PixelPoint,
    pub rect: TooltipBox,
    pub date: NaiveDate,
    pub cumulative: f64,
}

/// Canvas coordinate as text: at most two decimals, no trailing zeros.
pub(crate) fn fmt_coord(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
