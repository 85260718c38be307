use crate::models::chart::{
    ChartCanvas, ChartGeometry, PixelPoint, Tooltip, TooltipBox, TOOLTIP_FLIP_OFFSET,
    TOOLTIP_GAP, TOOLTIP_HEIGHT, TOOLTIP_WIDTH,
};
use crate::models::series::CumulativeProfitPoint;

/// Nearest data index for a pointer at `pointer_x` (canvas units, measured
/// from the canvas's left edge).
///
/// `None` only when there are no points. A single point (`step_x == 0`)
/// always resolves to index 0; otherwise the index is rounded and clamped
/// to `[0, count - 1]`.
pub fn resolve_index(pointer_x: f64, step_x: f64, padding_x: f64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    if step_x == 0.0 || !pointer_x.is_finite() {
        return Some(0);
    }
    let raw = ((pointer_x - padding_x) / step_x).round();
    let last = (count - 1) as f64;
    Some(raw.clamp(0.0, last) as usize)
}

/// Convert a pointer offset measured on the rendered element into canvas
/// units. The SVG is stretched to its container, so the two differ whenever
/// the element is not exactly `canvas_width` wide.
pub fn scale_pointer(pointer_x: f64, rendered_width: f64, canvas_width: f64) -> f64 {
    if rendered_width <= 0.0 || !rendered_width.is_finite() {
        return pointer_x;
    }
    pointer_x * canvas_width / rendered_width
}

/// Place the tooltip box next to `anchor`.
///
/// Vertical first: above the point by default, flipped below it when the box
/// would cross the top padding. Then horizontal: right of the point, clamped
/// between the left and right paddings.
pub fn place_tooltip(anchor: PixelPoint, canvas: &ChartCanvas) -> TooltipBox {
    let above = anchor.y - TOOLTIP_HEIGHT - TOOLTIP_GAP;
    let y = if above < canvas.padding_y {
        anchor.y + TOOLTIP_FLIP_OFFSET
    } else {
        above
    };

    let x = (anchor.x + TOOLTIP_GAP)
        .max(canvas.padding_x)
        .min(canvas.width - canvas.padding_x - TOOLTIP_WIDTH);

    TooltipBox {
        x,
        y,
        width: TOOLTIP_WIDTH,
        height: TOOLTIP_HEIGHT,
    }
}

/// Tooltip for a resolved index, or `None` if the index is out of range or
/// the geometry was built for a different series.
pub fn tooltip_at(
    geometry: &ChartGeometry,
    series: &[CumulativeProfitPoint],
    index: usize,
) -> Option<Tooltip> {
    if geometry.len() != series.len() {
        return None;
    }
    let anchor = *geometry.points.get(index)?;
    let point = series.get(index)?;
    Some(Tooltip {
        index,
        anchor,
        rect: place_tooltip(anchor, &geometry.canvas),
        date: point.date,
        cumulative: point.cumulative,
    })
}

/// Hover state of one chart instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    index: Option<usize>,
}

impl HoverState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently hovered index, if any.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Track a pointer move at `pointer_x` (canvas units). A pointer outside
    /// the canvas counts as having left it.
    pub fn pointer_move(&mut self, geometry: &ChartGeometry, pointer_x: f64) -> Option<usize> {
        let inside = pointer_x >= 0.0 && pointer_x <= geometry.canvas.width;
        self.index = if inside {
            resolve_index(pointer_x, geometry.step_x, geometry.canvas.padding_x, geometry.len())
        } else {
            None
        };
        self.index
    }

    pub fn pointer_leave(&mut self) {
        self.index = None;
    }

    /// Tooltip for the current hover, if any.
    pub fn tooltip(
        &self,
        geometry: &ChartGeometry,
        series: &[CumulativeProfitPoint],
    ) -> Option<Tooltip> {
        self.index.and_then(|i| tooltip_at(geometry, series, i))
    }
}
