//! Coordinate mapping between container pixels and data space.
//!
//! The plotting surface owns its axes; the engine only consumes them through
//! [`AxisMapper`]. The browser host wraps the live plot axis objects, tests and
//! native callers use [`LinearAxis`]. A [`Viewport`] pairs one mapper per
//! axis and is cached by the engine between layout changes.

#[cfg(test)]
#[path = "axis_test.rs"]
mod axis_test;

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Point};

/// One axis of the plot as seen by the engine.
pub trait AxisMapper {
    /// Current visible `[min, max]` in data units.
    fn range(&self) -> [f64; 2];

    /// Data value under a pixel offset measured from the container's top-left corner.
    fn pixel_to_data(&self, px: f64) -> f64;
}

/// A linear axis occupying `length` pixels starting `offset` pixels into the container.
///
/// `reversed` axes grow against the pixel direction, which is the case for a
/// vertical axis on screen (pixel y grows downward, data y grows upward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearAxis {
    pub range: [f64; 2],
    pub offset: f64,
    pub length: f64,
    #[serde(default)]
    pub reversed: bool,
}

impl LinearAxis {
    /// A left-to-right axis.
    #[must_use]
    pub fn horizontal(range: [f64; 2], offset: f64, length: f64) -> Self {
        Self { range, offset, length, reversed: false }
    }

    /// A bottom-to-top axis drawn on a top-down pixel grid.
    #[must_use]
    pub fn vertical(range: [f64; 2], offset: f64, length: f64) -> Self {
        Self { range, offset, length, reversed: true }
    }
}

impl AxisMapper for LinearAxis {
    fn range(&self) -> [f64; 2] {
        self.range
    }

    fn pixel_to_data(&self, px: f64) -> f64 {
        if self.length <= 0.0 {
            return self.range[0];
        }
        let t = (px - self.offset) / self.length;
        let t = if self.reversed { 1.0 - t } else { t };
        self.range[0] + t * (self.range[1] - self.range[0])
    }
}

/// The pair of axes currently mapping the plot.
pub struct Viewport {
    x: Box<dyn AxisMapper>,
    y: Box<dyn AxisMapper>,
}

impl Viewport {
    #[must_use]
    pub fn new(x: impl AxisMapper + 'static, y: impl AxisMapper + 'static) -> Self {
        Self { x: Box::new(x), y: Box::new(y) }
    }

    /// Square linear viewport `[0, max] × [0, max]` drawn in a `px × px` box.
    #[must_use]
    pub fn square(max: f64, px: f64) -> Self {
        Self::new(LinearAxis::horizontal([0.0, max], 0.0, px), LinearAxis::vertical([0.0, max], 0.0, px))
    }

    #[must_use]
    pub fn x_range(&self) -> [f64; 2] {
        self.x.range()
    }

    #[must_use]
    pub fn y_range(&self) -> [f64; 2] {
        self.y.range()
    }

    /// Upper data corner used for ray extension.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x.range()[1], self.y.range()[1])
    }

    /// Map a container pixel position to data space.
    #[must_use]
    pub fn to_data(&self, px: Point) -> Point {
        Point::new(self.x.pixel_to_data(px.x), self.y.pixel_to_data(px.y))
    }
}
