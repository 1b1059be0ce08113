//! Pure geometry for the quadrant scene.
//!
//! Ray extension to the viewport border, arc and polygon path construction,
//! marker sampling, and angle helpers. Nothing in this module reads or writes
//! engine state; the engine calls these functions on every mutation and the
//! render sync turns their output into plot data.
//!
//! All angles are in degrees unless a parameter is named `theta`.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::consts::QUADRANT_MAX_DEG;

/// A point in data space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation from `self` towards `other`; `t = 0` is `self`.
    #[must_use]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }

    /// Distance from the origin.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Upper corner of the visible data rectangle `[0, x_max] × [0, y_max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_max: f64,
    pub y_max: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(x_max: f64, y_max: f64) -> Self {
        Self { x_max, y_max }
    }
}

// =============================================================
// Paths
// =============================================================

/// One command of an SVG path as understood by the plot's shape layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Close,
}

/// A typed SVG path. Renders as `"M 0,0 L 4,0 Z"` and serializes as that string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SvgPath {
    pub commands: Vec<PathCommand>,
}

impl SvgPath {
    /// Start a new path at the origin.
    #[must_use]
    pub fn from_origin() -> Self {
        Self { commands: vec![PathCommand::MoveTo(Point::ORIGIN)] }
    }

    pub fn line_to(&mut self, p: Point) {
        self.commands.push(PathCommand::LineTo(p));
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

}

impl fmt::Display for SvgPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match cmd {
                PathCommand::MoveTo(p) => write!(f, "M {},{}", p.x, p.y)?,
                PathCommand::LineTo(p) => write!(f, "L {},{}", p.x, p.y)?,
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

impl Serialize for SvgPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =============================================================
// Rays
// =============================================================

/// Where the ray from the origin through `dir` leaves the viewport.
///
/// Exits through the right border when the line is low enough to meet it,
/// otherwise through the top border. A vertical (or degenerate) direction
/// exits at `(0, y_max)` without dividing by zero.
#[must_use]
pub fn extend_ray_to_border(dir: Point, bounds: Bounds) -> Point {
    if dir.x <= 0.0 {
        return Point::new(0.0, bounds.y_max);
    }
    let slope = dir.y / dir.x;
    let y_at_x_max = slope * bounds.x_max;
    if y_at_x_max <= bounds.y_max {
        Point::new(bounds.x_max, y_at_x_max)
    } else {
        Point::new(bounds.y_max / slope, bounds.y_max)
    }
}

/// `count` evenly spaced interior points of the segment, endpoints excluded.
#[must_use]
pub fn sample_along_segment(origin: Point, end: Point, count: u32) -> Vec<Point> {
    let denom = f64::from(count) + 1.0;
    (1..=count).map(|j| origin.lerp(end, f64::from(j) / denom)).collect()
}

/// Closed triangle from the origin through `p1` and `p2`.
#[must_use]
pub fn polygon_path(p1: Point, p2: Point) -> SvgPath {
    let mut path = SvgPath::from_origin();
    path.line_to(p1);
    path.line_to(p2);
    path.close();
    path
}

// =============================================================
// Arc
// =============================================================

/// Parametric angles (radians) where the arc meets the y and x axes.
fn arc_span(x_arc: f64, y_arc: f64) -> (f64, f64) {
    (y_arc.atan2(0.0), 0.0_f64.atan2(x_arc))
}

fn arc_point(x_arc: f64, y_arc: f64, theta: f64) -> Point {
    Point::new(x_arc * theta.cos(), y_arc * theta.sin())
}

/// Quarter-ellipse path from `(0, y_arc)` down to `(x_arc, 0)`, closed through the origin.
///
/// Emits `M 0,0`, then `samples + 1` line segments, then `Z`.
#[must_use]
pub fn arc_path(x_arc: f64, y_arc: f64, samples: u32) -> SvgPath {
    let samples = samples.max(1);
    let (start, end) = arc_span(x_arc, y_arc);
    let step = (start - end) / f64::from(samples);

    let mut path = SvgPath::from_origin();
    for i in 0..=samples {
        path.line_to(arc_point(x_arc, y_arc, start - f64::from(i) * step));
    }
    path.close();
    path
}

/// `count` hover markers strictly inside the arc, ends excluded.
#[must_use]
pub fn arc_markers(x_arc: f64, y_arc: f64, count: u32) -> Vec<Point> {
    let (start, end) = arc_span(x_arc, y_arc);
    let step = (start - end) / (f64::from(count) + 1.0);
    (1..=count)
        .map(|i| arc_point(x_arc, y_arc, start - f64::from(i) * step))
        .collect()
}

// =============================================================
// Angles
// =============================================================

/// Direction of `(x, y)` in degrees, normalized to `[0, 360)`.
#[must_use]
pub fn compute_angle_deg(x: f64, y: f64) -> f64 {
    let deg = y.atan2(x).to_degrees();
    let normalized = if deg < 0.0 { deg + 360.0 } else { deg };
    // A tiny negative angle rounds up to exactly 360.
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Fold any angle onto the positive quadrant `[0, 90]`.
///
/// The angle is wrapped into `[0, 360)` first; directions outside the
/// quadrant snap to whichever edge is nearer around the circle, so `-5`
/// (i.e. `355`) lands on `0` and `100` lands on `90`.
#[must_use]
pub fn confine_to_quadrant(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // Midway between the 90° edge and the 0°/360° edge, going the long way round.
    let split = (QUADRANT_MAX_DEG + 360.0) / 2.0;
    if wrapped > split { 0.0 } else { wrapped.min(QUADRANT_MAX_DEG) }
}

/// The point at `deg` degrees and distance `radius` from the origin.
#[must_use]
pub fn point_at_angle(deg: f64, radius: f64) -> Point {
    let theta = deg.to_radians();
    Point::new(radius * theta.cos(), radius * theta.sin())
}

/// Keep `proposed` at least `margin` away from its neighbours.
///
/// Snaps up to `low + margin` when at or below it, then down to
/// `high - margin` when at or above it. Missing neighbours impose nothing.
#[must_use]
pub fn clamp_angle(proposed: f64, low: Option<f64>, high: Option<f64>, margin: f64) -> f64 {
    let mut angle = proposed;
    if let Some(low) = low {
        if angle <= low + margin {
            angle = low + margin;
        }
    }
    if let Some(high) = high {
        if angle >= high - margin {
            angle = high - margin;
        }
    }
    angle
}
