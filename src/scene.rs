//! Scene state: the four ray directions and the arc radii.
//!
//! Every mutation goes through a method here so the ordering invariant holds
//! after each call: ray angles strictly increase with index, separated by at
//! least the configured margin. Radii never go negative.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use crate::config::SceneConfig;
use crate::consts::{MIN_DRAG_COORD, RAY_COUNT};
use crate::geometry::{Point, clamp_angle, compute_angle_deg, confine_to_quadrant, point_at_angle};

/// Radii of the quarter-ellipse arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcState {
    pub x_arc: f64,
    pub y_arc: f64,
}

impl ArcState {
    /// Build an arc, flooring both radii at zero.
    #[must_use]
    pub fn new(x_arc: f64, y_arc: f64) -> Self {
        Self { x_arc: x_arc.max(0.0), y_arc: y_arc.max(0.0) }
    }

    /// Single-number summary shown in the radius control.
    #[must_use]
    pub fn coordinate(&self) -> f64 {
        (self.x_arc + self.y_arc) / 2.0
    }

    /// Where the arc meets the y axis.
    #[must_use]
    pub fn y_anchor(&self) -> Point {
        Point::new(0.0, self.y_arc)
    }

    /// Where the arc meets the x axis.
    #[must_use]
    pub fn x_anchor(&self) -> Point {
        Point::new(self.x_arc, 0.0)
    }
}

/// Mutable geometry of one scene instance.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    rays: [Point; RAY_COUNT],
    arc: ArcState,
    margin: f64,
}

impl SceneState {
    #[must_use]
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            rays: config.rays,
            arc: ArcState::new(config.x_arc, config.y_arc),
            margin: config.angle_margin_deg,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn rays(&self) -> &[Point; RAY_COUNT] {
        &self.rays
    }

    #[must_use]
    pub fn ray(&self, index: usize) -> Option<Point> {
        self.rays.get(index).copied()
    }

    #[must_use]
    pub fn angle(&self, index: usize) -> Option<f64> {
        self.ray(index).map(|p| compute_angle_deg(p.x, p.y))
    }

    /// All ray angles in degrees, by index.
    #[must_use]
    pub fn angles(&self) -> [f64; RAY_COUNT] {
        self.rays.map(|p| compute_angle_deg(p.x, p.y))
    }

    #[must_use]
    pub fn arc(&self) -> ArcState {
        self.arc
    }

    #[must_use]
    pub fn margin(&self) -> f64 {
        self.margin
    }

    // --- Ray mutations ---

    /// Point ray `index` at a dragged data position.
    ///
    /// Coordinates are floored just above zero so the ray stays inside the
    /// quadrant. If the angle has to be clamped against a neighbour, the
    /// stored point keeps the pointer's distance from the origin. Returns the
    /// stored angle, or `None` for an unknown index.
    pub fn drag_ray_to(&mut self, index: usize, data: Point) -> Option<f64> {
        if index >= RAY_COUNT || !(data.x.is_finite() && data.y.is_finite()) {
            return None;
        }
        let target = Point::new(data.x.max(MIN_DRAG_COORD), data.y.max(MIN_DRAG_COORD));
        let proposed = compute_angle_deg(target.x, target.y);
        let angle = self.clamp_for(index, proposed);
        self.rays[index] = if (angle - proposed).abs() < f64::EPSILON {
            target
        } else {
            point_at_angle(angle, target.length())
        };
        Some(angle)
    }

    /// Set ray `index` from a numeric angle in degrees.
    ///
    /// The value is folded onto the quadrant (out-of-quadrant directions snap
    /// to the nearer edge) and clamped against the neighbours. The stored point has unit length.
    /// Returns the stored angle, or `None` for an unknown index or non-finite input.
    pub fn set_ray_angle(&mut self, index: usize, deg: f64) -> Option<f64> {
        if index >= RAY_COUNT || !deg.is_finite() {
            return None;
        }
        let proposed = confine_to_quadrant(deg);
        let angle = self.clamp_for(index, proposed);
        self.rays[index] = point_at_angle(angle, 1.0);
        Some(angle)
    }

    fn clamp_for(&self, index: usize, proposed: f64) -> f64 {
        let low = index.checked_sub(1).and_then(|i| self.angle(i));
        let high = self.angle(index + 1);
        clamp_angle(proposed, low, high, self.margin)
    }

    // --- Arc mutations ---

    /// Move the arc so it passes through the dragged position's axis projections.
    ///
    /// Returns `false` (and changes nothing) for a non-finite position.
    pub fn drag_arc_to(&mut self, data: Point) -> bool {
        if !(data.x.is_finite() && data.y.is_finite()) {
            return false;
        }
        self.arc = ArcState::new(data.x, data.y);
        true
    }

    /// Set both radii to `value`, floored at zero.
    ///
    /// Returns `false` (and changes nothing) for a non-finite value.
    pub fn set_arc_coordinate(&mut self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        self.arc = ArcState::new(value, value);
        true
    }
}
