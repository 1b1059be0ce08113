//! Resolving plot click events into drag targets.
//!
//! The plot reports clicks as `(curveNumber, pointIndex)` pairs. Only the
//! three invisible marker traces are interactive; everything else resolves to
//! `None` and is ignored by the engine.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::Deserialize;

use crate::consts::{ARC_X_ANCHOR, ARC_Y_ANCHOR, RAY_COUNT, TRACE_ARC_MARKERS, TRACE_DRAGGABLE_POINTS, TRACE_LINE_MARKERS};

/// What a press grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// One of the four rays, by index.
    Ray(usize),
    /// The arc, grabbed by its markers or one of its axis anchors.
    Arc,
}

/// One clicked point as reported by the plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickPoint {
    pub curve_number: usize,
    pub point_index: usize,
}

/// A plot click payload. Only the first point is considered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClickEvent {
    #[serde(default)]
    pub points: Vec<ClickPoint>,
}

impl ClickEvent {
    /// The drag target of the first clicked point, if it is interactive.
    #[must_use]
    pub fn target(&self, line_markers: u32) -> Option<HitTarget> {
        self.points
            .first()
            .and_then(|p| resolve(p.curve_number, p.point_index, line_markers))
    }
}

/// Map a trace/point pair to a drag target.
///
/// The draggable-point trace has one point per line; the line-marker trace
/// has `line_markers` points per line, in line order.
#[must_use]
pub fn resolve(curve_number: usize, point_index: usize, line_markers: u32) -> Option<HitTarget> {
    let line = match curve_number {
        TRACE_DRAGGABLE_POINTS => point_index,
        TRACE_LINE_MARKERS => point_index / (line_markers.max(1) as usize),
        TRACE_ARC_MARKERS => return Some(HitTarget::Arc),
        _ => return None,
    };
    match line {
        i if i < RAY_COUNT => Some(HitTarget::Ray(i)),
        ARC_Y_ANCHOR | ARC_X_ANCHOR => Some(HitTarget::Arc),
        _ => None,
    }
}
