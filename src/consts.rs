//! Shared numeric constants for the quadrant scene.

// ── Scene ───────────────────────────────────────────────────────

/// Number of draggable rays in the scene.
pub const RAY_COUNT: usize = 4;

/// Lines drawn from the origin: the four rays plus the two arc axis anchors.
pub const LINE_COUNT: usize = RAY_COUNT + 2;

/// Line index of the arc anchor on the y axis, `(0, y_arc)`.
pub const ARC_Y_ANCHOR: usize = RAY_COUNT;

/// Line index of the arc anchor on the x axis, `(x_arc, 0)`.
pub const ARC_X_ANCHOR: usize = RAY_COUNT + 1;

/// Default radius of both arc semi-axes.
pub const DEFAULT_ARC_RADIUS: f64 = 4.0;

/// Default upper bound of both axis ranges.
pub const DEFAULT_AXIS_MAX: f64 = 10.0;

// ── Geometry ────────────────────────────────────────────────────

/// Minimum separation in degrees between neighbouring ray angles.
pub const DEFAULT_ANGLE_MARGIN_DEG: f64 = 0.1;

/// Ray angles are confined to the positive quadrant.
pub const QUADRANT_MAX_DEG: f64 = 90.0;

/// Floor applied to dragged ray coordinates so a ray never collapses onto an axis.
pub const MIN_DRAG_COORD: f64 = 0.0001;

/// Segments used to approximate the arc path.
pub const DEFAULT_ARC_SAMPLES: u32 = 50;

/// Invisible hover markers placed along each line.
pub const DEFAULT_LINE_MARKERS: u32 = 20;

/// Invisible hover markers placed along the arc.
pub const DEFAULT_ARC_MARKERS: u32 = 20;

// ── Plot layout ─────────────────────────────────────────────────

/// Trace index of the ray line series.
pub const TRACE_LINES: usize = 0;

/// Trace index of the draggable endpoint series.
pub const TRACE_DRAGGABLE_POINTS: usize = 1;

/// Trace index of the hover markers along the lines.
pub const TRACE_LINE_MARKERS: usize = 2;

/// Trace index of the hover markers along the arc.
pub const TRACE_ARC_MARKERS: usize = 3;

/// Layout shape index of the static plot border rectangle.
pub const SHAPE_BORDER: usize = 0;

/// Layout shape index of the arc path.
pub const SHAPE_ARC: usize = 1;

/// Layout shape index of the first highlighted region.
pub const SHAPE_REGION_FIRST: usize = 2;

/// Layout shape index of the second highlighted region.
pub const SHAPE_REGION_SECOND: usize = 3;
