//! Render sync: turns scene state into the data the plot draws.
//!
//! The plot owns rendering. This module only decides *what* it draws:
//! [`plot_spec`] builds the traces, layout and config handed to the plot at
//! creation, and [`build_frame`] rebuilds every derived series and shape path
//! from the current scene. The host writes a [`SceneFrame`] into the plot and
//! redraws. `build_frame` is pure, so an unchanged scene always produces an
//! identical frame.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;
use serde_json::{Value, json};

use crate::config::SceneConfig;
use crate::consts::{
    ARC_X_ANCHOR, ARC_Y_ANCHOR, LINE_COUNT, SHAPE_ARC, SHAPE_BORDER, SHAPE_REGION_FIRST, SHAPE_REGION_SECOND, TRACE_ARC_MARKERS,
    TRACE_DRAGGABLE_POINTS, TRACE_LINE_MARKERS, TRACE_LINES,
};
use crate::geometry::{
    Bounds, Point, SvgPath, arc_markers, arc_path, extend_ray_to_border, polygon_path, sample_along_segment,
};
use crate::scene::SceneState;

const PLOT_TITLE: &str = "Draggable Lines and Arc in Positive Quadrant";
const LINE_COLOR: &str = "black";
const REGION_FILL: &str = "rgba(128, 128, 128, 0.5)";
const INVISIBLE: &str = "rgba(0,0,0,0)";

/// Parallel x/y arrays for one trace. `None` breaks a line into segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
}

impl Series {
    fn push(&mut self, p: Point) {
        self.x.push(Some(p.x));
        self.y.push(Some(p.y));
    }

    fn push_gap(&mut self) {
        self.x.push(None);
        self.y.push(None);
    }

    fn extend(&mut self, points: impl IntoIterator<Item = Point>) {
        for p in points {
            self.push(p);
        }
    }
}

/// Everything the plot needs to redraw the scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneFrame {
    /// Origin-to-endpoint segments for every line, separated by gaps.
    pub lines: Series,
    /// One grab point at the end of every line.
    pub draggable_points: Series,
    /// Invisible hover markers along every line.
    pub line_markers: Series,
    /// Invisible hover markers along the arc.
    pub arc_markers: Series,
    /// The arc outline, closed through the origin.
    pub arc_path: SvgPath,
    /// Shaded wedges between rays 0–1 and rays 2–3.
    pub regions: [SvgPath; 2],
}

impl SceneFrame {
    /// Trace data keyed by trace index.
    #[must_use]
    pub fn traces(&self) -> [(usize, &Series); 4] {
        [
            (TRACE_LINES, &self.lines),
            (TRACE_DRAGGABLE_POINTS, &self.draggable_points),
            (TRACE_LINE_MARKERS, &self.line_markers),
            (TRACE_ARC_MARKERS, &self.arc_markers),
        ]
    }

    /// Shape paths keyed by layout shape index.
    #[must_use]
    pub fn shape_paths(&self) -> [(usize, &SvgPath); 3] {
        [
            (SHAPE_ARC, &self.arc_path),
            (SHAPE_REGION_FIRST, &self.regions[0]),
            (SHAPE_REGION_SECOND, &self.regions[1]),
        ]
    }
}

/// Visible end of every line: rays extended to the border, arc anchors as-is.
#[must_use]
pub fn line_endpoints(scene: &SceneState, bounds: Bounds) -> [Point; LINE_COUNT] {
    let rays = scene.rays();
    let arc = scene.arc();
    let mut ends = [Point::ORIGIN; LINE_COUNT];
    for (end, ray) in ends.iter_mut().zip(rays) {
        *end = extend_ray_to_border(*ray, bounds);
    }
    ends[ARC_Y_ANCHOR] = arc.y_anchor();
    ends[ARC_X_ANCHOR] = arc.x_anchor();
    ends
}

/// Rebuild every derived series and path from the scene.
#[must_use]
pub fn build_frame(scene: &SceneState, bounds: Bounds, config: &SceneConfig) -> SceneFrame {
    let ends = line_endpoints(scene, bounds);

    let mut lines = Series::default();
    let mut draggable_points = Series::default();
    let mut line_markers = Series::default();
    for end in ends {
        lines.push(Point::ORIGIN);
        lines.push(end);
        lines.push_gap();
        draggable_points.push(end);
        line_markers.extend(sample_along_segment(Point::ORIGIN, end, config.line_markers));
    }

    let arc = scene.arc();
    let mut arc_marker_series = Series::default();
    arc_marker_series.extend(arc_markers(arc.x_arc, arc.y_arc, config.arc_markers));

    SceneFrame {
        lines,
        draggable_points,
        line_markers,
        arc_markers: arc_marker_series,
        arc_path: arc_path(arc.x_arc, arc.y_arc, config.arc_samples),
        regions: [polygon_path(ends[0], ends[1]), polygon_path(ends[2], ends[3])],
    }
}

/// Arguments for creating the plot: traces, layout and plot config.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSpec {
    pub data: Value,
    pub layout: Value,
    pub config: Value,
}

/// The initial, still empty, plot. Geometry is filled in once the plot is ready.
#[must_use]
pub fn plot_spec(config: &SceneConfig) -> PlotSpec {
    let marker_trace = |name: &str, size: u32| {
        json!({
            "x": [], "y": [],
            "mode": "markers",
            "type": "scatter",
            "marker": { "size": size, "color": INVISIBLE },
            "name": name,
            "hoverinfo": "none",
        })
    };
    let data = json!([
        {
            "x": [], "y": [],
            "mode": "lines",
            "type": "scatter",
            "line": { "color": LINE_COLOR, "width": 2 },
            "name": "Lines",
        },
        marker_trace("Draggable Points", 20),
        marker_trace("Line Markers", 15),
        marker_trace("Arc Markers", 15),
    ]);

    let axis = |range: [f64; 2]| {
        json!({
            "range": range,
            "fixedrange": false,
            "rangemode": "nonnegative",
            "constrain": "domain",
        })
    };
    let region = || {
        json!({
            "type": "path",
            "path": "",
            "fillcolor": REGION_FILL,
            "line": { "width": 0 },
            "layer": "below",
        })
    };
    let mut shapes = vec![Value::Null; SHAPE_REGION_SECOND + 1];
    shapes[SHAPE_BORDER] = json!({
        "type": "rect",
        "x0": config.x_range[0], "y0": config.y_range[0],
        "x1": config.x_range[1], "y1": config.y_range[1],
        "line": { "color": LINE_COLOR, "width": 2 },
        "fillcolor": INVISIBLE,
        "layer": "below",
    });
    shapes[SHAPE_ARC] = json!({
        "type": "path",
        "path": "",
        "line": { "color": LINE_COLOR, "width": 2 },
        "fillcolor": REGION_FILL,
        "layer": "below",
    });
    shapes[SHAPE_REGION_FIRST] = region();
    shapes[SHAPE_REGION_SECOND] = region();

    let layout = json!({
        "title": PLOT_TITLE,
        "dragmode": "pan",
        "xaxis": axis(config.x_range),
        "yaxis": axis(config.y_range),
        "shapes": shapes,
    });

    PlotSpec { data, layout, config: json!({ "responsive": true, "staticPlot": false }) }
}
