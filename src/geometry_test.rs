#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

/// The points visited by `M` and `L` commands, in order.
fn vertices(path: &SvgPath) -> Vec<Point> {
    path.commands
        .iter()
        .filter_map(|c| match c {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(*p),
            PathCommand::Close => None,
        })
        .collect()
}

fn bounds() -> Bounds {
    Bounds::new(10.0, 10.0)
}

// =============================================================
// Point
// =============================================================

#[test]
fn point_lerp_endpoints_and_midpoint() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(4.0, 2.0);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 0.5), Point::new(2.0, 1.0));
}

#[test]
fn point_length_is_euclidean() {
    assert!(approx_eq(Point::new(3.0, 4.0).length(), 5.0));
}

// =============================================================
// extend_ray_to_border
// =============================================================

#[test]
fn extend_diagonal_hits_corner() {
    let end = extend_ray_to_border(Point::new(1.0, 1.0), bounds());
    assert!(point_approx_eq(end, Point::new(10.0, 10.0)));
}

#[test]
fn extend_shallow_ray_exits_right_border() {
    let end = extend_ray_to_border(Point::new(6.0, 2.0), bounds());
    assert_eq!(end.x, 10.0);
    assert!(approx_eq(end.y, 10.0 / 3.0));
}

#[test]
fn extend_steep_ray_exits_top_border() {
    let end = extend_ray_to_border(Point::new(2.0, 8.0), bounds());
    assert_eq!(end.y, 10.0);
    assert!(approx_eq(end.x, 2.5));
}

#[test]
fn extend_vertical_ray_is_guarded() {
    for y in [0.001, 1.0, 5.0, 1e9] {
        let end = extend_ray_to_border(Point::new(0.0, y), bounds());
        assert_eq!(end, Point::new(0.0, 10.0));
        assert!(end.x.is_finite() && end.y.is_finite());
    }
}

#[test]
fn extend_horizontal_ray_exits_right_on_axis() {
    let end = extend_ray_to_border(Point::new(3.0, 0.0), bounds());
    assert_eq!(end, Point::new(10.0, 0.0));
}

#[test]
fn extend_respects_non_square_bounds() {
    let end = extend_ray_to_border(Point::new(1.0, 1.0), Bounds::new(20.0, 5.0));
    assert!(point_approx_eq(end, Point::new(5.0, 5.0)));
}

#[test]
fn extend_always_lands_on_exactly_one_border() {
    let b = Bounds::new(10.0, 7.5);
    let mut x = 0.25;
    while x <= b.x_max {
        let mut y = 0.25;
        while y <= b.y_max {
            let end = extend_ray_to_border(Point::new(x, y), b);
            let on_right = approx_eq(end.x, b.x_max) && end.y <= b.y_max + EPSILON;
            let on_top = approx_eq(end.y, b.y_max) && end.x <= b.x_max + EPSILON;
            assert!(on_right || on_top, "({x}, {y}) -> {end:?}");
            y += 0.75;
        }
        x += 0.75;
    }
}

// =============================================================
// sample_along_segment
// =============================================================

#[test]
fn sample_excludes_endpoints() {
    let samples = sample_along_segment(Point::ORIGIN, Point::new(10.0, 0.0), 4);
    let xs: Vec<f64> = samples.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![2.0, 4.0, 6.0, 8.0]);
}

#[test]
fn sample_count_matches_request() {
    let samples = sample_along_segment(Point::ORIGIN, Point::new(10.0, 10.0), 20);
    assert_eq!(samples.len(), 20);
    assert!(approx_eq(samples[0].x, 10.0 / 21.0));
    assert!(approx_eq(samples[19].y, 200.0 / 21.0));
}

#[test]
fn sample_zero_count_is_empty() {
    assert!(sample_along_segment(Point::ORIGIN, Point::new(1.0, 1.0), 0).is_empty());
}

// =============================================================
// Paths
// =============================================================

#[test]
fn svg_path_display_format() {
    let path = polygon_path(Point::new(10.0, 2.5), Point::new(4.0, 10.0));
    assert_eq!(path.to_string(), "M 0,0 L 10,2.5 L 4,10 Z");
}

#[test]
fn svg_path_serializes_as_string() {
    let path = polygon_path(Point::new(1.0, 0.0), Point::new(0.0, 1.0));
    let json = serde_json::to_value(&path).unwrap_or_default();
    assert_eq!(json, serde_json::json!("M 0,0 L 1,0 L 0,1 Z"));
}

#[test]
fn arc_path_shape_for_default_samples() {
    let path = arc_path(4.0, 4.0, 50);
    let cmds = &path.commands;
    assert_eq!(cmds.first(), Some(&PathCommand::MoveTo(Point::ORIGIN)));
    assert_eq!(cmds.last(), Some(&PathCommand::Close));
    assert_eq!(vertices(&path).len(), 52);
    assert_eq!(cmds.len(), 53);
    assert!(path.to_string().starts_with("M 0,0"));
    assert!(path.to_string().ends_with('Z'));
}

#[test]
fn arc_path_runs_from_y_axis_to_x_axis() {
    let path = arc_path(6.0, 3.0, 50);
    let points = vertices(&path);
    assert!(point_approx_eq(points[1], Point::new(0.0, 3.0)));
    assert!(point_approx_eq(points[51], Point::new(6.0, 0.0)));
}

#[test]
fn arc_path_points_lie_on_ellipse() {
    let path = arc_path(6.0, 3.0, 50);
    for p in vertices(&path).into_iter().skip(1) {
        let r = (p.x / 6.0).powi(2) + (p.y / 3.0).powi(2);
        assert!(approx_eq(r, 1.0), "{p:?}");
    }
}

#[test]
fn arc_path_with_zero_radius_collapses_without_nan() {
    let path = arc_path(0.0, 0.0, 50);
    assert!(vertices(&path).iter().all(|p| p.x.is_finite() && p.y.is_finite()));
}

#[test]
fn arc_markers_are_strictly_interior() {
    let markers = arc_markers(4.0, 4.0, 20);
    assert_eq!(markers.len(), 20);
    for m in &markers {
        assert!(m.x > 0.0 && m.y > 0.0);
        assert!(approx_eq(m.length(), 4.0));
    }
    assert!(markers[0].y > markers[19].y);
}

#[test]
fn arc_markers_step_is_even() {
    let markers = arc_markers(1.0, 1.0, 1);
    assert!(point_approx_eq(markers[0], point_at_angle(45.0, 1.0)));
}

// =============================================================
// Angles
// =============================================================

#[test]
fn compute_angle_cardinal_directions() {
    assert!(approx_eq(compute_angle_deg(1.0, 0.0), 0.0));
    assert!(approx_eq(compute_angle_deg(0.0, 1.0), 90.0));
    assert!(approx_eq(compute_angle_deg(-1.0, 0.0), 180.0));
    assert!(approx_eq(compute_angle_deg(0.0, -1.0), 270.0));
}

#[test]
fn compute_angle_is_never_negative() {
    let deg = compute_angle_deg(1.0, -1e-20);
    assert!((0.0..360.0).contains(&deg));
}

#[test]
fn compute_angle_round_trips_through_unit_point() {
    let samples = [(1.0, 0.5), (0.2, 9.0), (3.0, 3.0), (-2.0, 1.0), (0.0, 4.0), (5.0, 0.0)];
    for (x, y) in samples {
        let deg = compute_angle_deg(x, y);
        let p = point_at_angle(deg, 1.0);
        let back = compute_angle_deg(p.x, p.y);
        assert!((deg - back).abs() < 1e-9, "({x}, {y}): {deg} vs {back}");
    }
}

#[test]
fn point_at_angle_has_requested_radius() {
    let p = point_at_angle(30.0, 2.0);
    assert!(approx_eq(p.length(), 2.0));
    assert!(approx_eq(p.x, 3.0_f64.sqrt()));
}

#[test]
fn confine_keeps_quadrant_angles() {
    for deg in [0.0, 12.5, 45.0, 90.0] {
        assert_eq!(confine_to_quadrant(deg), deg);
    }
    assert!(approx_eq(confine_to_quadrant(365.0), 5.0));
    assert!(approx_eq(confine_to_quadrant(-300.0), 60.0));
}

#[test]
fn confine_snaps_negative_angles_to_zero() {
    assert_eq!(confine_to_quadrant(-5.0), 0.0);
    assert_eq!(confine_to_quadrant(-1e-18), 0.0);
    assert_eq!(confine_to_quadrant(300.0), 0.0);
}

#[test]
fn confine_snaps_to_nearer_edge() {
    assert_eq!(confine_to_quadrant(100.0), 90.0);
    assert_eq!(confine_to_quadrant(225.0), 90.0);
    assert_eq!(confine_to_quadrant(226.0), 0.0);
}

#[test]
fn clamp_angle_passes_through_inside_interval() {
    assert_eq!(clamp_angle(45.0, Some(10.0), Some(80.0), 0.1), 45.0);
}

#[test]
fn clamp_angle_snaps_to_low_neighbour() {
    assert!(approx_eq(clamp_angle(5.0, Some(10.0), Some(80.0), 0.1), 10.1));
    assert!(approx_eq(clamp_angle(10.1, Some(10.0), None, 0.1), 10.1));
}

#[test]
fn clamp_angle_snaps_to_high_neighbour() {
    assert!(approx_eq(clamp_angle(85.0, Some(10.0), Some(80.0), 0.1), 79.9));
    assert!(approx_eq(clamp_angle(80.0, None, Some(80.0), 0.1), 79.9));
}

#[test]
fn clamp_angle_without_neighbours_is_identity() {
    assert_eq!(clamp_angle(123.0, None, None, 0.1), 123.0);
}
