#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

/// Live range of both axes before the event.
const CURRENT: [f64; 2] = [0.0, 10.0];

fn parse(raw: &str) -> RelayoutEvent {
    RelayoutEvent::from_json(raw).unwrap_or_default()
}

// =============================================================
// shift_nonnegative
// =============================================================

#[test]
fn shift_restores_zero_min_and_keeps_span() {
    assert_eq!(shift_nonnegative([-2.0, 8.0]), Some([0.0, 10.0]));
    assert_eq!(shift_nonnegative([-0.5, 3.5]), Some([0.0, 4.0]));
}

#[test]
fn shift_leaves_nonnegative_ranges_alone() {
    assert_eq!(shift_nonnegative([0.0, 10.0]), None);
    assert_eq!(shift_nonnegative([3.0, 7.0]), None);
}

// =============================================================
// RelayoutEvent
// =============================================================

#[test]
fn pan_below_zero_on_x_is_corrected() {
    let event = parse(r#"{"xaxis.range[0]": -2, "xaxis.range[1]": 8}"#);
    let correction = event.correction(CURRENT, CURRENT);
    assert_eq!(correction, Some(RangeCorrection { x: Some([0.0, 10.0]), y: None }));
}

#[test]
fn correction_update_uses_plot_keys() {
    let event = parse(r#"{"xaxis.range[0]": -2, "xaxis.range[1]": 8, "yaxis.range[0]": -1, "yaxis.range[1]": 4}"#);
    let update = event.correction(CURRENT, CURRENT).map(|c| c.to_update());
    assert_eq!(
        update,
        Some(json!({
            "xaxis.range[0]": 0.0,
            "xaxis.range[1]": 10.0,
            "yaxis.range[0]": 0.0,
            "yaxis.range[1]": 5.0,
        }))
    );
}

#[test]
fn in_bounds_pan_needs_no_correction() {
    let event = parse(r#"{"xaxis.range[0]": 1, "xaxis.range[1]": 11, "yaxis.range[0]": 0, "yaxis.range[1]": 10}"#);
    assert_eq!(event.x(CURRENT), Some([1.0, 11.0]));
    assert!(event.correction(CURRENT, CURRENT).is_none());
}

#[test]
fn array_form_range_is_understood() {
    let event = parse(r#"{"yaxis.range": [-3, 7]}"#);
    assert_eq!(event.y(CURRENT), Some([-3.0, 7.0]));
    assert_eq!(event.correction(CURRENT, CURRENT).and_then(|c| c.y), Some([0.0, 10.0]));
}

#[test]
fn unrelated_keys_are_ignored() {
    let event = parse(r#"{"autosize": true, "dragmode": "zoom"}"#);
    assert_eq!(event, RelayoutEvent::default());
    assert!(event.correction(CURRENT, CURRENT).is_none());
}

#[test]
fn missing_max_keeps_current_bound() {
    let event = parse(r#"{"xaxis.range[0]": -2}"#);
    assert_eq!(event.x(CURRENT), Some([-2.0, 10.0]));
    assert_eq!(event.correction(CURRENT, CURRENT), Some(RangeCorrection { x: Some([0.0, 12.0]), y: None }));
}

#[test]
fn missing_min_keeps_current_bound() {
    let event = parse(r#"{"yaxis.range[1]": 6}"#);
    assert_eq!(event.y([-1.0, 9.0]), Some([-1.0, 6.0]));
    assert_eq!(event.correction(CURRENT, [-1.0, 9.0]).and_then(|c| c.y), Some([0.0, 7.0]));
    assert!(event.correction(CURRENT, [2.0, 9.0]).is_none());
}

#[test]
fn non_numeric_range_is_an_error() {
    assert!(RelayoutEvent::from_json(r#"{"xaxis.range[0]": "2024-01-01"}"#).is_err());
}

#[test]
fn empty_correction_serializes_to_empty_object() {
    assert_eq!(RangeCorrection::default().to_update(), json!({}));
    assert!(RangeCorrection::default().is_empty());
}
