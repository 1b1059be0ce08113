//! Keeping the viewport in the nonnegative quadrant after pan/zoom.
//!
//! The plot reports layout changes as flat objects keyed like
//! `"xaxis.range[0]"`. When a pan pushes an axis minimum below zero, we answer
//! with a correction that slides the range back so the minimum is zero and
//! the visible span is unchanged.

#[cfg(test)]
#[path = "relayout_test.rs"]
mod relayout_test;

use serde::Deserialize;
use serde_json::{Map, Value};

/// The axis-range part of a relayout payload. Other keys are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct RelayoutEvent {
    #[serde(rename = "xaxis.range[0]", default)]
    pub x_min: Option<f64>,
    #[serde(rename = "xaxis.range[1]", default)]
    pub x_max: Option<f64>,
    #[serde(rename = "xaxis.range", default)]
    pub x_range: Option<[f64; 2]>,
    #[serde(rename = "yaxis.range[0]", default)]
    pub y_min: Option<f64>,
    #[serde(rename = "yaxis.range[1]", default)]
    pub y_max: Option<f64>,
    #[serde(rename = "yaxis.range", default)]
    pub y_range: Option<[f64; 2]>,
}

impl RelayoutEvent {
    /// Parse a relayout payload.
    ///
    /// # Errors
    ///
    /// Returns the decode error when a range key holds a non-numeric value.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// New x range. A bound the event leaves out keeps its `current` value.
    #[must_use]
    pub fn x(&self, current: [f64; 2]) -> Option<[f64; 2]> {
        merge_bounds(self.x_min, self.x_max, self.x_range, current)
    }

    /// New y range. A bound the event leaves out keeps its `current` value.
    #[must_use]
    pub fn y(&self, current: [f64; 2]) -> Option<[f64; 2]> {
        merge_bounds(self.y_min, self.y_max, self.y_range, current)
    }

    /// The correction needed to bring every reported range back to a zero minimum.
    ///
    /// `x_current` and `y_current` are the live axis ranges, used for bounds
    /// the event does not carry.
    #[must_use]
    pub fn correction(&self, x_current: [f64; 2], y_current: [f64; 2]) -> Option<RangeCorrection> {
        let correction = RangeCorrection {
            x: self.x(x_current).and_then(shift_nonnegative),
            y: self.y(y_current).and_then(shift_nonnegative),
        };
        if correction.is_empty() { None } else { Some(correction) }
    }
}

fn merge_bounds(min: Option<f64>, max: Option<f64>, range: Option<[f64; 2]>, current: [f64; 2]) -> Option<[f64; 2]> {
    match (min, max) {
        (None, None) => range,
        (min, max) => Some([min.unwrap_or(current[0]), max.unwrap_or(current[1])]),
    }
}

/// Corrected ranges to push back to the plot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RangeCorrection {
    pub x: Option<[f64; 2]>,
    pub y: Option<[f64; 2]>,
}

impl RangeCorrection {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }

    /// The relayout update object, keyed the way the plot expects.
    #[must_use]
    pub fn to_update(&self) -> Value {
        let mut update = Map::new();
        for (axis, range) in [("xaxis", self.x), ("yaxis", self.y)] {
            if let Some([min, max]) = range {
                update.insert(format!("{axis}.range[0]"), Value::from(min));
                update.insert(format!("{axis}.range[1]"), Value::from(max));
            }
        }
        Value::Object(update)
    }
}

/// Slide `[min, max]` right so `min` is zero, or `None` if it already is nonnegative.
#[must_use]
pub fn shift_nonnegative([min, max]: [f64; 2]) -> Option<[f64; 2]> {
    if min < 0.0 {
        let shift = -min;
        Some([0.0, max + shift])
    } else {
        None
    }
}
