//! Scene configuration supplied by the host at mount time.
//!
//! Every field has a default, so the host may pass `{}` (or nothing) and get
//! the standard scene: four rays, a radius-4 arc, and a `[0, 10]` square
//! viewport. Values are validated once, before the engine is built.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ANGLE_MARGIN_DEG, DEFAULT_ARC_MARKERS, DEFAULT_ARC_RADIUS, DEFAULT_ARC_SAMPLES, DEFAULT_AXIS_MAX,
    DEFAULT_LINE_MARKERS, QUADRANT_MAX_DEG, RAY_COUNT,
};
use crate::geometry::{Point, compute_angle_deg};

/// Error returned by [`SceneConfig::from_json`] and [`SceneConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON text could not be parsed into a config.
    #[error("failed to parse scene config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A numeric field is NaN or infinite.
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    /// An axis range is empty, inverted, or starts below zero.
    #[error("invalid {axis} range [{min}, {max}]: need 0 <= min < max")]
    InvalidRange { axis: &'static str, min: f64, max: f64 },
    /// An arc radius is negative.
    #[error("arc radius must be non-negative, got {0}")]
    NegativeArcRadius(f64),
    /// A ray points outside the positive quadrant or has no direction.
    #[error("ray {index} is not a direction in the positive quadrant")]
    RayOutsideQuadrant { index: usize },
    /// Ray angles are not strictly increasing by at least the margin.
    #[error("ray {index} must be at least {margin} degrees past the previous ray")]
    RaysOutOfOrder { index: usize, margin: f64 },
    /// The angle margin is negative or leaves no room for four rays.
    #[error("angle margin {0} is out of range")]
    InvalidMargin(f64),
    /// The log level is not one of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    #[error("unknown log level: {0}")]
    InvalidLogLevel(String),
}

/// Fixed parameters of one scene instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Initial ray directions, ordered by increasing angle.
    pub rays: [Point; RAY_COUNT],
    /// Initial arc radius along the x axis.
    pub x_arc: f64,
    /// Initial arc radius along the y axis.
    pub y_arc: f64,
    /// Initial visible x range.
    pub x_range: [f64; 2],
    /// Initial visible y range.
    pub y_range: [f64; 2],
    /// Hover markers per line.
    pub line_markers: u32,
    /// Hover markers along the arc.
    pub arc_markers: u32,
    /// Segments in the arc path.
    pub arc_samples: u32,
    /// Minimum separation between neighbouring ray angles, in degrees.
    pub angle_margin_deg: f64,
    /// Console log level for the browser host.
    pub log_level: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            rays: [Point::new(6.0, 2.0), Point::new(8.0, 7.0), Point::new(2.5, 5.0), Point::new(2.0, 8.0)],
            x_arc: DEFAULT_ARC_RADIUS,
            y_arc: DEFAULT_ARC_RADIUS,
            x_range: [0.0, DEFAULT_AXIS_MAX],
            y_range: [0.0, DEFAULT_AXIS_MAX],
            line_markers: DEFAULT_LINE_MARKERS,
            arc_markers: DEFAULT_ARC_MARKERS,
            arc_samples: DEFAULT_ARC_SAMPLES,
            angle_margin_deg: DEFAULT_ANGLE_MARGIN_DEG,
            log_level: "info".into(),
        }
    }
}

impl SceneConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed JSON, or the first
    /// validation failure from [`SceneConfig::validate`].
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = if raw.trim().is_empty() { Self::default() } else { serde_json::from_str(raw)? };
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_finite("x_arc", self.x_arc)?;
        check_finite("y_arc", self.y_arc)?;
        check_finite("angle_margin_deg", self.angle_margin_deg)?;
        check_range("x", self.x_range)?;
        check_range("y", self.y_range)?;

        for radius in [self.x_arc, self.y_arc] {
            if radius < 0.0 {
                return Err(ConfigError::NegativeArcRadius(radius));
            }
        }

        // Three gaps between four rays must fit inside the quadrant.
        if self.angle_margin_deg < 0.0 || self.angle_margin_deg * 3.0 >= QUADRANT_MAX_DEG {
            return Err(ConfigError::InvalidMargin(self.angle_margin_deg));
        }

        let mut prev: Option<f64> = None;
        for (index, ray) in self.rays.iter().enumerate() {
            let in_quadrant = ray.x.is_finite() && ray.y.is_finite() && ray.x >= 0.0 && ray.y >= 0.0;
            if !in_quadrant || ray.length() <= 0.0 {
                return Err(ConfigError::RayOutsideQuadrant { index });
            }
            let angle = compute_angle_deg(ray.x, ray.y);
            if let Some(prev) = prev {
                if angle - prev < self.angle_margin_deg {
                    return Err(ConfigError::RaysOutOfOrder { index, margin: self.angle_margin_deg });
                }
            }
            prev = Some(angle);
        }

        self.level_filter()?;
        Ok(())
    }

    /// The configured log level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogLevel`] for an unknown level name.
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level).map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() { Ok(()) } else { Err(ConfigError::NonFinite { field }) }
}

fn check_range(axis: &'static str, [min, max]: [f64; 2]) -> Result<(), ConfigError> {
    if !(min.is_finite() && max.is_finite()) || min < 0.0 || min >= max {
        return Err(ConfigError::InvalidRange { axis, min, max });
    }
    Ok(())
}
