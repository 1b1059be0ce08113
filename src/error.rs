//! Errors that cross the boundary between the engine and its host.
//!
//! Geometry and interaction never fail: degenerate input is special-cased and
//! unknown targets are ignored. What can fail is everything the host hands
//! us (configuration, event payloads) and everything the plotting surface
//! does on the JS side.

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// The scene configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A click or relayout payload did not have the expected shape.
    #[error("malformed event payload: {0}")]
    Payload(#[from] serde_json::Error),
    /// The plotting surface reported a failure (rejected promise, missing API, etc.).
    #[error("plot surface error: {0}")]
    Surface(String),
    /// The plot has not finished mounting.
    #[error("plot is not mounted yet")]
    NotMounted,
}
