//! Interactive positive-quadrant plot: four draggable rays, one draggable arc,
//! and two shaded wedges between neighbouring rays.
//!
//! This crate is compiled to WebAssembly and runs in the browser next to
//! Plotly. Plotly owns rendering, axes and pan/zoom; this crate owns the
//! scene. It turns clicks, pointer moves and numeric edits into geometry
//! updates, keeps the rays ordered by angle, and hands each new frame back
//! to the plot. All logic lives in [`engine::EngineCore`], which is testable
//! without a browser; [`web::Engine`] is the thin wasm-bindgen host.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable [`engine::EngineCore`] and the [`engine::Action`]s it returns |
//! | [`web`] | wasm-bindgen host bound to a Plotly graph div |
//! | [`scene`] | Ray directions and arc radii, with the ordering invariant |
//! | [`geometry`] | Pure geometry: border extension, sampling, paths, angles |
//! | [`axis`] | Pixel ↔ data mapping through the plot's axes |
//! | [`input`] | Drag state machine and coalesced pointer moves |
//! | [`hit`] | Resolving plot clicks into drag targets |
//! | [`render`] | Building the traces and shapes the plot draws |
//! | [`relayout`] | Keeping pans inside the nonnegative quadrant |
//! | [`config`] | Scene configuration and validation |
//! | [`error`] | Errors crossing the host boundary |
//! | [`consts`] | Shared constants (counts, defaults, trace and shape indices) |

pub mod axis;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod relayout;
pub mod render;
pub mod scene;
pub mod web;
