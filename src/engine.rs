use log::{debug, warn};

use crate::axis::Viewport;
use crate::config::SceneConfig;
use crate::consts::RAY_COUNT;
use crate::geometry::Point;
use crate::hit::{ClickEvent, HitTarget};
use crate::input::{DragState, InputState};
use crate::relayout::{RangeCorrection, RelayoutEvent};
use crate::render::{SceneFrame, build_frame};
use crate::scene::SceneState;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Cursor shown while an element is being dragged.
const GRAB_CURSOR: &str = "grabbing";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Write this frame into the plot and redraw.
    Redraw(SceneFrame),
    /// Push corrected axis ranges to the plot, then call `on_relayout_complete`.
    Relayout(RangeCorrection),
    /// Schedule one animation frame, then call `on_animation_frame`.
    RequestFrame,
    /// Refresh the numeric inputs.
    ControlsChanged { angles: [f64; RAY_COUNT], arc: f64 },
    /// Set the plot container's cursor; empty restores the default.
    SetCursor(String),
}

/// Core engine state: all logic that doesn't depend on the browser.
///
/// Separated from `web::Engine` so it can be tested without WASM/browser
/// dependencies. The plot is created asynchronously, so pointer input is
/// ignored until [`EngineCore::on_plot_ready`] supplies a viewport.
pub struct EngineCore {
    pub config: SceneConfig,
    pub scene: SceneState,
    pub input: InputState,
    viewport: Option<Viewport>,
}

impl EngineCore {
    #[must_use]
    pub fn new(config: SceneConfig) -> Self {
        let scene = SceneState::from_config(&config);
        Self { config, scene, input: InputState::default(), viewport: None }
    }

    // --- Plot lifecycle ---

    /// The plot finished its first layout; start drawing geometry.
    pub fn on_plot_ready(&mut self, viewport: Viewport) -> Vec<Action> {
        debug!("engine: plot ready, x={:?} y={:?}", viewport.x_range(), viewport.y_range());
        self.viewport = Some(viewport);
        self.refresh()
    }

    /// Replace the cached axes (resize) and redraw against them.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Vec<Action> {
        self.viewport = Some(viewport);
        self.redraw().into_iter().collect()
    }

    /// The plot reported a pan or zoom; `viewport` is read from the live axes.
    ///
    /// Returns a correction when an axis went below zero; otherwise the
    /// geometry is re-extended to the new borders right away. Bounds the
    /// event leaves out are taken from `viewport`.
    pub fn on_relayout(&mut self, event: &RelayoutEvent, viewport: Viewport) -> Vec<Action> {
        if !self.is_ready() {
            return Vec::new();
        }
        let correction = event.correction(viewport.x_range(), viewport.y_range());
        self.viewport = Some(viewport);
        if let Some(correction) = correction {
            debug!("engine: correcting ranges x={:?} y={:?}", correction.x, correction.y);
            return vec![Action::Relayout(correction)];
        }
        self.redraw().into_iter().collect()
    }

    /// The corrected ranges are live; redraw against the fresh axes.
    pub fn on_relayout_complete(&mut self, viewport: Viewport) -> Vec<Action> {
        self.set_viewport(viewport)
    }

    // --- Pointer input ---

    /// A click on one of the plot's traces.
    pub fn on_click(&mut self, event: &ClickEvent, viewport: Viewport) -> Vec<Action> {
        let Some(target) = event.target(self.config.line_markers) else {
            debug!("engine: click on no draggable element");
            return Vec::new();
        };
        self.on_press(target, viewport)
    }

    /// Start dragging `target` against the axes as they are now.
    /// Ignored while another drag is active.
    pub fn on_press(&mut self, target: HitTarget, viewport: Viewport) -> Vec<Action> {
        if !self.is_ready() {
            warn!("engine: press before plot is ready");
            return Vec::new();
        }
        let Some(next) = self.input.drag.press(target) else {
            debug!("engine: press on {target:?} ignored during {:?}", self.input.drag);
            return Vec::new();
        };
        debug!("engine: drag start {next:?}");
        self.input.drag = next;
        self.viewport = Some(viewport);
        vec![Action::SetCursor(GRAB_CURSOR.into())]
    }

    /// Pointer moved to `px` (container pixels).
    ///
    /// Only the latest position is kept; a frame is requested for the first
    /// move since the previous frame.
    pub fn on_pointer_move(&mut self, px: Point) -> Vec<Action> {
        if self.input.drag.is_idle() || !self.is_ready() {
            return Vec::new();
        }
        if self.input.pending.push(px) { vec![Action::RequestFrame] } else { Vec::new() }
    }

    /// Apply the pending move, if any.
    pub fn on_animation_frame(&mut self) -> Vec<Action> {
        match self.input.pending.take() {
            Some(px) => self.apply_move(px),
            None => Vec::new(),
        }
    }

    /// End the drag, committing the last position.
    pub fn on_release(&mut self) -> Vec<Action> {
        if self.input.drag.is_idle() {
            return Vec::new();
        }
        let mut actions = self.on_animation_frame();
        debug!("engine: drag end {:?}", self.input.drag);
        self.input.drag = self.input.drag.release();
        actions.push(Action::SetCursor(String::new()));
        actions
    }

    fn apply_move(&mut self, px: Point) -> Vec<Action> {
        let Some(viewport) = &self.viewport else {
            return Vec::new();
        };
        let data = viewport.to_data(px);
        let changed = match self.input.drag {
            DragState::Idle => false,
            DragState::DraggingRay(index) => self.scene.drag_ray_to(index, data).is_some(),
            DragState::DraggingArc => self.scene.drag_arc_to(data),
        };
        if !changed {
            warn!("engine: dropped move to {px:?}");
            return Vec::new();
        }
        self.refresh()
    }

    // --- Numeric controls ---

    /// Set ray `index` from the numeric angle input.
    pub fn set_ray_angle(&mut self, index: usize, deg: f64) -> Vec<Action> {
        if self.input.drag.holds(HitTarget::Ray(index)) {
            debug!("engine: ray {index} is being dragged, ignoring angle {deg}");
            return Vec::new();
        }
        if self.scene.set_ray_angle(index, deg).is_none() {
            warn!("engine: rejected angle {deg} for ray {index}");
            return Vec::new();
        }
        self.refresh()
    }

    /// Set both arc radii from the numeric radius input.
    pub fn set_arc_coordinate(&mut self, value: f64) -> Vec<Action> {
        if self.input.drag.holds(HitTarget::Arc) {
            debug!("engine: arc is being dragged, ignoring radius {value}");
            return Vec::new();
        }
        if !self.scene.set_arc_coordinate(value) {
            warn!("engine: rejected arc radius {value}");
            return Vec::new();
        }
        self.refresh()
    }

    // --- Queries ---

    /// Whether the plot has reported its axes.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.viewport.is_some()
    }

    /// Current ray angles in degrees.
    #[must_use]
    pub fn angles(&self) -> [f64; RAY_COUNT] {
        self.scene.angles()
    }

    /// Current arc scalar shown in the radius input.
    #[must_use]
    pub fn arc_coordinate(&self) -> f64 {
        self.scene.arc().coordinate()
    }

    /// The frame for the current state, once the plot is ready.
    #[must_use]
    pub fn frame(&self) -> Option<SceneFrame> {
        let viewport = self.viewport.as_ref()?;
        Some(build_frame(&self.scene, viewport.bounds(), &self.config))
    }

    fn redraw(&self) -> Option<Action> {
        self.frame().map(Action::Redraw)
    }

    fn refresh(&self) -> Vec<Action> {
        let mut actions: Vec<Action> = self.redraw().into_iter().collect();
        actions.push(Action::ControlsChanged { angles: self.angles(), arc: self.arc_coordinate() });
        actions
    }
}
