//! Input model: the drag state machine and the coalesced pointer-move slot.
//!
//! `DragState` is the single authority on which element (if any) is being
//! dragged; the engine refuses any other mutation of that element while the
//! drag is active. `PendingMove` holds only the most recent pointer position
//! between animation frames, so a burst of moves costs one geometry update.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geometry::Point;
use crate::hit::HitTarget;

/// Which element the user is dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No gesture in progress; waiting for the next press.
    #[default]
    Idle,
    /// Dragging ray `index` by its endpoint or hover markers.
    DraggingRay(usize),
    /// Dragging the arc by its markers or axis anchors.
    DraggingArc,
}

impl DragState {
    #[must_use]
    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }

    /// The state after a press on `target`, or `None` if a drag is already active.
    #[must_use]
    pub fn press(self, target: HitTarget) -> Option<Self> {
        if !self.is_idle() {
            return None;
        }
        Some(match target {
            HitTarget::Ray(index) => Self::DraggingRay(index),
            HitTarget::Arc => Self::DraggingArc,
        })
    }

    /// The state after a release. Always idle; there is no cancel.
    #[must_use]
    pub fn release(self) -> Self {
        Self::Idle
    }

    /// Whether this drag owns `target`.
    #[must_use]
    pub fn holds(self, target: HitTarget) -> bool {
        match (self, target) {
            (Self::DraggingRay(a), HitTarget::Ray(b)) => a == b,
            (Self::DraggingArc, HitTarget::Arc) => true,
            _ => false,
        }
    }
}

/// Last-value-wins slot for pointer moves awaiting the next animation frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PendingMove {
    latest: Option<Point>,
    frame_requested: bool,
}

impl PendingMove {
    /// Record a pointer position (container pixels).
    ///
    /// Returns `true` when the caller must request an animation frame, which
    /// happens only for the first move since the last frame.
    pub fn push(&mut self, px: Point) -> bool {
        self.latest = Some(px);
        if self.frame_requested {
            false
        } else {
            self.frame_requested = true;
            true
        }
    }

    /// Take the latest position for this frame.
    pub fn take(&mut self) -> Option<Point> {
        self.frame_requested = false;
        self.latest.take()
    }
}

/// Interaction state tracked between press and release.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    pub drag: DragState,
    pub pending: PendingMove,
}
