// SPDX-License-Identifier: GPL-3.0-only

//! Drag-based repositioning of the overlay panel.
//!
//! A drag starts on the panel's resize handle, tracks the pointer's
//! vertical coordinate for the gesture's duration, and detaches when the
//! gesture ends. Moves during an active gesture are reported as consumed
//! so the host can stop them from bubbling into default drag behavior.
//! Nothing persists across gestures; each drag starts from wherever the
//! panel currently sits.

use std::sync::Arc;

use crate::host::PanelSurface;

/// State of an in-flight drag gesture.
#[derive(Debug, Clone, Copy)]
struct DragState {
    active: bool,
    anchor_y: f32,
}

/// Manages the drag gesture repositioning the panel.
pub struct ResizeController {
    panel: Arc<dyn PanelSurface>,
    drag: DragState,
}

impl ResizeController {
    /// Creates a controller for the given panel with no gesture active.
    #[must_use]
    pub fn new(panel: Arc<dyn PanelSurface>) -> Self {
        Self {
            panel,
            drag: DragState {
                active: false,
                anchor_y: 0.0,
            },
        }
    }

    /// Starts a drag gesture at the given vertical coordinate.
    pub fn begin_drag(&mut self, y: f32) {
        self.drag = DragState {
            active: true,
            anchor_y: y,
        };
        tracing::debug!(anchor_y = y, "resize drag started");
    }

    /// Tracks a pointer move.
    ///
    /// During an active gesture the panel's vertical offset follows the
    /// pointer and the move is consumed (returns `true`); outside a
    /// gesture the move is ignored and propagates (returns `false`).
    pub fn drag_move(&mut self, y: f32) -> bool {
        if !self.drag.active {
            return false;
        }

        self.panel.set_vertical_offset(y);
        true
    }

    /// Ends the gesture; further moves no longer touch the panel.
    pub fn end_drag(&mut self) {
        if self.drag.active {
            tracing::debug!("resize drag ended");
        }
        self.drag = DragState {
            active: false,
            anchor_y: self.drag.anchor_y,
        };
    }

    /// Whether a gesture is currently active.
    #[must_use]
    pub fn dragging(&self) -> bool {
        self.drag.active
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakePanel, PanelCall};

    /// Moves during a gesture reposition the panel and are consumed.
    #[test]
    fn test_drag_moves_panel() {
        let panel = Arc::new(FakePanel::new());
        let mut resize = ResizeController::new(panel.clone());

        resize.begin_drag(100.0);
        assert!(resize.dragging());
        assert!(resize.drag_move(120.0));
        assert!(resize.drag_move(140.5));

        assert_eq!(
            panel.calls(),
            vec![
                PanelCall::SetVerticalOffset(120.0),
                PanelCall::SetVerticalOffset(140.5),
            ]
        );
    }

    /// After the gesture ends, pointer movement has no effect.
    #[test]
    fn test_moves_after_end_are_ignored() {
        let panel = Arc::new(FakePanel::new());
        let mut resize = ResizeController::new(panel.clone());

        resize.begin_drag(100.0);
        resize.drag_move(130.0);
        resize.end_drag();

        assert!(!resize.drag_move(200.0));
        assert!(!resize.dragging());
        assert_eq!(
            panel.calls(),
            vec![PanelCall::SetVerticalOffset(130.0)],
            "no offset change after the gesture ended"
        );
    }

    /// Moves without a preceding drag start propagate untouched.
    #[test]
    fn test_move_without_gesture() {
        let panel = Arc::new(FakePanel::new());
        let mut resize = ResizeController::new(panel.clone());

        assert!(!resize.drag_move(50.0));
        assert!(panel.calls().is_empty());
    }

    /// Each gesture starts fresh from the panel's current position.
    #[test]
    fn test_gestures_do_not_persist() {
        let panel = Arc::new(FakePanel::new());
        let mut resize = ResizeController::new(panel.clone());

        resize.begin_drag(10.0);
        resize.drag_move(20.0);
        resize.end_drag();

        resize.begin_drag(300.0);
        assert!(resize.drag_move(310.0));
        resize.end_drag();

        assert_eq!(
            panel.calls(),
            vec![
                PanelCall::SetVerticalOffset(20.0),
                PanelCall::SetVerticalOffset(310.0),
            ]
        );
    }
}
