// SPDX-License-Identifier: GPL-3.0-only

//! Choice between the overlay and the platform keyboard.
//!
//! Exactly one of the two is authoritative for bound fields at any time.
//! While the overlay is authoritative every bound field carries the
//! `"none"` input hint, suppressing the platform's own on-screen keyboard;
//! toggling away restores `"auto"` and closes the overlay.

use crate::host::InputHint;
use crate::registry::InputRegistry;
use crate::visibility::VisibilityController;

/// Holds whether the overlay keyboard is authoritative.
#[derive(Debug)]
pub struct ModeController {
    overlay_authoritative: bool,
}

impl ModeController {
    /// Creates a controller with the overlay authoritative.
    #[must_use]
    pub fn new() -> Self {
        Self {
            overlay_authoritative: true,
        }
    }

    /// Whether the overlay keyboard is authoritative.
    #[must_use]
    pub fn overlay_authoritative(&self) -> bool {
        self.overlay_authoritative
    }

    /// The input hint implied by the current mode.
    #[must_use]
    pub fn hint(&self) -> InputHint {
        if self.overlay_authoritative {
            InputHint::None
        } else {
            InputHint::Auto
        }
    }

    /// Flips the authoritative keyboard.
    ///
    /// Reapplies the recomputed hint to every bound field, then opens the
    /// overlay when switching to it and closes it when switching away.
    /// Calling twice restores the prior state.
    pub fn toggle(&mut self, registry: &InputRegistry, visibility: &VisibilityController) {
        self.overlay_authoritative = !self.overlay_authoritative;
        tracing::info!(
            overlay = self.overlay_authoritative,
            "keyboard mode toggled"
        );

        registry.apply_hint_all(self.hint());
        visibility.set_enabled(self.overlay_authoritative);

        if self.overlay_authoritative {
            visibility.open();
        } else {
            visibility.close();
        }
    }
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{TargetId, TextEntryTarget};
    use crate::test_support::{FakeField, FakePanel};
    use crate::visibility::VisibilityState;
    use std::sync::Arc;

    /// Toggling flips the hint on every bound field and back.
    #[tokio::test(start_paused = true)]
    async fn test_toggle_reapplies_hints() {
        let registry = InputRegistry::new();
        let a = Arc::new(FakeField::new(TargetId(1)));
        let b = Arc::new(FakeField::new(TargetId(2)));
        let mut mode = ModeController::new();
        registry.bind(
            [
                a.clone() as Arc<dyn TextEntryTarget>,
                b.clone() as Arc<dyn TextEntryTarget>,
            ],
            mode.hint(),
        );
        let visibility = VisibilityController::new(Arc::new(FakePanel::new()));

        assert_eq!(a.current_hint(), Some(InputHint::None));

        mode.toggle(&registry, &visibility);
        assert_eq!(a.current_hint(), Some(InputHint::Auto));
        assert_eq!(b.current_hint(), Some(InputHint::Auto));

        mode.toggle(&registry, &visibility);
        assert_eq!(a.current_hint(), Some(InputHint::None));
        assert_eq!(b.current_hint(), Some(InputHint::None));
    }

    /// Switching away closes the overlay; switching back opens it.
    #[tokio::test(start_paused = true)]
    async fn test_toggle_drives_visibility() {
        let registry = InputRegistry::new();
        let mut mode = ModeController::new();
        let visibility = VisibilityController::new(Arc::new(FakePanel::new()));
        visibility.open();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert_eq!(visibility.state(), VisibilityState::Open);

        mode.toggle(&registry, &visibility);
        tokio::time::sleep(std::time::Duration::from_millis(400)).await;
        assert_eq!(visibility.state(), VisibilityState::Closed);
        assert!(!mode.overlay_authoritative());

        mode.toggle(&registry, &visibility);
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert_eq!(visibility.state(), VisibilityState::Open);
    }
}
