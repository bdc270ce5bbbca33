// SPDX-License-Identifier: GPL-3.0-only

//! Key dispatch: broadcast of synthetic keystrokes and the direct-edit
//! fallback applied to the active field.
//!
//! Activating a virtual key does two independent things:
//!
//! 1. [`KeyDispatcher::activate`] optionally pulses haptic feedback and
//!    broadcasts a [`KeyboardEvent`] on the page-wide bus, with press
//!    semantics for ordinary keys and down semantics for enter.
//! 2. A page-wide listener (the engine's direct-edit task) feeds every bus
//!    event into [`KeyDispatcher::apply_synthetic_edit`], which edits the
//!    active field for untrusted press events: backspace deletes before
//!    the caret or removes the selection; every other key appends its
//!    character to the end of the value.
//!
//! Appending does not honor the caret position; only backspace is
//! selection-aware. With no active field the edit is a logged no-op.

use std::sync::Arc;

use crate::app_settings::KEY_VIBRATION_MS;
use crate::host::HapticFeedback;
use crate::input::events::{KeyEventBus, KeyEventKind, KeyboardEvent};
use crate::layout::{BACKSPACE_CODE, KeyDefinition, KeyRole};
use crate::registry::InputRegistry;

/// Translates virtual key activations into broadcast events and direct
/// field edits.
///
/// Cheap to clone; clones share the registry, bus, and haptics capability.
#[derive(Clone)]
pub struct KeyDispatcher {
    registry: InputRegistry,
    events: KeyEventBus,
    haptics: Option<Arc<dyn HapticFeedback>>,
}

impl KeyDispatcher {
    /// Creates a dispatcher over the given registry and event bus.
    ///
    /// Pass `None` for `haptics` on hosts without a vibration capability;
    /// activation skips the pulse silently.
    #[must_use]
    pub fn new(
        registry: InputRegistry,
        events: KeyEventBus,
        haptics: Option<Arc<dyn HapticFeedback>>,
    ) -> Self {
        Self {
            registry,
            events,
            haptics,
        }
    }

    /// Handles a virtual key activation.
    ///
    /// Pulses haptic feedback when available, then broadcasts the
    /// synthetic keystroke: a down event for the enter role, a press
    /// event for everything else.
    pub fn activate(&self, key: &KeyDefinition) {
        if let Some(haptics) = &self.haptics {
            haptics.vibrate(KEY_VIBRATION_MS);
        }

        let event = match key.role {
            KeyRole::Enter => KeyboardEvent::down(key),
            KeyRole::Character | KeyRole::Backspace => KeyboardEvent::press(key),
        };

        tracing::debug!(code = key.code, kind = ?event.kind, "key activated");
        if self.events.send(event).is_err() {
            tracing::debug!("no listeners on the key event bus");
        }
    }

    /// Applies the direct-edit fallback for a bus event.
    ///
    /// Trusted events and non-press kinds are ignored. With no active
    /// field the edit is a defensive no-op. Backspace deletes the
    /// character before the caret (collapsed selection) or the entire
    /// selection, collapsing the caret at the deletion point; any other
    /// code appends the character to the end of the value.
    pub fn apply_synthetic_edit(&self, event: &KeyboardEvent) {
        if event.trusted || event.kind != KeyEventKind::Press {
            return;
        }

        let Some(target) = self.registry.active_target() else {
            tracing::debug!(code = event.code, "synthetic edit with no active field");
            return;
        };

        if event.code == BACKSPACE_CODE {
            let value = target.value();
            let chars: Vec<char> = value.chars().collect();
            let (start, end) = target.selection();
            let start = start.min(chars.len());
            let end = end.min(chars.len()).max(start);

            let count = if start == end { 1 } else { 0 };
            let deletion_start = start.saturating_sub(count);

            let edited: String = chars[..deletion_start]
                .iter()
                .chain(chars[end..].iter())
                .collect();
            target.set_value(edited);
            target.set_selection(deletion_start, deletion_start);
        } else {
            let mut value = target.value();
            value.push_str(&event.character);
            target.set_value(value);
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
