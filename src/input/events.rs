// SPDX-License-Identifier: GPL-3.0-only

//! Synthetic keystroke events and the page-wide broadcast bus.
//!
//! Every virtual key activation is broadcast as a [`KeyboardEvent`] so
//! existing key-listening code on the host page reacts uniformly whether
//! input came from a physical or a virtual keyboard. Ordinary keys use
//! press semantics; the enter key broadcasts as a key-down, mirroring how
//! physical enter presses are typically observed.
//!
//! Events carry a `trusted` flag: engine-synthesized events are never
//! trusted, and the direct-edit listener reacts only to untrusted press
//! events. A host relaying genuine hardware input onto the same bus marks
//! it trusted so the listener leaves it alone.

use tokio::sync::broadcast;

use crate::layout::KeyDefinition;

/// Broadcast sender for synthetic keystroke events.
pub type KeyEventBus = broadcast::Sender<KeyboardEvent>;

/// Semantics of a broadcast keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    /// Character-producing press (every key except enter).
    Press,
    /// Key-down (the enter key).
    Down,
}

/// A synthesized keystroke observable by any listener on the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// Character (or label) of the activated key.
    pub character: String,
    /// Key code of the activated key.
    pub code: u32,
    /// Whether the key implies a held shift.
    pub shift_required: bool,
    /// Press or down semantics.
    pub kind: KeyEventKind,
    /// Whether the event originates from genuine user input. Synthetic
    /// events are never trusted.
    pub trusted: bool,
}

impl KeyboardEvent {
    /// Creates an untrusted press event from a key definition.
    #[must_use]
    pub fn press(key: &KeyDefinition) -> Self {
        Self {
            character: key.character.clone(),
            code: key.code,
            shift_required: key.shift_required,
            kind: KeyEventKind::Press,
            trusted: false,
        }
    }

    /// Creates an untrusted down event from a key definition.
    #[must_use]
    pub fn down(key: &KeyDefinition) -> Self {
        Self {
            kind: KeyEventKind::Down,
            ..Self::press(key)
        }
    }

    /// Marks the event as genuine user input.
    #[must_use]
    pub fn trusted(mut self) -> Self {
        self.trusted = true;
        self
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
