// SPDX-License-Identifier: GPL-3.0-only

//! Host-page abstractions injected into the engine.
//!
//! The engine never touches a concrete rendering tree. The host embedding
//! it supplies three capabilities and one event stream:
//!
//! - [`TextEntryTarget`]: a field-like object exposing its value, selection
//!   range, and input-hint attribute. Anything that can satisfy this trait
//!   can be bound, regardless of its concrete widget type.
//! - [`PanelSurface`]: the overlay panel's visual handle. The visibility
//!   and resize controllers drive it; how the panel actually renders its
//!   slide transition is the host's business.
//! - [`HapticFeedback`]: an optional vibration capability. Hosts without
//!   one simply pass `None` and taps are silent.
//! - [`HostEvent`]: the stream of focus/blur, structural-change, key
//!   activation, and drag notifications the host adapter feeds into
//!   [`KeyboardEngine::run`](crate::engine::KeyboardEngine::run).
//!
//! Events flow through a `futures::channel::mpsc` channel so the engine
//! loop resolves them strictly in the order the host observed them.

use std::fmt;
use std::sync::Arc;

/// Identity of a text-entry target.
///
/// Used for dedup on bind, active-field comparison on blur, and pruning on
/// removal. The host assigns ids; they must be stable for the lifetime of
/// the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u64);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target#{}", self.0)
    }
}

/// Input-hint attribute value advising the platform keyboard.
///
/// `None` suppresses the platform's own on-screen keyboard for a field,
/// `Auto` lets the platform decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputHint {
    /// Suppress the platform keyboard (`"none"`).
    None,
    /// Allow the platform keyboard (`"auto"`).
    Auto,
}

impl InputHint {
    /// The attribute value written to the target.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InputHint::None => "none",
            InputHint::Auto => "auto",
        }
    }
}

impl fmt::Display for InputHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A text-entry field owned by the host page.
///
/// Selection positions are character offsets into the value; `selection`
/// returns `(start, end)` with `start <= end`, collapsed when equal.
/// Implementations use interior mutability; the engine holds shared
/// references and never needs `&mut`.
pub trait TextEntryTarget: Send + Sync {
    /// Stable identity of this target.
    fn id(&self) -> TargetId;

    /// Current text value.
    fn value(&self) -> String;

    /// Replaces the text value. The selection is left untouched.
    fn set_value(&self, value: String);

    /// Current selection range `(start, end)` in character offsets.
    fn selection(&self) -> (usize, usize);

    /// Moves the selection; `start == end` collapses it to a caret.
    fn set_selection(&self, start: usize, end: usize);

    /// Applies the input-hint attribute.
    fn set_input_hint(&self, hint: InputHint);
}

/// The overlay panel's visual handle.
///
/// The visibility controller sequences these calls; their visual meaning:
/// `show` makes the panel visible but non-interactive (still off-screen),
/// `slide_in` starts the slide to the resting position and enables
/// interaction, `slide_out` starts the reverse slide and disables
/// interaction, `hide` removes the panel entirely. `set_vertical_offset`
/// repositions the panel during a resize drag.
pub trait PanelSurface: Send + Sync {
    /// Makes the panel visible, non-interactive, at its off-screen start.
    fn show(&self);

    /// Slides the panel to its resting position and enables interaction.
    fn slide_in(&self);

    /// Slides the panel off-screen and disables interaction.
    fn slide_out(&self);

    /// Makes the panel fully hidden and non-interactive.
    fn hide(&self);

    /// Sets the panel's vertical offset to the given coordinate.
    fn set_vertical_offset(&self, y: f32);
}

/// Optional vibration capability for key-tap feedback.
pub trait HapticFeedback: Send + Sync {
    /// Emits a vibration pulse of the given duration.
    fn vibrate(&self, duration_ms: u32);
}

/// Notifications the host adapter feeds into the engine loop.
#[derive(Clone)]
pub enum HostEvent {
    /// New text-entry targets appeared under the watched scope.
    FieldsAdded(Vec<Arc<dyn TextEntryTarget>>),
    /// Targets were removed from the watched scope.
    FieldsRemoved(Vec<TargetId>),
    /// A target received focus.
    Focused(TargetId),
    /// A target lost focus.
    Blurred(TargetId),
    /// A virtual key control with the given key code was tapped.
    KeyActivated(u32),
    /// The keyboard-choice control was tapped.
    ToggleModeRequested,
    /// A drag began on the panel's resize handle at the given y coordinate.
    DragStarted(f32),
    /// The pointer moved to the given y coordinate during a drag.
    DragMoved(f32),
    /// The drag gesture ended.
    DragEnded,
}

impl fmt::Debug for HostEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostEvent::FieldsAdded(targets) => {
                let ids: Vec<TargetId> = targets.iter().map(|t| t.id()).collect();
                f.debug_tuple("FieldsAdded").field(&ids).finish()
            }
            HostEvent::FieldsRemoved(ids) => f.debug_tuple("FieldsRemoved").field(ids).finish(),
            HostEvent::Focused(id) => f.debug_tuple("Focused").field(id).finish(),
            HostEvent::Blurred(id) => f.debug_tuple("Blurred").field(id).finish(),
            HostEvent::KeyActivated(code) => f.debug_tuple("KeyActivated").field(code).finish(),
            HostEvent::ToggleModeRequested => f.write_str("ToggleModeRequested"),
            HostEvent::DragStarted(y) => f.debug_tuple("DragStarted").field(y).finish(),
            HostEvent::DragMoved(y) => f.debug_tuple("DragMoved").field(y).finish(),
            HostEvent::DragEnded => f.write_str("DragEnded"),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
