// SPDX-License-Identifier: GPL-3.0-only

//! Recording test doubles for the host-page abstractions.
//!
//! Used by the unit tests across the crate and the integration tests in
//! the crate root; everything the engine does to the host is observable
//! as recorded state or call logs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::host::{HapticFeedback, InputHint, PanelSurface, TargetId, TextEntryTarget};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
struct FieldState {
    value: String,
    selection: (usize, usize),
    hints: Vec<InputHint>,
}

/// An in-memory text-entry field recording every hint application.
pub struct FakeField {
    id: TargetId,
    state: Mutex<FieldState>,
}

impl FakeField {
    pub fn new(id: TargetId) -> Self {
        Self {
            id,
            state: Mutex::new(FieldState::default()),
        }
    }

    /// The hint most recently applied, if any.
    pub fn current_hint(&self) -> Option<InputHint> {
        lock(&self.state).hints.last().copied()
    }

    /// Every hint applied, in order.
    pub fn hint_history(&self) -> Vec<InputHint> {
        lock(&self.state).hints.clone()
    }
}

impl TextEntryTarget for FakeField {
    fn id(&self) -> TargetId {
        self.id
    }

    fn value(&self) -> String {
        lock(&self.state).value.clone()
    }

    fn set_value(&self, value: String) {
        lock(&self.state).value = value;
    }

    fn selection(&self) -> (usize, usize) {
        lock(&self.state).selection
    }

    fn set_selection(&self, start: usize, end: usize) {
        lock(&self.state).selection = (start, end);
    }

    fn set_input_hint(&self, hint: InputHint) {
        lock(&self.state).hints.push(hint);
    }
}

/// A call observed on the fake panel surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelCall {
    Show,
    SlideIn,
    SlideOut,
    Hide,
    SetVerticalOffset(f32),
}

/// A panel surface recording the calls made against it, in order.
pub struct FakePanel {
    calls: Mutex<Vec<PanelCall>>,
}

impl FakePanel {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call observed so far, in order.
    pub fn calls(&self) -> Vec<PanelCall> {
        lock(&self.calls).clone()
    }
}

impl PanelSurface for FakePanel {
    fn show(&self) {
        lock(&self.calls).push(PanelCall::Show);
    }

    fn slide_in(&self) {
        lock(&self.calls).push(PanelCall::SlideIn);
    }

    fn slide_out(&self) {
        lock(&self.calls).push(PanelCall::SlideOut);
    }

    fn hide(&self) {
        lock(&self.calls).push(PanelCall::Hide);
    }

    fn set_vertical_offset(&self, y: f32) {
        lock(&self.calls).push(PanelCall::SetVerticalOffset(y));
    }
}

/// A haptics capability counting pulses.
pub struct FakeHaptics {
    pulses: AtomicUsize,
}

impl FakeHaptics {
    pub fn new() -> Self {
        Self {
            pulses: AtomicUsize::new(0),
        }
    }

    /// Number of pulses emitted so far.
    pub fn pulse_count(&self) -> usize {
        self.pulses.load(Ordering::SeqCst)
    }
}

impl HapticFeedback for FakeHaptics {
    fn vibrate(&self, _duration_ms: u32) {
        self.pulses.fetch_add(1, Ordering::SeqCst);
    }
}
