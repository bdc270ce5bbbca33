// SPDX-License-Identifier: GPL-3.0-only

//! Open/close state machine for the overlay panel.
//!
//! Focus and blur fire in quick succession while the user hops between
//! fields; closing the panel on every blur would make it flicker. The
//! controller therefore never closes synchronously: `close()` clears a
//! `requested` flag and schedules a check one frame later, and only if no
//! `open()` re-set the flag in the meantime does the panel start its slide
//! out, reaching Closed after the 300 ms visual transition.
//!
//! # Transition graph
//!
//! ```text
//! Closed --open()--> Opening --frame--> Open --close()+frame--> Closing
//!   ^                   ^                                          |
//!   |                   +------------------open()------------------+
//!   +------------------------300 ms timer--------------------------+
//! ```
//!
//! Deferred work is never cancelled. A superseded frame check or close
//! timer still fires, re-reads `requested`, `force_open`, and the current
//! state, and does nothing when it has been overtaken. Task handles are
//! owned per controller instance; no timing state lives at process scope.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::app_settings::{CLOSE_TRANSITION_MS, FRAME_INTERVAL_MS};
use crate::host::PanelSurface;

/// Visibility state of the overlay panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityState {
    /// Panel hidden and non-interactive.
    Closed,
    /// Panel visible, sliding into place, not yet interactive.
    Opening,
    /// Panel at its resting position and interactive.
    Open,
    /// Panel sliding out, non-interactive, not yet hidden.
    Closing,
}

struct VisibilityInner {
    state: VisibilityState,
    /// Whether the most recent request was an open. Re-read by every
    /// deferred check; this flag, not cancellation, is what neuters
    /// superseded timers.
    requested: bool,
    /// While true, no transition out of Open happens.
    force_open: bool,
    /// Gate set by the mode controller; while false, `open()` records the
    /// request but shows nothing.
    enabled: bool,
    frame_task: Option<JoinHandle<()>>,
    close_check_task: Option<JoinHandle<()>>,
    close_timer_task: Option<JoinHandle<()>>,
}

/// State machine governing the overlay's visibility.
///
/// Cheap to clone; clones share the same underlying state machine.
#[derive(Clone)]
pub struct VisibilityController {
    inner: Arc<Mutex<VisibilityInner>>,
    panel: Arc<dyn PanelSurface>,
}

fn lock(inner: &Mutex<VisibilityInner>) -> MutexGuard<'_, VisibilityInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl VisibilityController {
    /// Creates a controller for the given panel, initially Closed.
    #[must_use]
    pub fn new(panel: Arc<dyn PanelSurface>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(VisibilityInner {
                state: VisibilityState::Closed,
                requested: false,
                force_open: false,
                enabled: true,
                frame_task: None,
                close_check_task: None,
                close_timer_task: None,
            })),
            panel,
        }
    }

    /// Requests the overlay open.
    ///
    /// The `requested` flag is set synchronously, before any deferred work
    /// runs, so a burst of open/close calls within one loop turn resolves
    /// to the last call made. From Closed the panel becomes visible (still
    /// non-interactive) immediately and slides in on the next frame; from
    /// Closing it slides back in the same way; from Opening or Open this
    /// is a no-op beyond the flag.
    pub fn open(&self) {
        let mut inner = lock(&self.inner);
        inner.requested = true;

        if !inner.enabled {
            return;
        }

        match inner.state {
            VisibilityState::Closed => {
                self.panel.show();
                inner.state = VisibilityState::Opening;
                tracing::debug!("panel shown, sliding in next frame");
                self.schedule_slide_in(&mut inner);
            }
            VisibilityState::Closing => {
                // Panel is still visible; pull it back in. The pending
                // close timer observes `requested` at fire time and
                // does nothing.
                inner.state = VisibilityState::Opening;
                tracing::debug!("reopen during close transition");
                self.schedule_slide_in(&mut inner);
            }
            VisibilityState::Opening | VisibilityState::Open => {}
        }
    }

    /// Requests the overlay closed.
    ///
    /// Clears the `requested` flag synchronously and schedules a check one
    /// frame later. The check transitions to Closing only if no `open()`
    /// re-set the flag, the forced override is off, and the panel is
    /// actually up, so repeated `close()` calls never spawn competing
    /// close timers.
    pub fn close(&self) {
        let mut inner = lock(&self.inner);
        inner.requested = false;

        let shared = Arc::clone(&self.inner);
        let panel = Arc::clone(&self.panel);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(FRAME_INTERVAL_MS)).await;
            let mut inner = lock(&shared);

            if inner.requested || inner.force_open {
                return;
            }
            if !matches!(
                inner.state,
                VisibilityState::Opening | VisibilityState::Open
            ) {
                return;
            }

            panel.slide_out();
            inner.state = VisibilityState::Closing;
            tracing::debug!("panel sliding out");

            let shared_timer = Arc::clone(&shared);
            let panel_timer = Arc::clone(&panel);
            let timer = tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(CLOSE_TRANSITION_MS)).await;
                let mut inner = lock(&shared_timer);

                if inner.requested || inner.state != VisibilityState::Closing {
                    return;
                }

                panel_timer.hide();
                inner.state = VisibilityState::Closed;
                tracing::debug!("panel hidden");
            });
            inner.close_timer_task = Some(timer);
        });
        inner.close_check_task = Some(handle);
    }

    /// Sets the forced override keeping the panel open regardless of blur.
    pub fn set_force_open(&self, force_open: bool) {
        lock(&self.inner).force_open = force_open;
    }

    /// Enables or disables the controller.
    ///
    /// Set by the mode controller: while the platform keyboard is
    /// authoritative the overlay never shows, but open requests are still
    /// recorded in the `requested` flag.
    pub fn set_enabled(&self, enabled: bool) {
        lock(&self.inner).enabled = enabled;
    }

    /// Current state of the panel.
    #[must_use]
    pub fn state(&self) -> VisibilityState {
        lock(&self.inner).state
    }

    /// Whether the panel is interactive.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state() == VisibilityState::Open
    }

    /// Whether any deferred visibility work is still pending.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        let inner = lock(&self.inner);
        [
            &inner.frame_task,
            &inner.close_check_task,
            &inner.close_timer_task,
        ]
        .into_iter()
        .any(|task| task.as_ref().is_some_and(|handle| !handle.is_finished()))
    }

    #[cfg(test)]
    pub(crate) fn requested(&self) -> bool {
        lock(&self.inner).requested
    }

    /// Schedules the Opening → Open transition on the next frame.
    fn schedule_slide_in(&self, inner: &mut VisibilityInner) {
        let shared = Arc::clone(&self.inner);
        let panel = Arc::clone(&self.panel);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(FRAME_INTERVAL_MS)).await;
            let mut inner = lock(&shared);
            if inner.state == VisibilityState::Opening {
                panel.slide_in();
                inner.state = VisibilityState::Open;
                tracing::debug!("panel open");
            }
        });
        inner.frame_task = Some(handle);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
