// SPDX-License-Identifier: GPL-3.0-only

//! Registry of bound text-entry targets and the active-field state.
//!
//! The registry owns the set of fields the overlay manages: it applies the
//! input-hint attribute on bind and on every mode change, tracks which
//! field is active (focused), and prunes fields the host reports as
//! removed. Binding is idempotent per target identity: a structural
//! notification that re-reports an already-bound field is a no-op.
//!
//! Focus and blur arrive through the engine loop as host events; the
//! registry resolves them against its own state so that a stale blur
//! (delivered after the next field's focus) never clears the newer active
//! field. At most one field is active at any instant.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::host::{InputHint, TargetId, TextEntryTarget};

/// A bound text-entry target and the hint currently applied to it.
struct BoundField {
    target: Arc<dyn TextEntryTarget>,
    hint: InputHint,
}

#[derive(Default)]
struct RegistryInner {
    fields: Vec<BoundField>,
    active: Option<TargetId>,
}

/// Tracks bound text-entry targets and the single active field.
///
/// Cheap to clone; clones share the same underlying state.
#[derive(Clone)]
pub struct InputRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl InputRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(RegistryInner::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Binds each given target exactly once and applies the current hint.
    ///
    /// Targets already bound (by identity) are skipped, so repeated
    /// structural notifications cannot duplicate a field.
    pub fn bind(
        &self,
        targets: impl IntoIterator<Item = Arc<dyn TextEntryTarget>>,
        hint: InputHint,
    ) {
        let mut inner = self.lock();
        for target in targets {
            let id = target.id();
            if inner.fields.iter().any(|field| field.target.id() == id) {
                tracing::debug!(%id, "target already bound, skipping");
                continue;
            }

            target.set_input_hint(hint);
            inner.fields.push(BoundField { target, hint });
            tracing::debug!(%id, hint = %hint, "target bound");
        }
    }

    /// Prunes bound targets by identity.
    ///
    /// A pruned field that was active stops being active; later synthetic
    /// edits find no target and fall through to the no-op guard.
    pub fn unbind(&self, ids: &[TargetId]) {
        let mut inner = self.lock();
        inner.fields.retain(|field| !ids.contains(&field.target.id()));
        if let Some(active) = inner.active {
            if ids.contains(&active) {
                tracing::debug!(id = %active, "active target removed");
                inner.active = None;
            }
        }
    }

    /// Marks a bound target active.
    ///
    /// Returns `true` when the target is bound (the overlay should open);
    /// focus on an unknown target is ignored. The most recent focus always
    /// wins, including over a not-yet-delivered blur of the previous field.
    pub fn handle_focus(&self, id: TargetId) -> bool {
        let mut inner = self.lock();
        if !inner.fields.iter().any(|field| field.target.id() == id) {
            tracing::debug!(%id, "focus on unbound target ignored");
            return false;
        }

        inner.active = Some(id);
        true
    }

    /// Reacts to a target losing focus.
    ///
    /// Clears the active field only if it is still the blurred target; a
    /// stale blur arriving after the next field's focus leaves the newer
    /// active field in place. Returns `true` when the target is bound (the
    /// overlay should request a close regardless of which field is active).
    pub fn handle_blur(&self, id: TargetId) -> bool {
        let mut inner = self.lock();
        if !inner.fields.iter().any(|field| field.target.id() == id) {
            return false;
        }

        if inner.active == Some(id) {
            inner.active = None;
        }
        true
    }

    /// Reapplies a hint to every bound field.
    pub fn apply_hint_all(&self, hint: InputHint) {
        let mut inner = self.lock();
        for field in &mut inner.fields {
            field.target.set_input_hint(hint);
            field.hint = hint;
        }
    }

    /// The currently active target, if any.
    #[must_use]
    pub fn active_target(&self) -> Option<Arc<dyn TextEntryTarget>> {
        let inner = self.lock();
        let active = inner.active?;
        inner
            .fields
            .iter()
            .find(|field| field.target.id() == active)
            .map(|field| Arc::clone(&field.target))
    }

    /// Identity of the active target, if any.
    #[must_use]
    pub fn active_id(&self) -> Option<TargetId> {
        self.lock().active
    }

    /// Whether a target is bound.
    #[must_use]
    pub fn is_bound(&self, id: TargetId) -> bool {
        self.lock()
            .fields
            .iter()
            .any(|field| field.target.id() == id)
    }

    /// Number of bound fields.
    #[must_use]
    pub fn bound_count(&self) -> usize {
        self.lock().fields.len()
    }

    /// The hint currently applied to a bound target.
    #[must_use]
    pub fn bound_hint(&self, id: TargetId) -> Option<InputHint> {
        self.lock()
            .fields
            .iter()
            .find(|field| field.target.id() == id)
            .map(|field| field.hint)
    }
}

impl Default for InputRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
