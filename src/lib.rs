// SPDX-License-Identifier: GPL-3.0-only

//! Padboard - a headless on-screen keyboard overlay engine
//!
//! This crate provides the runtime core of an on-screen virtual keyboard:
//! it binds text-entry fields inside a host page, suppresses or
//! complements the platform's native input method, and synthesizes
//! keystroke events so host text fields update exactly as if a physical
//! keyboard had been used.
//!
//! # Architecture
//!
//! The engine is rendering-agnostic. A host embedding it supplies:
//!
//! 1. **Capabilities**: implementations of `TextEntryTarget` (its fields)
//!    and `PanelSurface` (its overlay panel), plus optionally
//!    `HapticFeedback`.
//! 2. **Observations**: a stream of `HostEvent`s (structural changes
//!    under the watched scope, focus/blur, virtual key taps, drag
//!    gestures) fed into [`engine::KeyboardEngine::run`].
//!
//! The engine reacts by applying input hints, driving the debounced
//! open/close state machine against the panel, broadcasting synthetic
//! keystrokes on a page-wide bus, and directly editing the active field
//! when the platform keyboard is suppressed.
//!
//! # Modules
//!
//! - `app_settings`: centralized timing and capacity constants
//! - `config`: host-supplied engine configuration
//! - `engine`: the event loop wiring every controller together
//! - `host`: injected host-page capability traits and the event stream
//! - `input`: synthetic keystroke events, dispatch, and direct editing
//! - `layout`: key definitions, the built-in keypad, JSON layouts
//! - `mode`: overlay-vs-platform keyboard authority
//! - `registry`: bound fields and the single active field
//! - `resize`: drag-based panel repositioning
//! - `visibility`: the debounced open/close state machine

pub mod app_settings;
pub mod config;
pub mod engine;
pub mod host;
pub mod input;
pub mod layout;
pub mod mode;
pub mod registry;
pub mod resize;
pub mod visibility;

#[cfg(test)]
pub(crate) mod test_support;

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod integration_tests {
    use crate::config::EngineConfig;
    use crate::engine::KeyboardEngine;
    use crate::host::{HostEvent, InputHint, TargetId, TextEntryTarget};
    use crate::input::KeyEventKind;
    use crate::layout::Layout;
    use crate::test_support::{FakeField, FakePanel, PanelCall};
    use crate::visibility::VisibilityState;
    use futures::SinkExt;
    use futures::channel::mpsc;
    use std::sync::Arc;
    use std::time::Duration;

    /// Integration Test 1: the full entry workflow.
    ///
    /// A field appears, gains focus, the panel opens, virtual taps type
    /// "12.3", a backspace trims it, and blur closes the panel.
    #[tokio::test(start_paused = true)]
    async fn test_full_entry_workflow() {
        let panel = Arc::new(FakePanel::new());
        let engine = KeyboardEngine::new(
            EngineConfig::default(),
            Layout::numeric(),
            panel.clone(),
            None,
        );
        let visibility = engine.visibility().clone();
        let field = Arc::new(FakeField::new(TargetId(1)));

        let (mut tx, rx) = mpsc::channel(16);
        tokio::spawn(engine.run(rx));

        tx.send(HostEvent::FieldsAdded(vec![
            field.clone() as Arc<dyn TextEntryTarget>,
        ]))
        .await
        .unwrap();
        tx.send(HostEvent::Focused(TargetId(1))).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(visibility.state(), VisibilityState::Open);

        for code in [49, 50, 190, 51] {
            tx.send(HostEvent::KeyActivated(code)).await.unwrap();
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(field.value(), "12.3");

        // Backspace eats the trailing digit; caret sits at the deletion
        // point supplied by the host-side selection.
        field.set_selection(4, 4);
        tx.send(HostEvent::KeyActivated(8)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(field.value(), "12.");
        assert_eq!(field.selection(), (3, 3));

        tx.send(HostEvent::Blurred(TargetId(1))).await.unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(visibility.state(), VisibilityState::Closed);
    }

    /// Integration Test 2: at most one field is active for any sequence
    /// of focus and blur events.
    #[tokio::test(start_paused = true)]
    async fn test_single_active_field_over_event_storm() {
        let panel = Arc::new(FakePanel::new());
        let mut engine = KeyboardEngine::new(
            EngineConfig::default(),
            Layout::numeric(),
            panel,
            None,
        );

        let fields: Vec<Arc<FakeField>> = (1..=3)
            .map(|id| Arc::new(FakeField::new(TargetId(id))))
            .collect();
        engine.handle_event(HostEvent::FieldsAdded(
            fields
                .iter()
                .map(|f| f.clone() as Arc<dyn TextEntryTarget>)
                .collect(),
        ));

        let storm = [
            HostEvent::Focused(TargetId(1)),
            HostEvent::Focused(TargetId(2)),
            HostEvent::Blurred(TargetId(1)),
            HostEvent::Focused(TargetId(3)),
            HostEvent::Blurred(TargetId(2)),
            HostEvent::Blurred(TargetId(3)),
            HostEvent::Focused(TargetId(2)),
        ];
        for (step, event) in storm.into_iter().enumerate() {
            engine.handle_event(event);
            let active = engine.registry().active_id();
            assert!(
                active.is_none() || fields.iter().any(|f| Some(f.id()) == active),
                "step {step}: active field must be one of the bound fields"
            );
        }

        assert_eq!(engine.registry().active_id(), Some(TargetId(2)));
    }

    /// Integration Test 3: toggling the mode rewrites hints everywhere
    /// and parks the overlay; focus then shows nothing.
    #[tokio::test(start_paused = true)]
    async fn test_native_mode_suppresses_overlay() {
        let panel = Arc::new(FakePanel::new());
        let mut engine = KeyboardEngine::new(
            EngineConfig::default(),
            Layout::numeric(),
            panel.clone(),
            None,
        );
        let field = Arc::new(FakeField::new(TargetId(1)));
        engine.handle_event(HostEvent::FieldsAdded(vec![
            field.clone() as Arc<dyn TextEntryTarget>,
        ]));

        engine.handle_event(HostEvent::ToggleModeRequested);
        assert_eq!(field.current_hint(), Some(InputHint::Auto));

        engine.handle_event(HostEvent::Focused(TargetId(1)));
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(engine.visibility().state(), VisibilityState::Closed);
        assert!(
            panel.calls().is_empty(),
            "the panel must stay untouched in native mode"
        );
        assert_eq!(
            engine.registry().active_id(),
            Some(TargetId(1)),
            "focus tracking continues while the platform keyboard is up"
        );
    }

    /// Integration Test 4: a custom JSON layout drives the event shape.
    #[tokio::test(start_paused = true)]
    async fn test_custom_layout_event_shape() {
        let layout = Layout::from_json(
            r#"{
                "name": "confirm",
                "keys": [
                    { "code": 89, "character": "y" },
                    { "code": 78, "character": "N", "shift_required": true },
                    { "code": 13, "character": "⏎", "role": "enter" }
                ]
            }"#,
        )
        .expect("valid layout");

        let panel = Arc::new(FakePanel::new());
        let engine = KeyboardEngine::new(EngineConfig::default(), layout, panel, None);
        let mut keys = engine.subscribe_keys();

        engine.activate_key(78);
        let event = keys.try_recv().expect("press event");
        assert_eq!(event.character, "N");
        assert!(event.shift_required);
        assert_eq!(event.kind, KeyEventKind::Press);

        engine.activate_key(13);
        let event = keys.try_recv().expect("down event");
        assert_eq!(event.kind, KeyEventKind::Down);
        assert_eq!(event.code, 13);
    }

    /// Integration Test 5: a forced-open panel survives blur until the
    /// override is released.
    #[tokio::test(start_paused = true)]
    async fn test_force_open_survives_blur() {
        let panel = Arc::new(FakePanel::new());
        let mut engine = KeyboardEngine::new(
            EngineConfig::default(),
            Layout::numeric(),
            panel.clone(),
            None,
        );
        let field = Arc::new(FakeField::new(TargetId(1)));
        engine.handle_event(HostEvent::FieldsAdded(vec![
            field as Arc<dyn TextEntryTarget>,
        ]));
        engine.set_force_open(true);

        engine.handle_event(HostEvent::Focused(TargetId(1)));
        tokio::time::sleep(Duration::from_millis(20)).await;
        engine.handle_event(HostEvent::Blurred(TargetId(1)));
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(engine.visibility().state(), VisibilityState::Open);
        assert!(!panel.calls().contains(&PanelCall::SlideOut));

        engine.set_force_open(false);
        engine.close_keyboard();
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(engine.visibility().state(), VisibilityState::Closed);
    }
}
