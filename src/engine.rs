// SPDX-License-Identifier: GPL-3.0-only

//! The engine tying the overlay's controllers together.
//!
//! [`KeyboardEngine`] owns the registry, mode, visibility, dispatch, and
//! resize controllers, routes every [`HostEvent`] to the right one, and
//! runs the page-wide direct-edit listener on the synthetic keystroke bus.
//!
//! # Architecture
//!
//! The host adapter observes its page (structural changes under the
//! watched scope, focus/blur, taps on the rendered keys) and feeds those
//! observations into [`KeyboardEngine::run`] through an mpsc channel, so
//! the engine resolves them strictly in observation order. Host-facing
//! operations (`open_keyboard`, `close_keyboard`, `set_force_open`) are
//! direct method calls; the visibility controller is cheaply cloneable
//! for hosts that need those entry points while `run` owns the engine.

use futures::StreamExt;
use futures::channel::mpsc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use std::sync::Arc;

use crate::app_settings::KEY_EVENT_BUS_CAPACITY;
use crate::config::EngineConfig;
use crate::host::{HapticFeedback, HostEvent, PanelSurface};
use crate::input::{KeyDispatcher, KeyboardEvent};
use crate::layout::Layout;
use crate::mode::ModeController;
use crate::registry::InputRegistry;
use crate::resize::ResizeController;
use crate::visibility::VisibilityController;

/// The overlay keyboard engine.
pub struct KeyboardEngine {
    config: EngineConfig,
    layout: Layout,
    registry: InputRegistry,
    mode: ModeController,
    visibility: VisibilityController,
    dispatcher: KeyDispatcher,
    resize: ResizeController,
    events: broadcast::Sender<KeyboardEvent>,
    /// Receiver handed to the direct-edit listener when `run` starts.
    edit_rx: Option<broadcast::Receiver<KeyboardEvent>>,
    /// Direct-edit listener handle (kept alive for the engine's lifetime).
    #[allow(dead_code)]
    edit_task: Option<JoinHandle<()>>,
}

impl KeyboardEngine {
    /// Creates an engine over the given panel and layout.
    ///
    /// Pass `None` for `haptics` on hosts without a vibration capability.
    #[must_use]
    pub fn new(
        config: EngineConfig,
        layout: Layout,
        panel: Arc<dyn PanelSurface>,
        haptics: Option<Arc<dyn HapticFeedback>>,
    ) -> Self {
        let (events, edit_rx) = broadcast::channel(KEY_EVENT_BUS_CAPACITY);
        let registry = InputRegistry::new();
        let visibility = VisibilityController::new(Arc::clone(&panel));
        visibility.set_force_open(config.force_open);
        let dispatcher = KeyDispatcher::new(registry.clone(), events.clone(), haptics);
        let resize = ResizeController::new(panel);

        Self {
            config,
            layout,
            registry,
            mode: ModeController::new(),
            visibility,
            dispatcher,
            resize,
            events,
            edit_rx: Some(edit_rx),
            edit_task: None,
        }
    }

    /// Drives the engine until the host event channel closes.
    ///
    /// Starts the direct-edit listener, then resolves host events in
    /// arrival order.
    pub async fn run(mut self, mut host_events: mpsc::Receiver<HostEvent>) {
        self.spawn_direct_edit_listener();
        tracing::info!(
            scope = self.config.scope.as_deref().unwrap_or("body"),
            layout = %self.layout.name,
            "keyboard engine running"
        );

        while let Some(event) = host_events.next().await {
            self.handle_event(event);
        }

        tracing::warn!("host event channel closed, engine stopping");
    }

    /// Routes a single host event.
    pub fn handle_event(&mut self, event: HostEvent) {
        tracing::debug!(?event, "host event");
        match event {
            HostEvent::FieldsAdded(targets) => {
                self.registry.bind(targets, self.mode.hint());
            }
            HostEvent::FieldsRemoved(ids) => {
                self.registry.unbind(&ids);
            }
            HostEvent::Focused(id) => {
                if self.registry.handle_focus(id) {
                    self.visibility.open();
                }
            }
            HostEvent::Blurred(id) => {
                if self.registry.handle_blur(id) {
                    self.visibility.close();
                }
            }
            HostEvent::KeyActivated(code) => self.activate_key(code),
            HostEvent::ToggleModeRequested => self.toggle_mode(),
            HostEvent::DragStarted(y) => self.resize.begin_drag(y),
            HostEvent::DragMoved(y) => {
                self.resize.drag_move(y);
            }
            HostEvent::DragEnded => self.resize.end_drag(),
        }
    }

    /// Opens the overlay irrespective of focus.
    pub fn open_keyboard(&self) {
        self.visibility.open();
    }

    /// Requests the overlay closed (debounced like any other close).
    pub fn close_keyboard(&self) {
        self.visibility.close();
    }

    /// Sets the override keeping the panel open irrespective of blur.
    pub fn set_force_open(&mut self, force_open: bool) {
        self.config.force_open = force_open;
        self.visibility.set_force_open(force_open);
    }

    /// Flips between the overlay and the platform keyboard.
    pub fn toggle_mode(&mut self) {
        self.mode.toggle(&self.registry, &self.visibility);
    }

    /// Dispatches the virtual key with the given code.
    ///
    /// Codes absent from the layout are logged and dropped.
    pub fn activate_key(&self, code: u32) {
        match self.layout.key(code) {
            Some(key) => self.dispatcher.activate(key),
            None => tracing::warn!(code, "activation for unknown key code dropped"),
        }
    }

    /// Tracks a pointer move during a resize drag.
    ///
    /// Returns `true` when the move was consumed and should not bubble.
    pub fn drag_move(&mut self, y: f32) -> bool {
        self.resize.drag_move(y)
    }

    /// Subscribes a listener to the synthetic keystroke bus.
    #[must_use]
    pub fn subscribe_keys(&self) -> broadcast::Receiver<KeyboardEvent> {
        self.events.subscribe()
    }

    /// The visibility controller (cloneable for host-facing handles).
    #[must_use]
    pub fn visibility(&self) -> &VisibilityController {
        &self.visibility
    }

    /// The registry of bound fields.
    #[must_use]
    pub fn registry(&self) -> &InputRegistry {
        &self.registry
    }

    /// The watched scope, defaulting to the whole page body.
    #[must_use]
    pub fn scope(&self) -> &str {
        self.config.scope.as_deref().unwrap_or("body")
    }

    /// Starts the page-wide listener applying direct edits for untrusted
    /// press events on the bus.
    fn spawn_direct_edit_listener(&mut self) {
        let Some(mut rx) = self.edit_rx.take() else {
            return;
        };
        let dispatcher = self.dispatcher.clone();
        let handle = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => dispatcher.apply_synthetic_edit(&event),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "direct-edit listener lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        self.edit_task = Some(handle);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
