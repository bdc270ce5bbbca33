// SPDX-License-Identifier: GPL-3.0-only

//! Padboard demo
//!
//! Drives the keyboard engine against a scripted in-memory host page:
//! two fields appear, the first gains focus, virtual keys type into it,
//! a backspace trims it, focus hops to the second field, and the mode
//! toggle hands input back to the platform keyboard.
//!
//! Run with `RUST_LOG=padboard=debug` to watch the state machine work.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::sync::Arc;
use std::time::Duration;

use futures::SinkExt;
use futures::channel::mpsc;

use padboard::app_settings::HOST_EVENT_CHANNEL_CAPACITY;
use padboard::config::EngineConfig;
use padboard::engine::KeyboardEngine;
use padboard::host::{
    HostEvent, InputHint, PanelSurface, TargetId, TextEntryTarget,
};
use padboard::layout::Layout;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A text field living entirely in memory.
struct DemoField {
    id: TargetId,
    label: &'static str,
    state: Mutex<(String, (usize, usize))>,
}

impl DemoField {
    fn new(id: u64, label: &'static str) -> Self {
        Self {
            id: TargetId(id),
            label,
            state: Mutex::new((String::new(), (0, 0))),
        }
    }
}

impl TextEntryTarget for DemoField {
    fn id(&self) -> TargetId {
        self.id
    }

    fn value(&self) -> String {
        lock(&self.state).0.clone()
    }

    fn set_value(&self, value: String) {
        lock(&self.state).0 = value;
    }

    fn selection(&self) -> (usize, usize) {
        lock(&self.state).1
    }

    fn set_selection(&self, start: usize, end: usize) {
        lock(&self.state).1 = (start, end);
    }

    fn set_input_hint(&self, hint: InputHint) {
        tracing::info!(field = self.label, %hint, "input hint applied");
    }
}

/// A panel that narrates its transitions instead of rendering them.
struct DemoPanel;

impl PanelSurface for DemoPanel {
    fn show(&self) {
        tracing::info!("panel: visible (off-screen)");
    }

    fn slide_in(&self) {
        tracing::info!("panel: sliding in");
    }

    fn slide_out(&self) {
        tracing::info!("panel: sliding out");
    }

    fn hide(&self) {
        tracing::info!("panel: hidden");
    }

    fn set_vertical_offset(&self, y: f32) {
        tracing::info!(y, "panel: repositioned");
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("padboard=info".parse().expect("valid directive")),
        )
        .init();

    let amount = Arc::new(DemoField::new(1, "amount"));
    let quantity = Arc::new(DemoField::new(2, "quantity"));

    let engine = KeyboardEngine::new(
        EngineConfig {
            scope: Some("#order-form".to_string()),
            force_open: false,
        },
        Layout::numeric(),
        Arc::new(DemoPanel),
        None,
    );
    let mut keys = engine.subscribe_keys();
    tokio::spawn(async move {
        while let Ok(event) = keys.recv().await {
            tracing::info!(
                character = %event.character,
                code = event.code,
                kind = ?event.kind,
                "key event observed"
            );
        }
    });

    let (mut tx, rx) = mpsc::channel(HOST_EVENT_CHANNEL_CAPACITY);
    tokio::spawn(engine.run(rx));

    // The form renders its fields; the watcher reports them.
    tx.send(HostEvent::FieldsAdded(vec![
        amount.clone() as Arc<dyn TextEntryTarget>,
        quantity.clone() as Arc<dyn TextEntryTarget>,
    ]))
    .await
    .expect("engine running");

    // The user taps into the amount field and types 12.5 with a typo.
    tx.send(HostEvent::Focused(TargetId(1))).await.expect("engine running");
    for code in [49, 50, 190, 52] {
        tx.send(HostEvent::KeyActivated(code)).await.expect("engine running");
    }
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Fix the typo: caret after the '4', one backspace, then the '5'.
    amount.set_selection(4, 4);
    tx.send(HostEvent::KeyActivated(8)).await.expect("engine running");
    tx.send(HostEvent::KeyActivated(53)).await.expect("engine running");
    tokio::time::sleep(Duration::from_millis(50)).await;
    tracing::info!(value = %amount.value(), "amount after editing");

    // Hop to the quantity field; the debounce keeps the panel up.
    tx.send(HostEvent::Blurred(TargetId(1))).await.expect("engine running");
    tx.send(HostEvent::Focused(TargetId(2))).await.expect("engine running");
    tx.send(HostEvent::KeyActivated(51)).await.expect("engine running");
    tokio::time::sleep(Duration::from_millis(50)).await;
    tracing::info!(value = %quantity.value(), "quantity after editing");

    // Drag the panel upward.
    tx.send(HostEvent::DragStarted(600.0)).await.expect("engine running");
    tx.send(HostEvent::DragMoved(540.0)).await.expect("engine running");
    tx.send(HostEvent::DragEnded).await.expect("engine running");

    // Hand input back to the platform keyboard and let the close finish.
    tx.send(HostEvent::ToggleModeRequested).await.expect("engine running");
    tokio::time::sleep(Duration::from_millis(400)).await;

    tracing::info!("demo complete");
}
