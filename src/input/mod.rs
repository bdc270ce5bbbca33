// SPDX-License-Identifier: GPL-3.0-only

//! Input handling for the overlay keyboard.
//!
//! This module turns virtual key activations into host-observable input:
//!
//! - **Synthetic keystroke events**: every activation is broadcast on a
//!   page-wide bus so host key listeners see virtual input exactly as they
//!   would see physical input ([`events`]).
//! - **Direct text editing**: when the platform keyboard is suppressed,
//!   the active field is edited directly: backspace deletion honoring the
//!   selection, append-at-end for character keys ([`dispatcher`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use padboard::input::{KeyDispatcher, KeyboardEvent};
//! use padboard::layout::Layout;
//!
//! let layout = Layout::numeric();
//! if let Some(key) = layout.key(55) {
//!     dispatcher.activate(key); // haptics + broadcast
//! }
//! ```

// Sub-modules
pub mod dispatcher;
pub mod events;

// Re-export public API
pub use dispatcher::KeyDispatcher;
pub use events::{KeyEventBus, KeyEventKind, KeyboardEvent};

// ============================================================================
// Module Tests
// ============================================================================
