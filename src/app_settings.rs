// SPDX-License-Identifier: GPL-3.0-only

//! Centralized engine settings and constants.

/// Interval between deferred rendering opportunities in milliseconds.
///
/// Deferred visibility work (the slide-in after a show, the close check)
/// runs one frame after it is scheduled, matching a 60fps host surface.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Duration of the panel slide transition in milliseconds.
///
/// The close flow waits this long between sliding the panel out and hiding
/// it entirely, matching the visual transition length.
pub const CLOSE_TRANSITION_MS: u64 = 300;

/// Haptic pulse duration for a virtual key tap in milliseconds.
pub const KEY_VIBRATION_MS: u32 = 10;

/// Capacity of the host event channel feeding the engine loop.
pub const HOST_EVENT_CHANNEL_CAPACITY: usize = 32;

/// Capacity of the synthetic keystroke broadcast bus.
pub const KEY_EVENT_BUS_CAPACITY: usize = 64;

/// Name of the built-in key layout.
pub const DEFAULT_LAYOUT_NAME: &str = "numeric";
