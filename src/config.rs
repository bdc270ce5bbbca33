// SPDX-License-Identifier: GPL-3.0-only

//! Engine configuration supplied by the host.
//!
//! Nothing here persists across sessions; the host constructs (or
//! deserializes) a config at startup and hands it to the engine.

use serde::Deserialize;

/// Host-supplied engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Name of the host subtree watched for newly inserted fields.
    ///
    /// `None` means the whole page body. The discovery adapter is
    /// responsible for honoring it; the engine records it for diagnostics.
    pub scope: Option<String>,

    /// Keep the panel open irrespective of focus and blur.
    pub force_open: bool,
}

// ============================================================================
// Unit Tests
// ============================================================================
