// SPDX-License-Identifier: GPL-3.0-only

//! Key layout definitions for the overlay keyboard.
//!
//! A [`Layout`] is the immutable table of virtual keys the overlay offers:
//! each [`KeyDefinition`] carries the key code broadcast in synthetic
//! events, the character it produces, whether it implies shift, and its
//! special role (plain character, backspace, enter).
//!
//! The built-in [`Layout::numeric`] keypad is always available; custom
//! layouts load from JSON via [`Layout::from_json`] / [`Layout::from_path`]
//! and are validated structurally before use (see [`parser`]).

pub mod parser;

pub use parser::{LayoutError, ValidationIssue};

use serde::Deserialize;

use crate::app_settings::DEFAULT_LAYOUT_NAME;

/// Key code carried by backspace activations.
///
/// The direct-edit listener keys its deletion path off this code.
pub const BACKSPACE_CODE: u32 = 8;

/// Key code carried by enter activations.
pub const ENTER_CODE: u32 = 13;

/// Special role of a virtual key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyRole {
    /// An ordinary character-producing key.
    #[default]
    Character,
    /// Deletes before the caret or the current selection.
    Backspace,
    /// Commits the field; broadcast as a key-down rather than a press.
    Enter,
}

/// Immutable definition of a single virtual key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KeyDefinition {
    /// Key code broadcast in synthetic keystroke events.
    pub code: u32,
    /// Character (or label) the key produces.
    pub character: String,
    /// Whether the key implies a held shift.
    #[serde(default)]
    pub shift_required: bool,
    /// Special role, defaulting to a plain character key.
    #[serde(default)]
    pub role: KeyRole,
}

impl KeyDefinition {
    /// Creates a plain character key.
    #[must_use]
    pub fn character(code: u32, character: impl Into<String>) -> Self {
        Self {
            code,
            character: character.into(),
            shift_required: false,
            role: KeyRole::Character,
        }
    }

    /// Creates a shifted character key.
    #[must_use]
    pub fn shifted(code: u32, character: impl Into<String>) -> Self {
        Self {
            shift_required: true,
            ..Self::character(code, character)
        }
    }
}

/// An immutable table of virtual keys.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Layout {
    /// Layout name, used in logs and diagnostics.
    pub name: String,
    /// The keys in presentation order.
    keys: Vec<KeyDefinition>,
}

impl Layout {
    /// The built-in numeric keypad.
    ///
    /// Covers the digits, the signs, the decimal point, the scientific
    /// `e`, backspace, and enter.
    #[must_use]
    pub fn numeric() -> Self {
        let keys = vec![
            KeyDefinition::character(69, "e"),
            KeyDefinition::character(55, "7"),
            KeyDefinition::character(56, "8"),
            KeyDefinition::character(57, "9"),
            KeyDefinition::character(52, "4"),
            KeyDefinition::character(53, "5"),
            KeyDefinition::character(54, "6"),
            KeyDefinition::character(189, "-"),
            KeyDefinition::character(49, "1"),
            KeyDefinition::character(50, "2"),
            KeyDefinition::character(51, "3"),
            KeyDefinition {
                code: BACKSPACE_CODE,
                character: "DEL".to_string(),
                shift_required: false,
                role: KeyRole::Backspace,
            },
            KeyDefinition::shifted(187, "+"),
            KeyDefinition::character(48, "0"),
            KeyDefinition::character(190, "."),
            KeyDefinition {
                code: ENTER_CODE,
                character: "\u{23ce}".to_string(),
                shift_required: false,
                role: KeyRole::Enter,
            },
        ];

        Self {
            name: DEFAULT_LAYOUT_NAME.to_string(),
            keys,
        }
    }

    /// Looks up the definition for a key code.
    #[must_use]
    pub fn key(&self, code: u32) -> Option<&KeyDefinition> {
        self.keys.iter().find(|key| key.code == code)
    }

    /// All key definitions in presentation order.
    pub fn keys(&self) -> impl Iterator<Item = &KeyDefinition> {
        self.keys.iter()
    }

    /// Number of keys in the layout.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the layout has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::numeric()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
