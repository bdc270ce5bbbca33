// SPDX-License-Identifier: GPL-3.0-only

//! Loading and validation of JSON layout definitions.
//!
//! A layout document is a JSON object with a `name` and a `keys` array:
//!
//! ```json
//! {
//!   "name": "numeric",
//!   "keys": [
//!     { "code": 55, "character": "7" },
//!     { "code": 187, "character": "+", "shift_required": true },
//!     { "code": 8, "character": "DEL", "role": "backspace" },
//!     { "code": 13, "character": "⏎", "role": "enter" }
//!   ]
//! }
//! ```
//!
//! Parsing is a two-stage pass: serde deserialization, then structural
//! validation. Validation accumulates every issue found rather than
//! stopping at the first, so a malformed layout reports all of its
//! problems at once.

use std::fmt;
use std::path::Path;

use crate::layout::{KeyRole, Layout};

/// A structural problem discovered while validating a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Human-readable description of the issue.
    pub message: String,
    /// Path to the field that caused it (e.g. `keys[3].character`).
    pub field_path: String,
}

impl ValidationIssue {
    /// Creates a new validation issue.
    pub fn new(message: impl Into<String>, field_path: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_path: field_path.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field_path, self.message)
    }
}

/// Error type for layout loading operations.
#[derive(Debug)]
pub enum LayoutError {
    /// I/O error while reading a layout file.
    Io {
        /// The underlying I/O error.
        source: std::io::Error,
        /// The file path that failed to load.
        file_path: String,
    },

    /// JSON deserialization error.
    Json {
        /// The underlying JSON error.
        source: serde_json::Error,
        /// Line number where the error occurred, when known.
        line_number: Option<usize>,
    },

    /// Structural validation failed.
    Validation {
        /// Every issue found in the document.
        issues: Vec<ValidationIssue>,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Io { source, file_path } => {
                write!(f, "failed to read layout file {file_path}: {source}")
            }
            LayoutError::Json {
                source,
                line_number,
            } => match line_number {
                Some(line) => write!(f, "invalid layout JSON at line {line}: {source}"),
                None => write!(f, "invalid layout JSON: {source}"),
            },
            LayoutError::Validation { issues } => {
                write!(f, "layout validation failed with {} issue(s):", issues.len())?;
                for issue in issues {
                    write!(f, "\n  {issue}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LayoutError::Io { source, .. } => Some(source),
            LayoutError::Json { source, .. } => Some(source),
            LayoutError::Validation { .. } => None,
        }
    }
}

impl Layout {
    /// Parses and validates a layout from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let layout: Layout = serde_json::from_str(json).map_err(|source| {
            let line_number = match source.line() {
                0 => None,
                line => Some(line),
            };
            LayoutError::Json {
                source,
                line_number,
            }
        })?;

        let issues = validate(&layout);
        if issues.is_empty() {
            tracing::debug!(name = %layout.name, keys = layout.len(), "layout loaded");
            Ok(layout)
        } else {
            Err(LayoutError::Validation { issues })
        }
    }

    /// Reads, parses, and validates a layout file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LayoutError::Io {
            source,
            file_path: path.display().to_string(),
        })?;
        Self::from_json(&json)
    }
}

/// Validates a deserialized layout, accumulating every issue found.
fn validate(layout: &Layout) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if layout.name.is_empty() {
        issues.push(ValidationIssue::new("layout name is empty", "name"));
    }

    if layout.is_empty() {
        issues.push(ValidationIssue::new("layout defines no keys", "keys"));
    }

    let mut seen_codes = std::collections::HashSet::new();
    let mut enter_count = 0usize;
    let mut backspace_count = 0usize;

    for (index, key) in layout.keys().enumerate() {
        let path = format!("keys[{index}]");

        if key.character.is_empty() {
            issues.push(ValidationIssue::new(
                "key character is empty",
                format!("{path}.character"),
            ));
        }

        if !seen_codes.insert(key.code) {
            issues.push(ValidationIssue::new(
                format!("duplicate key code {}", key.code),
                format!("{path}.code"),
            ));
        }

        match key.role {
            KeyRole::Enter => enter_count += 1,
            KeyRole::Backspace => backspace_count += 1,
            KeyRole::Character => {}
        }
    }

    if enter_count > 1 {
        issues.push(ValidationIssue::new(
            format!("{enter_count} keys carry the enter role, at most one is allowed"),
            "keys",
        ));
    }

    if backspace_count > 1 {
        issues.push(ValidationIssue::new(
            format!("{backspace_count} keys carry the backspace role, at most one is allowed"),
            "keys",
        ));
    }

    issues
}

// ============================================================================
// Unit Tests
// ============================================================================
