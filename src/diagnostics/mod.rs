//! Diagnostics module for schedule error detection
//!
//! Generic diagnostic system that detects and reports scheduling problems.
//! Faculty double-booking is the first customer, but the mark shape is
//! designed for reuse with other checks (ragged rows, empty catalogs, etc.)

pub mod conflicts;

use serde::{Deserialize, Serialize};

pub use conflicts::{collect_conflicts, has_conflict};

/// Severity level for diagnostic marks
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Info,
}

/// A diagnostic mark highlighting an issue at a specific cell
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DiagnosticMark {
    /// Day index in the grid
    pub day: usize,
    /// Cell index within the day
    pub cell: usize,
    /// Severity level
    pub severity: DiagnosticSeverity,
    /// Kind identifier (e.g., "faculty_double_booking")
    pub kind: String,
    /// Human-readable message
    pub message: String,
}

impl DiagnosticMark {
    /// Create a new diagnostic mark
    pub fn new(
        day: usize,
        cell: usize,
        severity: DiagnosticSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            day,
            cell,
            severity,
            kind: kind.into(),
            message: message.into(),
        }
    }
}
