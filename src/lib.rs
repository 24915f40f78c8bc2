//! Institutional Timetable Editor WASM Module
//!
//! This is the main WASM module for the institutional timetable grid editor.
//! It provides core functionality for Grid-based schedule editing: structural
//! edits, per-cell assignment, faculty conflict detection, and export/sync.

pub mod models;
pub mod structure;
pub mod diagnostics;
pub mod renderers;
pub mod sync;

#[cfg(target_arch = "wasm32")]
pub mod api;

// Re-export commonly used types
pub use models::grid::{ClassCell, ClassType, Day, Grid, GridError};
pub use models::catalog::{SubjectCatalog, SubjectEntry, TimetableMeta};
pub use models::editor_state::{CellField, CellRef, EditorState, StatusLevel, StatusMessage};
pub use structure::EditError;
