//! Models module for the timetable grid editor
//!
//! This module contains the data models and structures used in the
//! Grid-based timetable editing system.

pub mod catalog;
pub mod editor_state;
pub mod grid;

// Re-export commonly used types
pub use catalog::{SubjectCatalog, SubjectEntry, TimetableMeta};
pub use editor_state::{CellField, CellRef, EditorState, StatusLevel, StatusMessage};
pub use grid::{ClassCell, ClassType, Day, Grid, GridError};
