//! Renderers module for the timetable editor
//!
//! This module contains rendering/export logic for projecting the grid into
//! non-interactive output formats.

pub mod html;

// Re-export commonly used types
pub use html::{render_timetable, ExportError};
