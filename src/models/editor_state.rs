//! Editor state management
//!
//! This module contains the EditorState struct which represents the complete
//! state of a timetable editing session: the grid, the subject catalog, the
//! faculty roster, section metadata, and the cell-editing state machine.
//!
//! The state machine has two states: no cell selected, or exactly one cell
//! under edit. Field updates apply immediately (always-commit); leaving edit
//! mode deselects without rolling anything back.

use serde::{Deserialize, Serialize};

use crate::models::catalog::{SubjectCatalog, TimetableMeta};
use crate::models::grid::{ClassCell, ClassType, Grid};
use crate::structure::EditError;

/// Address of one cell in the grid
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRef {
    pub day: usize,
    pub cell: usize,
}

/// Severity of a transient status message
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// A transient, user-facing status message
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

/// The editable fields of a selected cell
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CellField {
    Subject,
    #[serde(rename = "type")]
    ClassType,
    Faculty,
}

impl CellField {
    /// Parse a field name as the host UI sends it
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "subject" => Some(CellField::Subject),
            "type" | "class_type" => Some(CellField::ClassType),
            "faculty" => Some(CellField::Faculty),
            _ => None,
        }
    }
}

/// Complete state of one timetable editing session
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EditorState {
    /// The grid being edited
    pub grid: Grid,

    /// Subjects offered by the department, with default faculty bindings
    pub subjects: SubjectCatalog,

    /// Faculty display names for selection controls and conflict queries
    pub faculty: Vec<String>,

    /// College/section metadata required for persistence
    pub meta: TimetableMeta,

    /// Global edit mode; off means the grid is read-only in the UI
    pub edit_mode: bool,

    /// The cell under interactive edit, if any
    pub selection: Option<CellRef>,

    /// Identifier assigned by the persistence service after the first save
    pub timetable_id: Option<String>,

    /// Pending transient status message, handed to the UI once
    #[serde(skip)]
    status: Option<StatusMessage>,
}

impl EditorState {
    /// Create a fresh session over the default skeleton grid
    pub fn new() -> Self {
        Self::with_grid(Grid::skeleton())
    }

    /// Create a session over an existing grid
    pub fn with_grid(grid: Grid) -> Self {
        Self {
            grid,
            subjects: SubjectCatalog::new(),
            faculty: Vec::new(),
            meta: TimetableMeta::default(),
            edit_mode: false,
            selection: None,
            timetable_id: None,
            status: None,
        }
    }

    // ==================== Status channel ====================

    pub fn set_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            level,
            text: text.into(),
        });
    }

    /// Take the pending status message, leaving none behind
    pub fn take_status(&mut self) -> Option<StatusMessage> {
        self.status.take()
    }

    // ==================== Cell editing state machine ====================

    /// Toggle global edit mode. Turning it off deselects the current cell;
    /// field edits already applied stay applied (always-commit).
    pub fn set_edit_mode(&mut self, on: bool) {
        self.edit_mode = on;
        if !on {
            self.selection = None;
        }
    }

    /// Select a cell for editing
    ///
    /// Requires edit mode to be on, the indices to be in range, and the
    /// target not to be a recess period.
    pub fn select_cell(&mut self, day: usize, cell: usize) -> Result<(), EditError> {
        if !self.edit_mode {
            return Err(EditError::EditModeOff);
        }
        let target = self
            .grid
            .cell(day, cell)
            .ok_or(EditError::CellOutOfRange { day, cell })?;
        if target.is_recess() {
            return Err(EditError::RecessCell);
        }
        self.selection = Some(CellRef { day, cell });
        Ok(())
    }

    /// Clear the selection without touching edit mode
    pub fn deselect(&mut self) {
        self.selection = None;
    }

    /// The currently selected cell, if any
    pub fn selected_cell(&self) -> Option<&ClassCell> {
        self.selection.and_then(|s| self.grid.cell(s.day, s.cell))
    }

    /// Update one field of the selected cell, applied immediately
    ///
    /// Choosing a subject that exists in the catalog also overwrites the
    /// cell's faculty with the catalog's default binding, even if a
    /// different faculty was assigned before.
    pub fn update_field(&mut self, field: CellField, value: &str) -> Result<(), EditError> {
        let sel = self.selection.ok_or(EditError::NoSelection)?;

        // Catalog lookup happens before the cell borrow
        let seeded = match field {
            CellField::Subject => self
                .subjects
                .find_by_name(value)
                .map(|e| (e.name.clone(), e.faculty.clone())),
            _ => None,
        };

        let cell = self
            .grid
            .cell_mut(sel.day, sel.cell)
            .ok_or(EditError::CellOutOfRange {
                day: sel.day,
                cell: sel.cell,
            })?;

        match cell {
            ClassCell::Recess => Err(EditError::RecessCell),
            ClassCell::Class {
                subject,
                class_type,
                faculty,
            } => {
                match field {
                    CellField::Subject => match seeded {
                        Some((name, default_faculty)) => {
                            *subject = name;
                            *faculty = default_faculty;
                        }
                        None => *subject = value.to_string(),
                    },
                    CellField::ClassType => {
                        *class_type = parse_class_type(value)?;
                    }
                    CellField::Faculty => *faculty = value.to_string(),
                }
                Ok(())
            }
            ClassCell::AllDay {
                subject,
                class_type,
            } => match field {
                CellField::Subject => {
                    *subject = value.to_string();
                    Ok(())
                }
                CellField::ClassType => {
                    *class_type = parse_class_type(value)?;
                    Ok(())
                }
                CellField::Faculty => Err(EditError::NoFacultyField),
            },
        }
    }

    // ==================== Structural glue ====================

    /// Apply the outcome of a structural reducer
    ///
    /// On success the new grid replaces the old one and a stale selection is
    /// dropped; on rejection the error text becomes the status message.
    /// Returns whether the grid changed.
    pub fn apply_structural(&mut self, outcome: Result<Grid, EditError>) -> bool {
        match outcome {
            Ok(grid) => {
                self.grid = grid;
                self.drop_stale_selection();
                true
            }
            Err(err) => {
                self.set_status(StatusLevel::Error, err.to_string());
                false
            }
        }
    }

    fn drop_stale_selection(&mut self) {
        if let Some(sel) = self.selection {
            let still_editable = self
                .grid
                .cell(sel.day, sel.cell)
                .map(|c| !c.is_recess())
                .unwrap_or(false);
            if !still_editable {
                self.selection = None;
            }
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_class_type(value: &str) -> Result<ClassType, EditError> {
    ClassType::from_label(value).ok_or_else(|| EditError::UnknownClassType(value.to_string()))
}
