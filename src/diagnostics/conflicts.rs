//! Faculty conflict detection - finds double-booked faculty within a day
//!
//! A conflict is the same faculty assigned to two teaching cells on the same
//! day. Recess cells, all-day cells, free periods, and cells typed Break or
//! Activity never count as the *other* booking. Cross-day load is
//! deliberately not checked; the guarantee is day-scoped.

use crate::models::grid::{ClassCell, ClassType, Grid};

use super::{DiagnosticMark, DiagnosticSeverity};

/// Does assigning `faculty` at (`day_index`, `cell_index`) double-book them?
///
/// Scans the other cells of the same day. Pure, O(cells-per-day); meant to
/// be called once per rendered cell per render pass.
pub fn has_conflict(grid: &Grid, day_index: usize, cell_index: usize, faculty: &str) -> bool {
    if faculty.is_empty() {
        return false;
    }
    let Some(day) = grid.day(day_index) else {
        return false;
    };
    day.cells
        .iter()
        .enumerate()
        .any(|(idx, cell)| idx != cell_index && books_faculty(cell, faculty))
}

/// Whether a cell counts as a real booking of `faculty`
fn books_faculty(cell: &ClassCell, faculty: &str) -> bool {
    match cell {
        ClassCell::Class {
            subject,
            class_type,
            faculty: assigned,
        } => {
            assigned == faculty
                && !subject.is_empty()
                && !matches!(class_type, ClassType::Break | ClassType::Activity)
        }
        ClassCell::Recess | ClassCell::AllDay { .. } => false,
    }
}

/// Sweep the whole grid and mark every double-booked cell
///
/// One mark per conflicting cell, so the host UI can highlight without
/// re-querying per render.
pub fn collect_conflicts(grid: &Grid) -> Vec<DiagnosticMark> {
    let mut marks = Vec::new();

    for (day_idx, day) in grid.days.iter().enumerate() {
        for (cell_idx, cell) in day.cells.iter().enumerate() {
            let ClassCell::Class { faculty, .. } = cell else {
                continue;
            };
            if !faculty.is_empty() && has_conflict(grid, day_idx, cell_idx, faculty) {
                marks.push(DiagnosticMark::new(
                    day_idx,
                    cell_idx,
                    DiagnosticSeverity::Warning,
                    "faculty_double_booking",
                    format!("{} is double-booked on {}", faculty, day.name),
                ));
            }
        }
    }

    marks
}
