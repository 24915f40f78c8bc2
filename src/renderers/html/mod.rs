//! Static HTML export of the timetable grid
//!
//! Renders the current grid into a self-contained, print-ready HTML document
//! through a Mustache template. This is a one-way projection: there is no
//! importer for the produced document.

use serde::Serialize;
use thiserror::Error;

use crate::models::catalog::TimetableMeta;
use crate::models::grid::{ClassCell, Grid};

/// Export failure (template compilation or rendering)
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("template error: {0}")]
    Template(#[from] mustache::Error),
}

/// Context data for template rendering
#[derive(Debug, Clone, Serialize)]
struct TemplateContext {
    /// Document title shown in the tab and the heading
    title: String,
    college: String,
    has_college: bool,
    department: String,
    semester: String,
    section: String,
    /// Column headers, one per time slot
    slots: Vec<SlotContext>,
    /// One row per day
    rows: Vec<RowContext>,
}

#[derive(Debug, Clone, Serialize)]
struct SlotContext {
    label: String,
}

#[derive(Debug, Clone, Serialize)]
struct RowContext {
    day: String,
    cells: Vec<CellContext>,
}

#[derive(Debug, Clone, Serialize)]
struct CellContext {
    subject: String,
    detail: String,
    has_detail: bool,
    css_class: String,
    col_span: usize,
    spanned: bool,
}

impl CellContext {
    fn from_cell(cell: &ClassCell, slot_count: usize) -> Self {
        match cell {
            ClassCell::Class {
                subject,
                class_type,
                faculty,
            } => {
                if subject.is_empty() {
                    Self {
                        subject: "\u{2014}".to_string(),
                        detail: String::new(),
                        has_detail: false,
                        css_class: "cell free".to_string(),
                        col_span: 1,
                        spanned: false,
                    }
                } else {
                    let detail = if faculty.is_empty() {
                        class_type.label().to_string()
                    } else {
                        format!("{} \u{00b7} {}", class_type.label(), faculty)
                    };
                    Self {
                        subject: subject.clone(),
                        detail,
                        has_detail: true,
                        css_class: "cell".to_string(),
                        col_span: 1,
                        spanned: false,
                    }
                }
            }
            ClassCell::Recess => Self {
                subject: "RECESS".to_string(),
                detail: String::new(),
                has_detail: false,
                css_class: "cell recess".to_string(),
                col_span: 1,
                spanned: false,
            },
            ClassCell::AllDay {
                subject,
                class_type,
            } => Self {
                subject: subject.clone(),
                detail: class_type.label().to_string(),
                has_detail: true,
                css_class: "cell allday".to_string(),
                // The one place the span is materialized: full grid width
                col_span: slot_count,
                spanned: true,
            },
        }
    }
}

fn build_context(meta: &TimetableMeta, grid: &Grid) -> TemplateContext {
    let title = if meta.department.is_empty() {
        "Timetable".to_string()
    } else {
        format!(
            "{} Timetable \u{2014} Sem {} / Sec {}",
            meta.department, meta.semester, meta.section
        )
    };

    TemplateContext {
        title,
        college: meta.college.clone(),
        has_college: !meta.college.is_empty(),
        department: meta.department.clone(),
        semester: meta.semester.clone(),
        section: meta.section.clone(),
        slots: grid
            .time_slots
            .iter()
            .map(|label| SlotContext {
                label: label.clone(),
            })
            .collect(),
        rows: grid
            .days
            .iter()
            .map(|day| RowContext {
                day: day.name.clone(),
                cells: day
                    .cells
                    .iter()
                    .map(|cell| CellContext::from_cell(cell, grid.slot_count()))
                    .collect(),
            })
            .collect(),
    }
}

/// Render the grid into a static typeset HTML document
pub fn render_timetable(meta: &TimetableMeta, grid: &Grid) -> Result<String, ExportError> {
    let template = mustache::compile_str(include_str!("templates/timetable.html.mustache"))?;
    let context = build_context(meta, grid);
    Ok(template.render_to_string(&context)?)
}
