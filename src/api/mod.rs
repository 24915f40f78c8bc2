//! Timetable Editor WASM API
//!
//! This module provides the JavaScript-facing API for the timetable grid
//! editor. The module owns the editor state (canonical source of truth); the
//! host UI calls the exported functions and re-renders from the returned
//! snapshots.
//!
//! Mutating calls answer with an `ApiStatus { ok, message }` value so the
//! host can surface rejections as transient status messages without
//! unwrapping exceptions.

use std::sync::Mutex;

use lazy_static::lazy_static;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::diagnostics;
use crate::models::editor_state::{CellField, EditorState};
use crate::models::grid::ClassType;
use crate::renderers;
use crate::structure;
use crate::sync::TimetableDocument;

// WASM-owned editor state (canonical source of truth)
lazy_static! {
    static ref EDITOR: Mutex<EditorState> = Mutex::new(EditorState::new());
}

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("Timetable editor WASM module initialized");
}

/// Outcome of a mutating call, serialized back to the host
#[derive(Serialize, Clone, Debug)]
pub struct ApiStatus {
    pub ok: bool,
    pub message: Option<String>,
}

impl ApiStatus {
    fn ok() -> Self {
        Self {
            ok: true,
            message: None,
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: Some(message.into()),
        }
    }

    fn into_js(self) -> JsValue {
        serde_wasm_bindgen::to_value(&self).unwrap_or(JsValue::NULL)
    }
}

fn with_editor<F>(f: F) -> JsValue
where
    F: FnOnce(&mut EditorState) -> ApiStatus,
{
    let mut editor = EDITOR.lock().unwrap_or_else(|e| e.into_inner());
    f(&mut editor).into_js()
}

/// Apply a structural reducer outcome and report it to the host
fn structural(
    state: &mut EditorState,
    outcome: Result<crate::models::grid::Grid, structure::EditError>,
) -> ApiStatus {
    match outcome {
        Ok(grid) => {
            state.apply_structural(Ok(grid));
            ApiStatus::ok()
        }
        Err(err) => ApiStatus::rejected(err.to_string()),
    }
}

// ============================================================================
// Session lifecycle
// ============================================================================

/// Reset the session to the default skeleton grid
#[wasm_bindgen(js_name = newTimetable)]
pub fn new_timetable() -> JsValue {
    log::info!("newTimetable called");
    with_editor(|state| {
        *state = EditorState::new();
        ApiStatus::ok()
    })
}

/// Replace the session from a persisted document (JSON)
#[wasm_bindgen(js_name = loadDocumentJson)]
pub fn load_document_json(json: &str) -> JsValue {
    log::info!("loadDocumentJson called ({} bytes)", json.len());
    with_editor(|state| match serde_json::from_str::<TimetableDocument>(json) {
        Ok(document) => {
            let hydrated = document.hydrate();
            state.timetable_id = hydrated.id;
            state.meta = hydrated.meta;
            state.grid = hydrated.grid;
            state.subjects = hydrated.subjects;
            state.faculty = hydrated.faculty;
            state.deselect();
            ApiStatus::ok()
        }
        Err(err) => ApiStatus::rejected(format!("could not read the document: {}", err)),
    })
}

/// Current session state as a JSON snapshot for rendering
#[wasm_bindgen(js_name = stateJson)]
pub fn state_json() -> Result<String, JsValue> {
    let editor = EDITOR.lock().unwrap_or_else(|e| e.into_inner());
    serde_json::to_string(&*editor).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Current grid as a wire document (JSON), for the host's persistence calls
#[wasm_bindgen(js_name = documentJson)]
pub fn document_json() -> Result<String, JsValue> {
    let editor = EDITOR.lock().unwrap_or_else(|e| e.into_inner());
    serde_json::to_string(&TimetableDocument::from_state(&editor))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Take the pending transient status message, if any
#[wasm_bindgen(js_name = takeStatus)]
pub fn take_status() -> JsValue {
    let mut editor = EDITOR.lock().unwrap_or_else(|e| e.into_inner());
    match editor.take_status() {
        Some(status) => serde_wasm_bindgen::to_value(&status).unwrap_or(JsValue::NULL),
        None => JsValue::NULL,
    }
}

// ============================================================================
// Structural edits
// ============================================================================

#[wasm_bindgen(js_name = addTimeSlot)]
pub fn add_time_slot(label: &str) -> JsValue {
    with_editor(|state| {
        let outcome = structure::add_time_slot(&state.grid, label);
        structural(state, outcome)
    })
}

#[wasm_bindgen(js_name = removeTimeSlot)]
pub fn remove_time_slot(index: usize) -> JsValue {
    with_editor(|state| {
        let outcome = structure::remove_time_slot(&state.grid, index);
        structural(state, outcome)
    })
}

#[wasm_bindgen(js_name = addDay)]
pub fn add_day(name: &str) -> JsValue {
    with_editor(|state| {
        let outcome = structure::add_day(&state.grid, name);
        structural(state, outcome)
    })
}

#[wasm_bindgen(js_name = addAllDay)]
pub fn add_all_day(name: &str, subject: &str, class_type: &str) -> JsValue {
    with_editor(|state| {
        let parsed = ClassType::from_label(class_type).unwrap_or(ClassType::Activity);
        let outcome = structure::add_all_day(&state.grid, name, subject, parsed);
        structural(state, outcome)
    })
}

#[wasm_bindgen(js_name = removeDay)]
pub fn remove_day(index: usize) -> JsValue {
    with_editor(|state| {
        let outcome = structure::remove_day(&state.grid, index);
        structural(state, outcome)
    })
}

#[wasm_bindgen(js_name = addClassToDay)]
pub fn add_class_to_day(day: usize) -> JsValue {
    with_editor(|state| {
        let outcome = structure::add_class(&state.grid, day);
        structural(state, outcome)
    })
}

#[wasm_bindgen(js_name = removeClassFromDay)]
pub fn remove_class_from_day(day: usize, cell: usize) -> JsValue {
    with_editor(|state| {
        let outcome = structure::remove_class(&state.grid, day, cell);
        structural(state, outcome)
    })
}

// ============================================================================
// Cell editing
// ============================================================================

#[wasm_bindgen(js_name = setEditMode)]
pub fn set_edit_mode(on: bool) -> JsValue {
    with_editor(|state| {
        state.set_edit_mode(on);
        ApiStatus::ok()
    })
}

#[wasm_bindgen(js_name = selectCell)]
pub fn select_cell(day: usize, cell: usize) -> JsValue {
    with_editor(|state| match state.select_cell(day, cell) {
        Ok(()) => ApiStatus::ok(),
        Err(err) => ApiStatus::rejected(err.to_string()),
    })
}

#[wasm_bindgen(js_name = updateCellField)]
pub fn update_cell_field(field: &str, value: &str) -> JsValue {
    with_editor(|state| {
        let Some(field) = CellField::from_name(field) else {
            return ApiStatus::rejected(format!("unknown field \"{}\"", field));
        };
        match state.update_field(field, value) {
            Ok(()) => ApiStatus::ok(),
            Err(err) => ApiStatus::rejected(err.to_string()),
        }
    })
}

// ============================================================================
// Conflict queries
// ============================================================================

/// Per-cell conflict query, called once per rendered cell
#[wasm_bindgen(js_name = hasConflict)]
pub fn has_conflict(day: usize, cell: usize, faculty: &str) -> bool {
    let editor = EDITOR.lock().unwrap_or_else(|e| e.into_inner());
    diagnostics::has_conflict(&editor.grid, day, cell, faculty)
}

/// Whole-grid conflict sweep, one mark per double-booked cell
#[wasm_bindgen(js_name = conflictMarks)]
pub fn conflict_marks() -> JsValue {
    let editor = EDITOR.lock().unwrap_or_else(|e| e.into_inner());
    let marks = diagnostics::collect_conflicts(&editor.grid);
    serde_wasm_bindgen::to_value(&marks).unwrap_or(JsValue::NULL)
}

// ============================================================================
// Export
// ============================================================================

/// Render the current grid as a static HTML document for download
#[wasm_bindgen(js_name = exportHtml)]
pub fn export_html() -> Result<String, JsValue> {
    log::info!("exportHtml called");
    let editor = EDITOR.lock().unwrap_or_else(|e| e.into_inner());
    renderers::render_timetable(&editor.meta, &editor.grid)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
