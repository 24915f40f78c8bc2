//! Wire-format timetable documents
//!
//! The persistence service speaks the legacy shape: recess periods are cells
//! whose subject is the sentinel `"RECESS"`, and an all-day row is a single
//! cell carrying a `colSpan`. This module is the only place those sentinels
//! exist; conversion to and from the tagged in-memory model happens here.
//!
//! Deserialization is deliberately forgiving: every field defaults, unknown
//! class types fall back to Theory, and a malformed day still yields usable
//! cells. A degraded document loads as a degraded grid, never as an error.

use serde::{Deserialize, Serialize};

use crate::models::catalog::{SubjectCatalog, SubjectEntry, TimetableMeta};
use crate::models::editor_state::EditorState;
use crate::models::grid::{ClassCell, ClassType, Day, Grid};

/// Sentinel subject marking a recess period on the wire
pub const RECESS_SUBJECT: &str = "RECESS";

/// Full timetable snapshot as exchanged with the persistence service
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TimetableDocument {
    /// Service-assigned identifier; absent until the first save
    #[serde(alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub college: String,
    pub department: String,
    pub semester: String,
    pub section: String,
    pub time_slots: Vec<String>,
    pub subjects: Vec<WireSubject>,
    pub faculty: Vec<String>,
    pub days: Vec<WireDay>,
}

/// One subject catalog entry on the wire
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct WireSubject {
    pub code: String,
    pub name: String,
    pub faculty: String,
}

/// One day row on the wire
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct WireDay {
    pub day: String,
    pub classes: Vec<WireCell>,
}

/// One cell on the wire, sentinel fields and all
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct WireCell {
    pub subject: String,
    #[serde(rename = "type")]
    pub class_type: String,
    pub faculty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col_span: Option<usize>,
}

/// Everything a loaded document contributes to an editing session
#[derive(Debug, Clone)]
pub struct HydratedTimetable {
    pub id: Option<String>,
    pub meta: TimetableMeta,
    pub grid: Grid,
    pub subjects: SubjectCatalog,
    pub faculty: Vec<String>,
}

impl TimetableDocument {
    /// Snapshot the current session into wire form
    pub fn from_state(state: &EditorState) -> Self {
        let slot_count = state.grid.slot_count();
        Self {
            id: state.timetable_id.clone(),
            college: state.meta.college.clone(),
            department: state.meta.department.clone(),
            semester: state.meta.semester.clone(),
            section: state.meta.section.clone(),
            time_slots: state.grid.time_slots.clone(),
            subjects: state
                .subjects
                .entries()
                .iter()
                .map(|entry| WireSubject {
                    code: entry.code.clone(),
                    name: entry.name.clone(),
                    faculty: entry.faculty.clone(),
                })
                .collect(),
            faculty: state.faculty.clone(),
            days: state
                .grid
                .days
                .iter()
                .map(|day| WireDay {
                    day: day.name.clone(),
                    classes: day
                        .cells
                        .iter()
                        .map(|cell| wire_cell(cell, slot_count))
                        .collect(),
                })
                .collect(),
        }
    }

    /// Turn the document back into session state
    pub fn hydrate(self) -> HydratedTimetable {
        let days = self.days.into_iter().map(hydrate_day).collect();
        HydratedTimetable {
            id: self.id,
            meta: TimetableMeta {
                college: self.college,
                department: self.department,
                semester: self.semester,
                section: self.section,
            },
            grid: Grid {
                time_slots: self.time_slots,
                days,
            },
            subjects: SubjectCatalog::from_entries(
                self.subjects
                    .into_iter()
                    .map(|s| SubjectEntry::new(s.code, s.name, s.faculty))
                    .collect(),
            ),
            faculty: self.faculty,
        }
    }
}

fn wire_cell(cell: &ClassCell, slot_count: usize) -> WireCell {
    match cell {
        ClassCell::Class {
            subject,
            class_type,
            faculty,
        } => WireCell {
            subject: subject.clone(),
            class_type: class_type.label().to_string(),
            faculty: faculty.clone(),
            col_span: None,
        },
        ClassCell::Recess => WireCell {
            subject: RECESS_SUBJECT.to_string(),
            class_type: ClassType::Break.label().to_string(),
            faculty: String::new(),
            col_span: None,
        },
        ClassCell::AllDay {
            subject,
            class_type,
        } => WireCell {
            subject: subject.clone(),
            class_type: class_type.label().to_string(),
            faculty: String::new(),
            // Derived, never stored: the span is always the grid width
            col_span: Some(slot_count),
        },
    }
}

fn hydrate_day(day: WireDay) -> Day {
    // A single spanning cell marks an all-day row
    if day.classes.len() == 1 && day.classes[0].col_span.is_some() {
        let cell = &day.classes[0];
        return Day::all_day(
            day.day,
            cell.subject.clone(),
            ClassType::from_label(&cell.class_type).unwrap_or(ClassType::Activity),
        );
    }

    let cells = day
        .classes
        .into_iter()
        .map(|cell| {
            if cell.subject == RECESS_SUBJECT {
                ClassCell::Recess
            } else {
                ClassCell::Class {
                    subject: cell.subject,
                    class_type: ClassType::from_label(&cell.class_type)
                        .unwrap_or(ClassType::Theory),
                    faculty: cell.faculty,
                }
            }
        })
        .collect();
    Day {
        name: day.day,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated_state() -> EditorState {
        let mut state = EditorState::new();
        state.meta.college = "City Engineering College".to_string();
        state.meta.department = "CSE".to_string();
        state.meta.semester = "5".to_string();
        state.meta.section = "A".to_string();
        state
            .subjects
            .add(SubjectEntry::new("CS301", "Operating Systems", "Dr. Rao"));
        state.faculty = vec!["Dr. Rao".to_string(), "Dr. Iyer".to_string()];
        state.grid.days[0].cells[0] = ClassCell::Class {
            subject: "Operating Systems".to_string(),
            class_type: ClassType::Theory,
            faculty: "Dr. Rao".to_string(),
        };
        state
    }

    #[test]
    fn test_round_trip_is_identity() {
        let state = populated_state();
        let document = TimetableDocument::from_state(&state);
        let hydrated = document.hydrate();

        assert_eq!(hydrated.grid, state.grid);
        assert_eq!(hydrated.meta, state.meta);
        assert_eq!(hydrated.subjects, state.subjects);
        assert_eq!(hydrated.faculty, state.faculty);
    }

    #[test]
    fn test_sentinels_only_on_the_wire() {
        let state = populated_state();
        let document = TimetableDocument::from_state(&state);

        // Recess becomes the sentinel subject
        let mon = &document.days[0];
        assert_eq!(mon.classes[3].subject, RECESS_SUBJECT);

        // The all-day row carries the derived span
        let sat = document.days.last().expect("Sat on the wire");
        assert_eq!(sat.classes.len(), 1);
        assert_eq!(sat.classes[0].col_span, Some(state.grid.slot_count()));
    }

    #[test]
    fn test_json_field_names_match_the_service() {
        let state = populated_state();
        let json =
            serde_json::to_string(&TimetableDocument::from_state(&state)).expect("serializes");

        assert!(json.contains("\"timeSlots\""));
        assert!(json.contains("\"colSpan\""));
        assert!(json.contains("\"type\""));
        // No identifier before the first save
        assert!(!json.contains("\"id\""));
    }

    #[test]
    fn test_degraded_document_still_hydrates() {
        // Unknown type, missing fields, extra fields, short day
        let json = r#"{
            "department": "CSE",
            "timeSlots": ["09:00-10:00", "10:00-11:00"],
            "days": [
                {"day": "Mon", "classes": [
                    {"subject": "OS", "type": "lecture", "extra": 1}
                ]}
            ],
            "unknownTopLevel": true
        }"#;
        let document: TimetableDocument = serde_json::from_str(json).expect("forgiving decode");
        let hydrated = document.hydrate();

        assert_eq!(hydrated.meta.department, "CSE");
        assert!(hydrated.subjects.is_empty());
        assert!(hydrated.faculty.is_empty());
        // Unknown type fell back to Theory
        match &hydrated.grid.days[0].cells[0] {
            ClassCell::Class { class_type, .. } => assert_eq!(*class_type, ClassType::Theory),
            other => panic!("unexpected cell {:?}", other),
        }
        // Short day survives as-is; validate flags it for the repair path
        assert!(hydrated.grid.validate().is_err());
    }

    #[test]
    fn test_mongo_style_id_alias() {
        let json = r#"{"_id": "64ffec", "department": "CSE"}"#;
        let document: TimetableDocument = serde_json::from_str(json).expect("decodes");
        assert_eq!(document.id.as_deref(), Some("64ffec"));
    }

    #[test]
    fn test_span_on_multi_cell_day_is_ignored() {
        let json = r#"{
            "timeSlots": ["09:00-10:00", "10:00-11:00"],
            "days": [
                {"day": "Mon", "classes": [
                    {"subject": "OS", "type": "Theory", "colSpan": 2},
                    {"subject": "DBMS", "type": "Theory"}
                ]}
            ]
        }"#;
        let hydrated = serde_json::from_str::<TimetableDocument>(json)
            .expect("decodes")
            .hydrate();

        assert!(!hydrated.grid.days[0].is_all_day());
        assert_eq!(hydrated.grid.days[0].cells.len(), 2);
    }
}
