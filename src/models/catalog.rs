//! Subject catalog and timetable metadata
//!
//! The catalog binds each subject to its default faculty; picking a subject
//! for a cell seeds that cell's faculty from here.

use serde::{Deserialize, Serialize};

/// One catalog entry: a subject and the faculty it defaults to
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SubjectEntry {
    pub code: String,
    pub name: String,
    pub faculty: String,
}

impl SubjectEntry {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        faculty: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            faculty: faculty.into(),
        }
    }
}

/// Ordered collection of subjects offered by the department
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SubjectCatalog {
    entries: Vec<SubjectEntry>,
}

impl SubjectCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<SubjectEntry>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn add(&mut self, entry: SubjectEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[SubjectEntry] {
        &self.entries
    }

    /// Look a subject up by display name (exact match)
    pub fn find_by_name(&self, name: &str) -> Option<&SubjectEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// College/section metadata carried with every persisted timetable
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TimetableMeta {
    pub college: String,
    pub department: String,
    pub semester: String,
    pub section: String,
}

impl TimetableMeta {
    /// First required field that is still blank, if any. Department,
    /// semester and section gate save/update; college is optional.
    pub fn first_missing(&self) -> Option<&'static str> {
        if self.department.trim().is_empty() {
            Some("department")
        } else if self.semester.trim().is_empty() {
            Some("semester")
        } else if self.section.trim().is_empty() {
            Some("section")
        } else {
            None
        }
    }
}
