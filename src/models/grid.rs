//! Core data structures for the timetable grid editor
//!
//! This module defines the Grid architecture: an ordered set of time slots
//! (the column axis), an ordered set of days (the row axis), and the tagged
//! class cells each day owns.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of teaching period a cell holds
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassType {
    Theory,
    Lab,
    Seminar,
    Activity,
    Break,
}

impl ClassType {
    /// Canonical display label
    pub fn label(&self) -> &'static str {
        match self {
            ClassType::Theory => "Theory",
            ClassType::Lab => "Lab",
            ClassType::Seminar => "Seminar",
            ClassType::Activity => "Activity",
            ClassType::Break => "Break",
        }
    }

    /// Parse a label, case-insensitively
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "theory" => Some(ClassType::Theory),
            "lab" => Some(ClassType::Lab),
            "seminar" => Some(ClassType::Seminar),
            "activity" => Some(ClassType::Activity),
            "break" => Some(ClassType::Break),
            _ => None,
        }
    }
}

impl Default for ClassType {
    fn default() -> Self {
        ClassType::Theory
    }
}

/// One cell of the timetable grid
///
/// The variants replace the source data's sentinel fields: a recess period is
/// its own variant rather than a magic subject string, and the single
/// full-width cell of an all-day row is its own variant rather than a cell
/// carrying a span count. The rendered/persisted span of an `AllDay` cell is
/// always the current number of time slots, derived at the boundary.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind")]
pub enum ClassCell {
    /// A regular teaching period. An empty subject means a free period.
    Class {
        subject: String,
        class_type: ClassType,
        faculty: String,
    },
    /// A fixed, non-editable break period
    Recess,
    /// The single cell of an all-day activity row, spanning every time slot
    AllDay {
        subject: String,
        class_type: ClassType,
    },
}

impl ClassCell {
    /// An unassigned teaching period (free period)
    pub fn empty() -> Self {
        ClassCell::Class {
            subject: String::new(),
            class_type: ClassType::Theory,
            faculty: String::new(),
        }
    }

    pub fn is_recess(&self) -> bool {
        matches!(self, ClassCell::Recess)
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self, ClassCell::AllDay { .. })
    }

    /// A free period: a regular cell with no subject assigned yet
    pub fn is_free(&self) -> bool {
        matches!(self, ClassCell::Class { subject, .. } if subject.is_empty())
    }
}

/// A named row of the grid
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Day {
    pub name: String,
    pub cells: Vec<ClassCell>,
}

impl Day {
    /// Create a teaching day of `slots` free periods
    pub fn teaching(name: impl Into<String>, slots: usize) -> Self {
        Self {
            name: name.into(),
            cells: vec![ClassCell::empty(); slots],
        }
    }

    /// Create an all-day activity row (one cell spanning every slot)
    pub fn all_day(
        name: impl Into<String>,
        subject: impl Into<String>,
        class_type: ClassType,
    ) -> Self {
        Self {
            name: name.into(),
            cells: vec![ClassCell::AllDay {
                subject: subject.into(),
                class_type,
            }],
        }
    }

    /// A day is all-day iff it consists of exactly one `AllDay` cell
    pub fn is_all_day(&self) -> bool {
        self.cells.len() == 1 && self.cells[0].is_all_day()
    }
}

/// Violations found by [`Grid::validate`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("timetable has no days")]
    NoDays,
    #[error("timetable has no time slots")]
    NoTimeSlots,
    #[error("duplicate day name \"{0}\"")]
    DuplicateDay(String),
    #[error("duplicate time slot \"{0}\"")]
    DuplicateSlot(String),
    #[error("invalid time slot label \"{0}\"")]
    BadSlotLabel(String),
    #[error("day \"{name}\" has {cells} cells for {slots} time slots")]
    RaggedDay {
        name: String,
        cells: usize,
        slots: usize,
    },
    #[error("day \"{0}\" mixes an all-day cell into a teaching row")]
    MisplacedAllDay(String),
}

static SLOT_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2}):(\d{2})-(\d{2}):(\d{2})$").expect("slot label pattern"));

/// Check a time slot label against the `HH:MM-HH:MM` shape, with hour and
/// minute ranges enforced (00-23 / 00-59)
pub fn is_valid_slot_label(label: &str) -> bool {
    let Some(caps) = SLOT_LABEL.captures(label) else {
        return false;
    };
    // Captures alternate hour, minute, hour, minute
    caps.iter().skip(1).flatten().enumerate().all(|(i, m)| {
        let limit = if i % 2 == 0 { 24 } else { 60 };
        m.as_str().parse::<u32>().map(|v| v < limit).unwrap_or(false)
    })
}

/// The day x time-slot schedule structure
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Grid {
    /// Ordered slot labels (`HH:MM-HH:MM`), the column axis
    pub time_slots: Vec<String>,
    /// Ordered rows, insertion order
    pub days: Vec<Day>,
}

impl Grid {
    /// The default skeleton: six weekdays, seven slots, a fixed recess
    /// column, and Saturday as the all-day activity row
    pub fn skeleton() -> Self {
        let time_slots: Vec<String> = [
            "09:00-10:00",
            "10:00-11:00",
            "11:00-12:00",
            "12:00-12:45",
            "12:45-13:45",
            "13:45-14:45",
            "14:45-15:45",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        // Column 3 (12:00-12:45) is the recess period on every teaching day
        let mut days: Vec<Day> = ["Mon", "Tue", "Wed", "Thu", "Fri"]
            .iter()
            .map(|name| {
                let mut day = Day::teaching(*name, time_slots.len());
                day.cells[3] = ClassCell::Recess;
                day
            })
            .collect();
        days.push(Day::all_day(
            "Sat",
            "Club & Cultural Activities",
            ClassType::Activity,
        ));

        Self { time_slots, days }
    }

    pub fn slot_count(&self) -> usize {
        self.time_slots.len()
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn day(&self, index: usize) -> Option<&Day> {
        self.days.get(index)
    }

    pub fn cell(&self, day: usize, cell: usize) -> Option<&ClassCell> {
        self.days.get(day).and_then(|d| d.cells.get(cell))
    }

    pub fn cell_mut(&mut self, day: usize, cell: usize) -> Option<&mut ClassCell> {
        self.days.get_mut(day).and_then(|d| d.cells.get_mut(cell))
    }

    /// Find a day index by name (exact match)
    pub fn find_day(&self, name: &str) -> Option<usize> {
        self.days.iter().position(|d| d.name == name)
    }

    /// Check the shape invariants: at least one day and slot, unique names
    /// and labels, well-formed labels, rectangular teaching rows, and
    /// single-cell all-day rows
    pub fn validate(&self) -> Result<(), GridError> {
        if self.days.is_empty() {
            return Err(GridError::NoDays);
        }
        if self.time_slots.is_empty() {
            return Err(GridError::NoTimeSlots);
        }
        for (i, label) in self.time_slots.iter().enumerate() {
            if !is_valid_slot_label(label) {
                return Err(GridError::BadSlotLabel(label.clone()));
            }
            if self.time_slots[..i].contains(label) {
                return Err(GridError::DuplicateSlot(label.clone()));
            }
        }
        for (i, day) in self.days.iter().enumerate() {
            if self.days[..i].iter().any(|d| d.name == day.name) {
                return Err(GridError::DuplicateDay(day.name.clone()));
            }
            if day.is_all_day() {
                continue;
            }
            if day.cells.iter().any(ClassCell::is_all_day) {
                return Err(GridError::MisplacedAllDay(day.name.clone()));
            }
            if day.cells.len() != self.time_slots.len() {
                return Err(GridError::RaggedDay {
                    name: day.name.clone(),
                    cells: day.cells.len(),
                    slots: self.time_slots.len(),
                });
            }
        }
        Ok(())
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::skeleton()
    }
}
