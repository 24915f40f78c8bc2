//! Error types for grid editing
//!
//! Every rejected edit maps to one variant here. The `Display` text is what
//! the operator sees as the transient status message, so the wording stays
//! plain and names the offending value where one exists.

use thiserror::Error;

/// A rejected edit. The grid is untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    // Time slot operations
    #[error("time slot label cannot be empty")]
    EmptySlotLabel,
    #[error("time slot label must look like HH:MM-HH:MM, got \"{0}\"")]
    MalformedSlotLabel(String),
    #[error("time slot \"{0}\" is already in the timetable")]
    DuplicateSlot(String),
    #[error("a timetable needs at least one time slot")]
    LastSlot,
    #[error("no time slot at index {0}")]
    SlotOutOfRange(usize),

    // Day operations
    #[error("day name cannot be empty")]
    EmptyDayName,
    #[error("day \"{0}\" is already in the timetable")]
    DuplicateDay(String),
    #[error("a timetable needs at least one day")]
    LastDay,
    #[error("no day at index {0}")]
    DayOutOfRange(usize),

    // Per-day cell operations
    #[error("no cell at index {cell} on day {day}")]
    CellOutOfRange { day: usize, cell: usize },
    #[error("\"{0}\" is an all-day row and keeps its single cell")]
    AllDayRow(String),
    #[error("\"{0}\" already has a cell for every time slot")]
    RowFull(String),
    #[error("removing that cell would leave \"{0}\" with fewer cells than time slots")]
    RowAtMinimum(String),
    #[error("a day keeps at least one cell")]
    LastCell,

    // Cell editing state machine
    #[error("turn edit mode on before selecting a cell")]
    EditModeOff,
    #[error("recess periods cannot be edited")]
    RecessCell,
    #[error("no cell is selected")]
    NoSelection,
    #[error("all-day activities have no faculty assignment")]
    NoFacultyField,
    #[error("unknown class type \"{0}\"")]
    UnknownClassType(String),
}
