//! Structural operations on the timetable grid
//!
//! Each operation validates first and only then builds the successor grid, so
//! a rejected edit leaves the caller's grid exactly as it was. All-day rows
//! never gain or lose cells here; their rendered span is derived from the
//! slot count at the export boundary, so slot operations skip them entirely.

use crate::models::grid::{is_valid_slot_label, ClassCell, ClassType, Day, Grid};

use super::errors::EditError;

/// Append a time slot column
///
/// Rejects an empty, malformed (`HH:MM-HH:MM`) or duplicate label. Every
/// teaching day gains one trailing free period.
pub fn add_time_slot(grid: &Grid, label: &str) -> Result<Grid, EditError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(EditError::EmptySlotLabel);
    }
    if !is_valid_slot_label(label) {
        return Err(EditError::MalformedSlotLabel(label.to_string()));
    }
    if grid.time_slots.iter().any(|s| s == label) {
        return Err(EditError::DuplicateSlot(label.to_string()));
    }

    let mut next = grid.clone();
    next.time_slots.push(label.to_string());
    for day in next.days.iter_mut().filter(|d| !d.is_all_day()) {
        day.cells.push(ClassCell::empty());
    }
    Ok(next)
}

/// Remove the time slot column at `index`
///
/// Rejects an out-of-range index and dropping the last remaining slot. Every
/// teaching day loses its cell at the same index.
pub fn remove_time_slot(grid: &Grid, index: usize) -> Result<Grid, EditError> {
    if index >= grid.time_slots.len() {
        return Err(EditError::SlotOutOfRange(index));
    }
    if grid.time_slots.len() <= 1 {
        return Err(EditError::LastSlot);
    }

    let mut next = grid.clone();
    next.time_slots.remove(index);
    for day in next.days.iter_mut().filter(|d| !d.is_all_day()) {
        // Loaded documents can be short; only drop what is there
        if index < day.cells.len() {
            day.cells.remove(index);
        }
    }
    Ok(next)
}

/// Append a teaching day
///
/// Rejects an empty or duplicate name. The new day gets one free period per
/// time slot.
pub fn add_day(grid: &Grid, name: &str) -> Result<Grid, EditError> {
    let name = validated_day_name(grid, name)?;
    let mut next = grid.clone();
    next.days.push(Day::teaching(name, next.time_slots.len()));
    Ok(next)
}

/// Append an all-day activity row
///
/// Same name rules as [`add_day`]; the row owns a single cell spanning every
/// time slot.
pub fn add_all_day(
    grid: &Grid,
    name: &str,
    subject: &str,
    class_type: ClassType,
) -> Result<Grid, EditError> {
    let name = validated_day_name(grid, name)?;
    let mut next = grid.clone();
    next.days.push(Day::all_day(name, subject, class_type));
    Ok(next)
}

/// Remove the day at `index`
///
/// Rejects an out-of-range index and dropping the last remaining day.
pub fn remove_day(grid: &Grid, index: usize) -> Result<Grid, EditError> {
    if index >= grid.days.len() {
        return Err(EditError::DayOutOfRange(index));
    }
    if grid.days.len() <= 1 {
        return Err(EditError::LastDay);
    }

    let mut next = grid.clone();
    next.days.remove(index);
    Ok(next)
}

/// Append a free period to a day that is short of the slot count
///
/// Rejects all-day rows and days that already hold one cell per time slot.
/// Short rows only arise from degraded loaded documents; this is the repair
/// path back toward a rectangular grid.
pub fn add_class(grid: &Grid, day_index: usize) -> Result<Grid, EditError> {
    let day = grid.day(day_index).ok_or(EditError::DayOutOfRange(day_index))?;
    if day.is_all_day() {
        return Err(EditError::AllDayRow(day.name.clone()));
    }
    if day.cells.len() >= grid.time_slots.len() {
        return Err(EditError::RowFull(day.name.clone()));
    }

    let mut next = grid.clone();
    next.days[day_index].cells.push(ClassCell::empty());
    Ok(next)
}

/// Remove one cell from a day that holds more cells than time slots
///
/// Rejects all-day rows, the day's last remaining cell, and any removal that
/// would leave the day short of the slot count.
pub fn remove_class(grid: &Grid, day_index: usize, cell_index: usize) -> Result<Grid, EditError> {
    let day = grid.day(day_index).ok_or(EditError::DayOutOfRange(day_index))?;
    if day.is_all_day() {
        return Err(EditError::AllDayRow(day.name.clone()));
    }
    if cell_index >= day.cells.len() {
        return Err(EditError::CellOutOfRange {
            day: day_index,
            cell: cell_index,
        });
    }
    if day.cells.len() <= 1 {
        return Err(EditError::LastCell);
    }
    if day.cells.len() <= grid.time_slots.len() {
        return Err(EditError::RowAtMinimum(day.name.clone()));
    }

    let mut next = grid.clone();
    next.days[day_index].cells.remove(cell_index);
    Ok(next)
}

fn validated_day_name<'a>(grid: &Grid, name: &'a str) -> Result<&'a str, EditError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EditError::EmptyDayName);
    }
    if grid.days.iter().any(|d| d.name == name) {
        return Err(EditError::DuplicateDay(name.to_string()));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_time_slot_extends_teaching_days() {
        let grid = Grid::skeleton();
        let next = add_time_slot(&grid, "16:00-17:00").expect("valid slot");

        assert_eq!(next.slot_count(), 8);
        for day in next.days.iter().filter(|d| !d.is_all_day()) {
            assert_eq!(day.cells.len(), 8);
            assert!(day.cells.last().map(ClassCell::is_free).unwrap_or(false));
        }
        // The all-day row keeps its single cell
        let sat = next.find_day("Sat").expect("Sat exists");
        assert_eq!(next.days[sat].cells.len(), 1);
        assert!(next.validate().is_ok());
    }

    #[test]
    fn test_add_time_slot_rejections() {
        let grid = Grid::skeleton();

        assert_eq!(add_time_slot(&grid, "  "), Err(EditError::EmptySlotLabel));
        assert_eq!(
            add_time_slot(&grid, "4pm to 5pm"),
            Err(EditError::MalformedSlotLabel("4pm to 5pm".to_string()))
        );
        assert_eq!(
            add_time_slot(&grid, "09:00-10:00"),
            Err(EditError::DuplicateSlot("09:00-10:00".to_string()))
        );
    }

    #[test]
    fn test_remove_time_slot() {
        let grid = Grid::skeleton();
        let next = remove_time_slot(&grid, 0).expect("removable");

        assert_eq!(next.slot_count(), 6);
        assert!(next.validate().is_ok());
        assert_eq!(remove_time_slot(&grid, 99), Err(EditError::SlotOutOfRange(99)));
    }

    #[test]
    fn test_remove_last_time_slot_rejected() {
        let mut grid = Grid::skeleton();
        while grid.slot_count() > 1 {
            grid = remove_time_slot(&grid, 0).expect("removable");
        }

        let before = grid.clone();
        assert_eq!(remove_time_slot(&grid, 0), Err(EditError::LastSlot));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_add_day() {
        let grid = Grid::skeleton();
        let next = add_day(&grid, "Sun").expect("new day");

        assert_eq!(next.day_count(), 7);
        assert_eq!(next.days[6].cells.len(), next.slot_count());
        assert!(next.validate().is_ok());

        assert_eq!(add_day(&grid, ""), Err(EditError::EmptyDayName));
        assert_eq!(
            add_day(&grid, "Mon"),
            Err(EditError::DuplicateDay("Mon".to_string()))
        );
    }

    #[test]
    fn test_add_all_day_row() {
        let grid = Grid::skeleton();
        let next = add_all_day(&grid, "Sun", "NSS Camp", ClassType::Activity).expect("new row");

        assert!(next.days[6].is_all_day());
        assert!(next.validate().is_ok());
    }

    #[test]
    fn test_remove_day_including_all_day_row() {
        let grid = Grid::skeleton();
        let sat = grid.find_day("Sat").expect("Sat exists");
        let next = remove_day(&grid, sat).expect("removable");

        assert_eq!(next.day_count(), 5);
        assert!(next.find_day("Sat").is_none());
        assert!(next.validate().is_ok());
    }

    #[test]
    fn test_remove_last_day_rejected() {
        let mut grid = Grid::skeleton();
        while grid.day_count() > 1 {
            grid = remove_day(&grid, 0).expect("removable");
        }

        let before = grid.clone();
        assert_eq!(remove_day(&grid, 0), Err(EditError::LastDay));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_add_class_repairs_short_day() {
        let mut grid = Grid::skeleton();
        // Simulate a degraded loaded document
        grid.days[0].cells.pop();
        assert!(grid.validate().is_err());

        let next = add_class(&grid, 0).expect("repair");
        assert!(next.validate().is_ok());

        // A rectangular day cannot grow past the slot count
        assert_eq!(add_class(&next, 0), Err(EditError::RowFull("Mon".to_string())));
    }

    #[test]
    fn test_add_class_rejected_on_all_day_row() {
        let grid = Grid::skeleton();
        let sat = grid.find_day("Sat").expect("Sat exists");

        assert_eq!(add_class(&grid, sat), Err(EditError::AllDayRow("Sat".to_string())));
    }

    #[test]
    fn test_remove_class_trims_long_day() {
        let mut grid = Grid::skeleton();
        grid.days[0].cells.push(ClassCell::empty());
        assert!(grid.validate().is_err());

        let next = remove_class(&grid, 0, 7).expect("trim");
        assert!(next.validate().is_ok());

        // And no further once rectangular again
        assert_eq!(
            remove_class(&next, 0, 0),
            Err(EditError::RowAtMinimum("Mon".to_string()))
        );
    }

    #[test]
    fn test_remove_class_rejections() {
        let grid = Grid::skeleton();
        let sat = grid.find_day("Sat").expect("Sat exists");

        assert_eq!(
            remove_class(&grid, sat, 0),
            Err(EditError::AllDayRow("Sat".to_string()))
        );
        assert_eq!(
            remove_class(&grid, 0, 99),
            Err(EditError::CellOutOfRange { day: 0, cell: 99 })
        );
        assert_eq!(remove_class(&grid, 99, 0), Err(EditError::DayOutOfRange(99)));
    }
}
