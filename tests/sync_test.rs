// Test the sync adapter against the in-memory store

use std::time::Duration;

use async_trait::async_trait;

use timetable_wasm::sync::{
    MemoryTimetableStore, SyncAdapter, SyncError, SyncResult, TimetableDocument, TimetableStore,
};
use timetable_wasm::{ClassCell, EditorState, StatusLevel, SubjectEntry};

/// Helper to build a session that satisfies the save preconditions
fn savable_state() -> EditorState {
    let mut state = EditorState::new();
    state.meta.department = "CSE".to_string();
    state.meta.semester = "5".to_string();
    state.meta.section = "A".to_string();
    state
        .subjects
        .add(SubjectEntry::new("CS301", "Operating Systems", "Dr. Rao"));
    state
}

#[tokio::test]
async fn load_absent_keeps_skeleton_and_reports_no_data() {
    let adapter = SyncAdapter::new(MemoryTimetableStore::new());
    let mut state = EditorState::new();
    let skeleton = state.grid.clone();

    let replaced = adapter.load(&mut state, "prof.rao", "CSE").await;

    assert!(!replaced);
    assert_eq!(state.grid, skeleton);
    let status = state.take_status().expect("status set");
    assert_eq!(status.level, StatusLevel::Info);
    assert!(status.text.contains("No saved timetable"));
}

#[tokio::test]
async fn load_replaces_session_wholesale() {
    let store = MemoryTimetableStore::new();
    let mut persisted = savable_state();
    persisted.grid.days[0].cells[0] = ClassCell::Class {
        subject: "Operating Systems".to_string(),
        class_type: timetable_wasm::ClassType::Theory,
        faculty: "Dr. Rao".to_string(),
    };
    persisted.faculty = vec!["Dr. Rao".to_string()];
    let id = store.seed_timetable(
        "prof.rao",
        "CSE",
        TimetableDocument::from_state(&persisted),
    );

    let adapter = SyncAdapter::new(store);
    let mut state = EditorState::new();
    let replaced = adapter.load(&mut state, "prof.rao", "CSE").await;

    assert!(replaced);
    assert_eq!(state.timetable_id, Some(id));
    assert_eq!(state.grid, persisted.grid);
    assert_eq!(state.meta, persisted.meta);
    assert_eq!(state.subjects, persisted.subjects);
    assert_eq!(state.faculty, persisted.faculty);
    assert_eq!(
        state.take_status().map(|s| s.level),
        Some(StatusLevel::Info)
    );
}

#[tokio::test]
async fn save_preconditions_block_before_any_store_call() {
    let adapter = SyncAdapter::new(MemoryTimetableStore::new());

    // Missing metadata
    let mut state = EditorState::new();
    assert!(!adapter.save(&mut state).await);
    let status = state.take_status().expect("status set");
    assert_eq!(status.level, StatusLevel::Error);
    assert!(status.text.contains("department"));

    // Metadata present, catalog empty
    let mut state = savable_state();
    state.subjects = Default::default();
    assert!(!adapter.save(&mut state).await);
    let status = state.take_status().expect("status set");
    assert!(status.text.contains("subject"));

    assert_eq!(adapter.store().document_count(), 0);
}

#[tokio::test]
async fn save_records_identifier_then_update_reuses_it() {
    let adapter = SyncAdapter::new(MemoryTimetableStore::new());
    let mut state = savable_state();

    // Update before any save is rejected
    assert!(!adapter.update(&mut state).await);
    let status = state.take_status().expect("status set");
    assert!(status.text.contains("save the timetable once"));

    assert!(adapter.save(&mut state).await);
    let id = state.timetable_id.clone().expect("identifier recorded");
    state.take_status();

    // Edit, then update in place
    state.grid.days[1].cells[0] = ClassCell::Class {
        subject: "Compilers".to_string(),
        class_type: timetable_wasm::ClassType::Theory,
        faculty: "Dr. Iyer".to_string(),
    };
    assert!(adapter.update(&mut state).await);
    assert_eq!(state.timetable_id.as_deref(), Some(id.as_str()));

    let stored = adapter.store().document(&id).expect("persisted");
    assert_eq!(stored.days[1].classes[0].subject, "Compilers");
    assert_eq!(adapter.store().document_count(), 1);
}

struct FailingStore;

#[async_trait]
impl TimetableStore for FailingStore {
    async fn fetch(&self, _: &str, _: &str) -> SyncResult<Option<TimetableDocument>> {
        Err(SyncError::Transport("connection refused".to_string()))
    }

    async fn create(&self, _: &TimetableDocument) -> SyncResult<TimetableDocument> {
        Err(SyncError::UnexpectedStatus {
            status: 500,
            detail: "internal error".to_string(),
        })
    }

    async fn update(&self, _: &str, _: &TimetableDocument) -> SyncResult<TimetableDocument> {
        Err(SyncError::Transport("connection refused".to_string()))
    }

    async fn faculty_directory(&self, _: &str) -> SyncResult<Vec<String>> {
        Err(SyncError::Transport("connection refused".to_string()))
    }
}

#[tokio::test]
async fn failures_surface_a_status_and_preserve_state() {
    let adapter = SyncAdapter::new(FailingStore);
    let mut state = savable_state();
    state.faculty = vec!["Dr. Rao".to_string()];
    let before_grid = state.grid.clone();

    assert!(!adapter.save(&mut state).await);
    let status = state.take_status().expect("status set");
    assert_eq!(status.level, StatusLevel::Error);
    assert!(status.text.contains("500"));
    assert!(state.timetable_id.is_none());
    assert_eq!(state.grid, before_grid);

    assert!(!adapter.load(&mut state, "prof.rao", "CSE").await);
    assert_eq!(state.grid, before_grid);

    // Roster survives a failed directory refresh
    assert!(!adapter.refresh_faculty(&mut state, "CSE").await);
    assert_eq!(state.faculty, vec!["Dr. Rao".to_string()]);
}

#[tokio::test]
async fn faculty_refresh_replaces_roster() {
    let store = MemoryTimetableStore::new();
    store.seed_faculty(
        "CSE",
        vec!["Dr. Rao".to_string(), "Dr. Iyer".to_string()],
    );
    let adapter = SyncAdapter::new(store);
    let mut state = EditorState::new();

    assert!(adapter.refresh_faculty(&mut state, "CSE").await);
    assert_eq!(state.faculty.len(), 2);

    // An unknown department degrades to an empty roster, not a failure
    assert!(adapter.refresh_faculty(&mut state, "ECE").await);
    assert!(state.faculty.is_empty());
}

/// Store whose fetch stalls long enough for a second call to overlap
struct StallingStore;

#[async_trait]
impl TimetableStore for StallingStore {
    async fn fetch(&self, _: &str, _: &str) -> SyncResult<Option<TimetableDocument>> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(None)
    }

    async fn create(&self, document: &TimetableDocument) -> SyncResult<TimetableDocument> {
        let mut stored = document.clone();
        stored.id = Some("tt-1".to_string());
        Ok(stored)
    }

    async fn update(&self, _: &str, document: &TimetableDocument) -> SyncResult<TimetableDocument> {
        Ok(document.clone())
    }

    async fn faculty_directory(&self, _: &str) -> SyncResult<Vec<String>> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn duplicate_inflight_request_is_collapsed() {
    let adapter = SyncAdapter::new(StallingStore);
    let mut first = EditorState::new();
    let mut second = EditorState::new();

    let (_, _) = tokio::join!(
        adapter.load(&mut first, "prof.rao", "CSE"),
        adapter.load(&mut second, "prof.rao", "CSE"),
    );

    // The overlapping repeat was dropped with a status, not queued
    let statuses = [
        first.take_status().expect("status set"),
        second.take_status().expect("status set"),
    ];
    let collapsed: Vec<_> = statuses
        .iter()
        .filter(|s| s.text.contains("already in progress"))
        .collect();
    assert_eq!(collapsed.len(), 1);

    // Once the first call finished, the marker is gone and loads work again
    assert!(!adapter.load(&mut first, "prof.rao", "CSE").await);
    let status = first.take_status().expect("status set");
    assert_eq!(status.level, StatusLevel::Info);
}
