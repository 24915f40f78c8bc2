//! Sync adapter driving an editing session through a store
//!
//! Each operation checks its preconditions, performs at most one network
//! call, and funnels the outcome into the session's status channel. A repeat
//! of an operation that is still outstanding is collapsed: it issues no
//! second call and surfaces a "request in progress" status instead. Failures
//! never discard in-memory grid state, and nothing retries.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use crate::models::editor_state::{EditorState, StatusLevel};

use super::documents::TimetableDocument;
use super::error::{SyncError, SyncResult};
use super::store::TimetableStore;

/// Drives load/save/update/faculty-refresh against a [`TimetableStore`]
pub struct SyncAdapter<S> {
    store: S,
    inflight: Mutex<HashSet<&'static str>>,
}

/// Clears the in-flight marker when the operation finishes, however it ends
struct InflightTicket<'a> {
    inflight: &'a Mutex<HashSet<&'static str>>,
    key: &'static str,
}

impl Drop for InflightTicket<'_> {
    fn drop(&mut self) {
        lock(self.inflight).remove(self.key);
    }
}

impl<S: TimetableStore> SyncAdapter<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            inflight: Mutex::new(HashSet::new()),
        }
    }

    /// The underlying store (tests use this for seeding and inspection)
    pub fn store(&self) -> &S {
        &self.store
    }

    fn begin(&self, key: &'static str) -> SyncResult<InflightTicket<'_>> {
        if !lock(&self.inflight).insert(key) {
            return Err(SyncError::RequestInFlight(key));
        }
        Ok(InflightTicket {
            inflight: &self.inflight,
            key,
        })
    }

    /// Load the operator's persisted timetable, replacing the session state
    /// wholesale on success. An absent timetable keeps the current grid and
    /// reports no-data; it is not an error.
    ///
    /// Returns whether the session state was replaced.
    pub async fn load(&self, state: &mut EditorState, owner: &str, department: &str) -> bool {
        let _ticket = match self.begin("load") {
            Ok(ticket) => ticket,
            Err(err) => {
                state.set_status(StatusLevel::Error, err.to_string());
                return false;
            }
        };

        match self.store.fetch(owner, department).await {
            Ok(Some(document)) => {
                let hydrated = document.hydrate();
                state.timetable_id = hydrated.id;
                state.meta = hydrated.meta;
                state.grid = hydrated.grid;
                state.subjects = hydrated.subjects;
                state.faculty = hydrated.faculty;
                state.deselect();
                match state.grid.validate() {
                    Ok(()) => state.set_status(StatusLevel::Info, "Timetable loaded"),
                    Err(err) => state.set_status(
                        StatusLevel::Warning,
                        format!("Timetable loaded, but it needs repair: {}", err),
                    ),
                }
                true
            }
            Ok(None) => {
                state.set_status(
                    StatusLevel::Info,
                    "No saved timetable yet; starting from the default grid",
                );
                false
            }
            Err(err) => {
                state.set_status(StatusLevel::Error, err.to_string());
                false
            }
        }
    }

    /// Create a persisted timetable from the current session snapshot and
    /// remember the assigned identifier for later updates.
    pub async fn save(&self, state: &mut EditorState) -> bool {
        if let Err(err) = save_preconditions(state) {
            state.set_status(StatusLevel::Error, err.to_string());
            return false;
        }
        let _ticket = match self.begin("save") {
            Ok(ticket) => ticket,
            Err(err) => {
                state.set_status(StatusLevel::Error, err.to_string());
                return false;
            }
        };

        let document = TimetableDocument::from_state(state);
        match self.store.create(&document).await {
            Ok(saved) => match saved.id {
                Some(id) => {
                    state.timetable_id = Some(id);
                    state.set_status(StatusLevel::Info, "Timetable saved");
                    true
                }
                None => {
                    state.set_status(
                        StatusLevel::Error,
                        "the timetable service did not return an identifier",
                    );
                    false
                }
            },
            Err(err) => {
                state.set_status(StatusLevel::Error, err.to_string());
                false
            }
        }
    }

    /// Replace the persisted timetable recorded for this session.
    /// Last write wins.
    pub async fn update(&self, state: &mut EditorState) -> bool {
        let id = match &state.timetable_id {
            Some(id) => id.clone(),
            None => {
                state.set_status(StatusLevel::Error, SyncError::MissingIdentifier.to_string());
                return false;
            }
        };
        if let Err(err) = save_preconditions(state) {
            state.set_status(StatusLevel::Error, err.to_string());
            return false;
        }
        let _ticket = match self.begin("update") {
            Ok(ticket) => ticket,
            Err(err) => {
                state.set_status(StatusLevel::Error, err.to_string());
                return false;
            }
        };

        let document = TimetableDocument::from_state(state);
        match self.store.update(&id, &document).await {
            Ok(_) => {
                state.set_status(StatusLevel::Info, "Timetable updated");
                true
            }
            Err(err) => {
                state.set_status(StatusLevel::Error, err.to_string());
                false
            }
        }
    }

    /// Refresh the faculty roster for a department. On failure the previous
    /// roster stays in place; the editor keeps working either way.
    pub async fn refresh_faculty(&self, state: &mut EditorState, department: &str) -> bool {
        let _ticket = match self.begin("faculty") {
            Ok(ticket) => ticket,
            Err(err) => {
                state.set_status(StatusLevel::Error, err.to_string());
                return false;
            }
        };

        match self.store.faculty_directory(department).await {
            Ok(names) => {
                state.faculty = names;
                state.set_status(StatusLevel::Info, "Faculty directory refreshed");
                true
            }
            Err(err) => {
                state.set_status(StatusLevel::Error, err.to_string());
                false
            }
        }
    }
}

fn save_preconditions(state: &EditorState) -> SyncResult<()> {
    if let Some(field) = state.meta.first_missing() {
        return Err(SyncError::MissingMetadata(field));
    }
    if state.subjects.is_empty() {
        return Err(SyncError::EmptyCatalog);
    }
    Ok(())
}

fn lock<'a, T>(mutex: &'a Mutex<T>) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
