//! Store trait for timetable persistence
//!
//! Abstracts the persistence and directory services behind one async trait
//! so the adapter logic can run against the real HTTP backend or the
//! in-memory implementation interchangeably.

use async_trait::async_trait;

use super::documents::TimetableDocument;
use super::error::SyncResult;

/// Async client contract for the timetable persistence service and the
/// faculty directory service.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait TimetableStore: Send + Sync {
    /// Fetch the persisted timetable for an operator and department.
    ///
    /// # Returns
    /// * `Ok(Some(document))` - a timetable exists
    /// * `Ok(None)` - nothing persisted yet; not an error
    /// * `Err(SyncError)` - the call failed
    async fn fetch(&self, owner: &str, department: &str)
        -> SyncResult<Option<TimetableDocument>>;

    /// Create a new persisted timetable from a full snapshot.
    ///
    /// # Returns
    /// * `Ok(document)` - the stored document, carrying the assigned id
    /// * `Err(SyncError)` - the call failed; nothing was stored
    async fn create(&self, document: &TimetableDocument) -> SyncResult<TimetableDocument>;

    /// Replace the persisted timetable with the given identifier.
    /// Last write wins; there is no external-modification detection.
    async fn update(&self, id: &str, document: &TimetableDocument)
        -> SyncResult<TimetableDocument>;

    /// Faculty display names for a department, for selection controls and
    /// conflict queries.
    async fn faculty_directory(&self, department: &str) -> SyncResult<Vec<String>>;
}
