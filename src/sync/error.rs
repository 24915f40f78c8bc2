//! Error types for sync operations
//!
//! Preconditions are checked before any I/O; transport and decode failures
//! wrap whatever the wire reported. The `Display` text doubles as the status
//! message the operator sees, so no variant carries jargon.

use thiserror::Error;

/// Result type for sync operations
pub type SyncResult<T> = std::result::Result<T, SyncError>;

/// A failed sync operation. The in-memory grid is never discarded because of
/// one of these; every failure is recoverable in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    // Preconditions
    #[error("no API credential is available; sign in again")]
    MissingCredential,
    #[error("fill in the {0} before saving")]
    MissingMetadata(&'static str),
    #[error("add at least one subject before saving")]
    EmptyCatalog,
    #[error("save the timetable once before updating it")]
    MissingIdentifier,
    #[error("a {0} request is already in progress")]
    RequestInFlight(&'static str),

    // Wire failures
    #[error("timetable {0} was not found")]
    NotFound(String),
    #[error("network error: {0}")]
    Transport(String),
    #[error("the timetable service answered {status}: {detail}")]
    UnexpectedStatus { status: u16, detail: String },
    #[error("could not read the service response: {0}")]
    Decode(String),
}
