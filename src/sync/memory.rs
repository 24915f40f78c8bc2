//! In-memory store implementation
//!
//! Backs unit tests and local development. Identifiers are assigned from a
//! counter; lookups key on (owner, department) the way the real service
//! does.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::documents::TimetableDocument;
use super::error::{SyncError, SyncResult};
use super::store::TimetableStore;

#[derive(Default)]
struct MemoryInner {
    next_id: u64,
    documents: HashMap<String, TimetableDocument>,
    owners: HashMap<(String, String), String>,
    directory: HashMap<String, Vec<String>>,
}

/// In-memory [`TimetableStore`] for tests and local development
#[derive(Default)]
pub struct MemoryTimetableStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryTimetableStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a timetable for an operator, as if saved in a prior session
    pub fn seed_timetable(
        &self,
        owner: &str,
        department: &str,
        mut document: TimetableDocument,
    ) -> String {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = format!("tt-{}", inner.next_id);
        document.id = Some(id.clone());
        inner
            .owners
            .insert((owner.to_string(), department.to_string()), id.clone());
        inner.documents.insert(id.clone(), document);
        id
    }

    /// Register a faculty roster for a department
    pub fn seed_faculty(&self, department: &str, names: Vec<String>) {
        self.lock().directory.insert(department.to_string(), names);
    }

    /// Stored document by id, for test inspection
    pub fn document(&self, id: &str) -> Option<TimetableDocument> {
        self.lock().documents.get(id).cloned()
    }

    pub fn document_count(&self) -> usize {
        self.lock().documents.len()
    }
}

#[async_trait]
impl TimetableStore for MemoryTimetableStore {
    async fn fetch(
        &self,
        owner: &str,
        department: &str,
    ) -> SyncResult<Option<TimetableDocument>> {
        let inner = self.lock();
        let key = (owner.to_string(), department.to_string());
        Ok(inner
            .owners
            .get(&key)
            .and_then(|id| inner.documents.get(id))
            .cloned())
    }

    async fn create(&self, document: &TimetableDocument) -> SyncResult<TimetableDocument> {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = format!("tt-{}", inner.next_id);
        let mut stored = document.clone();
        stored.id = Some(id.clone());
        inner.documents.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: &str,
        document: &TimetableDocument,
    ) -> SyncResult<TimetableDocument> {
        let mut inner = self.lock();
        if !inner.documents.contains_key(id) {
            return Err(SyncError::NotFound(id.to_string()));
        }
        let mut stored = document.clone();
        stored.id = Some(id.to_string());
        inner.documents.insert(id.to_string(), stored.clone());
        Ok(stored)
    }

    async fn faculty_directory(&self, department: &str) -> SyncResult<Vec<String>> {
        Ok(self
            .lock()
            .directory
            .get(department)
            .cloned()
            .unwrap_or_default())
    }
}
