//! In-memory fakes for the external collaborator boundaries.
//!
//! The remote repository is normally a network-backed client constructed by
//! the host application. Tests (and local development) substitute this
//! in-memory implementation, which also counts upsert invocations so the
//! coalescing and guest-gating rules can be asserted directly.

use async_trait::async_trait;
use scribe_core::error::{Result, ScribeError};
use scribe_core::session::{
    RemoteRecord, RemoteSessionRepository, RemoteStudentRow, RemoteUpsert,
};
use scribe_infrastructure::LocalStore;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory [`LocalStore`] counting `set` invocations.
#[derive(Default)]
pub struct InMemoryLocalStore {
    entries: Mutex<HashMap<String, String>>,
    set_calls: AtomicUsize,
}

impl InMemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` invocations so far.
    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocalStore for InMemoryLocalStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// In-memory [`RemoteSessionRepository`] keyed by session id.
#[derive(Default)]
pub struct InMemoryRemoteRepository {
    records: Mutex<HashMap<String, RemoteRecord>>,
    student_rows: Mutex<HashMap<String, Vec<RemoteStudentRow>>>,
    upsert_calls: AtomicUsize,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl InMemoryRemoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `upsert_by_session_id` invocations so far.
    pub fn upsert_calls(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }

    /// The stored row for a session, if any.
    pub fn record(&self, session_id: &str) -> Option<RemoteRecord> {
        self.records.lock().unwrap().get(session_id).cloned()
    }

    /// Makes every write fail until reset, for error-path tests.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes every read fail until reset, for error-path tests.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Seeds a stored row, as if a previous device had written it.
    pub fn seed_record(&self, record: RemoteRecord) {
        self.records
            .lock()
            .unwrap()
            .insert(record.session_id.clone(), record);
    }

    /// Seeds a per-student child row.
    pub fn seed_student_row(&self, row: RemoteStudentRow) {
        self.student_rows
            .lock()
            .unwrap()
            .entry(row.session_id.clone())
            .or_default()
            .push(row);
    }
}

#[async_trait]
impl RemoteSessionRepository for InMemoryRemoteRepository {
    async fn upsert_by_session_id(
        &self,
        session_id: &str,
        fields: RemoteUpsert,
    ) -> Result<RemoteRecord> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ScribeError::data_access("injected write failure"));
        }

        let mut records = self.records.lock().unwrap();
        let record = records
            .entry(session_id.to_string())
            .and_modify(|existing| {
                existing.title = fields.title.clone();
                existing.metadata = fields.metadata.clone();
                if let Some(draft) = fields.draft_text.clone() {
                    existing.draft_text = Some(draft);
                }
                if let Some(text) = fields.final_text.clone() {
                    existing.final_text = Some(text);
                }
                existing.updated_at = fields.updated_at.clone();
            })
            .or_insert_with(|| RemoteRecord {
                id: format!("row_{}", uuid::Uuid::new_v4()),
                session_id: session_id.to_string(),
                title: fields.title.clone(),
                metadata: fields.metadata.clone(),
                draft_text: fields.draft_text.clone(),
                final_text: fields.final_text.clone(),
                updated_at: fields.updated_at.clone(),
            });
        Ok(record.clone())
    }

    async fn get_by_session_id(&self, session_id: &str) -> Result<Option<RemoteRecord>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ScribeError::data_access("injected read failure"));
        }
        Ok(self.records.lock().unwrap().get(session_id).cloned())
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        records.retain(|_, record| record.id != id);
        Ok(())
    }

    async fn list_student_rows(&self, session_id: &str) -> Result<Vec<RemoteStudentRow>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ScribeError::data_access("injected read failure"));
        }
        Ok(self
            .student_rows
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn upsert_student_row(&self, session_id: &str, row: RemoteStudentRow) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ScribeError::data_access("injected write failure"));
        }
        let mut rows = self.student_rows.lock().unwrap();
        let entries = rows.entry(session_id.to_string()).or_default();
        if let Some(existing) = entries
            .iter_mut()
            .find(|existing| existing.student_id == row.student_id)
        {
            *existing = row;
        } else {
            entries.push(row);
        }
        Ok(())
    }
}
