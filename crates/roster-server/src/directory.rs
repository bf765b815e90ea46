//! Record registry.
//!
//! The directory owns one [`RecordHandle`] per record and is the only
//! place handles are created or discarded. Proxy and record share a
//! lifetime: discarding a record drops its admission queue with it.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use roster_core::{Record, RecordFields, RecordId, SessionId};

use crate::{error::DirectoryError, handle::RecordHandle, session::SessionRegistry};

/// Registry of guarded records, keyed by identity.
#[derive(Debug)]
pub struct Directory {
    sessions: Arc<SessionRegistry>,
    records: Mutex<HashMap<RecordId, Arc<RecordHandle>>>,
}

impl Directory {
    /// Create an empty directory delivering notices through `sessions`.
    #[must_use]
    pub fn new(sessions: Arc<SessionRegistry>) -> Self {
        Self { sessions, records: Mutex::new(HashMap::new()) }
    }

    /// Create a record and its admission proxy together.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::RecordAlreadyExists`] if the identity is
    /// taken.
    pub fn create_record(
        &self,
        id: RecordId,
        fields: RecordFields,
    ) -> Result<Arc<RecordHandle>, DirectoryError> {
        let mut records = self.records();
        if records.contains_key(&id) {
            return Err(DirectoryError::RecordAlreadyExists(id));
        }

        let handle = Arc::new(RecordHandle::new(Record::new(id, fields), self.sessions.clone()));
        records.insert(id, handle.clone());
        tracing::info!(record = id, "created record");
        Ok(handle)
    }

    /// Whether a record with this identity exists.
    #[must_use]
    pub fn has_record(&self, id: RecordId) -> bool {
        self.records().contains_key(&id)
    }

    /// Look up a record handle.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::RecordNotFound`] for unknown identities.
    pub fn record(&self, id: RecordId) -> Result<Arc<RecordHandle>, DirectoryError> {
        self.records().get(&id).cloned().ok_or(DirectoryError::RecordNotFound(id))
    }

    /// Discard a record, dropping its handle and wait queue.
    ///
    /// Sessions still holding the `Arc` keep a working handle until they
    /// drop it; the directory simply stops handing it out.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::RecordNotFound`] for unknown identities.
    pub fn discard(&self, id: RecordId) -> Result<(), DirectoryError> {
        match self.records().remove(&id) {
            Some(_) => {
                tracing::info!(record = id, "discarded record");
                Ok(())
            },
            None => Err(DirectoryError::RecordNotFound(id)),
        }
    }

    /// Remove a departed session from every record's wait queue.
    ///
    /// Leave is idempotent, so this is safe to run for sessions that never
    /// joined anything. Queues whose head departs hand off to the successor
    /// as usual.
    pub fn release_session(&self, session: SessionId) {
        let handles: Vec<Arc<RecordHandle>> = self.records().values().cloned().collect();
        for handle in handles {
            handle.leave(session);
        }
        tracing::debug!(session, "released session from all queues");
    }

    fn records(
        &self,
    ) -> std::sync::MutexGuard<'_, HashMap<RecordId, Arc<RecordHandle>>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
