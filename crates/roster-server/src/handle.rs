//! Shared per-record handle.
//!
//! A [`RecordHandle`] is the driver-side face of one
//! [`AccessProxy`](roster_core::AccessProxy): a single mutex guards both
//! the wait queue and every delegated call into the record, so "check
//! head, then act" is atomic and readers never observe a torn write.
//!
//! Actions returned by the proxy are executed only after the mutex is
//! released. Violations are logged here and still returned to the caller
//! as typed errors, so sessions are never crashed or disconnected for
//! misbehaving.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use roster_core::{
    AccessAction, AccessError, AccessProxy, Record, RecordId, RecordUpdate, SessionId,
};

use crate::session::SessionRegistry;

/// Thread-safe handle to one guarded record.
#[derive(Debug)]
pub struct RecordHandle {
    proxy: Mutex<AccessProxy>,
    sessions: Arc<SessionRegistry>,
}

impl RecordHandle {
    pub(crate) fn new(record: Record, sessions: Arc<SessionRegistry>) -> Self {
        Self { proxy: Mutex::new(AccessProxy::new(record)), sessions }
    }

    /// Record identity.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.lock().id()
    }

    /// Enqueue a session for write access.
    ///
    /// Returns immediately; the session learns that it holds access through
    /// its mailbox, possibly before this call returns to it.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::AlreadyQueued`] on a duplicate join behind
    /// the head. The violation is logged and the queue is untouched.
    pub fn join(&self, session: SessionId) -> Result<(), AccessError> {
        // Bind before matching so the guard drops before dispatch
        let result = self.lock().join(session);
        match result {
            Ok(actions) => {
                self.dispatch(&actions);
                Ok(())
            },
            Err(error) => {
                tracing::warn!(%error, "rejected join");
                Err(error)
            },
        }
    }

    /// Dequeue a session, handing write access to its successor if it was
    /// the head.
    ///
    /// Idempotent: leaving a queue the session is not in does nothing, so
    /// disconnect cleanup can call this unconditionally.
    pub fn leave(&self, session: SessionId) {
        let actions = self.lock().leave(session);
        self.dispatch(&actions);
    }

    /// Whether this session currently holds write access.
    #[must_use]
    pub fn has_access(&self, session: SessionId) -> bool {
        self.lock().has_access(session)
    }

    /// Guarded write: replace the record's updatable fields.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NoWritePermission`] if the session is not at
    /// the head of the queue; the record is unmodified and the violation is
    /// logged.
    pub fn update(&self, session: SessionId, update: RecordUpdate) -> Result<(), AccessError> {
        let result = self.lock().update(session, update);
        self.report(result)
    }

    /// Guarded write: replace the record's credential.
    ///
    /// # Errors
    ///
    /// Same contract as [`RecordHandle::update`].
    pub fn set_credential(
        &self,
        session: SessionId,
        credential: String,
    ) -> Result<(), AccessError> {
        let result = self.lock().set_credential(session, credential);
        self.report(result)
    }

    /// Guarded write: set or clear the record's archival flag.
    ///
    /// # Errors
    ///
    /// Same contract as [`RecordHandle::update`].
    pub fn set_archived(&self, session: SessionId, archived: bool) -> Result<(), AccessError> {
        let result = self.lock().set_archived(session, archived);
        self.report(result)
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> String {
        self.lock().name().to_string()
    }

    /// Department number.
    #[must_use]
    pub fn department(&self) -> u32 {
        self.lock().department()
    }

    /// Administrative flag.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.lock().is_admin()
    }

    /// Archival flag.
    #[must_use]
    pub fn is_archived(&self) -> bool {
        self.lock().is_archived()
    }

    /// Compare a candidate credential against the stored one.
    #[must_use]
    pub fn credential_matches(&self, candidate: &str) -> bool {
        self.lock().credential_matches(candidate)
    }

    /// Consistent point-in-time copy of the record.
    #[must_use]
    pub fn snapshot(&self) -> Record {
        self.lock().record().clone()
    }

    /// Lock the proxy, recovering the guard if a previous holder panicked.
    ///
    /// The proxy keeps itself consistent across every operation, so a
    /// poisoned mutex carries no broken invariants; wedging all subsequent
    /// callers would trade availability for nothing.
    fn lock(&self) -> MutexGuard<'_, AccessProxy> {
        self.proxy.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Execute proxy actions. Must be called with the proxy mutex released.
    fn dispatch(&self, actions: &[AccessAction]) {
        for action in actions {
            match action {
                AccessAction::NotifyAcquired { session, record } => {
                    self.sessions.notify_acquired(*session, *record);
                },
            }
        }
    }

    fn report(&self, result: Result<(), AccessError>) -> Result<(), AccessError> {
        if let Err(ref error) = result {
            tracing::warn!(%error, "rejected write");
        }
        result
    }
}
