//! Write-admission state machine for one record.
//!
//! This module implements the admission layer - granting exclusive write
//! access to exactly one session at a time, in strict join order, while
//! reads bypass ordering entirely.
//!
//! # Architecture: Action-Based State Machine
//!
//! The proxy follows the action pattern:
//! - Methods accept the acting session identifier as a parameter (no
//!   ambient "current session" lookup)
//! - Mutating methods return `Result<Vec<AccessAction>, AccessError>`
//! - Driver code executes actions (deliver acquisition notices) and decides
//!   whether to log errors
//!
//! This enables:
//! - Pure admission logic (no I/O, no locking)
//! - Easy testing (no thread-identity simulation)
//! - Composability (the driver chooses how notices reach sessions)
//!
//! # State Machine
//!
//! Per session, relative to one proxy:
//!
//! ```text
//! ┌──────────┐   join    ┌──────────────────┐  predecessors   ┌──────────────┐
//! │ Unqueued │──────────>│ Queued(non-head) │────────────────>│ Queued(head) │
//! └──────────┘           └──────────────────┘      leave      └──────────────┘
//!      ▲                          │                                   │
//!      │          leave           │                leave              │
//!      └──────────────────────────┴───────────────────────────────────┘
//! ```
//!
//! Joining while head is a no-op; joining while queued behind another
//! session is a protocol violation. The `Queued(head) -> Unqueued`
//! transition emits a [`AccessAction::NotifyAcquired`] for the successor
//! when one remains.
//!
//! # Concurrency
//!
//! The proxy itself is single-threaded state: all mutating operations take
//! `&mut self`, so the driver's mutex makes "check head, then act" atomic
//! by construction. Two sessions can never both observe themselves as head.

use crate::{
    RecordId, SessionId,
    error::AccessError,
    record::{Record, RecordUpdate},
};

/// Actions returned by the admission state machine.
///
/// The driver (server runtime or test) executes these actions after the
/// proxy call returns, outside whatever lock serializes the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessAction {
    /// Tell this session it now holds exclusive write access.
    NotifyAcquired {
        /// Session that reached the head of the queue.
        session: SessionId,
        /// Record the session acquired.
        record: RecordId,
    },
}

/// Write-admission proxy guarding one [`Record`].
///
/// Owns the record for the duration of the process and an ordered wait
/// queue of session identifiers. Only the session at the head of the queue
/// may mutate the record; reads delegate straight through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessProxy {
    /// The guarded record.
    record: Record,
    /// Wait queue, head first. Each session appears at most once; order is
    /// join order and is never rearranged.
    queue: Vec<SessionId>,
}

impl AccessProxy {
    /// Wrap a record in a proxy with an empty wait queue.
    pub fn new(record: Record) -> Self {
        Self { record, queue: Vec::new() }
    }

    /// Enqueue a session for write access.
    ///
    /// Idempotent for the current head: joining again while already holding
    /// access changes nothing and emits nothing. If the session just became
    /// head (the queue was empty), the returned actions carry its
    /// acquisition notice.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::AlreadyQueued`] if the session is queued
    /// behind another session; the queue is left untouched.
    pub fn join(&mut self, session: SessionId) -> Result<Vec<AccessAction>, AccessError> {
        if self.queue.contains(&session) {
            if self.queue[0] == session {
                return Ok(vec![]);
            }
            return Err(AccessError::AlreadyQueued { session, record: self.record.id() });
        }

        self.queue.push(session);
        if self.queue[0] == session {
            return Ok(vec![AccessAction::NotifyAcquired { session, record: self.record.id() }]);
        }
        Ok(vec![])
    }

    /// Dequeue a session, by value rather than position.
    ///
    /// If the departing session holds the head and successors remain, the
    /// returned actions carry the successor's acquisition notice. A session
    /// that is not queued is silently ignored so disconnect cleanup can
    /// call this unconditionally.
    pub fn leave(&mut self, session: SessionId) -> Vec<AccessAction> {
        let Some(position) = self.queue.iter().position(|&queued| queued == session) else {
            return vec![];
        };

        let mut actions = Vec::new();
        if position == 0 && self.queue.len() > 1 {
            actions.push(AccessAction::NotifyAcquired {
                session: self.queue[1],
                record: self.record.id(),
            });
        }
        self.queue.remove(position);
        actions
    }

    /// Whether this session currently holds write access.
    ///
    /// Pure query: false on an empty queue, no side effects.
    #[must_use]
    pub fn has_access(&self, session: SessionId) -> bool {
        self.queue.first() == Some(&session)
    }

    /// Sessions currently queued, head first.
    #[must_use]
    pub fn waiting(&self) -> &[SessionId] {
        &self.queue
    }

    /// Guarded write: replace the record's updatable fields.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NoWritePermission`] if the session is not at
    /// the head of the queue; the record is left unmodified.
    pub fn update(&mut self, session: SessionId, update: RecordUpdate) -> Result<(), AccessError> {
        self.check_access(session)?;
        self.record.apply(update);
        Ok(())
    }

    /// Guarded write: replace the record's credential.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NoWritePermission`] if the session is not at
    /// the head of the queue; the credential is left unmodified.
    pub fn set_credential(
        &mut self,
        session: SessionId,
        credential: String,
    ) -> Result<(), AccessError> {
        self.check_access(session)?;
        self.record.set_credential(credential);
        Ok(())
    }

    /// Guarded write: set or clear the record's archival flag.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NoWritePermission`] if the session is not at
    /// the head of the queue; the flag is left unmodified.
    pub fn set_archived(&mut self, session: SessionId, archived: bool) -> Result<(), AccessError> {
        self.check_access(session)?;
        self.record.set_archived(archived);
        Ok(())
    }

    /// Record identity. Reads need no queue position.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.record.id()
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.record.name()
    }

    /// Department number.
    #[must_use]
    pub fn department(&self) -> u32 {
        self.record.department()
    }

    /// Administrative flag.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.record.is_admin()
    }

    /// Archival flag.
    #[must_use]
    pub fn is_archived(&self) -> bool {
        self.record.is_archived()
    }

    /// Compare a candidate credential against the stored one.
    #[must_use]
    pub fn credential_matches(&self, candidate: &str) -> bool {
        self.record.credential_matches(candidate)
    }

    /// Read-only view of the guarded record.
    #[must_use]
    pub fn record(&self) -> &Record {
        &self.record
    }

    fn check_access(&self, session: SessionId) -> Result<(), AccessError> {
        if self.has_access(session) {
            Ok(())
        } else {
            Err(AccessError::NoWritePermission { session, record: self.record.id() })
        }
    }
}
