//! Session-ID issuance and acquisition-notice delivery.
//!
//! The registry plays the session-coordinator role: it hands out session
//! identifiers and owns one mailbox per registered session. Notice delivery
//! is fire-and-forget; whether and when a session drains its mailbox is its
//! own business.

use std::{
    collections::HashMap,
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use roster_core::{RecordId, SessionId};
use tokio::sync::mpsc;

/// Events delivered to a session's mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The session has reached the head of a record's wait queue and now
    /// holds exclusive write access.
    WriteAcquired {
        /// Record the session acquired.
        record: RecordId,
    },
}

/// Issues session identifiers and routes events to per-session mailboxes.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    next_session: AtomicU64,
    mailboxes: Mutex<HashMap<SessionId, mpsc::UnboundedSender<SessionEvent>>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session: issue an identifier and open its mailbox.
    ///
    /// The returned receiver is the session's end of the mailbox; dropping
    /// it makes subsequent notices to this session no-ops.
    pub fn register(&self) -> (SessionId, mpsc::UnboundedReceiver<SessionEvent>) {
        let session = self.next_session.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::unbounded_channel();
        self.mailboxes().insert(session, sender);
        (session, receiver)
    }

    /// Remove a session's mailbox.
    ///
    /// Safe to call for sessions that were never registered.
    pub fn deregister(&self, session: SessionId) {
        self.mailboxes().remove(&session);
    }

    /// Deliver a write-acquired notice to a session, fire-and-forget.
    ///
    /// A missing or closed mailbox means the session is gone; the notice is
    /// dropped.
    pub fn notify_acquired(&self, session: SessionId, record: RecordId) {
        let delivered = self
            .mailboxes()
            .get(&session)
            .is_some_and(|sender| sender.send(SessionEvent::WriteAcquired { record }).is_ok());
        if delivered {
            tracing::debug!(session, record, "delivered write-acquired notice");
        } else {
            tracing::debug!(session, record, "dropped notice for departed session");
        }
    }

    fn mailboxes(
        &self,
    ) -> std::sync::MutexGuard<'_, HashMap<SessionId, mpsc::UnboundedSender<SessionEvent>>> {
        self.mailboxes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_issues_distinct_identifiers() {
        let registry = SessionRegistry::new();
        let (first, _rx1) = registry.register();
        let (second, _rx2) = registry.register();
        assert_ne!(first, second);
    }

    #[test]
    fn notice_reaches_registered_mailbox() {
        let registry = SessionRegistry::new();
        let (session, mut mailbox) = registry.register();

        registry.notify_acquired(session, 9);
        assert!(matches!(mailbox.try_recv(), Ok(SessionEvent::WriteAcquired { record: 9 })));
    }

    #[test]
    fn notice_to_unknown_session_is_dropped() {
        let registry = SessionRegistry::new();
        // Must not panic or block
        registry.notify_acquired(404, 9);
    }

    #[test]
    fn deregistered_session_receives_nothing() {
        let registry = SessionRegistry::new();
        let (session, mut mailbox) = registry.register();
        registry.deregister(session);

        registry.notify_acquired(session, 9);
        assert!(mailbox.try_recv().is_err());
    }
}
