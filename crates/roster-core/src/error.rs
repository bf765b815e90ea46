//! Admission error types.

use thiserror::Error;

use crate::{RecordId, SessionId};

/// Errors returned by guarded [`AccessProxy`](crate::AccessProxy)
/// operations.
///
/// No variant is fatal: the proxy stays consistent after every misuse, and
/// drivers are expected to report the error and keep the session alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Duplicate join while queued behind another session.
    #[error("session {session} is already queued for record {record}")]
    AlreadyQueued {
        /// Session that attempted the duplicate join.
        session: SessionId,
        /// Record whose queue already contains the session.
        record: RecordId,
    },

    /// Write attempted without holding the head of the queue.
    #[error("no write permission for session {session} on record {record}")]
    NoWritePermission {
        /// Session that attempted the write.
        session: SessionId,
        /// Record the write was aimed at.
        record: RecordId,
    },
}
