//! Directory error types.

use roster_core::RecordId;
use thiserror::Error;

/// Errors returned by [`Directory`](crate::Directory) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// A record with this identity already exists.
    #[error("record {0} already exists")]
    RecordAlreadyExists(RecordId),

    /// No record with this identity is registered.
    #[error("record {0} not found")]
    RecordNotFound(RecordId),
}
