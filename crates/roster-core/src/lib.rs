//! Roster write-admission core logic
//!
//! Pure state machine logic for session-ordered exclusive-write admission
//! over directory records, completely decoupled from I/O. This enables
//! deterministic testing without simulating threads or sessions.
//!
//! # Architecture
//!
//! Admission logic in this crate is implemented as a deterministic state
//! machine that is isolated from locking, logging, and notification
//! delivery. The caller supplies the acting session identifier explicitly
//! on every operation.
//!
//! State transitions produce declarative actions that describe intended
//! effects rather than executing them directly. A driver (the server
//! runtime or a test) is responsible for interpreting and executing these
//! actions, and for serializing access to the state machine.
//!
//! This separation keeps admission correctness independent of execution
//! concerns: the same code runs under a production mutex and in
//! single-threaded unit tests.
//!
//! # Components
//!
//! - [`proxy`]: Write-admission state machine ([`AccessProxy`])
//! - [`record`]: Guarded record data ([`Record`])
//! - [`error`]: Admission error types

pub mod error;
pub mod proxy;
pub mod record;

pub use error::AccessError;
pub use proxy::{AccessAction, AccessProxy};
pub use record::{Record, RecordFields, RecordUpdate};

/// Identifier of a directory record, issued by the record's creator.
pub type RecordId = u64;

/// Identifier of a connected session, issued by the session registry.
///
/// The core only ever compares session identifiers by value; it never
/// generates or validates them.
pub type SessionId = u64;
