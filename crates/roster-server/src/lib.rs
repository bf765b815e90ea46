//! Roster admission driver runtime.
//!
//! Executes the effects that [`roster_core`] only describes: serializing
//! proxy access behind a per-record mutex, delivering acquisition notices
//! to per-session mailboxes, and reporting protocol misuse through
//! structured logging.
//!
//! # Components
//!
//! - [`directory`]: Registry of shared record handles ([`Directory`])
//! - [`handle`]: Per-record handle serializing proxy access ([`RecordHandle`])
//! - [`session`]: Session-ID issuance and notice delivery ([`SessionRegistry`])
//! - [`error`]: Directory error types
//!
//! # Concurrency
//!
//! One mutex per record guards both the wait queue and every delegated
//! call into the record, so permission checks and the mutations they gate
//! are atomic. Acquisition notices are dispatched after the record mutex
//! is released; a slow consumer can never hold up the queue.

pub mod directory;
pub mod error;
pub mod handle;
pub mod session;

pub use directory::Directory;
pub use error::DirectoryError;
pub use handle::RecordHandle;
pub use session::{SessionEvent, SessionRegistry};
