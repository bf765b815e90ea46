//! Guarded record data.
//!
//! A [`Record`] holds the mutable fields of one directory entry and performs
//! the actual mutation or read when invoked. It has no ordering knowledge
//! and no internal locking; correctness of concurrent access is entirely
//! the responsibility of the owning [`AccessProxy`](crate::AccessProxy).

use serde::{Deserialize, Serialize};

use crate::RecordId;

/// Initial field values for a newly created record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    /// Display name.
    pub name: String,
    /// Department number.
    pub department: u32,
    /// Whether the record holder has administrative rights.
    pub admin: bool,
    /// Login credential.
    pub credential: String,
}

/// Payload of a guarded write: the fields a single update may change.
///
/// Credential and archival changes go through their own operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordUpdate {
    /// New display name.
    pub name: String,
    /// New department number.
    pub department: u32,
    /// New administrative flag.
    pub admin: bool,
}

/// One directory entry: an immutable identity plus mutable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    id: RecordId,
    name: String,
    department: u32,
    admin: bool,
    credential: String,
    archived: bool,
}

impl Record {
    /// Create a record with the given identity and initial fields.
    ///
    /// Records start out unarchived.
    pub fn new(id: RecordId, fields: RecordFields) -> Self {
        Self {
            id,
            name: fields.name,
            department: fields.department,
            admin: fields.admin,
            credential: fields.credential,
            archived: false,
        }
    }

    /// Record identity.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Department number.
    #[must_use]
    pub fn department(&self) -> u32 {
        self.department
    }

    /// Whether the record holder has administrative rights.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Whether the record has been archived.
    #[must_use]
    pub fn is_archived(&self) -> bool {
        self.archived
    }

    /// Compare a candidate credential against the stored one.
    #[must_use]
    pub fn credential_matches(&self, candidate: &str) -> bool {
        self.credential == candidate
    }

    /// Apply a write, replacing the updatable fields.
    pub fn apply(&mut self, update: RecordUpdate) {
        self.name = update.name;
        self.department = update.department;
        self.admin = update.admin;
    }

    /// Replace the stored credential.
    pub fn set_credential(&mut self, credential: String) {
        self.credential = credential;
    }

    /// Set or clear the archival flag.
    pub fn set_archived(&mut self, archived: bool) {
        self.archived = archived;
    }
}
