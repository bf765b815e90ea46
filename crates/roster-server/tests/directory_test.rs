//! Directory tests
//!
//! Tests for the record registry: creation, duplicate rejection, lookup,
//! discard, and the disconnect sweep.

use std::sync::Arc;

use roster_core::RecordFields;
use roster_server::{Directory, DirectoryError, SessionRegistry};

fn directory() -> Directory {
    Directory::new(Arc::new(SessionRegistry::new()))
}

fn fields(name: &str) -> RecordFields {
    RecordFields {
        name: name.to_string(),
        department: 1,
        admin: false,
        credential: "pw".to_string(),
    }
}

#[test]
fn new_directory_has_no_records() {
    let directory = directory();
    assert!(!directory.has_record(0x1234));
}

#[test]
fn create_record_succeeds_for_new_identity() {
    let directory = directory();

    let handle = directory.create_record(42, fields("Ada")).unwrap();
    assert_eq!(handle.id(), 42);
    assert!(directory.has_record(42));
}

#[test]
fn create_record_rejects_duplicate() {
    let directory = directory();
    directory.create_record(42, fields("Ada")).unwrap();

    let result = directory.create_record(42, fields("Grace"));
    assert!(matches!(result, Err(DirectoryError::RecordAlreadyExists(42))));

    // The existing record is untouched
    assert_eq!(directory.record(42).unwrap().name(), "Ada");
}

#[test]
fn create_multiple_records() {
    let directory = directory();

    directory.create_record(1, fields("Ada")).unwrap();
    directory.create_record(2, fields("Grace")).unwrap();
    directory.create_record(3, fields("Edsger")).unwrap();

    assert!(directory.has_record(1));
    assert!(directory.has_record(2));
    assert!(directory.has_record(3));
}

#[test]
fn lookup_unknown_record_fails() {
    let directory = directory();

    let result = directory.record(0x9999);
    assert!(matches!(result, Err(DirectoryError::RecordNotFound(0x9999))));
}

#[test]
fn discard_drops_record_and_queue() {
    let directory = directory();
    directory.create_record(42, fields("Ada")).unwrap();

    directory.discard(42).unwrap();
    assert!(!directory.has_record(42));

    let result = directory.discard(42);
    assert!(matches!(result, Err(DirectoryError::RecordNotFound(42))));
}

#[test]
fn release_session_sweeps_every_queue() {
    let sessions = Arc::new(SessionRegistry::new());
    let directory = Directory::new(sessions.clone());
    let (departing, _rx1) = sessions.register();
    let (successor, _rx2) = sessions.register();

    let first = directory.create_record(1, fields("Ada")).unwrap();
    let second = directory.create_record(2, fields("Grace")).unwrap();
    first.join(departing).unwrap();
    second.join(departing).unwrap();
    first.join(successor).unwrap();
    second.join(successor).unwrap();

    directory.release_session(departing);

    assert!(first.has_access(successor));
    assert!(second.has_access(successor));
    assert!(!first.has_access(departing));
    assert!(!second.has_access(departing));
}

#[test]
fn release_session_tolerates_unknown_session() {
    let directory = directory();
    directory.create_record(1, fields("Ada")).unwrap();

    // Session never joined anything; sweep must be a no-op
    directory.release_session(404);
}
