//! Commit failure policy as seen through lifecycle operations

use activebase::session::{MemorySession, SessionError};
use activebase::{CommitOutcome, Entity, Patch, RecordError};

use crate::common::{session, Customer, Order};

#[test]
fn test_operational_failure_rolls_back_and_keeps_in_memory_state() {
    let session = session();
    let mut order = Order::create(Patch::new().set("total", 12.0)).unwrap();
    session.fail_next_commit(SessionError::Operational("server closed the connection".into()));

    let outcome = order.save(&session, true).unwrap();
    assert!(outcome.is_rolled_back());
    assert_eq!(
        outcome,
        CommitOutcome::RolledBack {
            reason: "server closed the connection".into()
        }
    );

    assert_eq!(order.total, 12.0);
    assert!(session.committed("orders").is_empty());
    assert_eq!(session.staged_len(), 0);
    let stats = session.stats();
    assert_eq!(stats.rollbacks, 1);
    assert_eq!(stats.closes, 1);
}

#[test]
fn test_record_can_be_saved_again_after_rollback() {
    let session = session();
    let mut order = Order::create(Patch::new().set("total", 12.0)).unwrap();
    session.fail_next_commit(SessionError::Operational("timeout".into()));
    order.save(&session, true).unwrap();

    assert_eq!(order.save(&session, true), Ok(CommitOutcome::Committed));
    assert_eq!(Order::all(&session).unwrap().len(), 1);
}

#[test]
fn test_missing_storage_is_absorbed() {
    let session = MemorySession::new();
    let mut order = Order::create(Patch::new().set("total", 1.0)).unwrap();
    let outcome = order.save(&session, true).unwrap();
    assert_eq!(
        outcome,
        CommitOutcome::RolledBack {
            reason: "no such table: orders".into()
        }
    );
}

#[test]
fn test_unique_violation_propagates() {
    let session = session();
    let mut first = Customer::create(Patch::new().set("email", "ada@example.com")).unwrap();
    first.save(&session, true).unwrap();

    let mut second = Customer::create(Patch::new().set("email", "ada@example.com")).unwrap();
    let err = second.save(&session, true).unwrap_err();
    assert_eq!(
        err,
        RecordError::Integrity("UNIQUE constraint failed: customers.email".into())
    );
    assert_eq!(session.stats().rollbacks, 0);
    assert_eq!(session.committed("customers").len(), 1);
}

#[test]
fn test_integrity_failure_on_soft_delete_propagates() {
    let session = session();
    let mut order = Order::create(Patch::new().set("total", 1.0)).unwrap();
    order.save(&session, true).unwrap();

    session.fail_next_commit(SessionError::Integrity("foreign key violation".into()));
    assert_eq!(
        order.sdelete(&session, true),
        Err(RecordError::Integrity("foreign key violation".into()))
    );
}

#[test]
fn test_unclassified_failure_propagates() {
    let session = session();
    let mut order = Order::default();
    session.fail_next_commit(SessionError::Other("disk full".into()));
    assert_eq!(
        order.save(&session, true),
        Err(RecordError::Unclassified("disk full".into()))
    );
}

#[test]
fn test_purge_failure_is_absorbed() {
    let session = session();
    let mut order = Order::create(Patch::new().set("total", 1.0)).unwrap();
    order.save(&session, true).unwrap();

    session.fail_next_commit(SessionError::Operational("connection reset".into()));
    assert!(Order::purge(&session).unwrap().is_rolled_back());
    assert_eq!(Order::all(&session).unwrap().len(), 1);
}
