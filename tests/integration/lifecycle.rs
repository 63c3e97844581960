//! Entity lifecycle: create, update, save, delete, soft delete, restore, purge

use activebase::session::Session;
use activebase::{commit, CommitOutcome, Entity, Patch, Record, RecordError, Status, Value};

use crate::common::{session, timestamp, Customer, Order, OrderLine};

#[test]
fn test_create_does_not_persist() {
    let session = session();
    let order = Order::create(Patch::new().set("total", 10.0)).unwrap();

    assert_eq!(order.id, None);
    assert_eq!(order.total, 10.0);
    assert_eq!(order.active, Status::Active);
    assert_eq!(session.staged_len(), 0);
    assert!(session.committed("orders").is_empty());
}

#[test]
fn test_save_assigns_identity_and_commits() {
    let session = session();
    let mut order = Order::create(Patch::new().set(Order::TOTAL, 25.5)).unwrap();

    let outcome = order.save(&session, true).unwrap();
    assert_eq!(outcome, CommitOutcome::Committed);
    let id = order.id.expect("id assigned on save");

    let stored = session.committed("orders");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].0, id);
    assert_eq!(stored[0].1.get("total"), Some(&Value::from(25.5f64)));
    assert_eq!(stored[0].1.get("active"), Some(&Value::from("Y")));
    assert!(!stored[0].1.contains_key("id"));
}

#[test]
fn test_assigned_id_is_not_reused() {
    let session = session();
    let mut first = Order::create(Patch::new().set("total", 1.0)).unwrap();
    first.id = Some(1);
    first.save(&session, true).unwrap();

    let mut second = Order::create(Patch::new().set("total", 2.0)).unwrap();
    second.save(&session, true).unwrap();

    assert_ne!(second.id, first.id);
    let orders = Order::all(&session).unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(Order::find(&session, 1).unwrap().unwrap().total, 1.0);
}

#[test]
fn test_save_without_commit_is_deferred() {
    let session = session();
    let mut first = Order::create(Patch::new().set("total", 1.0)).unwrap();
    let mut second = Order::create(Patch::new().set("total", 2.0)).unwrap();

    assert_eq!(first.save(&session, false), Ok(CommitOutcome::Deferred));
    assert_eq!(second.save(&session, false), Ok(CommitOutcome::Deferred));
    assert!(session.committed("orders").is_empty());
    assert_eq!(session.staged_len(), 2);

    assert_eq!(first.commit(&session), Ok(CommitOutcome::Committed));
    assert_eq!(session.committed("orders").len(), 2);
}

#[test]
fn test_update_never_changes_id() {
    let session = session();
    let mut order = Order::create(Patch::new().set("total", 5.0)).unwrap();
    order.save(&session, true).unwrap();
    let id = order.id;

    order
        .update(&session, Patch::new().set("id", 999i64).set("total", 6.0), true)
        .unwrap();
    assert_eq!(order.id, id);
    assert_eq!(order.total, 6.0);
    assert_eq!(session.committed("orders").len(), 1);
}

#[test]
fn test_update_drops_unknown_fields_and_relationships() {
    let mut order = Order::create(Patch::new().set("total", 5.0)).unwrap();
    let applied = order
        .apply(
            Patch::new()
                .set("shipping_code", "XYZ")
                .set("lines", 3i64)
                .set("customer", 1i64),
        )
        .unwrap();
    assert_eq!(applied, 0);
    assert_eq!(order.total, 5.0);
    assert!(order.lines.is_empty());
    assert!(order.customer.is_none());
}

#[test]
fn test_update_accepts_column_handles_and_status() {
    let mut order = Order::default();
    let applied = order
        .apply(
            Patch::new()
                .set(Order::CUSTOMER_ID, 7i64)
                .set(Order::ACTIVE, Status::Inactive),
        )
        .unwrap();
    assert_eq!(applied, 2);
    assert_eq!(order.customer_id, Some(7));
    assert_eq!(order.active, Status::Inactive);
}

#[test]
fn test_update_without_commit_stages_nothing() {
    let session = session();
    let mut order = Order::default();
    let outcome = order
        .update(&session, Patch::new().set("total", 3.0), false)
        .unwrap();
    assert_eq!(outcome, CommitOutcome::Deferred);
    assert_eq!(order.total, 3.0);
    assert_eq!(session.staged_len(), 0);
    assert_eq!(order.id, None);
}

#[test]
fn test_update_rejects_mistyped_values() {
    let mut order = Order::default();
    let err = order
        .apply(Patch::new().set("total", "a lot"))
        .unwrap_err();
    assert!(matches!(err, RecordError::InvalidValueType { ref column, .. } if column == "total"));
    assert_eq!(order.total, 0.0);
}

#[test]
fn test_failed_patch_leaves_record_unchanged() {
    let mut order = Order::create(
        Patch::new()
            .set("total", 5.0)
            .set("placed_at", timestamp(2024, 2, 2, 8, 0)),
    )
    .unwrap();

    let err = order
        .apply(
            Patch::new()
                .set("total", 9.0)
                .set("placed_at", Value::ChronoDateTime(None))
                .set("customer_id", "oops"),
        )
        .unwrap_err();
    assert!(matches!(err, RecordError::InvalidValueType { ref column, .. } if column == "customer_id"));
    assert_eq!(order.total, 5.0);
    assert_eq!(order.placed_at, Some(timestamp(2024, 2, 2, 8, 0)));
    assert_eq!(order.customer_id, None);
}

#[test]
fn test_sdelete_keeps_row_and_is_idempotent() {
    let session = session();
    let mut order = Order::create(Patch::new().set("total", 40.0)).unwrap();
    order.save(&session, true).unwrap();
    let id = order.id.unwrap();

    assert_eq!(order.sdelete(&session, true), Ok(CommitOutcome::Committed));
    assert_eq!(order.active, Status::Deleted);
    assert_eq!(order.sdelete(&session, true), Ok(CommitOutcome::Committed));
    assert_eq!(order.active, Status::Deleted);

    let stored = Order::find(&session, id).unwrap().expect("row still stored");
    assert_eq!(stored.active, Status::Deleted);
    assert_eq!(stored.total, 40.0);
}

#[test]
fn test_restore_after_sdelete() {
    let session = session();
    let mut order = Order::create(Patch::new().set("total", 1.0)).unwrap();
    order.save(&session, true).unwrap();
    order.sdelete(&session, true).unwrap();

    assert_eq!(order.restore(&session, true), Ok(CommitOutcome::Committed));
    assert_eq!(order.active, Status::Active);
    let stored = Order::find(&session, order.id.unwrap()).unwrap().unwrap();
    assert_eq!(stored.active, Status::Active);
}

#[test]
fn test_sdelete_respects_commit_flag() {
    let session = session();
    let mut order = Order::create(Patch::new().set("total", 1.0)).unwrap();
    order.save(&session, true).unwrap();
    let commits = session.stats().commits;

    assert_eq!(order.sdelete(&session, false), Ok(CommitOutcome::Deferred));
    assert_eq!(session.stats().commits, commits);
    assert_eq!(
        session.committed("orders")[0].1.get("active"),
        Some(&Value::from("Y"))
    );

    commit(&session).unwrap();
    assert_eq!(
        session.committed("orders")[0].1.get("active"),
        Some(&Value::from("D"))
    );
}

#[test]
fn test_soft_delete_then_purge() {
    let session = session();
    let mut order = Order::create(Patch::new().set("total", 99.0)).unwrap();
    order.save(&session, true).unwrap();
    let id = order.id.unwrap();

    order.sdelete(&session, true).unwrap();
    assert_eq!(order.active, Status::Deleted);
    assert!(Order::find(&session, id).unwrap().is_some());

    assert_eq!(Order::purge(&session), Ok(CommitOutcome::Committed));
    assert!(Order::find(&session, id).unwrap().is_none());
    assert!(Order::all(&session).unwrap().is_empty());
}

#[test]
fn test_purge_only_touches_its_own_table() {
    let session = session();
    let mut line = OrderLine::create(Patch::new().set("sku", "A-1").set("quantity", 2i32)).unwrap();
    line.save(&session, true).unwrap();
    let mut order = Order::create(Patch::new().set("total", 1.0)).unwrap();
    order.save(&session, true).unwrap();

    Order::purge(&session).unwrap();
    assert_eq!(OrderLine::all(&session).unwrap().len(), 1);
}

#[test]
fn test_delete() {
    let session = session();
    let transient = Order::default();
    assert_eq!(transient.delete(&session), Err(RecordError::PrimaryKeyRequired));

    let mut order = Order::create(Patch::new().set("total", 1.0)).unwrap();
    order.save(&session, true).unwrap();
    let id = order.id.unwrap();

    assert_eq!(order.delete(&session), Ok(CommitOutcome::Committed));
    assert!(Order::find(&session, id).unwrap().is_none());
    // in-memory state is untouched
    assert_eq!(order.total, 1.0);
}

#[test]
fn test_close_releases_session() {
    let session = session();
    let mut order = Order::create(Patch::new().set("total", 1.0)).unwrap();
    order.save(&session, false).unwrap();

    order.close(&session).unwrap();
    assert_eq!(session.stats().closes, 1);
    assert_eq!(session.staged_len(), 0);
    assert_eq!(order.total, 1.0);
}

#[test]
fn test_equality() {
    let a = Order::create(Patch::new().set("total", 3.0)).unwrap();
    let b = Order::create(Patch::new().set("total", 3.0)).unwrap();
    let c = Order::create(Patch::new().set("total", 4.0)).unwrap();

    assert_eq!(a.try_eq(&b), Ok(true));
    assert_eq!(a.try_eq(&c), Ok(false));

    // relationships are not compared
    let mut d = Order::create(Patch::new().set("total", 3.0)).unwrap();
    d.lines.push(OrderLine::default());
    assert_eq!(a.try_eq(&d), Ok(true));
}

#[test]
fn test_equality_across_types_is_an_error() {
    let order = Order::default();
    let customer = Customer::default();
    assert_eq!(
        order.try_eq(&customer),
        Err(RecordError::TypeMismatch {
            left: "Order",
            right: "Customer",
        })
    );
}

#[test]
fn test_saved_and_loaded_records_are_equal() {
    let session = session();
    let mut order = Order::create(Patch::new().set("total", 8.0).set("customer_id", 3i64)).unwrap();
    order.save(&session, true).unwrap();

    let loaded = Order::find(&session, order.id.unwrap()).unwrap().unwrap();
    assert_eq!(loaded.try_eq(&order), Ok(true));
}

#[test]
fn test_dyn_session() {
    let session = session();
    let dyn_session: &dyn Session = &session;
    let mut order = Order::create(Patch::new().set("total", 1.0)).unwrap();
    assert!(order.save(dyn_session, true).unwrap().is_committed());
}
