//! Query access: find, all, filter_by and the guarded retry

use activebase::session::SessionError;
use activebase::{Entity, Patch, RecordError, Status};

use crate::common::{session, timestamp, Order};

fn seed(session: &activebase::session::MemorySession) {
    for (total, customer) in [(10.0, 1i64), (20.0, 1), (30.0, 2)] {
        let mut order = Order::create(
            Patch::new()
                .set("total", total)
                .set("customer_id", customer)
                .set("placed_at", timestamp(2024, 1, 15, 9, 30)),
        )
        .unwrap();
        order.save(session, true).unwrap();
    }
}

#[test]
fn test_all_and_find() {
    let session = session();
    seed(&session);

    let orders = Order::all(&session).unwrap();
    assert_eq!(orders.len(), 3);
    assert_eq!(
        orders.iter().map(|o| o.total).collect::<Vec<_>>(),
        vec![10.0, 20.0, 30.0]
    );
    assert_eq!(orders[0].placed_at, Some(timestamp(2024, 1, 15, 9, 30)));

    let id = orders[1].id.unwrap();
    let found = Order::find(&session, id).unwrap().unwrap();
    assert_eq!(found.total, 20.0);
    assert!(Order::find(&session, 12345).unwrap().is_none());
}

#[test]
fn test_reads_see_staged_work() {
    let session = session();
    let mut order = Order::create(Patch::new().set("total", 5.0)).unwrap();
    order.save(&session, false).unwrap();
    assert_eq!(Order::all(&session).unwrap().len(), 1);
}

#[test]
fn test_filter_by_names_and_handles() {
    let session = session();
    seed(&session);

    let by_name = Order::filter_by(&session, [("customer_id", 1i64)]).unwrap();
    assert_eq!(by_name.len(), 2);

    let by_handle = Order::filter_by(
        &session,
        [(Order::CUSTOMER_ID, activebase::Value::from(2i64))],
    )
    .unwrap();
    assert_eq!(by_handle.len(), 1);
    assert_eq!(by_handle[0].total, 30.0);

    let by_status = Order::filter_by(&session, [("active", Status::Active)]).unwrap();
    assert_eq!(by_status.len(), 3);
}

#[test]
fn test_filter_by_rejects_unknown_fields() {
    let session = session();
    assert_eq!(
        Order::filter_by(&session, [("colour", "red")]).unwrap_err(),
        RecordError::InvalidField("colour".into())
    );
    assert_eq!(
        Order::filter_by(&session, [("lines", 1i64)]).unwrap_err(),
        RecordError::InvalidField("lines".into())
    );
}

#[test]
fn test_operational_query_failure_is_retried_once() {
    let session = session();
    seed(&session);
    session.fail_next_query(SessionError::Operational("connection reset".into()));

    assert_eq!(Order::all(&session).unwrap().len(), 3);
    let stats = session.stats();
    assert_eq!(stats.rollbacks, 1);
}

#[test]
fn test_second_query_failure_surfaces() {
    let session = session();
    session.fail_next_query(SessionError::Operational("down".into()));
    session.fail_next_query(SessionError::Operational("still down".into()));

    assert_eq!(
        Order::find(&session, 1).unwrap_err(),
        RecordError::Operational("still down".into())
    );
}

#[test]
fn test_non_operational_query_failure_is_not_retried() {
    let session = session();
    session.fail_next_query(SessionError::Other("bad cursor".into()));

    assert_eq!(
        Order::all(&session).unwrap_err(),
        RecordError::Unclassified("bad cursor".into())
    );
    assert_eq!(session.stats().rollbacks, 0);
}
