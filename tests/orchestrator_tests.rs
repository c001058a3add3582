use punchpad::core::orchestrator::toggle_punch;
use punchpad::core::queue::DurableQueue;
use punchpad::db::punches::{get_open_punch, insert_open_punch, last_punch};
use punchpad::db::settings::PunchPolicy;
use punchpad::errors::AppError;
use punchpad::models::outcome::PunchStatus;
use punchpad::models::punch_action::PunchAction;
use std::path::Path;

mod common;
use common::{
    add_employee_raw, insert_closed_punch, insert_open_punch_raw, open_test_conn, queue_path_for,
    setup_test_db, utc,
};

#[test]
fn toggle_alternates_in_and_out() {
    let db_path = setup_test_db("orch_alternate");
    let conn = open_test_conn(&db_path);
    let emp = add_employee_raw(&conn, "Ada");
    let queue = DurableQueue::new(queue_path_for(&db_path));
    let policy = PunchPolicy::default();

    let r1 = toggle_punch(
        &conn,
        &queue,
        &policy,
        emp,
        "kiosk",
        None,
        utc("2025-06-01T08:00:00Z"),
    )
    .unwrap();
    assert_eq!(r1.status, PunchStatus::Ok);
    assert_eq!(r1.action, PunchAction::In);
    assert!(r1.punch_id.is_some());
    assert!(get_open_punch(&conn, emp).unwrap().is_some());

    // An open punch flips the desired action; opposite directions are
    // never debounced, so a quick out after an in goes through.
    let r2 = toggle_punch(
        &conn,
        &queue,
        &policy,
        emp,
        "kiosk",
        None,
        utc("2025-06-01T08:00:05Z"),
    )
    .unwrap();
    assert_eq!(r2.status, PunchStatus::Ok);
    assert_eq!(r2.action, PunchAction::Out);
    assert!(get_open_punch(&conn, emp).unwrap().is_none());

    let last = last_punch(&conn, emp).unwrap().unwrap();
    assert_eq!(last.clock_in, "2025-06-01T08:00:00Z");
    assert_eq!(last.clock_out.as_deref(), Some("2025-06-01T08:00:05Z"));
}

/// Queue replay can leave an open punch older than the newest closed row;
/// the newest row then carries the same direction as the desired action.
fn seed_same_direction_state(conn: &rusqlite::Connection, emp: i64) {
    insert_open_punch_raw(conn, emp, "2025-06-01T08:00:00Z");
    insert_closed_punch(conn, emp, "2025-06-01T08:00:10Z", "2025-06-01T08:00:40Z");
}

#[test]
fn duplicate_inside_window_is_blocked() {
    let db_path = setup_test_db("orch_blocked");
    let conn = open_test_conn(&db_path);
    let emp = add_employee_raw(&conn, "Ada");
    seed_same_direction_state(&conn, emp);
    let queue = DurableQueue::new(queue_path_for(&db_path));
    let policy = PunchPolicy::default();

    // Last action was `out` at 08:00:40; desired is `out`; delta 29s.
    let r = toggle_punch(
        &conn,
        &queue,
        &policy,
        emp,
        "kiosk",
        None,
        utc("2025-06-01T08:01:09Z"),
    )
    .unwrap();
    assert_eq!(r.status, PunchStatus::Blocked);
    assert_eq!(r.action, PunchAction::Out);
    assert_eq!(r.retry_after_seconds, Some(30));
    assert!(r.punch_id.is_none());

    // Nothing written: the open punch is still open.
    assert!(get_open_punch(&conn, emp).unwrap().is_some());
    // Nothing queued either; blocked punches never reach the queue.
    assert!(!Path::new(&queue_path_for(&db_path)).exists());
}

#[test]
fn delta_of_exactly_the_window_is_allowed() {
    let db_path = setup_test_db("orch_boundary");
    let conn = open_test_conn(&db_path);
    let emp = add_employee_raw(&conn, "Ada");
    seed_same_direction_state(&conn, emp);
    let queue = DurableQueue::new(queue_path_for(&db_path));
    let policy = PunchPolicy::default();

    // delta == debounce window (30s after 08:00:40): a legitimate re-entry.
    let r = toggle_punch(
        &conn,
        &queue,
        &policy,
        emp,
        "kiosk",
        None,
        utc("2025-06-01T08:01:10Z"),
    )
    .unwrap();
    assert_eq!(r.status, PunchStatus::Ok);
    assert_eq!(r.action, PunchAction::Out);
    assert!(get_open_punch(&conn, emp).unwrap().is_none());
}

#[test]
fn store_failure_falls_back_to_the_queue() {
    let db_path = setup_test_db("orch_queued");
    let conn = open_test_conn(&db_path);
    let emp = add_employee_raw(&conn, "Ada");
    let queue_path = queue_path_for(&db_path);
    let queue = DurableQueue::new(&queue_path);
    let policy = PunchPolicy::default();

    // Reads still work; only the punch write fails.
    conn.execute_batch(
        "CREATE TRIGGER store_offline BEFORE INSERT ON punches
         BEGIN SELECT RAISE(ABORT, 'store offline'); END;",
    )
    .unwrap();

    let r = toggle_punch(
        &conn,
        &queue,
        &policy,
        emp,
        "kiosk",
        Some("forgot badge"),
        utc("2025-06-01T08:00:00Z"),
    )
    .unwrap();
    assert_eq!(r.status, PunchStatus::Queued);
    assert_eq!(r.action, PunchAction::In);
    assert!(r.punch_id.is_none());
    assert!(r.event_id.is_some());

    let events = queue.snapshot().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, r.event_id.unwrap());
    assert_eq!(events[0].employee_id, emp);
    assert_eq!(events[0].ts, "2025-06-01T08:00:00Z");
    assert_eq!(events[0].note.as_deref(), Some("forgot badge"));

    // The store never saw the punch.
    assert!(get_open_punch(&conn, emp).unwrap().is_none());
}

#[test]
fn second_open_punch_is_rejected() {
    let db_path = setup_test_db("orch_open_invariant");
    let conn = open_test_conn(&db_path);
    let emp = add_employee_raw(&conn, "Ada");

    insert_open_punch(&conn, emp, "2025-06-01T08:00:00Z", "kiosk", None).unwrap();
    let err =
        insert_open_punch(&conn, emp, "2025-06-01T08:05:00Z", "kiosk", None).unwrap_err();
    assert!(matches!(err, AppError::OpenPunchExists(id) if id == emp));
}

#[test]
fn unreadable_last_timestamp_never_blocks() {
    let db_path = setup_test_db("orch_bad_ts");
    let conn = open_test_conn(&db_path);
    let emp = add_employee_raw(&conn, "Ada");

    // A same-direction newest row whose clock_out is unparsable.
    insert_open_punch_raw(&conn, emp, "2025-06-01T08:00:00Z");
    insert_closed_punch(&conn, emp, "2025-06-01T08:00:10Z", "not a timestamp");

    let queue = DurableQueue::new(queue_path_for(&db_path));
    let policy = PunchPolicy::default();
    let r = toggle_punch(
        &conn,
        &queue,
        &policy,
        emp,
        "kiosk",
        None,
        utc("2025-06-01T08:00:20Z"),
    )
    .unwrap();
    assert_eq!(r.status, PunchStatus::Ok);
    assert_eq!(r.action, PunchAction::Out);
}
