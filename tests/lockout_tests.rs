use punchpad::core::queue::DurableQueue;
use punchpad::core::security::{check_lockout, make_pin_hash, verify_employee_pin};
use punchpad::core::session::{PinSubmission, submit_pin};
use punchpad::db::attempts::{list_attempts, record_attempt};
use punchpad::db::employees::disable_employee;
use punchpad::db::settings::PunchPolicy;
use punchpad::models::outcome::PunchStatus;
use punchpad::models::punch_action::PunchAction;

mod common;
use common::{add_employee_raw, add_employee_with_hash, open_test_conn, queue_path_for, setup_test_db, utc};

#[test]
fn lockout_starts_at_the_threshold_and_runs_from_the_last_failure() {
    let db_path = setup_test_db("lockout_threshold");
    let conn = open_test_conn(&db_path);
    let policy = PunchPolicy::default();

    for i in 0..4 {
        let ts = format!("2025-06-01T08:00:{:02}Z", i * 10);
        record_attempt(&conn, "kiosk-1", &ts, false, None, Some("bad_pin")).unwrap();
    }
    // Four failures: still unlocked.
    assert_eq!(
        check_lockout(&conn, &policy, "kiosk-1", utc("2025-06-01T08:00:35Z")).unwrap(),
        None
    );

    record_attempt(&conn, "kiosk-1", "2025-06-01T08:00:40Z", false, None, Some("bad_pin"))
        .unwrap();
    // Fifth failure: locked until ten minutes after the most recent one.
    assert_eq!(
        check_lockout(&conn, &policy, "kiosk-1", utc("2025-06-01T08:00:45Z")).unwrap(),
        Some("2025-06-01T08:10:40Z".to_string())
    );
}

#[test]
fn lockout_expires_and_old_failures_age_out() {
    let db_path = setup_test_db("lockout_expiry");
    let conn = open_test_conn(&db_path);
    let policy = PunchPolicy::default();

    for i in 0..5 {
        let ts = format!("2025-06-01T08:00:{:02}Z", i * 10);
        record_attempt(&conn, "kiosk-1", &ts, false, None, Some("bad_pin")).unwrap();
    }

    // One second before expiry: still locked.
    assert!(
        check_lockout(&conn, &policy, "kiosk-1", utc("2025-06-01T08:10:39Z"))
            .unwrap()
            .is_some()
    );
    // At the expiry instant: unlocked.
    assert_eq!(
        check_lockout(&conn, &policy, "kiosk-1", utc("2025-06-01T08:10:40Z")).unwrap(),
        None
    );
    // Much later the failures have also left the sliding window.
    assert_eq!(
        check_lockout(&conn, &policy, "kiosk-1", utc("2025-06-01T09:00:00Z")).unwrap(),
        None
    );
}

#[test]
fn sources_are_isolated() {
    let db_path = setup_test_db("lockout_sources");
    let conn = open_test_conn(&db_path);
    let policy = PunchPolicy::default();

    for i in 0..5 {
        let ts = format!("2025-06-01T08:00:{:02}Z", i * 10);
        record_attempt(&conn, "kiosk-1", &ts, false, None, Some("bad_pin")).unwrap();
    }

    let now = utc("2025-06-01T08:01:00Z");
    assert!(check_lockout(&conn, &policy, "kiosk-1", now).unwrap().is_some());
    assert_eq!(check_lockout(&conn, &policy, "kiosk-2", now).unwrap(), None);
}

#[test]
fn successful_attempts_never_count_toward_lockout() {
    let db_path = setup_test_db("lockout_success");
    let conn = open_test_conn(&db_path);
    let policy = PunchPolicy::default();

    for i in 0..5 {
        let ts = format!("2025-06-01T08:00:{:02}Z", i * 10);
        record_attempt(&conn, "kiosk-1", &ts, true, Some(1), None).unwrap();
    }
    assert_eq!(
        check_lockout(&conn, &policy, "kiosk-1", utc("2025-06-01T08:01:00Z")).unwrap(),
        None
    );
}

#[test]
fn submit_pin_locks_the_source_after_repeated_failures() {
    let db_path = setup_test_db("lockout_submit");
    let conn = open_test_conn(&db_path);
    add_employee_raw(&conn, "Ada");
    let queue = DurableQueue::new(queue_path_for(&db_path));
    let policy = PunchPolicy::default();

    for i in 0..5 {
        let now = utc(&format!("2025-06-01T08:00:{:02}Z", i * 10));
        let result =
            submit_pin(&conn, &queue, &policy, "0000", "kiosk-1", None, now).unwrap();
        assert!(matches!(result, PinSubmission::InvalidPin));
    }

    let result = submit_pin(
        &conn,
        &queue,
        &policy,
        "0000",
        "kiosk-1",
        None,
        utc("2025-06-01T08:00:50Z"),
    )
    .unwrap();
    match result {
        PinSubmission::Locked { until } => assert_eq!(until, "2025-06-01T08:10:40Z"),
        other => panic!("expected Locked, got {other:?}"),
    }

    // The locked submission was rejected before verification, so no sixth
    // attempt row was recorded.
    let attempts = list_attempts(&conn, "kiosk-1").unwrap();
    assert_eq!(attempts.len(), 5);
    assert!(attempts.iter().all(|a| !a.success));
}

#[test]
fn submit_pin_verifies_and_punches() {
    let db_path = setup_test_db("lockout_punch");
    let conn = open_test_conn(&db_path);
    let emp = add_employee_with_hash(&conn, "Ada", &make_pin_hash("4321"));
    let queue = DurableQueue::new(queue_path_for(&db_path));
    let policy = PunchPolicy::default();

    let result = submit_pin(
        &conn,
        &queue,
        &policy,
        "4321",
        "kiosk-1",
        None,
        utc("2025-06-01T08:00:00Z"),
    )
    .unwrap();
    match result {
        PinSubmission::Punched { employee_id, outcome } => {
            assert_eq!(employee_id, emp);
            assert_eq!(outcome.status, PunchStatus::Ok);
            assert_eq!(outcome.action, PunchAction::In);
        }
        other => panic!("expected Punched, got {other:?}"),
    }

    let attempts = list_attempts(&conn, "kiosk-1").unwrap();
    assert_eq!(attempts.len(), 1);
    assert!(attempts[0].success);
    assert_eq!(attempts[0].employee_id, Some(emp));
}

#[test]
fn disabled_employees_never_verify() {
    let db_path = setup_test_db("lockout_disabled");
    let conn = open_test_conn(&db_path);
    let emp = add_employee_with_hash(&conn, "Ada", &make_pin_hash("4321"));

    assert_eq!(verify_employee_pin(&conn, "4321").unwrap(), Some(emp));
    disable_employee(&conn, emp).unwrap();
    assert_eq!(verify_employee_pin(&conn, "4321").unwrap(), None);
}
