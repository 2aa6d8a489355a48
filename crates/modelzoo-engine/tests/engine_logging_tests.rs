// Lifecycle logging owned by the engine layer.
// The capture subscriber is global to this test binary; assertions filter
// on the op and the request id of the call under test.

mod common;

use common::{create_users, setup_db};
use modelzoo_core::logging_facility::test_capture::init_test_capture;
use modelzoo_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_ERR_CODE, FIELD_REQUEST_ID,
};
use modelzoo_engine::commands::social;

#[test]
fn test_follow_logs_start_and_end_with_request_id() {
    let capture = init_test_capture();
    let mut conn = setup_db();
    let u = create_users(&mut conn, &["a", "b"]);

    social::follow(u[0], u[1], &mut conn).unwrap();

    let events = capture.events_for_op("follow");
    let end = events
        .iter()
        .find(|e| {
            e.event.as_deref() == Some(EVENT_END) && e.field("created") == Some("true")
        })
        .expect("follow end event");
    let request_id = end.field(FIELD_REQUEST_ID).expect("request id on end");

    assert!(events.iter().any(|e| e.event.as_deref() == Some(EVENT_START)
        && e.field(FIELD_REQUEST_ID) == Some(request_id)));
    assert!(end.field("duration_ms").is_some());
}

#[test]
fn test_block_failure_logs_error_code() {
    let capture = init_test_capture();
    let mut conn = setup_db();
    let u = create_users(&mut conn, &["a"]);

    let err = social::block(u[0], 404, &mut conn).unwrap_err();
    let request_id = err.request_id().expect("request id on error").as_str();

    let error_event = capture
        .events_for_op("block")
        .into_iter()
        .find(|e| {
            e.event.as_deref() == Some(EVENT_END_ERROR)
                && e.field(FIELD_REQUEST_ID) == Some(request_id)
        })
        .expect("block error event");

    assert_eq!(error_event.field(FIELD_ERR_CODE), Some("ERR_NOT_FOUND"));
}

#[test]
fn test_user_create_logs_user_id() {
    let capture = init_test_capture();
    let conn = setup_db();

    let user = social::user_create("logged", &conn).unwrap();

    let user_id = user.id.to_string();
    assert!(capture.events_for_op("user_create").iter().any(|e| {
        e.event.as_deref() == Some(EVENT_END) && e.field("user_id") == Some(user_id.as_str())
    }));
}
