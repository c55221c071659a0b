//! Logging facility tests using the test-capture layer.
//!
//! A single shared capture subscriber backs this binary; tests use
//! distinct op names so they can run in parallel.

use transitops_core::logging_facility::init_test_capture;
use transitops_core::{log_op_end, log_op_error, log_op_start};
use transitops_core::{OpsError, OpsErrorKind, RequestContext, TraceId};
use transitops_core_types::schema;

#[test]
fn test_op_lifecycle_events_are_captured() {
    let capture = init_test_capture();

    log_op_start!("compare_bus_draft", entity_kind = "bus");
    log_op_end!("compare_bus_draft", duration_ms = 3, changed_fields = 2);

    capture.assert_event_exists("compare_bus_draft", "start");
    capture.assert_event_exists("compare_bus_draft", "end");
}

#[test]
fn test_error_events_carry_kind_and_code() {
    let capture = init_test_capture();

    let err = OpsError::new(OpsErrorKind::ExternalService).with_message("backend unavailable");
    log_op_error!("search_buses_once", err, duration_ms = 12);

    capture.assert_event_exists("search_buses_once", "end_error");
    let count = capture.count_events(|e| {
        e.op.as_deref() == Some("search_buses_once")
            && e.fields.get("err_code").map(String::as_str) == Some("ERR_EXTERNAL_SERVICE")
    });
    assert_eq!(count, 1);
}

#[test]
fn test_events_carry_the_component_field() {
    let capture = init_test_capture();

    log_op_start!("load_route_once");

    let count = capture.count_events(|e| {
        e.op.as_deref() == Some("load_route_once") && e.component.is_some()
    });
    assert_eq!(count, 1);
}

#[test]
fn test_correlation_ids_emit_under_the_canonical_keys() {
    let capture = init_test_capture();

    let ctx = RequestContext::new().with_trace_id(TraceId::new());
    log_op_start!(
        "save_trip_draft",
        request_id = %ctx.request_id,
        trace_id = %ctx.trace_id.clone().unwrap_or_default()
    );

    let count = capture.count_events(|e| {
        e.op.as_deref() == Some("save_trip_draft")
            && e.fields.get(schema::FIELD_REQUEST_ID).map(String::as_str)
                == Some(ctx.request_id.as_str())
            && e.fields.contains_key(schema::FIELD_TRACE_ID)
    });
    assert_eq!(count, 1);
}
