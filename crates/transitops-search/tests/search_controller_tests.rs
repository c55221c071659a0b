//! Query cycle ordering tests: superseded cycles must never reach state.
//!
//! All tests run on the current-thread runtime so task interleaving is
//! deterministic: a spawned cycle only makes progress at explicit await
//! points.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use transitops_core::logging_facility::init_test_capture;
use transitops_core::{OpsError, OpsErrorKind};
use transitops_search::{SearchController, SearchParams, SearchQuery};

#[derive(Clone)]
struct Term(String);

impl SearchParams for Term {
    fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Query that parks on a gate whenever the submitted term says so, and
/// counts every invocation.
struct GatedQuery {
    gate: Arc<Notify>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl SearchQuery for GatedQuery {
    type Params = Term;
    type Item = String;

    async fn run(&self, params: Term) -> Result<Vec<String>, OpsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if params.0 == "slow" {
            self.gate.notified().await;
        }
        Ok(vec![format!("result:{}", params.0)])
    }
}

/// Query that always fails with a displayable message.
struct FailingQuery;

#[async_trait]
impl SearchQuery for FailingQuery {
    type Params = Term;
    type Item = String;

    async fn run(&self, _params: Term) -> Result<Vec<String>, OpsError> {
        Err(OpsError::new(OpsErrorKind::ExternalService).with_message("backend unavailable"))
    }
}

#[tokio::test]
async fn test_latest_cycle_wins_when_the_earlier_one_is_slower() {
    let gate = Arc::new(Notify::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let controller = SearchController::new(GatedQuery {
        gate: Arc::clone(&gate),
        calls: Arc::clone(&calls),
    });

    // Cycle 1 starts and parks on the gate.
    controller.submit(Term("slow".to_string()));
    tokio::task::yield_now().await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(controller.snapshot().loading);

    // Cycle 2 supersedes it before it resolves.
    controller.submit(Term("fast".to_string()));
    controller.quiesce().await;

    // Releasing the gate now changes nothing; cycle 1 is dead.
    gate.notify_one();
    tokio::task::yield_now().await;

    let state = controller.snapshot();
    assert_eq!(state.results, vec!["result:fast".to_string()]);
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn test_blank_parameters_reset_without_invoking_the_query() {
    let calls = Arc::new(AtomicUsize::new(0));
    let controller = SearchController::new(GatedQuery {
        gate: Arc::new(Notify::new()),
        calls: Arc::clone(&calls),
    });

    controller.submit(Term("".to_string()));

    // Reset is synchronous, observable immediately.
    let state = controller.snapshot();
    assert!(state.results.is_empty());
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_blank_parameters_clear_prior_results() {
    let calls = Arc::new(AtomicUsize::new(0));
    let controller = SearchController::new(GatedQuery {
        gate: Arc::new(Notify::new()),
        calls: Arc::clone(&calls),
    });

    controller.submit(Term("fast".to_string()));
    controller.quiesce().await;
    assert_eq!(controller.snapshot().results.len(), 1);

    controller.submit(Term("   ".to_string()));
    assert!(controller.snapshot().results.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failure_surfaces_as_a_display_string() {
    let controller = SearchController::new(FailingQuery);
    controller.submit(Term("anything".to_string()));
    controller.quiesce().await;

    let state = controller.snapshot();
    assert!(state.results.is_empty());
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("backend unavailable"));
}

#[tokio::test]
async fn test_failed_cycle_is_logged_with_correlation_ids() {
    let capture = init_test_capture();
    let controller = SearchController::new(FailingQuery);
    controller.submit(Term("anything".to_string()));
    controller.quiesce().await;

    // The controller's trace id groups the cycle's events; other tests
    // in this process log under different trace ids.
    let trace = controller.trace_id().as_str().to_string();
    let events: Vec<_> = capture
        .events()
        .into_iter()
        .filter(|e| e.fields.get("trace_id").map(String::as_str) == Some(trace.as_str()))
        .collect();
    assert!(!events.is_empty());

    let failure = events
        .iter()
        .find(|e| e.level == tracing::Level::ERROR)
        .unwrap();
    assert!(!failure.fields["request_id"].is_empty());
    assert_eq!(failure.fields["err_code"], "ERR_EXTERNAL_SERVICE");
}

#[tokio::test]
async fn test_cycle_after_failure_replaces_the_error() {
    // Error from one cycle and results from another never coexist;
    // each cycle replaces state wholesale.
    let failing = SearchController::new(FailingQuery);
    failing.submit(Term("x".to_string()));
    failing.quiesce().await;
    assert!(failing.snapshot().error.is_some());

    let recovering = SearchController::new(GatedQuery {
        gate: Arc::new(Notify::new()),
        calls: Arc::new(AtomicUsize::new(0)),
    });
    recovering.submit(Term("fast".to_string()));
    recovering.quiesce().await;
    let state = recovering.snapshot();
    assert!(state.error.is_none());
    assert_eq!(state.results.len(), 1);
}

#[tokio::test]
async fn test_shutdown_prevents_any_further_application() {
    let gate = Arc::new(Notify::new());
    let controller = SearchController::new(GatedQuery {
        gate: Arc::clone(&gate),
        calls: Arc::new(AtomicUsize::new(0)),
    });

    controller.submit(Term("slow".to_string()));
    tokio::task::yield_now().await;
    controller.shutdown();

    gate.notify_one();
    tokio::task::yield_now().await;
    assert!(controller.snapshot().results.is_empty());
}
