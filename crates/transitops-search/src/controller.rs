//! Cancellable search query controller.
//!
//! List/search screens feed every keystroke and filter change into
//! [`SearchController::submit`]. The controller owns a monotonic
//! generation counter; each submission starts a new query cycle tagged
//! with a fresh generation and invalidates the previous one. A cycle's
//! outcome is applied to state only while its generation is still
//! current, so out-of-order network completions can never clobber a
//! newer cycle's result. Aborting the superseded task is best-effort
//! propagation; the generation check at apply time is the authoritative
//! safety net.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::task::JoinHandle;

use transitops_core::{OpsError, RequestId, TraceId};

/// A search parameter tuple: free-text term plus zero or more filters.
pub trait SearchParams: Clone + Send + Sync + 'static {
    /// True when every parameter is empty/unset. Blank parameters reset
    /// state without a network call; a blank filter bar never issues a
    /// match-everything query.
    fn is_blank(&self) -> bool;
}

/// The backing query for one entity's search screen.
///
/// The controller is the reusable abstraction; implementations differ
/// only in the request they issue.
#[async_trait]
pub trait SearchQuery: Send + Sync + 'static {
    type Params: SearchParams;
    type Item: Clone + Send + 'static;

    async fn run(&self, params: Self::Params) -> Result<Vec<Self::Item>, OpsError>;
}

/// Observable search state, replaced wholesale each query cycle.
#[derive(Debug, Clone)]
pub struct SearchState<T> {
    pub results: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for SearchState<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

struct Inner<T> {
    /// Generation of the cycle currently allowed to apply its outcome.
    current_gen: u64,
    state: SearchState<T>,
}

/// Cancellable query executor guaranteeing at most one applied result
/// per parameter tuple. Last-write-wins is at the level of logical query
/// cycles, not network completion order.
pub struct SearchController<Q: SearchQuery> {
    query: Arc<Q>,
    counter: AtomicU64,
    inner: Arc<Mutex<Inner<Q::Item>>>,
    task: Mutex<Option<JoinHandle<()>>>,
    /// One trace per controller instance; every cycle's request id is
    /// grouped under it in the logs.
    trace_id: TraceId,
}

impl<Q: SearchQuery> SearchController<Q> {
    pub fn new(query: Q) -> Self {
        Self {
            query: Arc::new(query),
            counter: AtomicU64::new(0),
            inner: Arc::new(Mutex::new(Inner {
                current_gen: 0,
                state: SearchState::default(),
            })),
            task: Mutex::new(None),
            trace_id: TraceId::new(),
        }
    }

    pub fn trace_id(&self) -> &TraceId {
        &self.trace_id
    }

    /// Submit a new parameter tuple, starting a query cycle.
    ///
    /// Blank parameters synchronously reset state to empty/not-loading
    /// and issue no query. Otherwise the previous cycle is invalidated
    /// and aborted, and exactly one task is spawned for this cycle.
    pub fn submit(&self, params: Q::Params) {
        if params.is_blank() {
            self.abort_task();
            let mut inner = self.lock_inner();
            inner.current_gen = self.next_generation();
            inner.state = SearchState::default();
            return;
        }

        let request_id = RequestId::new();
        let trace_id = self.trace_id.clone();
        let generation = {
            // Allocated under the lock so current_gen stays monotonic even
            // when submissions race from different threads.
            let mut inner = self.lock_inner();
            let generation = self.next_generation();
            inner.current_gen = generation;
            inner.state.loading = true;
            inner.state.error = None;
            generation
        };
        self.abort_task();

        let query = Arc::clone(&self.query);
        let shared = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            let outcome = query.run(params).await;
            let mut inner = match shared.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if inner.current_gen != generation {
                tracing::debug!(
                    generation,
                    request_id = %request_id,
                    trace_id = %trace_id,
                    "discarding superseded query cycle"
                );
                return;
            }
            match outcome {
                Ok(results) => {
                    tracing::debug!(
                        generation,
                        request_id = %request_id,
                        trace_id = %trace_id,
                        result_count = results.len(),
                        "query applied"
                    );
                    inner.state = SearchState {
                        results,
                        loading: false,
                        error: None,
                    };
                }
                Err(err) => {
                    let err = err
                        .with_request_id(request_id.clone())
                        .with_trace_id(trace_id.clone());
                    tracing::error!(
                        generation,
                        request_id = %request_id,
                        trace_id = %trace_id,
                        err_code = err.code(),
                        "query cycle failed"
                    );
                    inner.state = SearchState {
                        results: Vec::new(),
                        loading: false,
                        error: Some(err.display_message()),
                    };
                }
            }
        });

        match self.task.lock() {
            Ok(mut slot) => *slot = Some(handle),
            Err(poisoned) => *poisoned.into_inner() = Some(handle),
        }
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> SearchState<Q::Item> {
        self.lock_inner().state.clone()
    }

    /// Invalidate the current cycle and stop its task. Called on
    /// consumer teardown; no further state application occurs after
    /// this returns.
    pub fn shutdown(&self) {
        {
            let mut inner = self.lock_inner();
            inner.current_gen = self.next_generation();
        }
        self.abort_task();
    }

    /// Await the in-flight task, if any. Test hook: lets a test observe
    /// the state a cycle settles into without sleeping.
    pub async fn quiesce(&self) {
        let handle = match self.task.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(handle) = handle {
            // Aborted tasks resolve to a JoinError; either way the cycle
            // is settled.
            let _ = handle.await;
        }
    }

    fn next_generation(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn abort_task(&self) {
        let slot = match self.task.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(handle) = slot {
            handle.abort();
        }
    }

    fn lock_inner(&self) -> std::sync::MutexGuard<'_, Inner<Q::Item>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<Q: SearchQuery> Drop for SearchController<Q> {
    fn drop(&mut self) {
        self.abort_task();
    }
}
