//! Infinite-scroll pagination controller.
//!
//! An explicit `Idle -> Loading -> {Loaded, Failed}` machine replaces
//! ad-hoc page bookkeeping: the scroll sentinel calls
//! [`PagedController::request_next`] every time it intersects, and the
//! controller decides whether another page request is actually due. A
//! request is issued only when no fetch is in flight and the current
//! page is not the last; nothing is ever requested beyond
//! `total_pages - 1`. Stale completions are discarded by generation,
//! the same scheme the search controller uses.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use transitops_client::Page;
use transitops_core::{OpsError, RequestId, TraceId};

use crate::controller::SearchParams;

/// The backing paginated query.
#[async_trait]
pub trait PagedQuery: Send + Sync + 'static {
    type Params: SearchParams;
    type Item: Clone + Send + 'static;

    async fn run(
        &self,
        params: &Self::Params,
        page: u32,
        size: u32,
    ) -> Result<Page<Self::Item>, OpsError>;
}

/// Where the controller is in its fetch cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchPhase {
    /// No query started yet
    Idle,

    /// A page request is in flight; further requests are refused
    Loading,

    /// The last request succeeded
    Loaded,

    /// The last request failed; carries the display string. The sentinel
    /// cannot drive further requests from here (nothing is retried
    /// automatically); recovery is an explicit [`PagedController::retry`]
    /// or a fresh [`PagedController::start`].
    Failed(String),
}

struct PagedInner<P, T> {
    current_gen: u64,
    phase: FetchPhase,
    params: Option<P>,
    items: Vec<T>,
    /// Zero-based index of the last page applied
    current_page: Option<u32>,
    total_pages: Option<u32>,
}

/// Accumulating page fetcher for one list screen.
pub struct PagedController<Q: PagedQuery> {
    query: Q,
    page_size: u32,
    counter: AtomicU64,
    inner: Mutex<PagedInner<Q::Params, Q::Item>>,
    /// One trace per controller instance; every page fetch's request id
    /// is grouped under it in the logs.
    trace_id: TraceId,
}

impl<Q: PagedQuery> PagedController<Q> {
    pub fn new(query: Q, page_size: u32) -> Self {
        Self {
            query,
            page_size,
            counter: AtomicU64::new(0),
            inner: Mutex::new(PagedInner {
                current_gen: 0,
                phase: FetchPhase::Idle,
                params: None,
                items: Vec::new(),
                current_page: None,
                total_pages: None,
            }),
            trace_id: TraceId::new(),
        }
    }

    /// Start over with new parameters: drop accumulated items,
    /// invalidate any in-flight fetch, and request page 0.
    pub async fn start(&self, params: Q::Params) {
        let generation = {
            let mut inner = self.lock_inner();
            let generation = self.next_generation();
            inner.current_gen = generation;
            inner.phase = FetchPhase::Loading;
            inner.params = Some(params.clone());
            inner.items.clear();
            inner.current_page = None;
            inner.total_pages = None;
            generation
        };
        self.fetch(generation, params, 0).await;
    }

    /// Request the next page. Invoked on every sentinel intersection;
    /// returns false when no request is due (a fetch is in flight, the
    /// controller is parked in `Failed`, no query has started, or the
    /// current page is the last).
    pub async fn request_next(&self) -> bool {
        let (generation, params, page) = {
            let mut inner = self.lock_inner();
            if !matches!(inner.phase, FetchPhase::Loaded) {
                return false;
            }
            let (Some(current), Some(total), Some(params)) =
                (inner.current_page, inner.total_pages, inner.params.clone())
            else {
                return false;
            };
            if total == 0 || current >= total - 1 {
                return false;
            }
            let generation = self.next_generation();
            inner.current_gen = generation;
            inner.phase = FetchPhase::Loading;
            (generation, params, current + 1)
        };
        self.fetch(generation, params, page).await;
        true
    }

    /// Re-issue the fetch that parked the controller in `Failed`. The
    /// only way a failed page is requested again; returns false in every
    /// other phase.
    pub async fn retry(&self) -> bool {
        let (generation, params, page) = {
            let mut inner = self.lock_inner();
            if !matches!(inner.phase, FetchPhase::Failed(_)) {
                return false;
            }
            let Some(params) = inner.params.clone() else {
                return false;
            };
            // A failure on start never applied page 0; a mid-scroll
            // failure left current_page at the last applied page.
            let page = match inner.current_page {
                Some(current) => current + 1,
                None => 0,
            };
            let generation = self.next_generation();
            inner.current_gen = generation;
            inner.phase = FetchPhase::Loading;
            (generation, params, page)
        };
        self.fetch(generation, params, page).await;
        true
    }

    /// Accumulated items across all applied pages.
    pub fn items(&self) -> Vec<Q::Item> {
        self.lock_inner().items.clone()
    }

    pub fn phase(&self) -> FetchPhase {
        self.lock_inner().phase.clone()
    }

    pub fn current_page(&self) -> Option<u32> {
        self.lock_inner().current_page
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.lock_inner().total_pages
    }

    /// True when every page has been applied.
    pub fn is_exhausted(&self) -> bool {
        let inner = self.lock_inner();
        match (inner.current_page, inner.total_pages) {
            (Some(current), Some(total)) => total == 0 || current >= total - 1,
            _ => false,
        }
    }

    async fn fetch(&self, generation: u64, params: Q::Params, page: u32) {
        let request_id = RequestId::new();
        let outcome = self.query.run(&params, page, self.page_size).await;
        let mut inner = self.lock_inner();
        if inner.current_gen != generation {
            tracing::debug!(
                generation,
                page,
                request_id = %request_id,
                trace_id = %self.trace_id,
                "discarding superseded page fetch"
            );
            return;
        }
        match outcome {
            Ok(envelope) => {
                tracing::debug!(
                    generation,
                    page = envelope.number,
                    request_id = %request_id,
                    trace_id = %self.trace_id,
                    result_count = envelope.content.len(),
                    "page applied"
                );
                inner.items.extend(envelope.content);
                inner.current_page = Some(envelope.number);
                inner.total_pages = Some(envelope.total_pages);
                inner.phase = FetchPhase::Loaded;
            }
            Err(err) => {
                let err = err
                    .with_request_id(request_id.clone())
                    .with_trace_id(self.trace_id.clone());
                tracing::error!(
                    generation,
                    page,
                    request_id = %request_id,
                    trace_id = %self.trace_id,
                    err_code = err.code(),
                    "page fetch failed"
                );
                inner.phase = FetchPhase::Failed(err.display_message());
            }
        }
    }

    fn next_generation(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn lock_inner(&self) -> std::sync::MutexGuard<'_, PagedInner<Q::Params, Q::Item>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
