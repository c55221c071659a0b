//! Pagination controller tests: page bounds and stale-fetch discard.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use transitops_client::Page;
use transitops_core::{OpsError, OpsErrorKind};
use transitops_search::{FetchPhase, PagedController, PagedQuery, SearchParams};

#[derive(Clone)]
struct Filter {
    term: String,
}

impl SearchParams for Filter {
    fn is_blank(&self) -> bool {
        self.term.trim().is_empty()
    }
}

/// Three pages of `size` records each; records are tagged with the
/// filter term so tests can tell which query produced them.
struct ThreePages {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl PagedQuery for ThreePages {
    type Params = Filter;
    type Item = String;

    async fn run(&self, params: &Filter, page: u32, size: u32) -> Result<Page<String>, OpsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let content = (0..size)
            .map(|i| format!("{}:{}", params.term, page * size + i))
            .collect();
        Ok(Page {
            content,
            total_pages: 3,
            number: page,
        })
    }
}

/// Parks on a gate when the filter term says "slow".
struct GatedPages {
    gate: Arc<Notify>,
}

#[async_trait]
impl PagedQuery for GatedPages {
    type Params = Filter;
    type Item = String;

    async fn run(&self, params: &Filter, page: u32, _size: u32) -> Result<Page<String>, OpsError> {
        if params.term == "slow" {
            self.gate.notified().await;
        }
        Ok(Page {
            content: vec![format!("{}:{}", params.term, page)],
            total_pages: 1,
            number: page,
        })
    }
}

/// Page 0 always loads; page 1 fails until `failures_left` runs out,
/// then loads normally.
struct SecondPageFlaky {
    calls: Arc<AtomicUsize>,
    failures_left: Arc<AtomicUsize>,
}

#[async_trait]
impl PagedQuery for SecondPageFlaky {
    type Params = Filter;
    type Item = String;

    async fn run(&self, params: &Filter, page: u32, size: u32) -> Result<Page<String>, OpsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if page == 1 && self.failures_left.load(Ordering::SeqCst) > 0 {
            self.failures_left.fetch_sub(1, Ordering::SeqCst);
            return Err(
                OpsError::new(OpsErrorKind::ExternalService).with_message("backend unavailable")
            );
        }
        let content = (0..size)
            .map(|i| format!("{}:{}", params.term, page * size + i))
            .collect();
        Ok(Page {
            content,
            total_pages: 2,
            number: page,
        })
    }
}

struct FailingPages;

#[async_trait]
impl PagedQuery for FailingPages {
    type Params = Filter;
    type Item = String;

    async fn run(&self, _params: &Filter, _page: u32, _size: u32) -> Result<Page<String>, OpsError> {
        Err(OpsError::new(OpsErrorKind::ExternalService).with_message("backend unavailable"))
    }
}

#[tokio::test]
async fn test_scroll_through_all_three_pages_and_no_further() {
    let calls = Arc::new(AtomicUsize::new(0));
    let pager = PagedController::new(
        ThreePages {
            calls: Arc::clone(&calls),
        },
        20,
    );

    pager.start(Filter {
        term: "bus".to_string(),
    })
    .await;
    assert_eq!(pager.total_pages(), Some(3));
    assert_eq!(pager.current_page(), Some(0));

    // Sentinel intersects twice more; pages 1 and 2 arrive.
    assert!(pager.request_next().await);
    assert!(pager.request_next().await);
    assert_eq!(pager.current_page(), Some(2));
    assert_eq!(pager.items().len(), 60);

    // Past the last page nothing is requested, however often the
    // sentinel fires.
    assert!(!pager.request_next().await);
    assert!(!pager.request_next().await);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_stale_page_fetch_is_discarded_by_generation() {
    let gate = Arc::new(Notify::new());
    let pager = Arc::new(PagedController::new(
        GatedPages {
            gate: Arc::clone(&gate),
        },
        20,
    ));

    // First start parks on the gate; second start supersedes it and
    // completes. When the gate opens, the first fetch resolves late and
    // must be thrown away.
    let slow = {
        let pager = Arc::clone(&pager);
        tokio::spawn(async move {
            pager
                .start(Filter {
                    term: "slow".to_string(),
                })
                .await;
        })
    };
    tokio::task::yield_now().await;

    pager
        .start(Filter {
            term: "fast".to_string(),
        })
        .await;
    assert_eq!(pager.items(), vec!["fast:0".to_string()]);

    gate.notify_one();
    let _ = slow.await;

    assert_eq!(pager.items(), vec!["fast:0".to_string()]);
    assert_eq!(pager.phase(), FetchPhase::Loaded);
}

#[tokio::test]
async fn test_failed_start_parks_in_failed_phase() {
    let pager = PagedController::new(FailingPages, 20);
    pager
        .start(Filter {
            term: "bus".to_string(),
        })
        .await;

    assert_eq!(
        pager.phase(),
        FetchPhase::Failed("backend unavailable".to_string())
    );
    assert!(pager.items().is_empty());

    // No pages were ever learned, so the sentinel cannot drive requests.
    assert!(!pager.request_next().await);
}

#[tokio::test]
async fn test_mid_scroll_failure_stops_the_sentinel_until_retry() {
    let calls = Arc::new(AtomicUsize::new(0));
    let failures_left = Arc::new(AtomicUsize::new(1));
    let pager = PagedController::new(
        SecondPageFlaky {
            calls: Arc::clone(&calls),
            failures_left: Arc::clone(&failures_left),
        },
        20,
    );

    pager
        .start(Filter {
            term: "bus".to_string(),
        })
        .await;
    assert_eq!(pager.current_page(), Some(0));
    assert_eq!(pager.items().len(), 20);

    // Page 1 fails; the controller parks in the failed phase.
    assert!(pager.request_next().await);
    assert_eq!(
        pager.phase(),
        FetchPhase::Failed("backend unavailable".to_string())
    );
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    // However often the sentinel fires now, the failed page is not
    // re-requested behind the user's back.
    assert!(!pager.request_next().await);
    assert!(!pager.request_next().await);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    // An explicit retry re-issues exactly the failed page and recovers.
    assert!(pager.retry().await);
    assert_eq!(pager.phase(), FetchPhase::Loaded);
    assert_eq!(pager.current_page(), Some(1));
    assert_eq!(pager.items().len(), 40);
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    // Two pages total, so the scroll is now exhausted.
    assert!(pager.is_exhausted());
    assert!(!pager.request_next().await);
}

#[tokio::test]
async fn test_retry_is_a_no_op_outside_the_failed_phase() {
    let calls = Arc::new(AtomicUsize::new(0));
    let pager = PagedController::new(
        ThreePages {
            calls: Arc::clone(&calls),
        },
        20,
    );

    // Nothing to retry before any start.
    assert!(!pager.retry().await);

    pager
        .start(Filter {
            term: "bus".to_string(),
        })
        .await;
    assert_eq!(pager.phase(), FetchPhase::Loaded);

    // Nothing to retry after a successful load either.
    assert!(!pager.retry().await);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_single_page_result_is_immediately_exhausted() {
    let pager = PagedController::new(
        GatedPages {
            gate: Arc::new(Notify::new()),
        },
        20,
    );
    pager
        .start(Filter {
            term: "fast".to_string(),
        })
        .await;

    assert!(pager.is_exhausted());
    assert!(!pager.request_next().await);
}
