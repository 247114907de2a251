//! A page fetcher driven by the test.
//!
//! Every `fetch` parks a `PendingFetch`; nothing resolves until the test
//! takes it and calls `resolve`/`fail`. This lets a test decide exactly in
//! which order responses arrive, including out of dispatch order.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures::FutureExt;
use futures::future::BoxFuture;
use shelfmark_engine::{filter_records, sort_records};
use shelfmark_runtime::{FetchRequest, FetchedPage, PageFetcher, TransportError};
use shelfmark_types::Article;
use tokio::sync::oneshot;

type Responder = oneshot::Sender<Result<FetchedPage, TransportError>>;

/// One fetch waiting for the test to answer it
#[derive(Debug)]
pub struct PendingFetch {
    request: FetchRequest,
    responder: Responder,
}

impl PendingFetch {
    pub fn request(&self) -> &FetchRequest {
        &self.request
    }

    pub fn offset(&self) -> usize {
        self.request.offset
    }

    pub fn search(&self) -> &str {
        self.request.criteria.search_query()
    }

    /// Answer with `page`. A receiver that was already dropped is ignored.
    pub fn resolve(self, page: FetchedPage) {
        let _ = self.responder.send(Ok(page));
    }

    /// Answer with the page `records` would yield for this request.
    pub fn resolve_from(self, records: &[Article]) {
        let page = evaluate(records, &self.request);
        self.resolve(page);
    }

    /// Whether the caller stopped waiting (its future was dropped)
    pub fn is_abandoned(&self) -> bool {
        self.responder.is_closed()
    }

    pub fn fail(self, error: TransportError) {
        let _ = self.responder.send(Err(error));
    }
}

/// Fetcher whose responses are released manually.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFetcher {
    pending: Arc<Mutex<Vec<PendingFetch>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fetches issued so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().expect("pending fetches poisoned").len()
    }

    /// Take every parked fetch, oldest first
    pub fn take_pending(&self) -> Vec<PendingFetch> {
        std::mem::take(&mut *self.pending.lock().expect("pending fetches poisoned"))
    }

    /// Take the single parked fetch; panics unless exactly one is waiting
    pub fn take_one(&self) -> PendingFetch {
        let mut pending = self.take_pending();
        assert_eq!(pending.len(), 1, "expected exactly one pending fetch");
        pending.remove(0)
    }
}

impl PageFetcher for ScriptedFetcher {
    fn fetch(&self, request: FetchRequest) -> BoxFuture<'static, Result<FetchedPage, TransportError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (responder, receiver) = oneshot::channel();
        self.pending
            .lock()
            .expect("pending fetches poisoned")
            .push(PendingFetch { request, responder });

        async move {
            receiver
                .await
                .unwrap_or_else(|_| Err(TransportError::Network("request dropped".to_string())))
        }
        .boxed()
    }
}

fn evaluate(records: &[Article], request: &FetchRequest) -> FetchedPage {
    let mut matched: Vec<Article> = filter_records(records, &request.criteria)
        .into_iter()
        .cloned()
        .collect();
    sort_records(&mut matched, request.sort);
    let total_count = matched.len();
    let items = matched
        .into_iter()
        .skip(request.offset)
        .take(request.page_size)
        .collect();
    FetchedPage { items, total_count }
}
