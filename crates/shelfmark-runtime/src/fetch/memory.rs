use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use shelfmark_engine::{filter_records, sort_records};
use shelfmark_types::Article;

use super::{FetchRequest, FetchedPage, PageFetcher};
use crate::error::TransportError;

/// Fetch primitive over a record set held in memory.
///
/// Evaluates the request with the engine's own filter and sort, so it
/// behaves like a backend that implements the same predicate. Used by the
/// CLI for local files and by tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFetcher {
    records: Arc<RwLock<Vec<Article>>>,
    latency: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl InMemoryFetcher {
    pub fn new(records: Vec<Article>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            latency: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Delay every response by `latency` (tokio time)
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Swap the backing data, as if the server-side set changed
    pub fn replace_records(&self, records: Vec<Article>) {
        if let Ok(mut guard) = self.records.write() {
            *guard = records;
        }
    }

    /// Number of fetches served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn evaluate(&self, request: &FetchRequest) -> Result<FetchedPage, TransportError> {
        let records = self
            .records
            .read()
            .map_err(|_| TransportError::Network("record store poisoned".to_string()))?;

        let mut matched: Vec<Article> = filter_records(&records, &request.criteria)
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

        Ok(FetchedPage { items, total_count })
    }
}

impl PageFetcher for InMemoryFetcher {
    fn fetch(&self, request: FetchRequest) -> BoxFuture<'static, Result<FetchedPage, TransportError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = self.evaluate(&request);
        let latency = self.latency;

        async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            result
        }
        .boxed()
    }
}
