use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use shelfmark_engine::PageState;
use shelfmark_types::{Article, FilterCriteria, Fingerprint, OwnerContext, ValidationError};

use crate::cache::{CacheStats, PageCache, PageKey};
use crate::error::TransportError;
use crate::fetch::{FetchRequest, FetchedPage, PageFetcher};

/// Dispatch sequence number; the highest one issued is the only one whose
/// completion may touch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct RequestToken(u64);

/// Lifecycle of one list view's data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    LoadingMore,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchKind {
    Refresh,
    LoadMore,
}

/// What a `refresh`/`load_more`/`retry` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    /// Nothing dispatched (guard or reentrancy no-op)
    Skipped,
    /// A fetch is in flight; await `next_completion`
    Pending,
    /// Served from the page cache and already applied
    Cached,
}

/// Result of folding one fetch completion into the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    Applied { kind: DispatchKind, added: usize },
    /// Superseded by a later dispatch; dropped without touching state
    Discarded,
    Failed(TransportError),
}

#[derive(Debug, Clone)]
struct Dispatch {
    token: RequestToken,
    kind: DispatchKind,
    offset: usize,
    fingerprint: Fingerprint,
}

struct Completion {
    token: RequestToken,
    result: Result<FetchedPage, TransportError>,
}

/// Owns the fetch lifecycle and materialized items of one list view.
///
/// Every dispatch gets a fresh token and becomes the only active one.
/// Completions are applied in dispatch order semantics: a response whose
/// token is no longer active is dropped, whatever order responses arrive
/// in. Superseded fetches are not aborted at the transport level; their
/// futures are simply polled to completion and ignored, and all of them are
/// dropped with the controller.
pub struct PaginationController {
    fetcher: Arc<dyn PageFetcher>,
    context: OwnerContext,
    cache: Option<PageCache>,
    page: PageState,
    criteria: Option<FilterCriteria>,
    state: LoadState,
    error: Option<TransportError>,
    next_token: u64,
    active: Option<Dispatch>,
    last_dispatch: Option<Dispatch>,
    in_flight: FuturesUnordered<BoxFuture<'static, Completion>>,
}

impl PaginationController {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        context: OwnerContext,
        page_size: usize,
    ) -> Result<Self, ValidationError> {
        if page_size == 0 {
            return Err(ValidationError::InvalidPageSize(page_size));
        }
        Ok(Self {
            fetcher,
            context,
            cache: None,
            page: PageState::new(page_size),
            criteria: None,
            state: LoadState::Idle,
            error: None,
            next_token: 0,
            active: None,
            last_dispatch: None,
            in_flight: FuturesUnordered::new(),
        })
    }

    pub fn with_cache(mut self, cache: PageCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn error(&self) -> Option<&TransportError> {
        self.error.as_ref()
    }

    pub fn items(&self) -> &[Article] {
        self.page.items()
    }

    pub fn total_count(&self) -> usize {
        self.page.total_count()
    }

    pub fn has_more(&self) -> bool {
        self.page.has_more()
    }

    pub fn page_size(&self) -> usize {
        self.page.page_size()
    }

    /// Criteria of the current fetch session
    pub fn criteria(&self) -> Option<&FilterCriteria> {
        self.criteria.as_ref()
    }

    pub fn context(&self) -> &OwnerContext {
        &self.context
    }

    /// Whether the active dispatch has not completed yet
    pub fn is_in_flight(&self) -> bool {
        self.active.is_some()
    }

    /// Futures still being polled, superseded ones included
    pub fn pending_fetches(&self) -> usize {
        self.in_flight.len()
    }

    /// Start a new fetch session for `criteria` at offset 0.
    ///
    /// Clears the materialized items immediately. A second call for the same
    /// fingerprint while the first is still in flight is a no-op; a call for
    /// different criteria supersedes whatever is in flight.
    pub fn refresh(
        &mut self,
        criteria: FilterCriteria,
    ) -> Result<DispatchStatus, ValidationError> {
        criteria.validate()?;
        let fingerprint = criteria.fingerprint();

        if let Some(active) = &self.active
            && active.kind == DispatchKind::Refresh
            && active.fingerprint == fingerprint
        {
            tracing::debug!(token = active.token.0, "refresh already in flight for these criteria");
            return Ok(DispatchStatus::Skipped);
        }

        self.page.reset(fingerprint.clone());
        self.criteria = Some(criteria);
        self.error = None;
        Ok(self.dispatch(DispatchKind::Refresh, 0, fingerprint))
    }

    /// Fetch the next page of the current session.
    ///
    /// No-op unless the list is `Ready`, more items exist, and nothing is in
    /// flight.
    pub fn load_more(&mut self) -> DispatchStatus {
        if self.state != LoadState::Ready || self.active.is_some() || !self.page.has_more() {
            return DispatchStatus::Skipped;
        }
        let Some(fingerprint) = self.page.fingerprint().cloned() else {
            return DispatchStatus::Skipped;
        };
        let offset = self.page.next_offset();
        self.dispatch(DispatchKind::LoadMore, offset, fingerprint)
    }

    /// Re-issue the failed dispatch with a fresh token. Only valid in `Error`.
    pub fn retry(&mut self) -> DispatchStatus {
        if self.state != LoadState::Error {
            return DispatchStatus::Skipped;
        }
        let Some(last) = self.last_dispatch.clone() else {
            return DispatchStatus::Skipped;
        };
        tracing::info!(kind = ?last.kind, offset = last.offset, "retrying fetch");
        self.error = None;
        self.dispatch(last.kind, last.offset, last.fingerprint)
    }

    /// Wait for the next fetch to finish and fold it in.
    ///
    /// Returns `None` when nothing is being polled.
    pub async fn next_completion(&mut self) -> Option<CompletionOutcome> {
        let completion = self.in_flight.next().await?;
        Some(self.apply(completion))
    }

    /// Drain every outstanding fetch, superseded ones included.
    pub async fn settle(&mut self) {
        while self.next_completion().await.is_some() {}
    }

    /// Drop every outstanding fetch; none of them will ever be applied.
    pub fn abandon(&mut self) {
        let dropped = self.in_flight.len();
        self.in_flight = FuturesUnordered::new();
        if let Some(active) = self.active.take() {
            self.state = match active.kind {
                DispatchKind::Refresh => LoadState::Idle,
                DispatchKind::LoadMore => LoadState::Ready,
            };
        }
        if dropped > 0 {
            tracing::debug!(dropped, "abandoned in-flight fetches");
        }
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(PageCache::stats)
    }

    /// Forget cached pages of the current session
    pub fn invalidate_cache(&mut self) {
        if let (Some(cache), Some(fingerprint)) = (&mut self.cache, self.page.fingerprint()) {
            cache.invalidate(fingerprint);
        }
    }

    pub fn clear_cache(&mut self) {
        if let Some(cache) = &mut self.cache {
            cache.clear();
        }
    }

    fn allocate_token(&mut self) -> RequestToken {
        self.next_token += 1;
        RequestToken(self.next_token)
    }

    fn dispatch(
        &mut self,
        kind: DispatchKind,
        offset: usize,
        fingerprint: Fingerprint,
    ) -> DispatchStatus {
        let Some(criteria) = self.criteria.clone() else {
            return DispatchStatus::Skipped;
        };

        let token = self.allocate_token();
        let dispatch = Dispatch {
            token,
            kind,
            offset,
            fingerprint,
        };
        self.state = match kind {
            DispatchKind::Refresh => LoadState::Loading,
            DispatchKind::LoadMore => LoadState::LoadingMore,
        };
        self.active = Some(dispatch.clone());
        self.last_dispatch = Some(dispatch.clone());

        let key = self.page_key_for(&dispatch);
        if let Some(cache) = &mut self.cache
            && let Some(page) = cache.get(&key)
        {
            tracing::debug!(token = token.0, offset, "page served from cache");
            self.active = None;
            self.apply_page(&dispatch, page);
            return DispatchStatus::Cached;
        }

        tracing::debug!(token = token.0, kind = ?kind, offset, "dispatching fetch");
        let request = FetchRequest {
            context: self.context.clone(),
            sort: criteria.sort_spec(),
            criteria,
            page_size: self.page.page_size(),
            offset,
        };
        let fetch = self.fetcher.fetch(request);
        self.in_flight.push(
            async move {
                Completion {
                    token,
                    result: fetch.await,
                }
            }
            .boxed(),
        );
        DispatchStatus::Pending
    }

    fn apply(&mut self, completion: Completion) -> CompletionOutcome {
        let is_active = self
            .active
            .as_ref()
            .is_some_and(|active| active.token == completion.token);
        if !is_active {
            tracing::debug!(token = completion.token.0, "discarding stale response");
            return CompletionOutcome::Discarded;
        }
        let Some(dispatch) = self.active.take() else {
            return CompletionOutcome::Discarded;
        };

        match completion.result {
            Ok(page) => {
                let key = self.page_key_for(&dispatch);
                if let Some(cache) = &mut self.cache {
                    cache.insert(key, page.clone());
                }
                let added = self.apply_page(&dispatch, page);
                CompletionOutcome::Applied {
                    kind: dispatch.kind,
                    added,
                }
            }
            Err(err) => {
                tracing::warn!(
                    token = dispatch.token.0,
                    kind = ?dispatch.kind,
                    offset = dispatch.offset,
                    error = %err,
                    "fetch failed"
                );
                self.state = LoadState::Error;
                self.error = Some(err.clone());
                CompletionOutcome::Failed(err)
            }
        }
    }

    fn apply_page(&mut self, dispatch: &Dispatch, page: FetchedPage) -> usize {
        let added = self
            .page
            .apply_page(dispatch.offset, page.items, page.total_count);
        self.state = LoadState::Ready;
        self.error = None;
        tracing::debug!(
            token = dispatch.token.0,
            added,
            total = self.page.total_count(),
            has_more = self.page.has_more(),
            "page applied"
        );
        added
    }

    fn page_key_for(&self, dispatch: &Dispatch) -> PageKey {
        PageKey {
            fingerprint: dispatch.fingerprint.clone(),
            offset: dispatch.offset,
            page_size: self.page.page_size(),
        }
    }
}

impl std::fmt::Debug for PaginationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationController")
            .field("state", &self.state)
            .field("items", &self.page.items().len())
            .field("total_count", &self.page.total_count())
            .field("has_more", &self.page.has_more())
            .field("active", &self.active.as_ref().map(|d| d.token.0))
            .field("pending_fetches", &self.in_flight.len())
            .finish()
    }
}
