//! Fetch orchestration for shelfmark list views.
//!
//! Sits between the pure engine and whatever backend serves pages:
//! - `PaginationController`: paged fetches with stale-response guarding
//! - `DebounceCoordinator`: trailing-edge debounce for search input
//! - `PageCache`: bounded, TTL'd cache of fetched pages
//! - `EngineConfig`: tunables loaded from `config.toml`

pub mod cache;
pub mod config;
pub mod debounce;
pub mod error;
pub mod fetch;
pub mod pagination;

pub use cache::{CacheStats, PageCache, PageKey};
pub use config::{EngineConfig, expand_tilde, resolve_data_dir};
pub use debounce::{DEFAULT_DEBOUNCE_WINDOW, DebounceCoordinator};
pub use error::{Error, Result, TransportError};
pub use fetch::{FetchRequest, FetchedPage, InMemoryFetcher, PageFetcher};
pub use pagination::{
    CompletionOutcome, DispatchKind, DispatchStatus, LoadState, PaginationController,
};
