//! The paged-fetch primitive the controller delegates data retrieval to.

mod memory;

pub use memory::InMemoryFetcher;

use futures::future::BoxFuture;
use shelfmark_types::{Article, FilterCriteria, OwnerContext, SortSpec};

use crate::error::TransportError;

/// Everything the backend needs to produce one page
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub context: OwnerContext,
    pub criteria: FilterCriteria,
    pub sort: SortSpec,
    pub page_size: usize,
    pub offset: usize,
}

/// One page as returned by the backend
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchedPage {
    pub items: Vec<Article>,
    /// Size of the full result set as declared by the backend
    pub total_count: usize,
}

/// Source of paged, filtered, sorted records.
///
/// Implementations must be side-effect free and return the same page for
/// the same request unless the underlying data actually changed. Timeouts
/// are the implementation's concern and surface as `TransportError::Timeout`.
pub trait PageFetcher: Send + Sync {
    fn fetch(&self, request: FetchRequest) -> BoxFuture<'static, Result<FetchedPage, TransportError>>;
}
