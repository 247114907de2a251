use std::collections::HashSet;

use shelfmark_types::{Article, Fingerprint};

/// Whether another page should be requested after one came back.
///
/// A short page ends the list even when `total_count` claims otherwise: the
/// payload is trusted over a declared count that may be stale, which keeps
/// a list with an inconsistent total from requesting empty pages forever.
pub fn compute_has_more(returned: usize, page_size: usize, offset: usize, total_count: usize) -> bool {
    returned == page_size && offset + returned < total_count
}

/// Materialized items for one criteria fingerprint.
///
/// Items are append-only between resets and unique by id: when a later page
/// repeats an id (rows shifted on the server between requests) the first
/// occurrence is kept.
#[derive(Debug, Clone)]
pub struct PageState {
    fingerprint: Option<Fingerprint>,
    page_size: usize,
    items: Vec<Article>,
    seen: HashSet<String>,
    total_count: usize,
    has_more: bool,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            fingerprint: None,
            page_size,
            items: Vec::new(),
            seen: HashSet::new(),
            total_count: 0,
            has_more: false,
        }
    }

    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        self.fingerprint.as_ref()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn items(&self) -> &[Article] {
        &self.items
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Offset of the next page to request
    pub fn next_offset(&self) -> usize {
        self.items.len()
    }

    /// Start over for a new fingerprint
    pub fn reset(&mut self, fingerprint: Fingerprint) {
        self.fingerprint = Some(fingerprint);
        self.items.clear();
        self.seen.clear();
        self.total_count = 0;
        self.has_more = false;
    }

    /// Fold a fetched page in; returns how many new items were kept.
    pub fn apply_page(&mut self, offset: usize, page: Vec<Article>, total_count: usize) -> usize {
        let returned = page.len();
        if offset == 0 {
            self.items.clear();
            self.seen.clear();
        }

        let before = self.items.len();
        for article in page {
            if self.seen.insert(article.id.clone()) {
                self.items.push(article);
            }
        }

        self.total_count = total_count;
        self.has_more = compute_has_more(returned, self.page_size, offset, total_count);
        self.items.len() - before
    }
}
