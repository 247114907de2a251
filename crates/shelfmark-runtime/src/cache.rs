use std::num::NonZeroUsize;
use std::time::Duration;

use lru::LruCache;
use shelfmark_types::Fingerprint;
use tokio::time::Instant;

use crate::fetch::FetchedPage;

/// Cache key: one page of one criteria fingerprint at one page size
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey {
    pub fingerprint: Fingerprint,
    pub offset: usize,
    pub page_size: usize,
}

#[derive(Debug, Clone)]
struct CachedPage {
    page: FetchedPage,
    stored_at: Instant,
}

/// Hit/miss counters for one cache instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Bounded page cache owned by a single controller.
///
/// Least-recently-used pages are evicted past `capacity`; entries older
/// than `ttl` are treated as misses and dropped on lookup.
#[derive(Debug)]
pub struct PageCache {
    entries: LruCache<PageKey, CachedPage>,
    ttl: Duration,
    hits: u64,
    misses: u64,
}

impl PageCache {
    pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self {
            entries: LruCache::new(capacity),
            ttl,
            hits: 0,
            misses: 0,
        }
    }

    /// `None` when capacity is zero (caching disabled)
    pub fn with_capacity(capacity: usize, ttl: Duration) -> Option<Self> {
        NonZeroUsize::new(capacity).map(|capacity| Self::new(capacity, ttl))
    }

    pub fn get(&mut self, key: &PageKey) -> Option<FetchedPage> {
        let now = Instant::now();
        let fresh = match self.entries.get(key) {
            Some(cached) => now.duration_since(cached.stored_at) < self.ttl,
            None => {
                self.misses += 1;
                return None;
            }
        };

        if !fresh {
            self.entries.pop(key);
            self.misses += 1;
            return None;
        }

        self.hits += 1;
        self.entries.get(key).map(|cached| cached.page.clone())
    }

    pub fn insert(&mut self, key: PageKey, page: FetchedPage) {
        self.entries.put(
            key,
            CachedPage {
                page,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop every page stored for `fingerprint`
    pub fn invalidate(&mut self, fingerprint: &Fingerprint) {
        let stale: Vec<PageKey> = self
            .entries
            .iter()
            .filter(|(key, _)| &key.fingerprint == fingerprint)
            .map(|(key, _)| key.clone())
            .collect();
        for key in stale {
            self.entries.pop(&key);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfmark_types::{Article, FilterCriteria};

    fn key(search: &str, offset: usize) -> PageKey {
        PageKey {
            fingerprint: FilterCriteria::new().with_search(search).fingerprint(),
            offset,
            page_size: 10,
        }
    }

    fn page(id: &str) -> FetchedPage {
        FetchedPage {
            items: vec![Article::new(id)],
            total_count: 1,
        }
    }

    fn cache(capacity: usize) -> PageCache {
        PageCache::with_capacity(capacity, Duration::from_secs(60)).unwrap()
    }

    #[test]
    fn test_zero_capacity_disables_cache() {
        assert!(PageCache::with_capacity(0, Duration::from_secs(1)).is_none());
    }

    #[tokio::test]
    async fn test_hit_and_miss_counters() {
        let mut cache = cache(4);
        assert!(cache.get(&key("a", 0)).is_none());

        cache.insert(key("a", 0), page("x"));
        assert_eq!(cache.get(&key("a", 0)).unwrap().items[0].id, "x");

        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.entries), (1, 1, 1));
    }

    #[tokio::test]
    async fn test_lru_eviction() {
        let mut cache = cache(2);
        cache.insert(key("a", 0), page("a"));
        cache.insert(key("b", 0), page("b"));
        cache.get(&key("a", 0));
        cache.insert(key("c", 0), page("c"));

        assert!(cache.get(&key("b", 0)).is_none());
        assert!(cache.get(&key("a", 0)).is_some());
        assert!(cache.get(&key("c", 0)).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entries_miss() {
        let mut cache = PageCache::with_capacity(4, Duration::from_secs(5)).unwrap();
        cache.insert(key("a", 0), page("a"));

        tokio::time::advance(Duration::from_secs(6)).await;
        assert!(cache.get(&key("a", 0)).is_none());
        assert_eq!(cache.stats().entries, 0);
    }

    #[tokio::test]
    async fn test_invalidate_drops_only_that_fingerprint() {
        let mut cache = cache(8);
        cache.insert(key("a", 0), page("a0"));
        cache.insert(key("a", 10), page("a1"));
        cache.insert(key("b", 0), page("b0"));

        cache.invalidate(&key("a", 0).fingerprint);
        assert_eq!(cache.stats().entries, 1);
        assert!(cache.get(&key("b", 0)).is_some());

        cache.clear();
        assert_eq!(cache.stats().entries, 0);
    }
}
