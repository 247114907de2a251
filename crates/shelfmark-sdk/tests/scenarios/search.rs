//! Search Debounce Tests
//!
//! Bursts of search edits collapse into one fetch after a quiet window.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use shelfmark_sdk::{DispatchKind, InMemoryFetcher, ListView, LoadState, ViewEvent};
use shelfmark_testing::{ScriptedFetcher, article, sample_articles};
use tokio::time::{Instant, advance};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[tokio::test(start_paused = true)]
async fn test_typing_burst_fetches_once_with_final_query() -> Result<()> {
    let fetcher = InMemoryFetcher::new(vec![
        article("a1").title("Rust ownership").build(),
        article("a2").title("Rusty hinges").build(),
        article("a3").title("Go channels").build(),
    ]);
    let mut view = ListView::builder(Arc::new(fetcher.clone())).build()?;
    let start = Instant::now();

    view.set_search("r");
    advance(ms(100)).await;
    view.set_search("ru");
    advance(ms(150)).await;
    view.set_search("rust");

    assert_eq!(
        view.next_event().await,
        Some(ViewEvent::SearchApplied("rust".to_string()))
    );
    let elapsed = start.elapsed();
    assert!(elapsed >= ms(550) && elapsed < ms(560), "fired at {:?}", elapsed);

    assert_eq!(
        view.next_event().await,
        Some(ViewEvent::Loaded {
            kind: DispatchKind::Refresh,
            added: 2
        })
    );
    assert_eq!(fetcher.calls(), 1);
    assert_eq!(view.next_event().await, None);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_explicit_apply_supersedes_pending_search() -> Result<()> {
    let fetcher = InMemoryFetcher::new(sample_articles(10));
    let mut view = ListView::builder(Arc::new(fetcher.clone())).build()?;

    view.set_search("article 3");
    assert!(view.is_search_pending());

    view.apply()?;
    assert!(!view.is_search_pending());
    view.settle().await;

    assert_eq!(fetcher.calls(), 1);
    assert_eq!(view.draft().search_query(), "article 3");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_dispose_cancels_pending_search() -> Result<()> {
    let fetcher = InMemoryFetcher::new(sample_articles(10));
    let mut view = ListView::builder(Arc::new(fetcher.clone())).build()?;

    view.set_search("anything");
    view.dispose();

    advance(ms(1_000)).await;
    assert_eq!(view.next_event().await, None);
    assert_eq!(fetcher.calls(), 0);

    view.set_search("later");
    assert!(!view.is_search_pending());
    assert!(!view.import_filters("{}"));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_settle_drains_fetches_around_a_debounced_search() -> Result<()> {
    let records = sample_articles(30);
    let fetcher = ScriptedFetcher::new();
    let mut view = ListView::builder(Arc::new(fetcher.clone())).build()?;

    view.apply()?;
    view.set_search("article 2");
    let first = fetcher.take_one();

    // The debounce fires while the first fetch is still out
    assert_eq!(
        view.next_event().await,
        Some(ViewEvent::SearchApplied("article 2".to_string()))
    );
    let second = fetcher.take_one();
    first.resolve_from(&records);
    second.resolve_from(&records);

    view.settle().await;
    assert_eq!(view.state(), LoadState::Ready);
    assert!(!view.controller().is_in_flight());
    assert_eq!(view.controller().pending_fetches(), 0);
    assert!(view.items().iter().all(|a| {
        a.title.as_deref().is_some_and(|t| t.to_lowercase().contains("article 2"))
    }));
    assert!(!view.filters_changed());
    Ok(())
}
