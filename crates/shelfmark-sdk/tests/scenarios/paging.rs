//! Paging Tests
//!
//! First-page loads, load-more, stale responses and failures as seen
//! through a list view.

use std::sync::Arc;

use anyhow::Result;
use shelfmark_sdk::{
    DispatchKind, DispatchStatus, InMemoryFetcher, ListView, LoadState, ReadingStatus,
    StatusFilter, TransportError, ViewEvent,
};
use shelfmark_testing::assertions::{assert_unique_ids, ids};
use shelfmark_testing::{ScriptedFetcher, sample_articles};

fn view_over(fetcher: impl shelfmark_sdk::PageFetcher + 'static) -> Result<ListView> {
    Ok(ListView::builder(Arc::new(fetcher)).build()?)
}

#[tokio::test]
async fn test_apply_loads_first_page_then_more() -> Result<()> {
    let mut view = view_over(InMemoryFetcher::new(sample_articles(100)))?;

    assert_eq!(view.apply()?, DispatchStatus::Pending);
    assert_eq!(view.state(), LoadState::Loading);
    view.settle().await;

    assert_eq!(view.items().len(), 20);
    assert_eq!(view.total_count(), 100);
    assert!(view.has_more());

    assert_eq!(view.load_more(), DispatchStatus::Pending);
    view.settle().await;
    assert_eq!(view.items().len(), 40);
    assert_unique_ids(view.items())?;
    Ok(())
}

#[tokio::test]
async fn test_window_over_loaded_items() -> Result<()> {
    let mut view = view_over(InMemoryFetcher::new(sample_articles(100)))?;
    view.apply()?;
    view.settle().await;

    let window = view.window(0.0);
    assert_eq!((window.start_index, window.end_index), (0, 20));
    assert_eq!(window.total_height, 1_000.0);
    assert_eq!(view.visible_items(0.0).len(), 20);
    assert!(view.needs_more(0.0));

    let window = view.window(250.0);
    assert_eq!(window.start_index, 0);
    assert_eq!(window.render_offset, 0.0);
    Ok(())
}

#[tokio::test]
async fn test_reversed_responses_keep_latest_criteria() -> Result<()> {
    let records = sample_articles(40);
    let fetcher = ScriptedFetcher::new();
    let mut view = view_over(fetcher.clone())?;

    view.set_status(StatusFilter::Unread);
    view.apply()?;
    view.set_status(StatusFilter::Reading);
    view.apply()?;

    let mut pending = fetcher.take_pending();
    let latest = pending.remove(1);
    let earlier = pending.remove(0);

    latest.resolve_from(&records);
    assert_eq!(
        view.next_event().await,
        Some(ViewEvent::Loaded {
            kind: DispatchKind::Refresh,
            added: 10
        })
    );

    earlier.resolve_from(&records);
    assert_eq!(view.next_event().await, Some(ViewEvent::Discarded));

    assert!(view.items().iter().all(|a| a.status == ReadingStatus::Reading));
    assert!(!view.filters_changed());
    Ok(())
}

#[tokio::test]
async fn test_failed_load_more_keeps_items_until_retry() -> Result<()> {
    let records = sample_articles(50);
    let fetcher = ScriptedFetcher::new();
    let mut view = view_over(fetcher.clone())?;

    view.apply()?;
    fetcher.take_one().resolve_from(&records);
    view.settle().await;
    let before: Vec<String> = ids(view.items()).iter().map(|s| s.to_string()).collect();

    view.load_more();
    fetcher.take_one().fail(TransportError::Network("reset".to_string()));
    assert_eq!(
        view.next_event().await,
        Some(ViewEvent::Failed(TransportError::Network("reset".to_string())))
    );
    assert_eq!(view.state(), LoadState::Error);
    assert_eq!(ids(view.items()), before);

    assert_eq!(view.retry(), DispatchStatus::Pending);
    fetcher.take_one().resolve_from(&records);
    view.settle().await;
    assert_eq!(view.items().len(), 40);
    assert!(view.error().is_none());
    Ok(())
}
