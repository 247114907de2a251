//! History Tests
//!
//! Undo/redo and dirty tracking through a list view.

use std::sync::Arc;

use anyhow::Result;
use shelfmark_sdk::{
    DispatchStatus, FilterCriteria, InMemoryFetcher, ListView, ReadingStatus, StatusFilter,
};
use shelfmark_testing::sample_articles;

fn setup() -> Result<(InMemoryFetcher, ListView)> {
    let fetcher = InMemoryFetcher::new(sample_articles(60));
    let view = ListView::builder(Arc::new(fetcher.clone())).build()?;
    Ok((fetcher, view))
}

async fn apply_status(view: &mut ListView, status: StatusFilter) -> Result<()> {
    view.set_status(status);
    view.apply()?;
    view.settle().await;
    Ok(())
}

#[tokio::test]
async fn test_undo_redo_restore_criteria_from_cache() -> Result<()> {
    let (fetcher, mut view) = setup()?;
    apply_status(&mut view, StatusFilter::Unread).await?;
    apply_status(&mut view, StatusFilter::Reading).await?;
    assert_eq!(fetcher.calls(), 2);

    assert_eq!(view.undo()?, DispatchStatus::Cached);
    assert_eq!(view.draft().reading_status(), StatusFilter::Unread);
    assert!(view.items().iter().all(|a| a.status == ReadingStatus::Unread));
    assert!(!view.filters_changed());

    assert_eq!(view.redo()?, DispatchStatus::Cached);
    assert_eq!(view.draft().reading_status(), StatusFilter::Reading);
    assert_eq!(fetcher.calls(), 2);
    Ok(())
}

#[tokio::test]
async fn test_commit_after_undo_drops_redo_branch() -> Result<()> {
    let (_fetcher, mut view) = setup()?;
    apply_status(&mut view, StatusFilter::Unread).await?;
    apply_status(&mut view, StatusFilter::Reading).await?;

    view.undo()?;
    assert!(view.can_redo());

    apply_status(&mut view, StatusFilter::Archived).await?;
    assert!(!view.can_redo());
    assert_eq!(view.redo()?, DispatchStatus::Skipped);
    assert_eq!(view.history().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_filters_changed_tracks_last_successful_load() -> Result<()> {
    let (_fetcher, mut view) = setup()?;
    assert!(!view.filters_changed());

    view.set_favorites_only(true);
    assert!(view.filters_changed());

    view.apply()?;
    assert!(view.filters_changed());
    view.settle().await;
    assert!(!view.filters_changed());
    Ok(())
}

#[tokio::test]
async fn test_reset_applies_defaults() -> Result<()> {
    let (_fetcher, mut view) = setup()?;
    view.set_tags(["t1"])?;
    view.set_duration_range(5, 30)?;
    view.apply()?;
    view.settle().await;
    assert_eq!(view.active_filter_count(), 2);

    view.reset()?;
    view.settle().await;
    assert_eq!(view.draft(), &FilterCriteria::new());
    assert_eq!(view.total_count(), 60);
    assert!(view.can_undo());
    Ok(())
}

#[tokio::test]
async fn test_invalid_draft_edit_leaves_draft_unchanged() -> Result<()> {
    let (_fetcher, mut view) = setup()?;
    view.set_duration_range(10, 20)?;

    let err = view.set_duration_range(30, 5).unwrap_err();
    assert!(err.as_validation().is_some());
    assert_eq!(view.draft().min_duration(), 10);
    assert_eq!(view.draft().max_duration(), 20);
    Ok(())
}
