//! Preset Tests
//!
//! Saving, applying, deleting and persisting presets through a view.

use std::sync::Arc;

use anyhow::Result;
use shelfmark_sdk::{
    Error, InMemoryFetcher, ListView, OwnerContext, PRESETS_FILE, SortField, SortSpec,
    StatusFilter, load_presets, save_presets,
};
use shelfmark_testing::sample_articles;
use shelfmark_types::ValidationError;
use tempfile::TempDir;
use uuid::Uuid;

fn view() -> Result<ListView> {
    let fetcher = InMemoryFetcher::new(sample_articles(40));
    Ok(ListView::builder(Arc::new(fetcher))
        .context(OwnerContext::new("reader-7"))
        .build()?)
}

#[tokio::test]
async fn test_apply_preset_replaces_draft_and_refreshes() -> Result<()> {
    let mut view = view()?;
    view.set_status(StatusFilter::Archived);
    view.set_sort(SortSpec::asc(SortField::Title));
    let id = view.save_preset("Archive A-Z")?;

    view.reset()?;
    view.settle().await;
    assert_eq!(view.draft().reading_status(), StatusFilter::All);

    view.apply_preset(id)?;
    view.settle().await;
    assert_eq!(view.draft().reading_status(), StatusFilter::Archived);
    assert_eq!(view.total_count(), 10);
    assert_eq!(view.presets().context(), &OwnerContext::new("reader-7"));
    Ok(())
}

#[tokio::test]
async fn test_preset_errors() -> Result<()> {
    let mut view = view()?;
    view.save_preset("Daily")?;

    let err = view.save_preset("  daily ").unwrap_err();
    assert_eq!(
        err.as_validation(),
        Some(&ValidationError::DuplicatePresetName("daily".to_string()))
    );

    let missing = Uuid::new_v4();
    assert!(matches!(view.apply_preset(missing), Err(Error::NotFound(_))));
    assert_eq!(
        view.delete_preset(missing).unwrap_err().as_validation(),
        Some(&ValidationError::PresetNotFound(missing))
    );
    Ok(())
}

#[tokio::test]
async fn test_presets_survive_a_restart_through_the_preset_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join(PRESETS_FILE);

    let mut first = view()?;
    first.set_favorites_only(true);
    let id = first.save_preset("Favorites")?;
    save_presets(&path, first.presets().list())?;

    let fetcher = InMemoryFetcher::new(sample_articles(40));
    let mut second = ListView::builder(Arc::new(fetcher))
        .presets(load_presets(&path)?)
        .build()?;

    second.apply_preset(id)?;
    second.settle().await;
    assert!(second.draft().favorites_only());
    assert!(second.items().iter().all(|a| a.is_favorite));

    second.delete_preset(id)?;
    assert!(second.presets().is_empty());
    Ok(())
}
