//! Import/Export Tests
//!
//! Exported filter documents round-trip between views; malformed documents
//! are rejected without touching the view.

use std::sync::Arc;

use anyhow::Result;
use serde_json::{Value, json};
use chrono::Utc;
use shelfmark_sdk::{
    FilterCriteria, FilterPreset, InMemoryFetcher, ListView, StatusFilter, TagOperator,
};
use shelfmark_testing::sample_articles;

fn view() -> Result<ListView> {
    let fetcher = InMemoryFetcher::new(sample_articles(30));
    Ok(ListView::builder(Arc::new(fetcher)).build()?)
}

fn configured_view() -> Result<ListView> {
    let mut view = view()?;
    view.set_tags(["t1", "featured"])?;
    view.set_tag_operator(TagOperator::And);
    view.set_status(StatusFilter::Completed);
    view.set_duration_range(5, 45)?;
    view.save_preset("Finished features")?;
    Ok(view)
}

#[tokio::test]
async fn test_export_then_import_restores_draft_and_presets() -> Result<()> {
    let source = configured_view()?;
    let exported = source.export_filters();
    assert_eq!(exported["version"], json!(1));

    let mut target = view()?;
    assert!(target.import_filters(&exported.to_string()));

    assert_eq!(target.draft(), source.draft());
    assert_eq!(target.presets().len(), 1);
    assert!(target.presets().find_by_name("finished features").is_some());

    target.settle().await;
    assert!(!target.filters_changed());
    Ok(())
}

#[tokio::test]
async fn test_malformed_documents_are_rejected_without_side_effects() -> Result<()> {
    let exported = configured_view()?.export_filters();

    let mut unknown_field = exported.clone();
    unknown_field["criteria"]["colour"] = json!("red");

    let mut future_version = exported.clone();
    future_version["version"] = json!(2);

    let mut inverted = exported.clone();
    inverted["criteria"]["min_duration"] = json!(90);
    inverted["criteria"]["max_duration"] = json!(10);

    let mut wrong_type = exported.clone();
    wrong_type["criteria"]["favorites_only"] = json!("yes");

    let mut missing = exported.clone();
    if let Value::Object(criteria) = &mut missing["criteria"] {
        criteria.remove("search_query");
    }

    let mut duplicate_presets = exported.clone();
    let preset = exported["presets"][0].clone();
    duplicate_presets["presets"] = json!([preset.clone(), preset]);

    let mut duplicate_ids = exported.clone();
    let mut renamed = exported["presets"][0].clone();
    renamed["name"] = json!("Another name");
    duplicate_ids["presets"] = json!([exported["presets"][0].clone(), renamed]);

    let mut view = view()?;
    view.set_search("keep me");
    view.apply()?;
    let before = view.draft().clone();

    for (label, doc) in [
        ("unknown field", unknown_field.to_string()),
        ("future version", future_version.to_string()),
        ("inverted range", inverted.to_string()),
        ("wrong type", wrong_type.to_string()),
        ("missing field", missing.to_string()),
        ("duplicate presets", duplicate_presets.to_string()),
        ("duplicate preset ids", duplicate_ids.to_string()),
        ("not json", "{criteria:".to_string()),
        ("not an object", "[1, 2, 3]".to_string()),
    ] {
        assert!(!view.import_filters(&doc), "{} should be rejected", label);
        assert_eq!(view.draft(), &before, "{} mutated the draft", label);
        assert!(view.presets().is_empty(), "{} mutated presets", label);
    }
    Ok(())
}

#[tokio::test]
async fn test_import_without_presets_keeps_existing_ones() -> Result<()> {
    let mut view = configured_view()?;
    let doc = json!({
        "version": 1,
        "criteria": FilterCriteria::new().to_json(),
    });

    assert!(view.import_filters(&doc.to_string()));
    assert_eq!(view.draft(), &FilterCriteria::new());
    assert_eq!(view.presets().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_import_keeps_default_presets() -> Result<()> {
    let mut everything = FilterPreset::new("Everything", FilterCriteria::new(), Utc::now());
    everything.is_default = true;
    let fetcher = InMemoryFetcher::new(sample_articles(30));
    let mut view = ListView::builder(Arc::new(fetcher))
        .presets(vec![everything.clone()])
        .build()?;
    assert!(view.delete_preset(everything.id).is_err());

    let exported = configured_view()?.export_filters();
    assert!(view.import_filters(&exported.to_string()));

    assert_eq!(view.presets().len(), 2);
    assert!(view.presets().get(everything.id).is_some_and(|p| p.is_default));
    assert!(view.presets().find_by_name("finished features").is_some());

    // Re-importing the view's own export keeps the default exactly once
    let own = view.export_filters();
    assert!(view.import_filters(&own.to_string()));
    assert_eq!(view.presets().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_import_clashing_with_default_name_is_rejected() -> Result<()> {
    let mut daily = FilterPreset::new("Finished features", FilterCriteria::new(), Utc::now());
    daily.is_default = true;
    let fetcher = InMemoryFetcher::new(sample_articles(30));
    let mut view = ListView::builder(Arc::new(fetcher))
        .presets(vec![daily.clone()])
        .build()?;
    let before = view.draft().clone();

    let exported = configured_view()?.export_filters();
    assert!(!view.import_filters(&exported.to_string()));

    assert_eq!(view.draft(), &before);
    assert_eq!(view.presets().list(), &[daily][..]);
    Ok(())
}
