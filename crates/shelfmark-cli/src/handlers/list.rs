use crate::args::ListArgs;
use crate::output::{Palette, article_line};
use crate::types::OutputFormat;
use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::json;
use shelfmark_sdk::{
    Article, DispatchStatus, EngineConfig, InMemoryFetcher, ListView, PRESETS_FILE, load_presets,
};
use std::path::Path;
use std::sync::Arc;

pub fn handle(
    data_dir: &Path,
    mut config: EngineConfig,
    args: ListArgs,
    format: OutputFormat,
) -> Result<()> {
    let articles = load_articles(&args.data)?;
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }

    let presets = load_presets(&data_dir.join(PRESETS_FILE))?;
    let fetcher = Arc::new(InMemoryFetcher::new(articles));
    let mut view = ListView::builder(fetcher)
        .config(config)
        .presets(presets)
        .build()?;

    match &args.preset {
        Some(name) => {
            let id = view
                .presets()
                .find_by_name(name)
                .map(|p| p.id)
                .with_context(|| format!("No preset named '{}'", name))?;
            view.apply_preset(id)?;
        }
        None => {
            view.set_draft(args.criteria.to_criteria(Utc::now())?)?;
            view.apply()?;
        }
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(async {
        view.settle().await;
        for _ in 1..args.pages.max(1) {
            if view.load_more() == DispatchStatus::Skipped {
                break;
            }
            view.settle().await;
        }
    });

    if let Some(err) = view.error() {
        anyhow::bail!("Fetch failed: {}", err);
    }

    match format {
        OutputFormat::Json => {
            let output = json!({
                "items": view.items(),
                "total_count": view.total_count(),
                "has_more": view.has_more(),
                "active_filters": view.active_filter_count(),
                "criteria": view.draft().to_json(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let palette = Palette::detect();
            for article in view.items() {
                println!("{}", article_line(article, palette));
            }
            println!(
                "{}",
                palette.dim(&format!(
                    "Showing {} of {} ({} filters active{})",
                    view.items().len(),
                    view.total_count(),
                    view.active_filter_count(),
                    if view.has_more() { ", more available" } else { "" }
                ))
            );
        }
    }

    Ok(())
}

fn load_articles(path: &Path) -> Result<Vec<Article>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let articles: Vec<Article> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON array of articles", path.display()))?;
    tracing::info!(count = articles.len(), path = %path.display(), "loaded articles");
    Ok(articles)
}
