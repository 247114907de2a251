use crate::types::{LogLevel, OutputFormat, SortArg, StatusArg, WithinArg};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use shelfmark_types::{
    DateRange, FilterCriteria, MAX_DURATION_MINUTES, SortDirection, SortSpec, TagOperator,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shelfmark")]
#[command(about = "Filter, page and window a reading list", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory holding config.toml and presets.json
    /// (defaults to $SHELFMARK_PATH, then the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    /// Overrides RUST_LOG; logs go to stderr
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Filter and page articles from a JSON file")]
    List(ListArgs),

    #[command(about = "Compute the render window for a virtualized list")]
    Window(WindowArgs),

    #[command(about = "Manage saved filter presets")]
    Preset {
        #[command(subcommand)]
        command: PresetCommand,
    },

    #[command(about = "Show or initialize config.toml")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// JSON array of articles
    #[arg(long, value_name = "FILE")]
    pub data: PathBuf,

    /// Apply a saved preset instead of the filter flags
    #[arg(long, value_name = "NAME", conflicts_with_all = ["tags", "status", "search", "sort"])]
    pub preset: Option<String>,

    #[command(flatten)]
    pub criteria: CriteriaArgs,

    /// Number of pages to load
    #[arg(long, default_value_t = 1)]
    pub pages: usize,

    /// Override the configured page size
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Debug, Args)]
pub struct WindowArgs {
    /// Number of materialized items
    #[arg(long)]
    pub count: usize,

    /// Scroll offset in pixels
    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    pub offset: f64,

    #[arg(long)]
    pub container_height: Option<f64>,

    #[arg(long)]
    pub item_height: Option<f64>,

    #[arg(long)]
    pub overscan: Option<usize>,
}

#[derive(Subcommand)]
pub enum PresetCommand {
    #[command(about = "List saved presets")]
    List,

    #[command(about = "Save the given filter flags as a preset")]
    Save {
        name: String,

        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    #[command(about = "Print a preset's criteria")]
    Show { name: String },

    #[command(about = "Delete a preset by name")]
    Delete { name: String },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Print the effective configuration")]
    Show,

    #[command(about = "Write a default config.toml")]
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Filter flags shared by `list` and `preset save`
#[derive(Debug, Clone, Default, Args)]
pub struct CriteriaArgs {
    /// Require this tag id (repeatable)
    #[arg(long = "tag", value_name = "ID")]
    pub tags: Vec<String>,

    /// Match articles with any selected tag instead of all of them
    #[arg(long)]
    pub any: bool,

    #[arg(long)]
    pub status: Option<StatusArg>,

    /// Only favorites
    #[arg(long)]
    pub favorites: bool,

    /// Case-insensitive text search
    #[arg(long)]
    pub search: Option<String>,

    /// Minimum reading time in minutes
    #[arg(long)]
    pub min_duration: Option<u32>,

    /// Maximum reading time in minutes
    #[arg(long)]
    pub max_duration: Option<u32>,

    /// Created on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", conflicts_with = "within")]
    pub since: Option<NaiveDate>,

    /// Created on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", conflicts_with = "within")]
    pub until: Option<NaiveDate>,

    /// Created within a window ending now
    #[arg(long)]
    pub within: Option<WithinArg>,

    #[arg(long)]
    pub sort: Option<SortArg>,

    /// Sort descending (with --sort)
    #[arg(long)]
    pub desc: bool,
}

impl CriteriaArgs {
    pub fn to_criteria(&self, now: DateTime<Utc>) -> Result<FilterCriteria> {
        let mut criteria = FilterCriteria::new();

        if !self.tags.is_empty() {
            let operator = if self.any {
                TagOperator::Or
            } else {
                TagOperator::And
            };
            criteria = criteria
                .with_tags(self.tags.iter().cloned())?
                .with_tag_operator(operator);
        }

        if let Some(status) = self.status {
            criteria = criteria.with_status(status.into());
        }
        if self.favorites {
            criteria = criteria.with_favorites_only(true);
        }
        if let Some(search) = &self.search {
            criteria = criteria.with_search(search.clone());
        }

        if self.min_duration.is_some() || self.max_duration.is_some() {
            criteria = criteria.with_duration_range(
                self.min_duration.unwrap_or(0),
                self.max_duration.unwrap_or(MAX_DURATION_MINUTES),
            )?;
        }

        if let Some(within) = self.within {
            criteria = criteria.with_date_preset(within.into(), now);
        } else if self.since.is_some() || self.until.is_some() {
            let start = self
                .since
                .map(|d| d.and_hms_opt(0, 0, 0).map(|t| t.and_utc()))
                .map(|t| t.context("invalid --since date"))
                .transpose()?;
            let end = self
                .until
                .map(|d| d.and_hms_opt(23, 59, 59).map(|t| t.and_utc()))
                .map(|t| t.context("invalid --until date"))
                .transpose()?;
            criteria = criteria.with_date_range(DateRange::new(start, end))?;
        }

        if let Some(sort) = self.sort {
            let direction = if self.desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            criteria = criteria.with_sort(SortSpec::new(sort.into(), direction));
        }

        Ok(criteria)
    }
}
