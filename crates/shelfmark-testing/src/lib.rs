//! Testing infrastructure for shelfmark integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `TestWorld`: Fluent interface for isolated CLI test environments
//! - `ScriptedFetcher`: A page fetcher whose responses the test releases by hand
//! - `assertions`: Assertions over materialized lists and CLI JSON output
//! - `fixtures`: Deterministic article generation

pub mod assertions;
pub mod fetcher;
pub mod fixtures;
pub mod world;

pub use fetcher::{PendingFetch, ScriptedFetcher};
pub use fixtures::{ArticleBuilder, article, sample_articles};
pub use world::{CliResult, TestWorld};
