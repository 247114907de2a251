//! shelfmark-sdk: list views over paged reading-list data.
//!
//! # Overview
//!
//! A `ListView` owns everything one filtered, paginated, virtualized list
//! needs: the criteria being edited, an undo/redo history of applied
//! criteria, a pagination controller that never lets a superseded response
//! overwrite a newer one, a debounced search box, and the owner's saved
//! presets. The host supplies a `PageFetcher` and drives the view with
//! `next_event().await`.
//!
//! # Architecture
//!
//! This SDK acts as a facade over:
//! - `shelfmark-types`: records, criteria, presets and the export schema
//! - `shelfmark-engine`: filtering, sorting, paging state, history, windowing
//! - `shelfmark-runtime`: fetch orchestration, debounce, cache, config

pub mod error;
pub mod presets;
pub mod view;

pub use error::{Error, Result};
pub use presets::{PRESETS_FILE, load_presets, save_presets};
pub use view::{ListView, ListViewBuilder, ViewEvent};

pub use shelfmark_engine::{VirtualWindow, WindowLayout};
pub use shelfmark_runtime::{
    DispatchKind, DispatchStatus, EngineConfig, FetchRequest, FetchedPage, InMemoryFetcher,
    LoadState, PageFetcher, TransportError,
};
pub use shelfmark_types::{
    Article, DatePreset, DateRange, FilterCriteria, FilterPreset, OwnerContext, ReadingStatus,
    SortDirection, SortField, SortSpec, StatusFilter, TagOperator,
};
