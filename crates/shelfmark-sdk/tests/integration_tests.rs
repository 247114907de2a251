//! Integration tests for shelfmark-sdk
//!
//! These tests drive `ListView` through its public API with in-memory and
//! scripted fetchers, without going through the CLI layer.

mod scenarios {
    mod history;
    mod import_export;
    mod paging;
    mod presets;
    mod search;
}
