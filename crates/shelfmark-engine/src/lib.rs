// Engine module - pure list logic (filtering, ordering, paging state, history, windowing)
// No I/O and no async here: the runtime crate drives these from fetch completions and
// scroll events.

pub mod filter;
pub mod history;
pub mod page;
pub mod sort;
pub mod window;

pub use filter::{filter_records, matches};
pub use history::{DEFAULT_HISTORY_CAPACITY, HistoryManager};
pub use page::{PageState, compute_has_more};
pub use sort::{compare, sort_records};
pub use window::{VirtualWindow, WindowLayout, compute_window};

use shelfmark_types::{Article, FilterCriteria};

// Façade API - evaluate a whole in-memory set the way a fetch primitive would

/// Filter then stably sort `records` by the criteria's own sort spec.
pub fn query(records: &[Article], criteria: &FilterCriteria) -> Vec<Article> {
    let mut matched: Vec<Article> = filter_records(records, criteria)
        .into_iter()
        .cloned()
        .collect();
    sort_records(&mut matched, criteria.sort_spec());
    matched
}
