use std::cmp::Ordering;

use shelfmark_types::{Article, SortDirection, SortField, SortSpec};

/// Total order over articles for one sort field and direction.
///
/// Records lacking the key compare greater than every record that has it,
/// in both directions, so they always end up at the tail.
pub fn compare(a: &Article, b: &Article, sort: SortSpec) -> Ordering {
    match sort.field {
        SortField::CreatedAt => compare_keys(a.created_at, b.created_at, sort.direction),
        SortField::UpdatedAt => compare_keys(a.updated_at, b.updated_at, sort.direction),
        SortField::Title => compare_keys(title_key(a), title_key(b), sort.direction),
        SortField::DurationEstimate => {
            compare_keys(a.duration_estimate, b.duration_estimate, sort.direction)
        }
    }
}

/// Stable in-place sort; equal keys keep their incoming relative order.
pub fn sort_records(records: &mut [Article], sort: SortSpec) {
    records.sort_by(|a, b| compare(a, b, sort));
}

fn compare_keys<T: Ord>(a: Option<T>, b: Option<T>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match direction {
            SortDirection::Asc => a.cmp(&b),
            SortDirection::Desc => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-folded title first, raw title as tiebreak.
///
/// "apple" and "Banana" order alphabetically instead of by code point, and
/// titles equal after folding still get a deterministic order.
fn title_key(article: &Article) -> Option<(String, &str)> {
    article
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(|t| (t.to_lowercase(), t))
}
