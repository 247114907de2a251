use shelfmark_types::{Article, FilterCriteria, TagOperator};

/// Whether `record` satisfies every active sub-predicate of `criteria`.
///
/// Pure: the result depends only on the two arguments. Each sub-predicate
/// that is at its default value passes unconditionally.
pub fn matches(record: &Article, criteria: &FilterCriteria) -> bool {
    matches_tags(record, criteria)
        && matches_date(record, criteria)
        && criteria.reading_status().accepts(record.status)
        && (!criteria.favorites_only() || record.is_favorite)
        && matches_search(record, criteria.search_query())
        && matches_duration(record, criteria)
}

/// Records from `records` that pass `criteria`, in their original order
pub fn filter_records<'a>(records: &'a [Article], criteria: &FilterCriteria) -> Vec<&'a Article> {
    records.iter().filter(|r| matches(r, criteria)).collect()
}

fn matches_tags(record: &Article, criteria: &FilterCriteria) -> bool {
    let selected = criteria.selected_tag_ids();
    if selected.is_empty() {
        return true;
    }
    match criteria.tag_operator() {
        TagOperator::And => selected.iter().all(|id| record.has_tag(id)),
        TagOperator::Or => selected.iter().any(|id| record.has_tag(id)),
    }
}

fn matches_date(record: &Article, criteria: &FilterCriteria) -> bool {
    let range = criteria.date_range();
    if range.is_unbounded() {
        return true;
    }
    let Some(ts) = record.created_at else {
        return false;
    };
    range.start.is_none_or(|start| ts >= start) && range.end.is_none_or(|end| ts <= end)
}

fn matches_search(record: &Article, query: &str) -> bool {
    let needle = query.trim();
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    record
        .searchable_fields()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn matches_duration(record: &Article, criteria: &FilterCriteria) -> bool {
    if criteria.has_default_duration() {
        return true;
    }
    record
        .duration_estimate
        .is_some_and(|d| d >= criteria.min_duration() && d <= criteria.max_duration())
}
