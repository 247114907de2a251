//! Custom assertions for shelfmark-specific validation.
//!
//! - Materialized list contents and ordering
//! - Uniqueness of ids across pages
//! - JSON structure checks for `shelfmark list --format json`

use anyhow::{Context, Result};
use serde_json::Value;
use shelfmark_types::Article;
use std::collections::HashSet;

pub fn ids(items: &[Article]) -> Vec<&str> {
    items.iter().map(|a| a.id.as_str()).collect()
}

/// Assert the materialized list holds exactly `expected`, in order.
pub fn assert_ids(items: &[Article], expected: &[&str]) -> Result<()> {
    let actual = ids(items);
    if actual != expected {
        anyhow::bail!("Expected ids {:?}, got {:?}", expected, actual);
    }
    Ok(())
}

/// Assert no id appears twice in the list.
pub fn assert_unique_ids(items: &[Article]) -> Result<()> {
    let mut seen = HashSet::new();
    for article in items {
        if !seen.insert(article.id.as_str()) {
            anyhow::bail!("Duplicate id in list: {}", article.id);
        }
    }
    Ok(())
}

/// Assert that JSON list output contains exactly `expected` ids, in order.
pub fn assert_json_ids(json: &Value, expected: &[&str]) -> Result<()> {
    let items = json["items"]
        .as_array()
        .context("Expected 'items' array in JSON")?;

    let actual: Vec<&str> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item["id"]
                .as_str()
                .with_context(|| format!("Item {} missing id", i))
        })
        .collect::<Result<_>>()?;

    if actual != expected {
        anyhow::bail!("Expected ids {:?}, got {:?}", expected, actual);
    }
    Ok(())
}

/// Assert the `total_count` field of JSON list output.
pub fn assert_json_total(json: &Value, expected: u64) -> Result<()> {
    let total = json["total_count"]
        .as_u64()
        .context("Expected numeric 'total_count' in JSON")?;

    if total != expected {
        anyhow::bail!("Expected total_count {}, got {}", expected, total);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assert_ids_reports_mismatch() {
        let items = vec![Article::new("a"), Article::new("b")];
        assert!(assert_ids(&items, &["a", "b"]).is_ok());
        assert!(assert_ids(&items, &["b", "a"]).is_err());
    }

    #[test]
    fn test_assert_unique_ids() {
        let items = vec![Article::new("a"), Article::new("a")];
        assert!(assert_unique_ids(&items).is_err());
    }

    #[test]
    fn test_json_assertions() {
        let output = json!({"items": [{"id": "x"}], "total_count": 1});
        assert!(assert_json_ids(&output, &["x"]).is_ok());
        assert!(assert_json_total(&output, 1).is_ok());
        assert!(assert_json_ids(&json!({}), &[]).is_err());
    }
}
