use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reading progress of a single article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    Unread,
    Reading,
    Completed,
    Archived,
}

impl ReadingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingStatus::Unread => "unread",
            ReadingStatus::Reading => "reading",
            ReadingStatus::Completed => "completed",
            ReadingStatus::Archived => "archived",
        }
    }
}

impl Default for ReadingStatus {
    fn default() -> Self {
        Self::Unread
    }
}

/// A saved article as materialized in memory from one fetched page.
///
/// Optional fields model records the backend returns without that
/// attribute: a missing `created_at` fails any date bound and a missing
/// sort key orders the record after all others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Unique record identifier (dedup key across pages)
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub excerpt: String,

    #[serde(default)]
    pub body: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Ids of the tags attached to this article
    #[serde(default)]
    pub tag_ids: BTreeSet<String>,

    /// Display names of the attached tags (searchable)
    #[serde(default)]
    pub tag_names: Vec<String>,

    #[serde(default)]
    pub status: ReadingStatus,

    #[serde(default)]
    pub is_favorite: bool,

    /// Record timestamp used for date-range filtering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Estimated reading time in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_estimate: Option<u32>,
}

impl Article {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            excerpt: String::new(),
            body: String::new(),
            author: None,
            tag_ids: BTreeSet::new(),
            tag_names: Vec::new(),
            status: ReadingStatus::default(),
            is_favorite: false,
            created_at: None,
            updated_at: None,
            duration_estimate: None,
        }
    }

    /// Text fields searched by a free-text query, in evaluation order.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        self.title
            .as_deref()
            .into_iter()
            .chain([self.excerpt.as_str(), self.body.as_str()])
            .chain(self.author.as_deref())
            .chain(self.tag_names.iter().map(String::as_str))
    }

    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tag_ids.contains(tag_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_article_deserializes_with_defaults() {
        let article: Article = serde_json::from_str(r#"{"id": "a1"}"#).unwrap();

        assert_eq!(article.id, "a1");
        assert_eq!(article.status, ReadingStatus::Unread);
        assert!(article.tag_ids.is_empty());
        assert!(article.created_at.is_none());
    }

    #[test]
    fn test_searchable_fields_skip_missing_title_and_author() {
        let mut article = Article::new("a1");
        article.excerpt = "excerpt".to_string();
        article.tag_names = vec!["rust".to_string()];

        let fields: Vec<&str> = article.searchable_fields().collect();
        assert_eq!(fields, vec!["excerpt", "", "rust"]);
    }
}
