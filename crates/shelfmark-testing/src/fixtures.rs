//! Fixtures for deterministic article generation.

use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use shelfmark_types::{Article, ReadingStatus};
use std::path::Path;

/// Fixed reference instant used by every generated article.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Fluent builder for a single article.
#[derive(Debug, Clone)]
pub struct ArticleBuilder {
    article: Article,
}

pub fn article(id: impl Into<String>) -> ArticleBuilder {
    ArticleBuilder::new(id)
}

impl ArticleBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            article: Article::new(id),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.article.title = Some(title.into());
        self
    }

    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.article.excerpt = excerpt.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.article.body = body.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.article.author = Some(author.into());
        self
    }

    /// Attach a tag by id, with a display name that is searchable
    pub fn tag(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.article.tag_ids.insert(id.into());
        self.article.tag_names.push(name.into());
        self
    }

    pub fn status(mut self, status: ReadingStatus) -> Self {
        self.article.status = status;
        self
    }

    pub fn favorite(mut self) -> Self {
        self.article.is_favorite = true;
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.article.created_at = Some(at);
        self
    }

    pub fn created_days_ago(self, days: i64) -> Self {
        self.created_at(base_time() - Duration::days(days))
    }

    pub fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.article.updated_at = Some(at);
        self
    }

    pub fn duration(mut self, minutes: u32) -> Self {
        self.article.duration_estimate = Some(minutes);
        self
    }

    pub fn build(self) -> Article {
        self.article
    }
}

/// `n` varied articles, identical on every call.
///
/// Article `i` has id `article-{i:04}`, is created `i` hours before
/// `base_time()`, carries tag `t{i % 3}` (plus `featured` when `i % 5 == 0`),
/// cycles through reading statuses, is a favorite when `i % 7 == 0`, and has
/// no duration when `i % 11 == 0`.
pub fn sample_articles(n: usize) -> Vec<Article> {
    const STATUSES: [ReadingStatus; 4] = [
        ReadingStatus::Unread,
        ReadingStatus::Reading,
        ReadingStatus::Completed,
        ReadingStatus::Archived,
    ];

    (0..n)
        .map(|i| {
            let tag = format!("t{}", i % 3);
            let mut builder = article(format!("article-{:04}", i))
                .title(format!("Article {}", i))
                .excerpt(format!("Excerpt for article {}", i))
                .author(if i % 2 == 0 { "Ada Lovelace" } else { "Grace Hopper" })
                .tag(tag.clone(), tag.to_uppercase())
                .status(STATUSES[i % STATUSES.len()])
                .created_at(base_time() - Duration::hours(i as i64));

            if i % 5 == 0 {
                builder = builder.tag("featured", "Featured");
            }
            if i % 7 == 0 {
                builder = builder.favorite();
            }
            if i % 11 != 0 {
                builder = builder.duration((i % 60) as u32 + 1);
            }
            builder.build()
        })
        .collect()
}

/// Write `articles` as a pretty JSON array, the format `shelfmark list --data` reads.
pub fn write_articles(path: &Path, articles: &[Article]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(articles)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_articles_are_deterministic() {
        assert_eq!(sample_articles(30), sample_articles(30));
    }

    #[test]
    fn test_sample_article_shape() {
        let articles = sample_articles(12);
        assert_eq!(articles[0].id, "article-0000");
        assert!(articles[0].has_tag("featured"));
        assert!(articles[0].is_favorite);
        assert_eq!(articles[0].duration_estimate, None);
        assert_eq!(articles[4].duration_estimate, Some(5));
        assert_eq!(articles[1].status, ReadingStatus::Reading);
    }
}
