use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Entity;

/// Article entity - a piece of writing owned by its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    /// Unset for articles created without a signed-in author.
    pub author_id: Option<Uuid>,
    pub tag_id: Uuid,
    pub image_url: Option<String>,
    pub read_count: i64,
    /// Estimated reading time, e.g. `"2 mins"`.
    pub read_time: Option<String>,
    pub public_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Create a new, unread article with generated ID and timestamps.
    pub fn new(title: String, text: String, tag_id: Uuid, image_url: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            text,
            author_id: None,
            tag_id,
            image_url,
            read_count: 0,
            read_time: None,
            public_id: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn with_author(mut self, author_id: Uuid) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn with_public_id(mut self, public_id: Option<String>) -> Self {
        self.public_id = public_id;
        self
    }

    pub fn with_read_time(mut self, read_time: String) -> Self {
        self.read_time = Some(read_time);
        self
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Stamp the soft-delete marker and return it.
    pub fn soft_delete(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
        now
    }
}

impl Entity for Article {
    const KIND: &'static str = "Article";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_article_is_unread_and_live() {
        let article = Article::new("T1".into(), "body".into(), Uuid::new_v4(), None);
        assert_eq!(article.read_count, 0);
        assert!(!article.is_deleted());
        assert!(article.author_id.is_none());
    }

    #[test]
    fn soft_delete_keeps_the_row_but_marks_it() {
        let mut article = Article::new("T1".into(), "body".into(), Uuid::new_v4(), None);
        let stamp = article.soft_delete();
        assert_eq!(article.deleted_at, Some(stamp));
        assert!(article.is_deleted());
    }
}
