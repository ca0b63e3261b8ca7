use async_trait::async_trait;
use uuid::Uuid;

use quill_shared::PageResponse;

use crate::domain::{
    AppUser, ApprovalStatus, Article, ArticleApproval, ArticleTag, Comment, Engagement,
    EngagementKind,
};
use crate::error::RepoError;
use crate::pagination::PageRequest;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Every stored entity, in a stable order.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Insert a new entity.
    async fn add(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Fails with `NotFound` if it is missing.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Article repository.
#[async_trait]
pub trait ArticleRepository: BaseRepository<Article, Uuid> {
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Article>, RepoError>;

    /// Number of articles (soft-deleted included) written by an author.
    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RepoError>;

    /// Add one to the read counter in place and return the new value.
    async fn increment_read_count(&self, id: Uuid) -> Result<i64, RepoError>;

    /// One page of Published, non-deleted articles.
    async fn find_published(
        &self,
        filter: &PublishedFilter,
        page: PageRequest,
    ) -> Result<PageResponse<Article>, RepoError>;
}

/// Ordering of the published listing. Ties fall back to creation time, then id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListingOrder {
    /// Oldest first.
    #[default]
    Created,
    /// Newest first.
    RecentlyAdded,
    /// Most read first.
    TopRead,
}

/// Narrowing applied by [`ArticleRepository::find_published`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishedFilter {
    pub author_id: Option<Uuid>,
    pub tag_id: Option<Uuid>,
    pub order: ListingOrder,
}

impl PublishedFilter {
    pub fn matches(&self, article: &Article) -> bool {
        !article.is_deleted()
            && self.author_id.is_none_or(|author| article.author_id == Some(author))
            && self.tag_id.is_none_or(|tag| article.tag_id == tag)
    }

    /// Sort in listing order. Deterministic for equal keys.
    pub fn sort(&self, articles: &mut [Article]) {
        match self.order {
            ListingOrder::Created => articles.sort_by(|a, b| {
                a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id))
            }),
            ListingOrder::RecentlyAdded => articles.sort_by(|a, b| {
                b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
            }),
            ListingOrder::TopRead => articles.sort_by(|a, b| {
                b.read_count
                    .cmp(&a.read_count)
                    .then(a.created_at.cmp(&b.created_at))
                    .then(a.id.cmp(&b.id))
            }),
        }
    }
}

/// Approval repository. At most one approval exists per article.
#[async_trait]
pub trait ApprovalRepository: BaseRepository<ArticleApproval, Uuid> {
    async fn find_by_article(&self, article_id: Uuid)
    -> Result<Option<ArticleApproval>, RepoError>;

    async fn find_by_status(
        &self,
        status: ApprovalStatus,
    ) -> Result<Vec<ArticleApproval>, RepoError>;
}

/// Tag repository.
#[async_trait]
pub trait TagRepository: BaseRepository<ArticleTag, Uuid> {
    async fn find_by_name(&self, name: &str) -> Result<Option<ArticleTag>, RepoError>;
}

/// Repository over one of the like/bookmark/read join tables.
#[async_trait]
pub trait EngagementRepository<K: EngagementKind>: BaseRepository<Engagement<K>, Uuid> {
    async fn find_by_article(&self, article_id: Uuid) -> Result<Vec<Engagement<K>>, RepoError>;

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Engagement<K>>, RepoError>;

    async fn exists(&self, user_id: Uuid, article_id: Uuid) -> Result<bool, RepoError>;

    /// Remove every record pointing at an article, returning how many went.
    async fn delete_by_article(&self, article_id: Uuid) -> Result<u64, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    async fn find_by_article(&self, article_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    async fn delete_by_article(&self, article_id: Uuid) -> Result<u64, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<AppUser, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<AppUser>, RepoError>;
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn article(minutes_ago: i64, reads: i64) -> Article {
        let mut article = Article::new("T".into(), "body".into(), Uuid::new_v4(), None);
        article.created_at = Utc::now() - Duration::minutes(minutes_ago);
        article.read_count = reads;
        article
    }

    #[test]
    fn top_read_falls_back_to_creation_time() {
        let older = article(20, 3);
        let newer = article(10, 3);
        let busiest = article(5, 9);
        let mut rows = vec![newer.clone(), older.clone(), busiest.clone()];

        PublishedFilter {
            order: ListingOrder::TopRead,
            ..Default::default()
        }
        .sort(&mut rows);

        let ids: Vec<Uuid> = rows.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![busiest.id, older.id, newer.id]);
    }

    #[test]
    fn filter_drops_deleted_and_other_authors() {
        let author = Uuid::new_v4();
        let mut mine = article(1, 0);
        mine.author_id = Some(author);
        let mut removed = mine.clone();
        removed.soft_delete();
        let theirs = article(1, 0);

        let filter = PublishedFilter {
            author_id: Some(author),
            ..Default::default()
        };

        assert!(filter.matches(&mine));
        assert!(!filter.matches(&removed));
        assert!(!filter.matches(&theirs));
    }
}
