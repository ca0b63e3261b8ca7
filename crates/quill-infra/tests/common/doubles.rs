//! Storage doubles that misbehave in one specific way.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use quill_core::domain::{
    ApprovalStatus, Article, ArticleApproval, ArticleBookmark, Bookmark, Engagement,
};
use quill_core::error::RepoError;
use quill_core::pagination::PageRequest;
use quill_core::ports::{
    ApprovalRepository, ArticleRepository, BaseRepository, EngagementRepository, PublishedFilter,
};
use quill_infra::InMemoryRepository;
use quill_shared::PageResponse;

/// Bookmarks whose existence check soft-deletes the article first, standing
/// in for an editor acting while a read is in flight.
pub struct SoftDeleteDuringLookup {
    inner: InMemoryRepository<ArticleBookmark>,
    articles: Arc<dyn ArticleRepository>,
}

impl SoftDeleteDuringLookup {
    pub fn new(articles: Arc<dyn ArticleRepository>) -> Self {
        Self {
            inner: InMemoryRepository::new(),
            articles,
        }
    }
}

#[async_trait]
impl BaseRepository<ArticleBookmark, Uuid> for SoftDeleteDuringLookup {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ArticleBookmark>, RepoError> {
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<ArticleBookmark>, RepoError> {
        self.inner.find_all().await
    }

    async fn add(&self, entity: ArticleBookmark) -> Result<ArticleBookmark, RepoError> {
        self.inner.add(entity).await
    }

    async fn update(&self, entity: ArticleBookmark) -> Result<ArticleBookmark, RepoError> {
        self.inner.update(entity).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.inner.delete(id).await
    }
}

#[async_trait]
impl EngagementRepository<Bookmark> for SoftDeleteDuringLookup {
    async fn find_by_article(&self, article_id: Uuid) -> Result<Vec<Engagement<Bookmark>>, RepoError> {
        self.inner.find_by_article(article_id).await
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Engagement<Bookmark>>, RepoError> {
        self.inner.find_by_user(user_id).await
    }

    async fn exists(&self, user_id: Uuid, article_id: Uuid) -> Result<bool, RepoError> {
        if let Some(mut article) = self.articles.find_by_id(article_id).await? {
            article.soft_delete();
            self.articles.update(article).await?;
        }
        self.inner.exists(user_id, article_id).await
    }

    async fn delete_by_article(&self, article_id: Uuid) -> Result<u64, RepoError> {
        self.inner.delete_by_article(article_id).await
    }
}

/// Approval store that is down for writes.
pub struct UnavailableApprovals;

fn unavailable() -> RepoError {
    RepoError::Connection("approval store unavailable".into())
}

#[async_trait]
impl BaseRepository<ArticleApproval, Uuid> for UnavailableApprovals {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<ArticleApproval>, RepoError> {
        Ok(None)
    }

    async fn find_all(&self) -> Result<Vec<ArticleApproval>, RepoError> {
        Ok(Vec::new())
    }

    async fn add(&self, _entity: ArticleApproval) -> Result<ArticleApproval, RepoError> {
        Err(unavailable())
    }

    async fn update(&self, _entity: ArticleApproval) -> Result<ArticleApproval, RepoError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
        Err(unavailable())
    }
}

#[async_trait]
impl ApprovalRepository for UnavailableApprovals {
    async fn find_by_article(
        &self,
        _article_id: Uuid,
    ) -> Result<Option<ArticleApproval>, RepoError> {
        Ok(None)
    }

    async fn find_by_status(
        &self,
        _status: ApprovalStatus,
    ) -> Result<Vec<ArticleApproval>, RepoError> {
        Ok(Vec::new())
    }
}

/// Article store that refuses to delete rows.
pub struct UndeletableArticles {
    inner: Arc<dyn ArticleRepository>,
}

impl UndeletableArticles {
    pub fn new(inner: Arc<dyn ArticleRepository>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl BaseRepository<Article, Uuid> for UndeletableArticles {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, RepoError> {
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<Article>, RepoError> {
        self.inner.find_all().await
    }

    async fn add(&self, entity: Article) -> Result<Article, RepoError> {
        self.inner.add(entity).await
    }

    async fn update(&self, entity: Article) -> Result<Article, RepoError> {
        self.inner.update(entity).await
    }

    async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
        Err(RepoError::Query("delete refused".into()))
    }
}

#[async_trait]
impl ArticleRepository for UndeletableArticles {
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Article>, RepoError> {
        self.inner.find_by_author(author_id).await
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RepoError> {
        self.inner.count_by_author(author_id).await
    }

    async fn increment_read_count(&self, id: Uuid) -> Result<i64, RepoError> {
        self.inner.increment_read_count(id).await
    }

    async fn find_published(
        &self,
        filter: &PublishedFilter,
        page: PageRequest,
    ) -> Result<PageResponse<Article>, RepoError> {
        self.inner.find_published(filter, page).await
    }
}
