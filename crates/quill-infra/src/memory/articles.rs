use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use quill_core::domain::{ApprovalStatus, Article, ArticleApproval};
use quill_core::error::RepoError;
use quill_core::pagination::{PageRequest, paginate};
use quill_core::ports::{ArticleRepository, BaseRepository, PublishedFilter};
use quill_shared::PageResponse;

use super::InMemoryRepository;

/// Article store that can see the approval rows, so the published listing
/// is answered in one place the way the SQL join does it.
pub struct InMemoryArticleRepository {
    rows: InMemoryRepository<Article>,
    approvals: Arc<InMemoryRepository<ArticleApproval>>,
}

impl InMemoryArticleRepository {
    pub fn new(approvals: Arc<InMemoryRepository<ArticleApproval>>) -> Self {
        Self {
            rows: InMemoryRepository::new(),
            approvals,
        }
    }
}

#[async_trait]
impl BaseRepository<Article, Uuid> for InMemoryArticleRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, RepoError> {
        self.rows.find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<Article>, RepoError> {
        self.rows.find_all().await
    }

    async fn add(&self, entity: Article) -> Result<Article, RepoError> {
        self.rows.add(entity).await
    }

    async fn update(&self, entity: Article) -> Result<Article, RepoError> {
        self.rows.update(entity).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.rows.delete(id).await
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Article>, RepoError> {
        Ok(self.rows.select(|a| a.author_id == Some(author_id)).await)
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RepoError> {
        Ok(self.rows.count(|a| a.author_id == Some(author_id)).await)
    }

    async fn increment_read_count(&self, id: Uuid) -> Result<i64, RepoError> {
        self.rows
            .modify(id, |article| {
                article.read_count = article.read_count.saturating_add(1);
                article.updated_at = Utc::now();
                article.read_count
            })
            .await
    }

    async fn find_published(
        &self,
        filter: &PublishedFilter,
        page: PageRequest,
    ) -> Result<PageResponse<Article>, RepoError> {
        let published: HashSet<Uuid> = self
            .approvals
            .select(|a| a.status == ApprovalStatus::Published)
            .await
            .into_iter()
            .map(|a| a.article_id)
            .collect();

        let mut articles = self
            .rows
            .select(|a| published.contains(&a.id) && filter.matches(a))
            .await;
        filter.sort(&mut articles);

        Ok(paginate(articles, page))
    }
}

#[cfg(test)]
mod tests {
    use quill_core::ports::ListingOrder;

    use super::*;

    async fn published(repo: &InMemoryArticleRepository, title: &str) -> Article {
        let article = repo
            .add(Article::new(title.into(), "body".into(), Uuid::new_v4(), None))
            .await
            .unwrap();
        repo.approvals
            .add(ArticleApproval::new(article.id, ApprovalStatus::Published))
            .await
            .unwrap();
        article
    }

    #[tokio::test]
    async fn increment_changes_only_the_counter() {
        let repo = InMemoryArticleRepository::new(Arc::new(InMemoryRepository::new()));
        let mut article = published(&repo, "T1").await;

        // A change made after this copy was loaded must survive the increment.
        article.title = "Renamed".into();
        repo.update(article.clone()).await.unwrap();

        assert_eq!(repo.increment_read_count(article.id).await.unwrap(), 1);
        assert_eq!(repo.increment_read_count(article.id).await.unwrap(), 2);
        let stored = repo.find_by_id(article.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Renamed");
        assert_eq!(stored.read_count, 2);

        assert!(matches!(
            repo.increment_read_count(Uuid::new_v4()).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn published_listing_skips_unpublished_and_deleted() {
        let approvals = Arc::new(InMemoryRepository::new());
        let repo = InMemoryArticleRepository::new(approvals.clone());
        let live = published(&repo, "Live").await;
        let mut hidden = published(&repo, "Hidden").await;
        hidden.soft_delete();
        repo.update(hidden).await.unwrap();
        let draft = repo
            .add(Article::new("Draft".into(), "body".into(), Uuid::new_v4(), None))
            .await
            .unwrap();
        approvals.add(ArticleApproval::pending(draft.id)).await.unwrap();

        let page = repo
            .find_published(&PublishedFilter::default(), PageRequest { page: 1, size: 10 })
            .await
            .unwrap();

        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].id, live.id);
    }

    #[tokio::test]
    async fn equal_creation_times_page_deterministically() {
        let repo = InMemoryArticleRepository::new(Arc::new(InMemoryRepository::new()));
        let stamp = Utc::now();
        for n in 0..5 {
            let mut article = published(&repo, &format!("A{n}")).await;
            article.created_at = stamp;
            repo.update(article).await.unwrap();
        }
        let filter = PublishedFilter {
            order: ListingOrder::RecentlyAdded,
            ..Default::default()
        };

        let mut seen = Vec::new();
        for page in 1..=3 {
            let result = repo
                .find_published(&filter, PageRequest { page, size: 2 })
                .await
                .unwrap();
            seen.extend(result.items.into_iter().map(|a| a.id));
        }

        let mut expected = seen.clone();
        expected.sort_by(|a, b| b.cmp(a));
        assert_eq!(seen, expected);
    }
}
