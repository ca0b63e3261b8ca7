use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{
    AppUser, ApprovalStatus, ArticleApproval, ArticleTag, Comment, Engagement, EngagementKind,
    Entity,
};
use quill_core::error::RepoError;
use quill_core::ports::{
    ApprovalRepository, BaseRepository, CommentRepository, EngagementRepository, TagRepository,
    UserRepository,
};

/// Vector-backed repository. Insertion order is storage order.
pub struct InMemoryRepository<T> {
    rows: RwLock<Vec<T>>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InMemoryRepository<T>
where
    T: Clone + Send + Sync,
{
    pub(super) async fn select(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let rows = self.rows.read().await;
        rows.iter().filter(|row| predicate(row)).cloned().collect()
    }

    pub(super) async fn count(&self, predicate: impl Fn(&T) -> bool) -> u64 {
        let rows = self.rows.read().await;
        rows.iter().filter(|row| predicate(row)).count() as u64
    }

    async fn remove_where(&self, predicate: impl Fn(&T) -> bool) -> u64 {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| !predicate(row));
        (before - rows.len()) as u64
    }
}

impl<T> InMemoryRepository<T>
where
    T: Entity + Clone + Send + Sync,
{
    /// Change one row in place while holding the write lock.
    pub(super) async fn modify<R>(
        &self,
        id: Uuid,
        change: impl FnOnce(&mut T) -> R,
    ) -> Result<R, RepoError> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or(RepoError::NotFound)?;
        Ok(change(row))
    }
}

#[async_trait]
impl<T> BaseRepository<T, Uuid> for InMemoryRepository<T>
where
    T: Entity + Clone + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| row.id() == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        Ok(self.rows.read().await.clone())
    }

    async fn add(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|row| row.id() == entity.id()) {
            return Err(RepoError::Constraint(format!(
                "{} {} already exists",
                T::KIND,
                entity.id()
            )));
        }
        rows.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;
        let slot = rows
            .iter_mut()
            .find(|row| row.id() == entity.id())
            .ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        let position = rows
            .iter()
            .position(|row| row.id() == id)
            .ok_or(RepoError::NotFound)?;
        rows.remove(position);
        Ok(())
    }
}

#[async_trait]
impl ApprovalRepository for InMemoryRepository<ArticleApproval> {
    async fn find_by_article(
        &self,
        article_id: Uuid,
    ) -> Result<Option<ArticleApproval>, RepoError> {
        Ok(self
            .select(|a| a.article_id == article_id)
            .await
            .into_iter()
            .next())
    }

    async fn find_by_status(
        &self,
        status: ApprovalStatus,
    ) -> Result<Vec<ArticleApproval>, RepoError> {
        Ok(self.select(|a| a.status == status).await)
    }
}

#[async_trait]
impl TagRepository for InMemoryRepository<ArticleTag> {
    async fn find_by_name(&self, name: &str) -> Result<Option<ArticleTag>, RepoError> {
        Ok(self.select(|t| t.name == name).await.into_iter().next())
    }
}

#[async_trait]
impl<K: EngagementKind> EngagementRepository<K> for InMemoryRepository<Engagement<K>> {
    async fn find_by_article(&self, article_id: Uuid) -> Result<Vec<Engagement<K>>, RepoError> {
        Ok(self.select(|e| e.article_id == article_id).await)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Engagement<K>>, RepoError> {
        Ok(self.select(|e| e.user_id == user_id).await)
    }

    async fn exists(&self, user_id: Uuid, article_id: Uuid) -> Result<bool, RepoError> {
        Ok(self.count(|e| e.matches(user_id, article_id)).await > 0)
    }

    async fn delete_by_article(&self, article_id: Uuid) -> Result<u64, RepoError> {
        Ok(self.remove_where(|e| e.article_id == article_id).await)
    }
}

#[async_trait]
impl CommentRepository for InMemoryRepository<Comment> {
    async fn find_by_article(&self, article_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        Ok(self.select(|c| c.article_id == article_id).await)
    }

    async fn delete_by_article(&self, article_id: Uuid) -> Result<u64, RepoError> {
        Ok(self.remove_where(|c| c.article_id == article_id).await)
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository<AppUser> {
    async fn find_by_email(&self, email: &str) -> Result<Option<AppUser>, RepoError> {
        Ok(self.select(|u| u.email == email).await.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::domain::{ArticleLike, Like};

    #[tokio::test]
    async fn add_then_find() {
        let repo = InMemoryRepository::<ArticleTag>::new();
        let tag = repo.add(ArticleTag::new("Go".into())).await.unwrap();
        assert_eq!(repo.find_by_id(tag.id).await.unwrap(), Some(tag.clone()));
        assert_eq!(repo.find_by_name("Go").await.unwrap(), Some(tag));
    }

    #[tokio::test]
    async fn duplicate_id_is_a_constraint_violation() {
        let repo = InMemoryRepository::<ArticleTag>::new();
        let tag = repo.add(ArticleTag::new("Go".into())).await.unwrap();
        let err = repo.add(tag).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_rows_fail() {
        let repo = InMemoryRepository::<ArticleTag>::new();
        let tag = ArticleTag::new("Go".into());
        assert!(matches!(repo.update(tag.clone()).await, Err(RepoError::NotFound)));
        assert!(matches!(repo.delete(tag.id).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn find_all_keeps_insertion_order() {
        let repo = InMemoryRepository::<ArticleTag>::new();
        for name in ["b", "a", "c"] {
            repo.add(ArticleTag::new(name.into())).await.unwrap();
        }
        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn engagement_lookups() {
        let repo = InMemoryRepository::<ArticleLike>::new();
        let (user, article, other) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        repo.add(ArticleLike::new(user, article)).await.unwrap();
        repo.add(ArticleLike::new(user, other)).await.unwrap();

        assert!(EngagementRepository::<Like>::exists(&repo, user, article).await.unwrap());
        assert_eq!(repo.find_by_user(user).await.unwrap().len(), 2);
        assert_eq!(repo.delete_by_article(article).await.unwrap(), 1);
        assert!(!repo.exists(user, article).await.unwrap());
    }
}
