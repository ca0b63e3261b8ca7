//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, PrimaryKeyTrait, QueryFilter, QueryOrder, Select,
};
use uuid::Uuid;

use quill_core::domain::{
    AppUser, ApprovalStatus, Article, ArticleApproval, ArticleTag, Comment, Engagement,
    EngagementKind,
};
use quill_core::error::RepoError;
use quill_core::pagination::PageRequest;
use quill_core::ports::{
    ApprovalRepository, ArticleRepository, CommentRepository, EngagementRepository,
    ListingOrder, PublishedFilter, TagRepository, UserRepository,
};
use quill_shared::PageResponse;

use super::entity::EngagementColumns;
use super::entity::app_user::{self, Entity as AppUserEntity};
use super::entity::article::{self, Entity as ArticleEntity};
use super::entity::article_approval::{self, Entity as ApprovalEntity};
use super::entity::article_bookmark::Entity as BookmarkEntity;
use super::entity::article_like::Entity as LikeEntity;
use super::entity::article_read::Entity as ReadEntity;
use super::entity::article_tag::{self, Entity as TagEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL article repository.
pub type PostgresArticleRepository = PostgresBaseRepository<ArticleEntity>;

/// PostgreSQL approval repository.
pub type PostgresApprovalRepository = PostgresBaseRepository<ApprovalEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

/// PostgreSQL like repository.
pub type PostgresLikeRepository = PostgresBaseRepository<LikeEntity>;

/// PostgreSQL bookmark repository.
pub type PostgresBookmarkRepository = PostgresBaseRepository<BookmarkEntity>;

/// PostgreSQL read-event repository.
pub type PostgresReadRepository = PostgresBaseRepository<ReadEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<AppUserEntity>;

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Article>, RepoError> {
        let rows = ArticleEntity::find()
            .filter(article::Column::AuthorId.eq(author_id))
            .order_by_asc(article::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RepoError> {
        ArticleEntity::find()
            .filter(article::Column::AuthorId.eq(author_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn increment_read_count(&self, id: Uuid) -> Result<i64, RepoError> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let rows = ArticleEntity::update_many()
            .col_expr(
                article::Column::ReadCount,
                Expr::col(article::Column::ReadCount).add(1),
            )
            .col_expr(article::Column::UpdatedAt, Expr::value(now))
            .filter(article::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        rows.into_iter()
            .next()
            .map(|row| row.read_count)
            .ok_or(RepoError::NotFound)
    }

    async fn find_published(
        &self,
        filter: &PublishedFilter,
        page: PageRequest,
    ) -> Result<PageResponse<Article>, RepoError> {
        let paginator = published_query(filter).paginate(&self.db, page.size);
        let total_count = paginator.num_items().await.map_err(map_db_err)?;
        let rows = paginator
            .fetch_page(page.page.saturating_sub(1))
            .await
            .map_err(map_db_err)?;

        Ok(page.respond(rows.into_iter().map(Into::into).collect(), total_count))
    }
}

/// Published, live articles joined to their approval, filtered and ordered.
fn published_query(filter: &PublishedFilter) -> Select<ArticleEntity> {
    let mut query = ArticleEntity::find()
        .inner_join(ApprovalEntity)
        .filter(article_approval::Column::Status.eq(ApprovalStatus::Published.code()))
        .filter(article::Column::DeletedAt.is_null());

    if let Some(author_id) = filter.author_id {
        query = query.filter(article::Column::AuthorId.eq(author_id));
    }
    if let Some(tag_id) = filter.tag_id {
        query = query.filter(article::Column::TagId.eq(tag_id));
    }

    match filter.order {
        ListingOrder::Created => query
            .order_by_asc(article::Column::CreatedAt)
            .order_by_asc(article::Column::Id),
        ListingOrder::RecentlyAdded => query
            .order_by_desc(article::Column::CreatedAt)
            .order_by_desc(article::Column::Id),
        ListingOrder::TopRead => query
            .order_by_desc(article::Column::ReadCount)
            .order_by_asc(article::Column::CreatedAt)
            .order_by_asc(article::Column::Id),
    }
}

#[async_trait]
impl ApprovalRepository for PostgresApprovalRepository {
    async fn find_by_article(
        &self,
        article_id: Uuid,
    ) -> Result<Option<ArticleApproval>, RepoError> {
        let row = ApprovalEntity::find()
            .filter(article_approval::Column::ArticleId.eq(article_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Into::into))
    }

    async fn find_by_status(
        &self,
        status: ApprovalStatus,
    ) -> Result<Vec<ArticleApproval>, RepoError> {
        let filter = match status {
            // Unknown codes read back as Declined, so they belong here too.
            ApprovalStatus::Declined => article_approval::Column::Status.is_not_in([
                ApprovalStatus::Pending.code(),
                ApprovalStatus::Published.code(),
            ]),
            other => article_approval::Column::Status.eq(other.code()),
        };

        let rows = ApprovalEntity::find()
            .filter(filter)
            .order_by_asc(article_approval::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<ArticleTag>, RepoError> {
        let row = TagEntity::find()
            .filter(article_tag::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Into::into))
    }
}

#[async_trait]
impl<E, K> EngagementRepository<K> for PostgresBaseRepository<E>
where
    K: EngagementKind,
    E: EngagementColumns,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = Uuid>,
    Engagement<K>: From<E::Model> + Into<E::ActiveModel>,
{
    async fn find_by_article(&self, article_id: Uuid) -> Result<Vec<Engagement<K>>, RepoError> {
        let rows = E::find()
            .filter(E::article_id_column().eq(article_id))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Engagement<K>>, RepoError> {
        let rows = E::find()
            .filter(E::user_id_column().eq(user_id))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn exists(&self, user_id: Uuid, article_id: Uuid) -> Result<bool, RepoError> {
        let count = E::find()
            .filter(E::user_id_column().eq(user_id))
            .filter(E::article_id_column().eq(article_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(count > 0)
    }

    async fn delete_by_article(&self, article_id: Uuid) -> Result<u64, RepoError> {
        let result = E::delete_many()
            .filter(E::article_id_column().eq(article_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_article(&self, article_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let rows = CommentEntity::find()
            .filter(comment::Column::ArticleId.eq(article_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_by_article(&self, article_id: Uuid) -> Result<u64, RepoError> {
        let result = CommentEntity::delete_many()
            .filter(comment::Column::ArticleId.eq(article_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<AppUser>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = AppUserEntity::find()
            .filter(app_user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

/// Keep the first character of the local part, e.g. `a***@example.com`.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
            _ => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod mask_tests {
    use super::mask_email;

    #[test]
    fn masks_local_part() {
        assert_eq!(mask_email("ada@example.com"), "a***@example.com");
        assert_eq!(mask_email("a@example.com"), "***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
