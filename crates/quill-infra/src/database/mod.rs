//! PostgreSQL persistence via SeaORM.

mod connections;
mod postgres_base;
mod postgres_repo;
mod postgres_roles;

pub mod entity;

pub use connections::connect;
pub use postgres_base::PostgresBaseRepository;
pub use postgres_repo::{
    PostgresApprovalRepository, PostgresArticleRepository, PostgresBookmarkRepository,
    PostgresCommentRepository, PostgresLikeRepository, PostgresReadRepository,
    PostgresTagRepository, PostgresUserRepository,
};
pub use postgres_roles::PostgresRoleStore;

use std::sync::Arc;

use sea_orm::DbConn;

use quill_core::ports::Repositories;

/// Every repository backed by the same connection pool.
pub fn postgres_repositories(db: &DbConn) -> Repositories {
    Repositories {
        articles: Arc::new(PostgresArticleRepository::new(db.clone())),
        approvals: Arc::new(PostgresApprovalRepository::new(db.clone())),
        tags: Arc::new(PostgresTagRepository::new(db.clone())),
        likes: Arc::new(PostgresLikeRepository::new(db.clone())),
        bookmarks: Arc::new(PostgresBookmarkRepository::new(db.clone())),
        reads: Arc::new(PostgresReadRepository::new(db.clone())),
        comments: Arc::new(PostgresCommentRepository::new(db.clone())),
        users: Arc::new(PostgresUserRepository::new(db.clone())),
        roles: Arc::new(PostgresRoleStore::new(db.clone())),
    }
}

#[cfg(test)]
mod tests;
