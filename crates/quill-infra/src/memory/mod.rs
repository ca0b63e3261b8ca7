//! In-memory storage - used for tests and when no database is configured.
//! Data is lost on process restart.

mod articles;
mod repository;
mod roles;

pub use articles::InMemoryArticleRepository;
pub use repository::InMemoryRepository;
pub use roles::InMemoryRoleStore;

use std::sync::Arc;

use quill_core::domain::{
    AppUser, ArticleApproval, ArticleBookmark, ArticleLike, ArticleRead, ArticleTag,
    Comment,
};
use quill_core::ports::Repositories;

/// A fresh, empty set of in-memory repositories.
pub fn in_memory_repositories() -> Repositories {
    let approvals = Arc::new(InMemoryRepository::<ArticleApproval>::new());
    Repositories {
        articles: Arc::new(InMemoryArticleRepository::new(approvals.clone())),
        approvals,
        tags: Arc::new(InMemoryRepository::<ArticleTag>::new()),
        likes: Arc::new(InMemoryRepository::<ArticleLike>::new()),
        bookmarks: Arc::new(InMemoryRepository::<ArticleBookmark>::new()),
        reads: Arc::new(InMemoryRepository::<ArticleRead>::new()),
        comments: Arc::new(InMemoryRepository::<Comment>::new()),
        users: Arc::new(InMemoryRepository::<AppUser>::new()),
        roles: Arc::new(InMemoryRoleStore::new()),
    }
}
