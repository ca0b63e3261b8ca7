//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod identity;
mod repository;

use std::sync::Arc;

use crate::domain::{Bookmark, Like, Read};

pub use identity::{RoleStore, Session};
pub use repository::{
    ApprovalRepository, ArticleRepository, BaseRepository, CommentRepository,
    EngagementRepository, ListingOrder, PublishedFilter, TagRepository, UserRepository,
};

/// Every storage port the services need, bundled for wiring.
#[derive(Clone)]
pub struct Repositories {
    pub articles: Arc<dyn ArticleRepository>,
    pub approvals: Arc<dyn ApprovalRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub likes: Arc<dyn EngagementRepository<Like>>,
    pub bookmarks: Arc<dyn EngagementRepository<Bookmark>>,
    pub reads: Arc<dyn EngagementRepository<Read>>,
    pub comments: Arc<dyn CommentRepository>,
    pub users: Arc<dyn UserRepository>,
    pub roles: Arc<dyn RoleStore>,
}
