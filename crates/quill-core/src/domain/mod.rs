//! Domain entities - the core business objects.

mod approval;
mod article;
mod comment;
mod engagement;
mod tag;
mod user;

pub use approval::{ApprovalStatus, ArticleApproval, ReportStatus};
pub use article::Article;
pub use comment::Comment;
pub use engagement::{
    ArticleBookmark, ArticleLike, ArticleRead, Bookmark, Engagement, EngagementKind, Like, Read,
};
pub use tag::ArticleTag;
pub use user::{AppUser, UserRole};

use uuid::Uuid;

/// Implemented by every persisted entity. `KIND` names the entity in errors
/// and log lines.
pub trait Entity {
    const KIND: &'static str;

    fn id(&self) -> Uuid;
}
