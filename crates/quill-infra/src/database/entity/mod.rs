//! SeaORM entity models and their conversions to and from domain types.

pub mod app_user;
pub mod article;
pub mod article_approval;
pub mod article_bookmark;
pub mod article_like;
pub mod article_read;
pub mod article_tag;
pub mod comment;
pub mod user_role;

use sea_orm::EntityTrait;

/// Columns shared by the like/bookmark/read join tables.
pub trait EngagementColumns: EntityTrait {
    fn user_id_column() -> Self::Column;
    fn article_id_column() -> Self::Column;
}
