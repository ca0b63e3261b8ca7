//! Article bookmark entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::{Engagement, Bookmark};

use super::EngagementColumns;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "article_bookmarks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub article_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::article::Entity",
        from = "Column::ArticleId",
        to = "super::article::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Article,
    #[sea_orm(
        belongs_to = "super::app_user::Entity",
        from = "Column::UserId",
        to = "super::app_user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Article.def()
    }
}

impl Related<super::app_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl EngagementColumns for Entity {
    fn user_id_column() -> Column {
        Column::UserId
    }

    fn article_id_column() -> Column {
        Column::ArticleId
    }
}

impl From<Model> for Engagement<Bookmark> {
    fn from(model: Model) -> Self {
        Engagement::from_parts(
            model.id,
            model.user_id,
            model.article_id,
            model.created_at.into(),
        )
    }
}

impl From<Engagement<Bookmark>> for ActiveModel {
    fn from(record: Engagement<Bookmark>) -> Self {
        Self {
            id: Set(record.id),
            user_id: Set(record.user_id),
            article_id: Set(record.article_id),
            created_at: Set(record.created_at.into()),
        }
    }
}
