//! Article entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub author_id: Option<Uuid>,
    pub tag_id: Uuid,
    pub image_url: Option<String>,
    pub read_count: i64,
    pub read_time: Option<String>,
    pub public_id: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::app_user::Entity",
        from = "Column::AuthorId",
        to = "super::app_user::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Author,
    #[sea_orm(
        belongs_to = "super::article_tag::Entity",
        from = "Column::TagId",
        to = "super::article_tag::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Tag,
    #[sea_orm(has_one = "super::article_approval::Entity")]
    Approval,
}

impl Related<super::app_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::article_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tag.def()
    }
}

impl Related<super::article_approval::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Approval.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Article.
impl From<Model> for quill_core::domain::Article {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            text: model.text,
            author_id: model.author_id,
            tag_id: model.tag_id,
            image_url: model.image_url,
            read_count: model.read_count,
            read_time: model.read_time,
            public_id: model.public_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            deleted_at: model.deleted_at.map(Into::into),
        }
    }
}

/// Conversion from Domain Article to SeaORM ActiveModel.
impl From<quill_core::domain::Article> for ActiveModel {
    fn from(article: quill_core::domain::Article) -> Self {
        Self {
            id: Set(article.id),
            title: Set(article.title),
            text: Set(article.text),
            author_id: Set(article.author_id),
            tag_id: Set(article.tag_id),
            image_url: Set(article.image_url),
            read_count: Set(article.read_count),
            read_time: Set(article.read_time),
            public_id: Set(article.public_id),
            created_at: Set(article.created_at.into()),
            updated_at: Set(article.updated_at.into()),
            deleted_at: Set(article.deleted_at.map(Into::into)),
        }
    }
}
