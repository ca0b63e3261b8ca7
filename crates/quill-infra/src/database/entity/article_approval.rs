//! Article approval entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::ApprovalStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "article_approvals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub article_id: Uuid,
    /// 1 = Pending, 2 = Published, anything else = Declined.
    pub status: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
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
}

impl Related<super::article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Article.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for quill_core::domain::ArticleApproval {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            article_id: model.article_id,
            status: ApprovalStatus::from_code(model.status),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<quill_core::domain::ArticleApproval> for ActiveModel {
    fn from(approval: quill_core::domain::ArticleApproval) -> Self {
        Self {
            id: Set(approval.id),
            article_id: Set(approval.article_id),
            status: Set(approval.status.code()),
            created_at: Set(approval.created_at.into()),
            updated_at: Set(approval.updated_at.into()),
        }
    }
}
