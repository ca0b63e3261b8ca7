//! App user entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "app_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone_number: Option<String>,
    pub image_url: Option<String>,
    pub squad: Option<String>,
    pub stack: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::article::Entity")]
    Article,
    #[sea_orm(has_many = "super::user_role::Entity")]
    UserRole,
}

impl Related<super::article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Article.def()
    }
}

impl Related<super::user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRole.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain AppUser.
impl From<Model> for quill_core::domain::AppUser {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone_number: model.phone_number,
            image_url: model.image_url,
            squad: model.squad,
            stack: model.stack,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            deleted_at: model.deleted_at.map(Into::into),
        }
    }
}

/// Conversion from Domain AppUser to SeaORM ActiveModel.
impl From<quill_core::domain::AppUser> for ActiveModel {
    fn from(user: quill_core::domain::AppUser) -> Self {
        Self {
            id: Set(user.id),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            email: Set(user.email),
            phone_number: Set(user.phone_number),
            image_url: Set(user.image_url),
            squad: Set(user.squad),
            stack: Set(user.stack),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
            deleted_at: Set(user.deleted_at.map(Into::into)),
        }
    }
}
