//! PostgreSQL role store backed by the `user_roles` table.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use quill_core::domain::UserRole;
use quill_core::error::RepoError;
use quill_core::ports::RoleStore;

use super::entity::user_role::{self, Entity as UserRoleEntity};
use super::postgres_base::map_db_err;

pub struct PostgresRoleStore {
    db: DbConn,
}

impl PostgresRoleStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleStore for PostgresRoleStore {
    async fn roles_for(&self, user_id: Uuid) -> Result<Vec<String>, RepoError> {
        let rows = UserRoleEntity::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .order_by_asc(user_role::Column::Role)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(|row| row.role).collect())
    }

    async fn assign_role(&self, user_id: Uuid, role: UserRole) -> Result<(), RepoError> {
        let existing = UserRoleEntity::find_by_id((user_id, role.as_str().to_string()))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        if existing.is_some() {
            return Ok(());
        }

        user_role::ActiveModel {
            user_id: Set(user_id),
            role: Set(role.as_str().to_string()),
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }
}
