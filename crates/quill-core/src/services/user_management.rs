use chrono::Utc;
use uuid::Uuid;

use quill_shared::dto::{AppUserDto, ArticleSummary, SoftDeleted, UpdateUserRequest};

use super::projection::{Lookup, distinct_ids};
use crate::domain::{AppUser, UserRole};
use crate::error::DomainError;
use crate::ports::Repositories;

/// User profile CRUD, soft delete, roles and read history.
///
/// Absence is reported with `None` on lookups and soft delete, unlike the
/// article operations which fail with `NotFound`.
pub struct UserManagementService {
    repos: Repositories,
}

impl UserManagementService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// Every user that is not soft-deleted, with their role names.
    pub async fn get_all_users(&self) -> Result<Vec<AppUserDto>, DomainError> {
        let users = self.repos.users.find_all().await?;

        let mut dtos = Vec::with_capacity(users.len());
        for user in users.into_iter().filter(|u| !u.is_deleted()) {
            let roles = self.repos.roles.roles_for(user.id).await?;
            dtos.push(to_dto(user, roles));
        }
        Ok(dtos)
    }

    pub async fn get_user_by_id(&self, id: Uuid) -> Result<Option<AppUserDto>, DomainError> {
        let Some(user) = self.live_user(id).await? else {
            return Ok(None);
        };
        let roles = self.repos.roles.roles_for(user.id).await?;
        Ok(Some(to_dto(user, roles)))
    }

    /// Stamp the deletion marker. `None` when the user is missing or
    /// already deleted.
    pub async fn soft_delete_user(&self, id: Uuid) -> Result<Option<SoftDeleted>, DomainError> {
        let Some(mut user) = self.live_user(id).await? else {
            tracing::debug!(user_id = %id, "Soft delete skipped: user missing or already deleted");
            return Ok(None);
        };

        let now = Utc::now();
        user.deleted_at = Some(now);
        user.updated_at = now;
        self.repos.users.update(user).await?;
        tracing::info!(user_id = %id, "User soft-deleted");

        Ok(Some(SoftDeleted { deleted_at: now }))
    }

    /// Overwrite every profile field.
    pub async fn update_user(
        &self,
        id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<UpdateUserRequest, DomainError> {
        let mut user = self
            .live_user(id)
            .await?
            .ok_or_else(|| DomainError::not_found("AppUser", id))?;

        user.first_name = request.first_name;
        user.last_name = request.last_name;
        user.email = request.email;
        user.phone_number = request.phone_number;
        user.image_url = request.image_url;
        user.squad = request.squad;
        user.stack = request.stack;
        user.updated_at = Utc::now();

        let user = self.repos.users.update(user).await?;
        tracing::info!(user_id = %id, "User profile updated");

        Ok(UpdateUserRequest {
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone_number: user.phone_number,
            image_url: user.image_url,
            squad: user.squad,
            stack: user.stack,
        })
    }

    /// Distinct articles the user has read, newest first.
    pub async fn get_article_read_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ArticleSummary>, DomainError> {
        let reads = self.repos.reads.find_by_user(user_id).await?;

        let mut articles = Vec::new();
        for article_id in distinct_ids(reads.into_iter().map(|r| r.article_id)) {
            if let Some(article) = self.repos.articles.find_by_id(article_id).await? {
                if !article.is_deleted() {
                    articles.push(article);
                }
            }
        }
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut lookup = Lookup::new(&self.repos);
        Ok(lookup.summarize_all(articles).await?)
    }

    /// Grant a known role and return the user's roles afterwards.
    pub async fn assign_role(&self, user_id: Uuid, role: &str) -> Result<Vec<String>, DomainError> {
        let role: UserRole = role.parse()?;
        self.live_user(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("AppUser", user_id))?;

        self.repos.roles.assign_role(user_id, role).await?;
        tracing::info!(user_id = %user_id, role = %role, "Role assigned");

        Ok(self.repos.roles.roles_for(user_id).await?)
    }

    async fn live_user(&self, id: Uuid) -> Result<Option<AppUser>, DomainError> {
        Ok(self
            .repos
            .users
            .find_by_id(id)
            .await?
            .filter(|user| !user.is_deleted()))
    }
}

fn to_dto(user: AppUser, roles: Vec<String>) -> AppUserDto {
    AppUserDto {
        id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
        phone_number: user.phone_number,
        image_url: user.image_url,
        squad: user.squad,
        stack: user.stack,
        roles,
    }
}
