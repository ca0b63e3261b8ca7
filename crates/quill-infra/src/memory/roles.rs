use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::UserRole;
use quill_core::error::RepoError;
use quill_core::ports::RoleStore;

/// Role assignments kept in a map keyed by user id.
#[derive(Default)]
pub struct InMemoryRoleStore {
    assignments: RwLock<HashMap<Uuid, Vec<String>>>,
}

impl InMemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleStore for InMemoryRoleStore {
    async fn roles_for(&self, user_id: Uuid) -> Result<Vec<String>, RepoError> {
        let assignments = self.assignments.read().await;
        Ok(assignments.get(&user_id).cloned().unwrap_or_default())
    }

    async fn assign_role(&self, user_id: Uuid, role: UserRole) -> Result<(), RepoError> {
        let mut assignments = self.assignments.write().await;
        let roles = assignments.entry(user_id).or_default();
        if !roles.iter().any(|r| r == role.as_str()) {
            roles.push(role.as_str().to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn assigning_twice_keeps_one_entry() {
        let store = InMemoryRoleStore::new();
        let user = Uuid::new_v4();
        store.assign_role(user, UserRole::Editor).await.unwrap();
        store.assign_role(user, UserRole::Editor).await.unwrap();
        store.assign_role(user, UserRole::Admin).await.unwrap();
        assert_eq!(store.roles_for(user).await.unwrap(), vec!["Editor", "Admin"]);
    }

    #[tokio::test]
    async fn unknown_user_has_no_roles() {
        let store = InMemoryRoleStore::new();
        assert!(store.roles_for(Uuid::new_v4()).await.unwrap().is_empty());
    }
}
