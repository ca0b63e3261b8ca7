//! Identity provider ports.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::UserRole;
use crate::error::RepoError;

/// The signed-in caller, resolved by the identity provider before a service
/// is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
}

impl Session {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

/// Role assignments kept by the identity store.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Role names assigned to a user. Empty when the user has none.
    async fn roles_for(&self, user_id: Uuid) -> Result<Vec<String>, RepoError>;

    /// Assign a role. Assigning a role the user already holds is a no-op.
    async fn assign_role(&self, user_id: Uuid, role: UserRole) -> Result<(), RepoError>;
}
