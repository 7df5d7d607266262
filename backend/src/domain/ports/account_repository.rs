//! Port for customer profiles and application roles.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Profile, Role, UserId};

/// Profile and role persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Fetch a user's profile.
    async fn find_profile(&self, user_id: &UserId) -> Result<Option<Profile>, RepositoryError>;

    /// Insert or replace a profile.
    async fn save_profile(&self, profile: &Profile) -> Result<(), RepositoryError>;

    /// Roles held by one user.
    async fn roles_for(&self, user_id: &UserId) -> Result<Vec<Role>, RepositoryError>;

    /// Every role assignment.
    async fn all_roles(&self) -> Result<Vec<(UserId, Role)>, RepositoryError>;

    /// Replace the user's roles with exactly `role`.
    async fn set_role(&self, user_id: &UserId, role: Role) -> Result<(), RepositoryError>;

    /// Remove profile, roles, and cart of a deleted user.
    async fn delete_account_data(&self, user_id: &UserId) -> Result<(), RepositoryError>;
}
