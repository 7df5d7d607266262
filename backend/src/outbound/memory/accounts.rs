//! Profiles and roles.

use async_trait::async_trait;

use super::MemoryStore;
use crate::domain::ports::{AccountRepository, RepositoryError};
use crate::domain::{Profile, Role, UserId};

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn find_profile(&self, user_id: &UserId) -> Result<Option<Profile>, RepositoryError> {
        self.with_tables(|t| Ok(t.profiles.get(user_id).cloned()))
    }

    async fn save_profile(&self, profile: &Profile) -> Result<(), RepositoryError> {
        self.with_tables(|t| {
            t.profiles.insert(profile.user_id.clone(), profile.clone());
            Ok(())
        })
    }

    async fn roles_for(&self, user_id: &UserId) -> Result<Vec<Role>, RepositoryError> {
        self.with_tables(|t| {
            Ok(t.roles
                .iter()
                .filter(|(holder, _)| holder == user_id)
                .map(|(_, role)| *role)
                .collect())
        })
    }

    async fn all_roles(&self) -> Result<Vec<(UserId, Role)>, RepositoryError> {
        self.with_tables(|t| Ok(t.roles.clone()))
    }

    async fn set_role(&self, user_id: &UserId, role: Role) -> Result<(), RepositoryError> {
        self.with_tables(|t| {
            t.roles.retain(|(holder, _)| holder != user_id);
            t.roles.push((user_id.clone(), role));
            Ok(())
        })
    }

    async fn delete_account_data(&self, user_id: &UserId) -> Result<(), RepositoryError> {
        self.with_tables(|t| {
            t.profiles.remove(user_id);
            t.roles.retain(|(holder, _)| holder != user_id);
            t.carts.remove(user_id);
            t.reviews.retain(|review| &review.user_id != user_id);
            Ok(())
        })
    }
}
