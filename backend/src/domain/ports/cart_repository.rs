//! Port for per-user carts.
//!
//! Carts are read and written wholesale; there is no line-level API.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Cart, UserId};

/// Cart persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Load the user's cart; users without one get an empty cart.
    async fn load(&self, user_id: &UserId) -> Result<Cart, RepositoryError>;

    /// Replace the stored cart.
    async fn save(&self, user_id: &UserId, cart: &Cart) -> Result<(), RepositoryError>;
}
