//! Port for orders and order items.
//!
//! Header and item rows are written by separate calls. Callers that need the
//! pair to be all-or-nothing compensate with [`OrderRepository::delete_order`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::RepositoryError;
use crate::domain::{Order, OrderDetails, OrderId, OrderItem, OrderStatus, UserId};

/// Order persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert the order header. Reusing an idempotency key for the same user is
    /// a [`RepositoryError::Conflict`].
    async fn insert_order(&self, order: &Order) -> Result<(), RepositoryError>;

    /// Insert the item rows of an existing order.
    async fn insert_items(&self, items: &[OrderItem]) -> Result<(), RepositoryError>;

    /// Remove an order header and any items it has.
    async fn delete_order(&self, id: &OrderId) -> Result<(), RepositoryError>;

    /// Fetch an order with its items.
    async fn find_order(&self, id: &OrderId) -> Result<Option<OrderDetails>, RepositoryError>;

    /// Fetch the order the user created with `key`.
    async fn find_by_idempotency_key(
        &self,
        user_id: &UserId,
        key: &str,
    ) -> Result<Option<OrderDetails>, RepositoryError>;

    /// The user's orders, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError>;

    /// All orders, newest first, optionally restricted to one status.
    async fn list_all(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, RepositoryError>;

    /// Persist a status change.
    async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;
}
