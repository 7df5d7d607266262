//! Orders and the back-office summary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::MemoryStore;
use crate::domain::ports::{AdminSummaryQuery, OrderRepository, RepositoryError};
use crate::domain::{
    AdminSummary, Order, OrderDetails, OrderId, OrderItem, OrderStatus, RequestStatus, UserId,
};

fn newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn count(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn insert_order(&self, order: &Order) -> Result<(), RepositoryError> {
        self.with_tables(|t| {
            if let Some(key) = &order.idempotency_key {
                let reused = t.orders.iter().any(|o| {
                    o.user_id == order.user_id && o.idempotency_key.as_ref() == Some(key)
                });
                if reused {
                    return Err(RepositoryError::conflict("idempotency key already used"));
                }
            }
            t.orders.push(order.clone());
            Ok(())
        })
    }

    async fn insert_items(&self, items: &[OrderItem]) -> Result<(), RepositoryError> {
        self.with_tables(|t| {
            let orphan = items
                .iter()
                .any(|item| !t.orders.iter().any(|o| o.id == item.order_id));
            if orphan {
                return Err(RepositoryError::not_found("order"));
            }
            t.order_items.extend_from_slice(items);
            Ok(())
        })
    }

    async fn delete_order(&self, id: &OrderId) -> Result<(), RepositoryError> {
        self.with_tables(|t| {
            t.order_items.retain(|item| &item.order_id != id);
            t.orders.retain(|o| &o.id != id);
            Ok(())
        })
    }

    async fn find_order(&self, id: &OrderId) -> Result<Option<OrderDetails>, RepositoryError> {
        self.with_tables(|t| {
            Ok(t.orders.iter().find(|o| &o.id == id).map(|order| OrderDetails {
                order: order.clone(),
                items: t
                    .order_items
                    .iter()
                    .filter(|item| &item.order_id == id)
                    .cloned()
                    .collect(),
            }))
        })
    }

    async fn find_by_idempotency_key(
        &self,
        user_id: &UserId,
        key: &str,
    ) -> Result<Option<OrderDetails>, RepositoryError> {
        let id = self.with_tables(|t| {
            Ok(t.orders
                .iter()
                .find(|o| &o.user_id == user_id && o.idempotency_key.as_deref() == Some(key))
                .map(|o| o.id))
        })?;
        match id {
            Some(id) => self.find_order(&id).await,
            None => Ok(None),
        }
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError> {
        self.with_tables(|t| {
            let mut orders: Vec<Order> = t
                .orders
                .iter()
                .filter(|o| &o.user_id == user_id)
                .cloned()
                .collect();
            newest_first(&mut orders);
            Ok(orders)
        })
    }

    async fn list_all(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, RepositoryError> {
        self.with_tables(|t| {
            let mut orders: Vec<Order> = t
                .orders
                .iter()
                .filter(|o| status.is_none_or(|s| o.status == s))
                .cloned()
                .collect();
            newest_first(&mut orders);
            Ok(orders)
        })
    }

    async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        self.with_tables(|t| {
            let order = t
                .orders
                .iter_mut()
                .find(|o| &o.id == id)
                .ok_or_else(|| RepositoryError::not_found("order"))?;
            order.status = status;
            order.updated_at = updated_at;
            Ok(())
        })
    }
}

#[async_trait]
impl AdminSummaryQuery for MemoryStore {
    async fn summary(&self) -> Result<AdminSummary, RepositoryError> {
        self.with_tables(|t| {
            Ok(AdminSummary {
                pending_orders: count(
                    t.orders
                        .iter()
                        .filter(|o| o.status == OrderStatus::Pending)
                        .count(),
                ),
                unread_messages: count(t.messages.iter().filter(|m| !m.is_read).count()),
                new_applications: count(
                    t.applications
                        .iter()
                        .filter(|a| a.status == RequestStatus::New)
                        .count(),
                ),
                new_fabrication_requests: count(
                    t.fabrication
                        .iter()
                        .filter(|r| r.meta.status == RequestStatus::New)
                        .count(),
                ),
                new_recycling_requests: count(
                    t.recycling
                        .iter()
                        .filter(|r| r.meta.status == RequestStatus::New)
                        .count(),
                ),
            })
        })
    }
}
