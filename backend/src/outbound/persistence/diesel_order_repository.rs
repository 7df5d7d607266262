//! PostgreSQL-backed orders and their line items.
//!
//! The partial unique index on `(user_id, idempotency_key)` turns a replayed
//! checkout into a conflict the service resolves by reading the first order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{OrderRepository, RepositoryError};
use crate::domain::{Order, OrderDetails, OrderId, OrderItem, OrderStatus, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{OrderItemRow, OrderRow};
use super::pool::DbPool;
use super::schema::{order_items, orders};

/// Diesel-backed implementation of [`OrderRepository`].
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

async fn load_details(
    conn: &mut AsyncPgConnection,
    row: OrderRow,
) -> Result<OrderDetails, RepositoryError> {
    let item_rows: Vec<OrderItemRow> = order_items::table
        .filter(order_items::order_id.eq(row.id))
        .order_by(order_items::product_name.asc())
        .select(OrderItemRow::as_select())
        .load(conn)
        .await
        .map_err(map_diesel_error)?;

    Ok(OrderDetails {
        order: Order::try_from(row)?,
        items: item_rows
            .into_iter()
            .map(OrderItem::try_from)
            .collect::<Result<_, _>>()?,
    })
}

fn into_orders(rows: Vec<OrderRow>) -> Result<Vec<Order>, RepositoryError> {
    rows.into_iter().map(Order::try_from).collect()
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn insert_order(&self, order: &Order) -> Result<(), RepositoryError> {
        let row = OrderRow::try_from(order)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(orders::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn insert_items(&self, items: &[OrderItem]) -> Result<(), RepositoryError> {
        if items.is_empty() {
            return Ok(());
        }
        let rows = items
            .iter()
            .map(OrderItemRow::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(order_items::table)
            .values(&rows)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete_order(&self, id: &OrderId) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(orders::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_order(&self, id: &OrderId) -> Result<Option<OrderDetails>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = orders::table
            .find(id.as_uuid())
            .select(OrderRow::as_select())
            .first::<OrderRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some(row) => load_details(&mut conn, row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn find_by_idempotency_key(
        &self,
        user_id: &UserId,
        key: &str,
    ) -> Result<Option<OrderDetails>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = orders::table
            .filter(orders::user_id.eq(user_id.as_uuid()))
            .filter(orders::idempotency_key.eq(key))
            .select(OrderRow::as_select())
            .first::<OrderRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some(row) => load_details(&mut conn, row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<OrderRow> = orders::table
            .filter(orders::user_id.eq(user_id.as_uuid()))
            .order_by(orders::created_at.desc())
            .select(OrderRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        into_orders(rows)
    }

    async fn list_all(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = orders::table.into_boxed();
        if let Some(status) = status {
            query = query.filter(orders::status.eq(status.as_str()));
        }
        let rows: Vec<OrderRow> = query
            .order_by(orders::created_at.desc())
            .select(OrderRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        into_orders(rows)
    }

    async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(orders::table.find(id.as_uuid()))
            .set((
                orders::status.eq(status.as_str()),
                orders::updated_at.eq(updated_at),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(RepositoryError::not_found("order"));
        }
        Ok(())
    }
}
