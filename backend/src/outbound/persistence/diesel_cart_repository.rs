//! PostgreSQL-backed carts, one JSONB row per user.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CartRepository, RepositoryError};
use crate::domain::{Cart, UserId};

use super::error_mapping::{corrupt_row, map_diesel_error, map_pool_error};
use super::models::{CartRow, NewCartRow};
use super::pool::DbPool;
use super::schema::carts;

/// Diesel-backed implementation of [`CartRepository`].
///
/// Saving an empty cart deletes the row so abandoned carts do not linger.
#[derive(Clone)]
pub struct DieselCartRepository {
    pool: DbPool,
}

impl DieselCartRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartRepository for DieselCartRepository {
    async fn load(&self, user_id: &UserId) -> Result<Cart, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = carts::table
            .find(user_id.as_uuid())
            .select(CartRow::as_select())
            .first::<CartRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map_or_else(|| Ok(Cart::default()), Cart::try_from)
    }

    async fn save(&self, user_id: &UserId, cart: &Cart) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        if cart.is_empty() {
            diesel::delete(carts::table.find(user_id.as_uuid()))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            return Ok(());
        }

        let items = serde_json::to_value(cart.lines()).map_err(|err| corrupt_row("carts", &err))?;
        let row = NewCartRow {
            user_id: *user_id.as_uuid(),
            items,
        };

        diesel::insert_into(carts::table)
            .values(&row)
            .on_conflict(carts::user_id)
            .do_update()
            .set((
                carts::items.eq(excluded(carts::items)),
                carts::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
