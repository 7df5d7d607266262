//! PostgreSQL-backed metal pricing index.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::PricingEntryId;
use crate::domain::ports::{PricingRepository, RepositoryError};
use crate::domain::pricing::PricingEntry;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::PricingRow;
use super::pool::DbPool;
use super::schema::pricing_index;

/// Diesel-backed implementation of [`PricingRepository`].
#[derive(Clone)]
pub struct DieselPricingRepository {
    pool: DbPool,
}

impl DieselPricingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PricingRepository for DieselPricingRepository {
    async fn list(&self) -> Result<Vec<PricingEntry>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PricingRow> = pricing_index::table
            .select(PricingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        // Lowercased (metal, grade) order, independent of database collation.
        let mut entries = rows
            .into_iter()
            .map(PricingEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(PricingEntry::listing_key);
        Ok(entries)
    }

    async fn find(&self, id: &PricingEntryId) -> Result<Option<PricingEntry>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = pricing_index::table
            .find(id.as_uuid())
            .select(PricingRow::as_select())
            .first::<PricingRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(PricingEntry::try_from).transpose()
    }

    async fn insert(&self, entry: &PricingEntry) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(pricing_index::table)
            .values(&PricingRow::from(entry))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, entry: &PricingEntry) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = PricingRow::from(entry);

        let updated = diesel::update(pricing_index::table.find(row.id))
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(RepositoryError::not_found("pricing entry"));
        }
        Ok(())
    }

    async fn delete(&self, id: &PricingEntryId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(pricing_index::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
