//! PostgreSQL-backed catalogue: categories, products, and reviews.
//!
//! SQL narrows listings by category and activity; the free-text search runs
//! over the loaded rows through [`ProductFilter::matches`] so both adapters
//! share one definition of a match.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ProductId;
use crate::domain::catalogue::{Category, Product, ProductFilter, Review};
use crate::domain::ports::{CatalogueRepository, RepositoryError};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CategoryRow, ProductRow, ReviewRow};
use super::pool::DbPool;
use super::schema::{categories, products, reviews};

/// Diesel-backed implementation of [`CatalogueRepository`].
#[derive(Clone)]
pub struct DieselCatalogueRepository {
    pool: DbPool,
}

impl DieselCatalogueRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogueRepository for DieselCatalogueRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CategoryRow> = categories::table
            .order_by(categories::name.asc())
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = products::table.into_boxed();
        if let Some(slug) = &filter.category {
            let category_id: Option<Uuid> = categories::table
                .filter(categories::slug.eq(slug))
                .select(categories::id)
                .first(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;
            let Some(category_id) = category_id else {
                return Ok(Vec::new());
            };
            query = query.filter(products::category_id.eq(category_id));
        }
        if !filter.include_inactive {
            query = query.filter(products::is_active.eq(true));
        }

        let rows: Vec<ProductRow> = query
            .order_by(products::name.asc())
            .select(ProductRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut listed = rows
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        listed.retain(|product| filter.matches(product));
        Ok(listed)
    }

    async fn find_product(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = products::table
            .find(id.as_uuid())
            .select(ProductRow::as_select())
            .first::<ProductRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(Product::try_from).transpose()
    }

    async fn insert_product(&self, product: &Product) -> Result<(), RepositoryError> {
        let row = ProductRow::try_from(product)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(products::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update_product(&self, product: &Product) -> Result<(), RepositoryError> {
        let row = ProductRow::try_from(product)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(products::table.find(row.id))
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(RepositoryError::not_found("product"));
        }
        Ok(())
    }

    async fn delete_product(&self, id: &ProductId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(products::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn list_reviews(&self, product_id: &ProductId) -> Result<Vec<Review>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ReviewRow> = reviews::table
            .filter(reviews::product_id.eq(product_id.as_uuid()))
            .order_by(reviews::created_at.desc())
            .select(ReviewRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(Review::try_from).collect()
    }

    async fn upsert_review(&self, review: &Review) -> Result<Review, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = ReviewRow::from(review);

        // A second review by the same user replaces the first but keeps its id.
        let stored: ReviewRow = diesel::insert_into(reviews::table)
            .values(&row)
            .on_conflict((reviews::product_id, reviews::user_id))
            .do_update()
            .set((
                reviews::rating.eq(excluded(reviews::rating)),
                reviews::title.eq(excluded(reviews::title)),
                reviews::comment.eq(excluded(reviews::comment)),
                reviews::author_name.eq(excluded(reviews::author_name)),
                reviews::created_at.eq(excluded(reviews::created_at)),
            ))
            .returning(ReviewRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Review::try_from(stored)
    }
}
