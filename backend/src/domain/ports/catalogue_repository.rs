//! Port for categories, products, and reviews.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::catalogue::{Category, Product, ProductFilter, Review};
use crate::domain::ProductId;

/// Catalogue persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    /// All categories ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError>;

    /// Products passing `filter`, ordered by name.
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError>;

    /// Fetch one product regardless of its active flag.
    async fn find_product(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Insert a product. A duplicate slug is a [`RepositoryError::Conflict`].
    async fn insert_product(&self, product: &Product) -> Result<(), RepositoryError>;

    /// Overwrite an existing product.
    async fn update_product(&self, product: &Product) -> Result<(), RepositoryError>;

    /// Delete a product; returns whether a row was removed.
    async fn delete_product(&self, id: &ProductId) -> Result<bool, RepositoryError>;

    /// Reviews for a product, newest first.
    async fn list_reviews(&self, product_id: &ProductId) -> Result<Vec<Review>, RepositoryError>;

    /// Store a review, replacing the author's earlier review of the same
    /// product. Returns the stored row.
    async fn upsert_review(&self, review: &Review) -> Result<Review, RepositoryError>;
}
