//! Port for the metal pricing index.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::pricing::PricingEntry;
use crate::domain::PricingEntryId;

/// Pricing index persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PricingRepository: Send + Sync {
    /// All rows ordered by metal then grade.
    async fn list(&self) -> Result<Vec<PricingEntry>, RepositoryError>;

    /// Fetch one row.
    async fn find(&self, id: &PricingEntryId) -> Result<Option<PricingEntry>, RepositoryError>;

    /// Insert a row.
    async fn insert(&self, entry: &PricingEntry) -> Result<(), RepositoryError>;

    /// Overwrite an existing row.
    async fn update(&self, entry: &PricingEntry) -> Result<(), RepositoryError>;

    /// Delete a row; returns whether it existed.
    async fn delete(&self, id: &PricingEntryId) -> Result<bool, RepositoryError>;
}
