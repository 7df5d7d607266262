//! Port for back-office badge counts.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::AdminSummary;

/// Aggregate counts across the back-office tables.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminSummaryQuery: Send + Sync {
    /// Current counts.
    async fn summary(&self) -> Result<AdminSummary, RepositoryError>;
}
