//! Port for news articles.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::news::Article;
use crate::domain::ArticleId;

/// News persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Articles, newest first. Published listings order by publication time.
    async fn list(&self, published_only: bool) -> Result<Vec<Article>, RepositoryError>;

    /// Fetch by id.
    async fn find(&self, id: &ArticleId) -> Result<Option<Article>, RepositoryError>;

    /// Fetch by slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, RepositoryError>;

    /// Insert an article. A duplicate slug is a [`RepositoryError::Conflict`].
    async fn insert(&self, article: &Article) -> Result<(), RepositoryError>;

    /// Overwrite an existing article.
    async fn update(&self, article: &Article) -> Result<(), RepositoryError>;

    /// Delete; returns whether it existed.
    async fn delete(&self, id: &ArticleId) -> Result<bool, RepositoryError>;
}
