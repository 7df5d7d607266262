//! PostgreSQL-backed news articles.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ArticleId;
use crate::domain::news::Article;
use crate::domain::ports::{NewsRepository, RepositoryError};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::ArticleRow;
use super::pool::DbPool;
use super::schema::news_articles;

/// Diesel-backed implementation of [`NewsRepository`].
#[derive(Clone)]
pub struct DieselNewsRepository {
    pool: DbPool,
}

impl DieselNewsRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NewsRepository for DieselNewsRepository {
    async fn list(&self, published_only: bool) -> Result<Vec<Article>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = news_articles::table.into_boxed();
        if published_only {
            query = query.filter(news_articles::is_published.eq(true));
        }
        // Drafts have no publication time and sort after everything published.
        let rows: Vec<ArticleRow> = query
            .order_by((
                news_articles::published_at.desc().nulls_last(),
                news_articles::created_at.desc(),
            ))
            .select(ArticleRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Article::from).collect())
    }

    async fn find(&self, id: &ArticleId) -> Result<Option<Article>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = news_articles::table
            .find(id.as_uuid())
            .select(ArticleRow::as_select())
            .first::<ArticleRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Article::from))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = news_articles::table
            .filter(news_articles::slug.eq(slug))
            .select(ArticleRow::as_select())
            .first::<ArticleRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Article::from))
    }

    async fn insert(&self, article: &Article) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(news_articles::table)
            .values(&ArticleRow::from(article))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, article: &Article) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = ArticleRow::from(article);

        let updated = diesel::update(news_articles::table.find(row.id))
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(RepositoryError::not_found("article"));
        }
        Ok(())
    }

    async fn delete(&self, id: &ArticleId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(news_articles::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
