//! PostgreSQL-backed contact form inbox.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::MessageId;
use crate::domain::contact::ContactMessage;
use crate::domain::ports::{ContactRepository, RepositoryError};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::MessageRow;
use super::pool::DbPool;
use super::schema::contact_messages;

/// Diesel-backed implementation of [`ContactRepository`].
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn insert(&self, message: &ContactMessage) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(contact_messages::table)
            .values(&MessageRow::from(message))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list(&self) -> Result<Vec<ContactMessage>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<MessageRow> = contact_messages::table
            .order_by(contact_messages::created_at.desc())
            .select(MessageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(ContactMessage::from).collect())
    }

    async fn mark_read(&self, id: &MessageId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(contact_messages::table.find(id.as_uuid()))
            .set(contact_messages::is_read.eq(true))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &MessageId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(contact_messages::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
