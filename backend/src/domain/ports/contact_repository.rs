//! Port for contact form messages.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::contact::ContactMessage;
use crate::domain::MessageId;

/// Contact message persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Record a message.
    async fn insert(&self, message: &ContactMessage) -> Result<(), RepositoryError>;

    /// All messages, newest first.
    async fn list(&self) -> Result<Vec<ContactMessage>, RepositoryError>;

    /// Flag a message as read; returns whether it existed.
    async fn mark_read(&self, id: &MessageId) -> Result<bool, RepositoryError>;

    /// Delete; returns whether it existed.
    async fn delete(&self, id: &MessageId) -> Result<bool, RepositoryError>;
}
