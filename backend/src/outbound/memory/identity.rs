//! In-memory identity provider holding email/password accounts.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mockable::Clock;
use zeroize::Zeroizing;

use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{IdentityUser, LoginCredentials, UserId};

struct Registered {
    user: IdentityUser,
    password: Zeroizing<String>,
}

/// Identity provider double for development and tests.
#[derive(Clone)]
pub struct MemoryIdentityProvider {
    accounts: Arc<Mutex<Vec<Registered>>>,
    clock: Arc<dyn Clock>,
}

impl MemoryIdentityProvider {
    /// Provider with no accounts.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            accounts: Arc::new(Mutex::new(Vec::new())),
            clock,
        }
    }

    /// Register an account, returning its id. Emails are stored lowercased;
    /// registering an existing email replaces its password.
    pub fn register(&self, email: &str, password: &str) -> UserId {
        let email = email.trim().to_lowercase();
        let mut accounts = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = accounts
            .iter_mut()
            .find(|account| account.user.email.as_deref() == Some(email.as_str()))
        {
            existing.password = Zeroizing::new(password.to_owned());
            return existing.user.id.clone();
        }
        let id = UserId::random();
        accounts.push(Registered {
            user: IdentityUser {
                id: id.clone(),
                email: Some(email),
                created_at: Some(self.clock.utc()),
                last_sign_in_at: None,
            },
            password: Zeroizing::new(password.to_owned()),
        });
        id
    }

    /// Id of the account registered under `email`.
    pub fn user_id_for(&self, email: &str) -> Option<UserId> {
        let email = email.trim().to_lowercase();
        self.accounts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|account| account.user.email.as_deref() == Some(email.as_str()))
            .map(|account| account.user.id.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Registered>>, IdentityProviderError> {
        self.accounts
            .lock()
            .map_err(|_| IdentityProviderError::transport("identity store lock poisoned"))
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<IdentityUser, IdentityProviderError> {
        let mut accounts = self.lock()?;
        let account = accounts
            .iter_mut()
            .find(|account| account.user.email.as_deref() == Some(credentials.email()))
            .filter(|account| account.password.as_str() == credentials.password())
            .ok_or_else(IdentityProviderError::invalid_credentials)?;
        account.user.last_sign_in_at = Some(self.clock.utc());
        Ok(account.user.clone())
    }

    async fn list_users(&self) -> Result<Vec<IdentityUser>, IdentityProviderError> {
        Ok(self
            .lock()?
            .iter()
            .map(|account| account.user.clone())
            .collect())
    }

    async fn delete_user(&self, user_id: &UserId) -> Result<(), IdentityProviderError> {
        let mut accounts = self.lock()?;
        let before = accounts.len();
        accounts.retain(|account| &account.user.id != user_id);
        if accounts.len() == before {
            return Err(IdentityProviderError::status(404_u16, "user not found"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::DefaultClock;
    use rstest::{fixture, rstest};

    #[fixture]
    fn provider() -> MemoryIdentityProvider {
        let provider = MemoryIdentityProvider::new(Arc::new(DefaultClock));
        provider.register("Buyer@Example.com", "s3cret");
        provider
    }

    #[rstest]
    #[tokio::test]
    async fn authenticates_with_normalised_email(provider: MemoryIdentityProvider) {
        let credentials =
            LoginCredentials::try_from_parts("buyer@example.com", "s3cret").expect("credentials");
        let user = provider.authenticate(&credentials).await.expect("signed in");
        assert_eq!(user.email.as_deref(), Some("buyer@example.com"));
        assert!(user.last_sign_in_at.is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn wrong_password_is_invalid_credentials(provider: MemoryIdentityProvider) {
        let credentials =
            LoginCredentials::try_from_parts("buyer@example.com", "nope").expect("credentials");
        let error = provider.authenticate(&credentials).await.expect_err("rejected");
        assert_eq!(error, IdentityProviderError::InvalidCredentials);
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_unknown_user_is_status_404(provider: MemoryIdentityProvider) {
        let error = provider
            .delete_user(&UserId::random())
            .await
            .expect_err("unknown user");
        assert!(matches!(error, IdentityProviderError::Status { status: 404, .. }));
    }
}
