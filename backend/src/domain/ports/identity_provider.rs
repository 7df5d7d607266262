//! Driven port for the hosted identity provider.
//!
//! The provider owns credentials and account lifecycle. Listing and deleting
//! accounts are privileged calls made with the service-role key.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Error, IdentityUser, LoginCredentials, UserId};

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// The provider rejected the email/password pair.
        InvalidCredentials => "invalid credentials",
        /// The provider could not be reached.
        Transport { message: String } => "identity provider transport failed: {message}",
        /// The provider answered with an unexpected status.
        Status { status: u16, message: String } =>
            "identity provider returned {status}: {message}",
        /// The provider's response body could not be decoded.
        Decode { message: String } => "identity provider response invalid: {message}",
    }
}

impl From<IdentityProviderError> for Error {
    fn from(value: IdentityProviderError) -> Self {
        match value {
            IdentityProviderError::InvalidCredentials => {
                Error::unauthorized("invalid email or password")
            }
            IdentityProviderError::Status { status: 404, .. } => {
                Error::not_found("user not found")
            }
            IdentityProviderError::Transport { message }
            | IdentityProviderError::Status { message, .. } => {
                tracing::warn!(%message, "identity provider unavailable");
                Error::service_unavailable("identity provider is unavailable")
            }
            IdentityProviderError::Decode { message } => Error::internal(message),
        }
    }
}

/// Credential verification and account administration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify credentials, returning the account they belong to.
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<IdentityUser, IdentityProviderError>;

    /// Every account known to the provider.
    async fn list_users(&self) -> Result<Vec<IdentityUser>, IdentityProviderError>;

    /// Permanently delete an account.
    async fn delete_user(&self, user_id: &UserId) -> Result<(), IdentityProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(IdentityProviderError::invalid_credentials(), ErrorCode::Unauthorized)]
    #[case(IdentityProviderError::status(404_u16, "gone"), ErrorCode::NotFound)]
    #[case(IdentityProviderError::status(502_u16, "bad gateway"), ErrorCode::ServiceUnavailable)]
    #[case(IdentityProviderError::transport("timeout"), ErrorCode::ServiceUnavailable)]
    #[case(IdentityProviderError::decode("eof"), ErrorCode::InternalError)]
    fn maps_to_domain_codes(#[case] error: IdentityProviderError, #[case] expected: ErrorCode) {
        assert_eq!(Error::from(error).code(), expected);
    }
}
