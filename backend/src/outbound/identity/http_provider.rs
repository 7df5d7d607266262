//! Reqwest-backed adapter for a GoTrue-compatible identity service.
//!
//! This adapter owns transport details only: endpoint construction, API key
//! headers, timeout and HTTP error mapping, and JSON decoding into
//! [`IdentityUser`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use zeroize::Zeroizing;

use super::dto::{TokenResponseDto, UserPageDto};
use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{IdentityUser, LoginCredentials, UserId};

/// Users requested per admin listing page.
const USERS_PER_PAGE: usize = 200;
/// Listing stops after this many pages.
const MAX_USER_PAGES: usize = 50;

/// Connection settings for the identity service.
pub struct HttpIdentityConfig {
    /// Project URL; the `auth/v1` API lives beneath it.
    pub base_url: Url,
    /// Public key sent with password sign-in.
    pub anon_key: String,
    /// Privileged key for listing and deleting accounts.
    pub service_role_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Identity provider that talks to the hosted auth API over HTTPS.
pub struct HttpIdentityProvider {
    client: Client,
    base_url: Url,
    anon_key: Zeroizing<String>,
    service_role_key: Option<Zeroizing<String>>,
}

impl HttpIdentityProvider {
    /// Build an adapter using a reqwest client with an explicit timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: HttpIdentityConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(config.base_url),
            anon_key: Zeroizing::new(config.anon_key),
            service_role_key: config.service_role_key.map(Zeroizing::new),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, IdentityProviderError> {
        self.base_url
            .join(path)
            .map_err(|err| IdentityProviderError::transport(format!("invalid endpoint: {err}")))
    }

    fn admin(&self, request: RequestBuilder) -> Result<RequestBuilder, IdentityProviderError> {
        let key = self.service_role_key.as_ref().ok_or_else(|| {
            IdentityProviderError::transport("service role key is not configured")
        })?;
        Ok(request.header("apikey", key.as_str()).bearer_auth(key.as_str()))
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<IdentityUser, IdentityProviderError> {
        let mut url = self.endpoint("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let response = self
            .client
            .post(url)
            .header("apikey", self.anon_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&serde_json::json!({
                "email": credentials.email(),
                "password": credentials.password(),
            }))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if matches!(status, StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED) {
            return Err(IdentityProviderError::invalid_credentials());
        }
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        let decoded: TokenResponseDto = decode(body.as_ref())?;
        Ok(decoded.user.into())
    }

    async fn list_users(&self) -> Result<Vec<IdentityUser>, IdentityProviderError> {
        let mut users = Vec::new();
        for page in 1..=MAX_USER_PAGES {
            let mut url = self.endpoint("auth/v1/admin/users")?;
            url.query_pairs_mut()
                .append_pair("page", &page.to_string())
                .append_pair("per_page", &USERS_PER_PAGE.to_string());

            let response = self
                .admin(self.client.get(url))?
                .send()
                .await
                .map_err(map_transport_error)?;
            let status = response.status();
            let body = response.bytes().await.map_err(map_transport_error)?;
            if !status.is_success() {
                return Err(map_status_error(status, body.as_ref()));
            }

            let decoded: UserPageDto = decode(body.as_ref())?;
            let fetched = decoded.users.len();
            users.extend(decoded.users.into_iter().map(IdentityUser::from));
            if fetched < USERS_PER_PAGE {
                return Ok(users);
            }
        }
        tracing::warn!(
            pages = MAX_USER_PAGES,
            "identity user listing truncated at page limit"
        );
        Ok(users)
    }

    async fn delete_user(&self, user_id: &UserId) -> Result<(), IdentityProviderError> {
        let url = self.endpoint(&format!("auth/v1/admin/users/{}", user_id.as_uuid()))?;
        let response = self
            .admin(self.client.delete(url))?
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_status_error(status, body.as_ref()))
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, IdentityProviderError> {
    serde_json::from_slice(body).map_err(|error| {
        IdentityProviderError::decode(format!("invalid identity provider payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> IdentityProviderError {
    IdentityProviderError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    IdentityProviderError::status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
