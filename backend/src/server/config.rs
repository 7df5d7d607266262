//! Process settings and the HTTP server configuration object.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use storefront::inbound::http::session_config::SessionSettings;
use storefront::inbound::http::state::HttpStatePorts;
use url::Url;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings that cannot be turned into a running server.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {message}")]
    BindAddr { value: String, message: String },
    #[error("invalid identity URL '{value}': {message}")]
    IdentityUrl { value: String, message: String },
    #[error("STOREFRONT_IDENTITY_ANON_KEY is required when STOREFRONT_IDENTITY_URL is set")]
    MissingAnonKey,
}

/// Storefront process settings loaded via OrthoConfig.
///
/// Without a database URL the server runs on the seeded in-memory store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STOREFRONT")]
pub struct StorefrontSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_size: u32,
    /// Base URL of the hosted identity provider.
    pub identity_url: Option<String>,
    /// Public key for password sign-in.
    pub identity_anon_key: Option<String>,
    /// Privileged key for account administration.
    pub identity_service_key: Option<String>,
    /// Identity request timeout in seconds.
    #[ortho_config(default = 10)]
    pub identity_timeout_secs: u64,
}

/// Identity provider connection details, present only when configured.
pub struct IdentitySettings {
    pub url: Url,
    pub anon_key: String,
    pub service_key: Option<String>,
    pub timeout: Duration,
}

impl StorefrontSettings {
    /// Return the listen address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Return the configured pool size, never below one connection.
    pub fn pool_size(&self) -> u32 {
        self.pool_size.max(1)
    }

    /// Return the identity provider settings when a URL is configured.
    pub fn identity(&self) -> Result<Option<IdentitySettings>, SettingsError> {
        let Some(raw) = self.identity_url.as_deref() else {
            return Ok(None);
        };
        let url = Url::parse(raw).map_err(|err| SettingsError::IdentityUrl {
            value: raw.to_owned(),
            message: err.to_string(),
        })?;
        let anon_key = self
            .identity_anon_key
            .clone()
            .ok_or(SettingsError::MissingAnonKey)?;
        Ok(Some(IdentitySettings {
            url,
            anon_key,
            service_key: self.identity_service_key.clone(),
            timeout: Duration::from_secs(self.identity_timeout_secs.max(1)),
        }))
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) session_ttl_hours: i64,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) ports: HttpStatePorts,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration from session settings and adapters.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, ports: HttpStatePorts) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
            ttl_hours,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            session_ttl_hours: ttl_hours,
            bind_addr,
            ports,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for storefront settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "STOREFRONT_BIND_ADDR",
        "STOREFRONT_DATABASE_URL",
        "STOREFRONT_POOL_SIZE",
        "STOREFRONT_IDENTITY_URL",
        "STOREFRONT_IDENTITY_ANON_KEY",
        "STOREFRONT_IDENTITY_SERVICE_KEY",
        "STOREFRONT_IDENTITY_TIMEOUT_SECS",
    ];

    fn load_from_empty_args() -> StorefrontSettings {
        StorefrontSettings::load_from_iter([OsString::from("storefront")])
            .expect("config should load")
    }

    fn cleared_with(
        overrides: &[(&'static str, &str)],
    ) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn defaults_run_in_memory_on_port_8080() {
        let _guard = lock_env(cleared_with(&[]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal")
        );
        assert!(settings.database_url.is_none());
        assert_eq!(settings.pool_size(), 10);
        assert_eq!(settings.identity_timeout_secs, 10);
        assert!(settings.identity().expect("no identity").is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(cleared_with(&[
            ("STOREFRONT_BIND_ADDR", "127.0.0.1:9000"),
            ("STOREFRONT_DATABASE_URL", "postgres://localhost/storefront"),
            ("STOREFRONT_POOL_SIZE", "4"),
            ("STOREFRONT_IDENTITY_URL", "https://auth.example.test"),
            ("STOREFRONT_IDENTITY_ANON_KEY", "anon"),
            ("STOREFRONT_IDENTITY_TIMEOUT_SECS", "3"),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("override parses").port(),
            9000
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/storefront")
        );
        assert_eq!(settings.pool_size(), 4);
        let identity = settings
            .identity()
            .expect("valid identity")
            .expect("configured");
        assert_eq!(identity.url.host_str(), Some("auth.example.test"));
        assert_eq!(identity.timeout, Duration::from_secs(3));
        assert!(identity.service_key.is_none());
    }

    #[rstest]
    fn identity_url_without_anon_key_is_rejected() {
        let _guard = lock_env(cleared_with(&[(
            "STOREFRONT_IDENTITY_URL",
            "https://auth.example.test",
        )]));

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.identity(),
            Err(SettingsError::MissingAnonKey)
        ));
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let _guard = lock_env(cleared_with(&[("STOREFRONT_BIND_ADDR", "localhost")]));

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
    }
}
