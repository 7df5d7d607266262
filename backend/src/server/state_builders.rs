//! Adapter selection: PostgreSQL plus the hosted identity provider when a
//! database is configured, otherwise the seeded in-memory store.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use storefront::domain::ports::IdentityProvider;
use storefront::inbound::http::state::HttpStatePorts;
use storefront::outbound::identity::{HttpIdentityConfig, HttpIdentityProvider};
use storefront::outbound::memory::{DEMO_ADMIN_EMAIL, DEMO_BUYER_EMAIL, MemoryStore};
use storefront::outbound::persistence::{self, DbPool, PoolConfig, run_migrations};

use super::config::{IdentitySettings, StorefrontSettings};

fn io_error(context: &str, error: &dyn std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {error}"))
}

fn build_identity(settings: IdentitySettings) -> std::io::Result<Arc<dyn IdentityProvider>> {
    if settings.service_key.is_none() {
        warn!("identity service key not set; user administration will be unavailable");
    }
    let provider = HttpIdentityProvider::new(HttpIdentityConfig {
        base_url: settings.url,
        anon_key: settings.anon_key,
        service_role_key: settings.service_key,
        timeout: settings.timeout,
    })
    .map_err(|err| io_error("identity client", &err))?;
    Ok(Arc::new(provider))
}

async fn database_ports(
    database_url: &str,
    settings: &StorefrontSettings,
    clock: Arc<dyn Clock>,
) -> std::io::Result<HttpStatePorts> {
    let identity = settings
        .identity()
        .map_err(|err| io_error("identity settings", &err))?
        .ok_or_else(|| {
            io_error(
                "identity settings",
                &"STOREFRONT_IDENTITY_URL is required when a database is configured",
            )
        })?;
    let identity = build_identity(identity)?;

    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_migrations(&url))
        .await
        .map_err(|err| io_error("migration task", &err))?
        .map_err(|err| io_error("migrations", &err))?;
    info!(applied, "database schema up to date");

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_size()))
        .await
        .map_err(|err| io_error("database pool", &err))?;

    Ok(persistence::ports(&pool, identity, clock))
}

/// Choose and construct the adapters behind every port.
///
/// # Errors
/// Returns [`std::io::Error`] when migrations fail, the pool cannot be
/// built, or a database is configured without an identity provider.
pub(crate) async fn build_ports(settings: &StorefrontSettings) -> std::io::Result<HttpStatePorts> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match settings.database_url.as_deref() {
        Some(database_url) => database_ports(database_url, settings, clock).await,
        None => {
            warn!(
                admin = DEMO_ADMIN_EMAIL,
                buyer = DEMO_BUYER_EMAIL,
                "no database configured; serving the seeded in-memory store"
            );
            Ok(MemoryStore::seeded().ports())
        }
    }
}
