//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the storefront's
//! repository ports backed by PostgreSQL via the Diesel ORM with async
//! support through `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel rows and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) never leave this module.
//! - **Constraint-aware errors**: Unique and foreign-key violations map to
//!   `conflict` and `not_found` by constraint name.
//!
//! # Example
//!
//! ```ignore
//! use storefront::outbound::persistence::{DbPool, DieselCatalogueRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/storefront")).await?;
//! let catalogue = DieselCatalogueRepository::new(pool);
//! ```

mod diesel_account_repository;
mod diesel_admin_summary_query;
mod diesel_careers_repository;
mod diesel_cart_repository;
mod diesel_catalogue_repository;
mod diesel_contact_repository;
mod diesel_news_repository;
mod diesel_order_repository;
mod diesel_pricing_repository;
mod diesel_service_request_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::IdentityProvider;
use crate::inbound::http::state::HttpStatePorts;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_admin_summary_query::DieselAdminSummaryQuery;
pub use diesel_careers_repository::DieselCareersRepository;
pub use diesel_cart_repository::DieselCartRepository;
pub use diesel_catalogue_repository::DieselCatalogueRepository;
pub use diesel_contact_repository::DieselContactRepository;
pub use diesel_news_repository::DieselNewsRepository;
pub use diesel_order_repository::DieselOrderRepository;
pub use diesel_pricing_repository::DieselPricingRepository;
pub use diesel_service_request_repository::DieselServiceRequestRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

/// Wire every repository port to `pool`.
pub fn ports(
    pool: &DbPool,
    identity: Arc<dyn IdentityProvider>,
    clock: Arc<dyn Clock>,
) -> HttpStatePorts {
    HttpStatePorts {
        identity,
        accounts: Arc::new(DieselAccountRepository::new(pool.clone())),
        catalogue: Arc::new(DieselCatalogueRepository::new(pool.clone())),
        carts: Arc::new(DieselCartRepository::new(pool.clone())),
        orders: Arc::new(DieselOrderRepository::new(pool.clone())),
        pricing: Arc::new(DieselPricingRepository::new(pool.clone())),
        careers: Arc::new(DieselCareersRepository::new(pool.clone())),
        service_requests: Arc::new(DieselServiceRequestRepository::new(pool.clone())),
        news: Arc::new(DieselNewsRepository::new(pool.clone())),
        contact: Arc::new(DieselContactRepository::new(pool.clone())),
        summary: Arc::new(DieselAdminSummaryQuery::new(pool.clone())),
        clock,
    }
}
