//! Domain ports for the hexagonal boundary.
//!
//! Every port here is *driven*: domain services and HTTP handlers call them
//! and outbound adapters (PostgreSQL, the identity provider, or the in-memory
//! store) implement them.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod admin_summary_query;
mod careers_repository;
mod cart_repository;
mod catalogue_repository;
mod contact_repository;
mod identity_provider;
mod news_repository;
mod order_repository;
mod pricing_repository;
mod repository_error;
mod service_request_repository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::AccountRepository;
#[cfg(test)]
pub use admin_summary_query::MockAdminSummaryQuery;
pub use admin_summary_query::AdminSummaryQuery;
#[cfg(test)]
pub use careers_repository::MockCareersRepository;
pub use careers_repository::CareersRepository;
#[cfg(test)]
pub use cart_repository::MockCartRepository;
pub use cart_repository::CartRepository;
#[cfg(test)]
pub use catalogue_repository::MockCatalogueRepository;
pub use catalogue_repository::CatalogueRepository;
#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::ContactRepository;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use news_repository::MockNewsRepository;
pub use news_repository::NewsRepository;
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::OrderRepository;
#[cfg(test)]
pub use pricing_repository::MockPricingRepository;
pub use pricing_repository::PricingRepository;
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use service_request_repository::MockServiceRequestRepository;
pub use service_request_repository::ServiceRequestRepository;
