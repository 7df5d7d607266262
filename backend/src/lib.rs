//! Storefront backend library: domain model, HTTP adapter, and outbound
//! adapters for PostgreSQL, the identity provider, and the in-memory store.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
