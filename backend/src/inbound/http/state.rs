//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and ports and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountRepository, AdminSummaryQuery, CareersRepository, CartRepository, CatalogueRepository,
    ContactRepository, IdentityProvider, NewsRepository, OrderRepository, PricingRepository,
    ServiceRequestRepository,
};
use crate::domain::{
    AccountService, CareersService, CartService, CatalogueService, CheckoutService, NewsService,
    OrderService, ServiceRequestService,
};

/// Parameter object bundling every driven port implementation.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub identity: Arc<dyn IdentityProvider>,
    pub accounts: Arc<dyn AccountRepository>,
    pub catalogue: Arc<dyn CatalogueRepository>,
    pub carts: Arc<dyn CartRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub pricing: Arc<dyn PricingRepository>,
    pub careers: Arc<dyn CareersRepository>,
    pub service_requests: Arc<dyn ServiceRequestRepository>,
    pub news: Arc<dyn NewsRepository>,
    pub contact: Arc<dyn ContactRepository>,
    pub summary: Arc<dyn AdminSummaryQuery>,
    pub clock: Arc<dyn Clock>,
}

/// Dependency bundle for HTTP handlers.
///
/// Use-cases with rules of their own go through a service; plain CRUD
/// resources (pricing rows, contact messages, badge counts) use their port
/// directly.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: AccountService,
    pub catalogue: CatalogueService,
    pub cart: CartService,
    pub checkout: CheckoutService,
    pub orders: OrderService,
    pub careers: CareersService,
    pub service_requests: ServiceRequestService,
    pub news: NewsService,
    pub pricing: Arc<dyn PricingRepository>,
    pub contact: Arc<dyn ContactRepository>,
    pub summary: Arc<dyn AdminSummaryQuery>,
    pub clock: Arc<dyn Clock>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Wire the services over a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use storefront::inbound::http::state::HttpState;
    /// use storefront::outbound::memory::MemoryStore;
    ///
    /// let state = HttpState::new(MemoryStore::seeded().ports());
    /// let _orders = state.orders.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            identity,
            accounts,
            catalogue,
            carts,
            orders,
            pricing,
            careers,
            service_requests,
            news,
            contact,
            summary,
            clock,
        } = ports;
        Self {
            accounts: AccountService::new(identity, accounts, clock.clone()),
            catalogue: CatalogueService::new(catalogue.clone(), clock.clone()),
            cart: CartService::new(carts.clone(), catalogue.clone()),
            checkout: CheckoutService::new(carts, catalogue, orders.clone(), clock.clone()),
            orders: OrderService::new(orders, clock.clone()),
            careers: CareersService::new(careers, clock.clone()),
            service_requests: ServiceRequestService::new(service_requests, clock.clone()),
            news: NewsService::new(news, clock.clone()),
            pricing,
            contact,
            summary,
            clock,
        }
    }
}
