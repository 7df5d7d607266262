//! In-memory adapters for every driven port.
//!
//! Used when no database is configured (local development) and by the
//! handler and integration tests. All tables live behind one mutex so each
//! port call observes a consistent snapshot, mirroring a single SQL
//! statement.

mod accounts;
mod back_office;
mod catalogue;
mod identity;
mod orders;
mod seed;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use mockable::{Clock, DefaultClock};

use crate::domain::careers::{Job, JobApplication};
use crate::domain::catalogue::{Category, Product, Review};
use crate::domain::contact::ContactMessage;
use crate::domain::news::Article;
use crate::domain::ports::RepositoryError;
use crate::domain::pricing::PricingEntry;
use crate::domain::service_requests::{FabricationRequest, RecyclingRequest};
use crate::domain::{Cart, Order, OrderItem, Profile, Role, UserId};
use crate::inbound::http::state::HttpStatePorts;

pub use identity::MemoryIdentityProvider;
pub use seed::{DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD, DEMO_BUYER_EMAIL, DEMO_BUYER_PASSWORD};

#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    products: Vec<Product>,
    reviews: Vec<Review>,
    carts: HashMap<UserId, Cart>,
    orders: Vec<Order>,
    order_items: Vec<OrderItem>,
    pricing: Vec<PricingEntry>,
    jobs: Vec<Job>,
    applications: Vec<JobApplication>,
    fabrication: Vec<FabricationRequest>,
    recycling: Vec<RecyclingRequest>,
    articles: Vec<Article>,
    messages: Vec<ContactMessage>,
    profiles: HashMap<UserId, Profile>,
    roles: Vec<(UserId, Role)>,
}

/// Process-local store implementing every repository port.
///
/// Clones share the same tables.
#[derive(Clone)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    identity: MemoryIdentityProvider,
    clock: Arc<dyn Clock>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty store with no accounts.
    pub fn new() -> Self {
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        Self {
            tables: Arc::new(Mutex::new(Tables::default())),
            identity: MemoryIdentityProvider::new(clock.clone()),
            clock,
        }
    }

    /// Store holding demo categories, products, and back-office content plus
    /// one admin and one buyer account.
    ///
    /// # Examples
    /// ```
    /// use storefront::outbound::memory::{DEMO_ADMIN_EMAIL, MemoryStore};
    ///
    /// let store = MemoryStore::seeded();
    /// assert!(store.identity().user_id_for(DEMO_ADMIN_EMAIL).is_some());
    /// ```
    pub fn seeded() -> Self {
        let store = Self::new();
        seed::populate(&store);
        store
    }

    /// Identity provider sharing this store's clock.
    pub fn identity(&self) -> &MemoryIdentityProvider {
        &self.identity
    }

    /// Grant `role` to `user_id`, replacing any role it held.
    pub fn grant(&self, user_id: &UserId, role: Role) {
        let mut tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        tables.roles.retain(|(holder, _)| holder != user_id);
        tables.roles.push((user_id.clone(), role));
    }

    /// Every port backed by this store.
    pub fn ports(&self) -> HttpStatePorts {
        let store = Arc::new(self.clone());
        HttpStatePorts {
            identity: Arc::new(self.identity.clone()),
            accounts: store.clone(),
            catalogue: store.clone(),
            carts: store.clone(),
            orders: store.clone(),
            pricing: store.clone(),
            careers: store.clone(),
            service_requests: store.clone(),
            news: store.clone(),
            contact: store.clone(),
            summary: store,
            clock: self.clock.clone(),
        }
    }

    fn with_tables<T>(
        &self,
        op: impl FnOnce(&mut Tables) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| RepositoryError::connection("memory store lock poisoned"))?;
        op(&mut tables)
    }
}

#[cfg(test)]
mod tests;
