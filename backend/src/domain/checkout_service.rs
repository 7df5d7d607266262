//! Checkout: turn the user's cart into an order.
//!
//! The order header and its items are written by two separate repository
//! calls. If the item write fails the header is deleted again; a header that
//! cannot be deleted is logged at `error` with its id so it can be cleaned up
//! by hand.
//!
//! A unique-index clash on the header insert is either a concurrent retry
//! under the same idempotency key, which replays the first order, or an
//! order-number collision, which is retried under a fresh id.
//!
//! Prices are re-read from the catalogue at checkout. A cart line whose
//! product has been removed or deactivated fails the checkout.

use std::sync::Arc;

use mockable::Clock;
use serde_json::json;
use tracing::{error, info, warn};

use crate::domain::ports::{CartRepository, CatalogueRepository, OrderRepository, RepositoryError};
use crate::domain::{
    Cart, CheckoutOutcome, CheckoutRequest, CheckoutTotals, Error, Order, OrderDetails, OrderId,
    OrderItem, OrderStatus, UserId, order_number,
};

/// Header inserts attempted before an order-number clash is reported.
const HEADER_INSERT_ATTEMPTS: u8 = 3;

/// Checkout service over the cart, catalogue, and order ports.
#[derive(Clone)]
pub struct CheckoutService {
    carts: Arc<dyn CartRepository>,
    catalogue: Arc<dyn CatalogueRepository>,
    orders: Arc<dyn OrderRepository>,
    clock: Arc<dyn Clock>,
}

impl CheckoutService {
    /// Create a checkout service.
    pub fn new(
        carts: Arc<dyn CartRepository>,
        catalogue: Arc<dyn CatalogueRepository>,
        orders: Arc<dyn OrderRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            carts,
            catalogue,
            orders,
            clock,
        }
    }

    /// Place an order for the user's cart and clear the cart.
    ///
    /// With an idempotency key, a repeated request returns the order created
    /// the first time (`replayed: true`); reusing the key for a different
    /// request body is a `conflict`.
    pub async fn checkout(&self, request: CheckoutRequest) -> Result<CheckoutOutcome, Error> {
        let fingerprint = request.fingerprint();
        let key = request.idempotency_key.as_ref().map(ToString::to_string);
        if let Some(outcome) = self
            .replay(&request.user_id, key.as_deref(), &fingerprint)
            .await?
        {
            return Ok(outcome);
        }

        let cart = self.carts.load(&request.user_id).await?;
        if cart.is_empty() {
            return Err(Error::invalid_request("cart is empty"));
        }

        let now = self.clock.utc();
        let order_id = OrderId::random();
        let mut items = self.price_items(&order_id, &cart).await?;
        let totals = CheckoutTotals::from_items(&items);
        let mut order = Order {
            id: order_id,
            order_number: order_number(&order_id, now),
            user_id: request.user_id.clone(),
            status: OrderStatus::Pending,
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            shipping: request.shipping,
            notes: request.notes,
            request_fingerprint: key.as_ref().map(|_| fingerprint.clone()),
            idempotency_key: key,
            created_at: now,
            updated_at: now,
        };

        if let Some(outcome) = self
            .insert_header(&mut order, &mut items, &fingerprint)
            .await?
        {
            return Ok(outcome);
        }
        if let Err(item_error) = self.orders.insert_items(&items).await {
            self.compensate(&order.id).await;
            return Err(item_error.into());
        }

        if let Err(clear_error) = self.carts.save(&order.user_id, &Cart::default()).await {
            warn!(
                order_id = %order.id,
                user_id = %order.user_id,
                error = %clear_error,
                "order placed but cart could not be cleared"
            );
        }

        info!(
            order_id = %order.id,
            order_number = %order.order_number,
            total = order.total.minor(),
            "order placed"
        );
        Ok(CheckoutOutcome {
            order: OrderDetails { order, items },
            replayed: false,
        })
    }

    /// Insert the order header. Returns the replayed order when a concurrent
    /// request with the same idempotency key won the race.
    async fn insert_header(
        &self,
        order: &mut Order,
        items: &mut [OrderItem],
        fingerprint: &str,
    ) -> Result<Option<CheckoutOutcome>, Error> {
        let mut attempt = 1;
        loop {
            let clash = match self.orders.insert_order(order).await {
                Ok(()) => return Ok(None),
                Err(RepositoryError::Conflict { message }) => message,
                Err(other) => return Err(other.into()),
            };
            if let Some(outcome) = self
                .replay(&order.user_id, order.idempotency_key.as_deref(), fingerprint)
                .await?
            {
                return Ok(Some(outcome));
            }
            if attempt >= HEADER_INSERT_ATTEMPTS {
                return Err(RepositoryError::conflict(clash).into());
            }
            attempt += 1;
            warn!(
                order_number = %order.order_number,
                error = %clash,
                "order header clashed; retrying under a new order number"
            );
            order.id = OrderId::random();
            order.order_number = order_number(&order.id, order.created_at);
            for item in items.iter_mut() {
                item.order_id = order.id;
            }
        }
    }

    async fn replay(
        &self,
        user_id: &UserId,
        key: Option<&str>,
        fingerprint: &str,
    ) -> Result<Option<CheckoutOutcome>, Error> {
        let Some(key) = key else {
            return Ok(None);
        };
        let Some(existing) = self
            .orders
            .find_by_idempotency_key(user_id, key)
            .await?
        else {
            return Ok(None);
        };
        if existing.order.request_fingerprint.as_deref() != Some(fingerprint) {
            return Err(Error::conflict(
                "idempotency key was already used for a different checkout",
            )
            .with_details(json!({ "idempotencyKey": key })));
        }
        Ok(Some(CheckoutOutcome {
            order: existing,
            replayed: true,
        }))
    }

    async fn price_items(&self, order_id: &OrderId, cart: &Cart) -> Result<Vec<OrderItem>, Error> {
        let mut items = Vec::with_capacity(cart.lines().len());
        for line in cart.lines() {
            let product = self
                .catalogue
                .find_product(&line.product_id)
                .await?
                .filter(|product| product.is_active)
                .ok_or_else(|| {
                    Error::conflict(format!("{} is no longer available", line.name))
                        .with_details(json!({ "productId": line.product_id }))
                })?;
            items.push(OrderItem {
                order_id: *order_id,
                product_id: product.id,
                product_name: product.name,
                unit_price: product.price,
                quantity: line.quantity,
                unit: product.unit,
                line_total: product.price.times(line.quantity),
            });
        }
        Ok(items)
    }

    async fn compensate(&self, order_id: &OrderId) {
        match self.orders.delete_order(order_id).await {
            Ok(()) => warn!(%order_id, "order items failed to save; order removed"),
            Err(delete_error) => error!(
                %order_id,
                error = %delete_error,
                "order items failed to save and the order could not be removed; orphaned order"
            ),
        }
    }
}

#[cfg(test)]
#[path = "checkout_service_tests.rs"]
mod tests;
