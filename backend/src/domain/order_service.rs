//! Order history for buyers and order management for staff.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::ports::OrderRepository;
use crate::domain::{Error, Order, OrderDetails, OrderId, OrderStatus, UserId};

/// Order queries and status updates.
#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    clock: Arc<dyn Clock>,
}

fn missing(id: &OrderId) -> Error {
    Error::not_found(format!("order {id} not found"))
}

impl OrderService {
    /// Create the service.
    pub fn new(orders: Arc<dyn OrderRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { orders, clock }
    }

    /// The user's orders, newest first.
    pub async fn list_own(&self, user_id: &UserId) -> Result<Vec<Order>, Error> {
        Ok(self.orders.list_for_user(user_id).await?)
    }

    /// One of the user's orders. Orders belonging to someone else are
    /// reported as missing.
    pub async fn get_own(&self, user_id: &UserId, id: &OrderId) -> Result<OrderDetails, Error> {
        self.orders
            .find_order(id)
            .await?
            .filter(|details| &details.order.user_id == user_id)
            .ok_or_else(|| missing(id))
    }

    /// Every order, optionally filtered by status.
    pub async fn list_all(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, Error> {
        Ok(self.orders.list_all(status).await?)
    }

    /// Any order by id.
    pub async fn get(&self, id: &OrderId) -> Result<OrderDetails, Error> {
        self.orders.find_order(id).await?.ok_or_else(|| missing(id))
    }

    /// Move an order forward (or cancel it).
    pub async fn update_status(&self, id: &OrderId, next: OrderStatus) -> Result<Order, Error> {
        let OrderDetails { mut order, .. } = self.get(id).await?;
        let previous = order.status;
        order.transition(next, self.clock.utc())?;
        self.orders
            .update_status(&order.id, order.status, order.updated_at)
            .await?;
        info!(order_id = %order.id, from = %previous, to = %next, "order status changed");
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockOrderRepository;
    use crate::domain::{
        AddressInput, ErrorCode, Money, ShippingAddress, order_number,
    };
    use chrono::Utc;
    use mockable::DefaultClock;
    use rstest::rstest;

    fn details(user_id: UserId, status: OrderStatus) -> OrderDetails {
        let id = OrderId::random();
        let now = Utc::now();
        OrderDetails {
            order: Order {
                id,
                order_number: order_number(&id, now),
                user_id,
                status,
                subtotal: Money::from_minor(1_000),
                tax: Money::from_minor(180),
                total: Money::from_minor(1_180),
                shipping: ShippingAddress::try_from_input(AddressInput {
                    full_name: "Asha Rao",
                    phone: "+91 98765 43210",
                    line1: "Plot 14",
                    city: "Pune",
                    state: "Maharashtra",
                    postal_code: "411019",
                    ..AddressInput::default()
                })
                .expect("valid address"),
                notes: None,
                idempotency_key: None,
                request_fingerprint: None,
                created_at: now,
                updated_at: now,
            },
            items: Vec::new(),
        }
    }

    fn service(orders: MockOrderRepository) -> OrderService {
        OrderService::new(Arc::new(orders), Arc::new(DefaultClock))
    }

    #[rstest]
    #[tokio::test]
    async fn get_own_hides_other_users_orders() {
        let found = details(UserId::random(), OrderStatus::Pending);
        let id = found.order.id;
        let mut orders = MockOrderRepository::new();
        orders.expect_find_order().return_once(move |_| Ok(Some(found)));

        let error = service(orders)
            .get_own(&UserId::random(), &id)
            .await
            .expect_err("not the owner");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn update_status_persists_forward_move() {
        let found = details(UserId::random(), OrderStatus::Confirmed);
        let id = found.order.id;
        let mut orders = MockOrderRepository::new();
        orders.expect_find_order().return_once(move |_| Ok(Some(found)));
        orders
            .expect_update_status()
            .withf(|_, status, _| *status == OrderStatus::Shipped)
            .times(1)
            .return_once(|_, _, _| Ok(()));

        let order = service(orders)
            .update_status(&id, OrderStatus::Shipped)
            .await
            .expect("forward move");
        assert_eq!(order.status, OrderStatus::Shipped);
    }

    #[rstest]
    #[tokio::test]
    async fn update_status_rejects_backward_move() {
        let found = details(UserId::random(), OrderStatus::Shipped);
        let id = found.order.id;
        let mut orders = MockOrderRepository::new();
        orders.expect_find_order().return_once(move |_| Ok(Some(found)));
        orders.expect_update_status().never();

        let error = service(orders)
            .update_status(&id, OrderStatus::Pending)
            .await
            .expect_err("backward move");
        assert_eq!(error.code(), ErrorCode::Conflict);
    }
}
