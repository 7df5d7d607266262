//! Order history for buyers and order management for the back office.
//!
//! ```text
//! GET /api/v1/orders
//! GET /api/v1/orders/{id}
//! GET /api/v1/admin/orders?status=pending
//! GET /api/v1/admin/orders/{id}
//! PUT /api/v1/admin/orders/{id}/status {"status":"confirmed"}
//! ```

use actix_web::{HttpResponse, get, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Order, OrderId, OrderStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_admin;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{ErrorSchema, OrderDetailsSchema, OrderSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query string of `GET /api/v1/admin/orders`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderListQuery {
    /// Only orders in this status.
    #[param(example = "pending")]
    pub status: Option<String>,
}

/// Body of `PUT /api/v1/admin/orders/{id}/status`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    #[schema(example = "confirmed")]
    pub status: String,
}

/// The signed-in user's orders, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    responses(
        (status = 200, description = "Own orders", body = [OrderSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "listOwnOrders"
)]
#[get("/orders")]
pub async fn list_own_orders(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let orders = state.orders.list_own(&user_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(orders))
}

/// One of the signed-in user's orders with its items.
///
/// Someone else's order is reported as missing.
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    params(("id" = uuid::Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order", body = OrderDetailsSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "getOwnOrder"
)]
#[get("/orders/{id}")]
pub async fn get_own_order(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<OrderId>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let details = state.orders.get_own(&user_id, &path.into_inner()).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(details))
}

/// Every order, optionally filtered by status.
#[utoipa::path(
    get,
    path = "/api/v1/admin/orders",
    params(OrderListQuery),
    responses(
        (status = 200, description = "Orders", body = [OrderSchema]),
        (status = 400, description = "Unknown status", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListOrders"
)]
#[get("/admin/orders")]
pub async fn admin_list_orders(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<OrderListQuery>,
) -> ApiResult<web::Json<Vec<Order>>> {
    require_admin(&state, &session).await?;
    let status = query
        .status
        .as_deref()
        .map(str::parse::<OrderStatus>)
        .transpose()?;
    Ok(web::Json(state.orders.list_all(status).await?))
}

/// Any order with its items.
#[utoipa::path(
    get,
    path = "/api/v1/admin/orders/{id}",
    params(("id" = uuid::Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order", body = OrderDetailsSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminGetOrder"
)]
#[get("/admin/orders/{id}")]
pub async fn admin_get_order(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<OrderId>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    Ok(HttpResponse::Ok().json(state.orders.get(&path.into_inner()).await?))
}

/// Move an order forward or cancel it.
#[utoipa::path(
    put,
    path = "/api/v1/admin/orders/{id}/status",
    params(("id" = uuid::Uuid, Path, description = "Order id")),
    request_body = StatusRequest,
    responses(
        (status = 200, description = "Updated order", body = OrderSchema),
        (status = 400, description = "Unknown status", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Transition not allowed", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminUpdateOrderStatus"
)]
#[put("/admin/orders/{id}/status")]
pub async fn admin_update_order_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<OrderId>,
    payload: web::Json<StatusRequest>,
) -> ApiResult<web::Json<Order>> {
    require_admin(&state, &session).await?;
    let next: OrderStatus = payload.status.parse()?;
    let order = state
        .orders
        .update_status(&path.into_inner(), next)
        .await?;
    Ok(web::Json(order))
}
