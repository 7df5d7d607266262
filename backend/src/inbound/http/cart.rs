//! The signed-in user's cart.
//!
//! ```text
//! GET    /api/v1/cart
//! POST   /api/v1/cart/items {"productId":"...","quantity":5}
//! PUT    /api/v1/cart/items/{productId} {"quantity":3}
//! DELETE /api/v1/cart/items/{productId}
//! DELETE /api/v1/cart
//! ```
//!
//! Every call answers with the whole cart and its recomputed totals.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Cart, CartLine, Money, ProductId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{CartLineSchema, ErrorSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Cart lines with totals.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    #[schema(value_type = Vec<CartLineSchema>)]
    pub lines: Vec<CartLine>,
    /// Sum of line totals in paise.
    #[schema(value_type = i64)]
    pub total: Money,
    /// Sum of quantities.
    pub count: u64,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        let total = cart.total();
        let count = cart.count();
        Self {
            lines: cart.into_lines(),
            total,
            count,
        }
    }
}

/// Body of `POST /api/v1/cart/items`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    #[schema(value_type = uuid::Uuid)]
    pub product_id: ProductId,
    #[schema(minimum = 1)]
    pub quantity: u32,
}

/// Body of `PUT /api/v1/cart/items/{productId}`. Zero or less removes the line.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetQuantityRequest {
    pub quantity: i64,
}

fn cart_response(cart: Cart) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(CartResponse::from(cart))
}

/// The current cart.
#[utoipa::path(
    get,
    path = "/api/v1/cart",
    responses(
        (status = 200, description = "Cart", body = CartResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "getCart"
)]
#[get("/cart")]
pub async fn get_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    Ok(cart_response(state.cart.view(&user_id).await?))
}

/// Add an active product, merging with an existing line.
#[utoipa::path(
    post,
    path = "/api/v1/cart/items",
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 400, description = "Invalid quantity", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown or inactive product", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "addCartItem"
)]
#[post("/cart/items")]
pub async fn add_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AddItemRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let AddItemRequest {
        product_id,
        quantity,
    } = payload.into_inner();
    let cart = state.cart.add_item(&user_id, &product_id, quantity).await?;
    Ok(cart_response(cart))
}

/// Set a line's quantity.
#[utoipa::path(
    put,
    path = "/api/v1/cart/items/{product_id}",
    params(("product_id" = uuid::Uuid, Path, description = "Product in the cart")),
    request_body = SetQuantityRequest,
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 400, description = "Invalid quantity", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "setCartQuantity"
)]
#[put("/cart/items/{product_id}")]
pub async fn set_quantity(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ProductId>,
    payload: web::Json<SetQuantityRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let cart = state
        .cart
        .set_quantity(&user_id, &path.into_inner(), payload.quantity)
        .await?;
    Ok(cart_response(cart))
}

/// Remove a line. Removing an absent product is a no-op.
#[utoipa::path(
    delete,
    path = "/api/v1/cart/items/{product_id}",
    params(("product_id" = uuid::Uuid, Path, description = "Product in the cart")),
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "removeCartItem"
)]
#[delete("/cart/items/{product_id}")]
pub async fn remove_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ProductId>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let cart = state.cart.remove_item(&user_id, &path.into_inner()).await?;
    Ok(cart_response(cart))
}

/// Empty the cart.
#[utoipa::path(
    delete,
    path = "/api/v1/cart",
    responses(
        (status = 200, description = "Empty cart", body = CartResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "clearCart"
)]
#[delete("/cart")]
pub async fn clear_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    Ok(cart_response(state.cart.clear(&user_id).await?))
}
