//! Checkout endpoint.
//!
//! ```text
//! POST /api/v1/checkout  (optional Idempotency-Key: <uuid>)
//! ```

use actix_web::{HttpRequest, HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{AddressInput, CheckoutRequest, OrderDetails, ShippingAddress};
use crate::inbound::http::ApiResult;
use crate::inbound::http::idempotency::{extract_idempotency_key, map_idempotency_key_error};
use crate::inbound::http::schemas::{ErrorSchema, OrderDetailsSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Shipping address as submitted by the client.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    pub full_name: String,
    pub phone: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    /// Six digit PIN code.
    #[schema(example = "411001")]
    pub postal_code: String,
    /// Defaults to India.
    pub country: Option<String>,
}

impl TryFrom<&AddressRequest> for ShippingAddress {
    type Error = crate::domain::validation::ValidationError;

    fn try_from(value: &AddressRequest) -> Result<Self, Self::Error> {
        Self::try_from_input(AddressInput {
            full_name: &value.full_name,
            phone: &value.phone,
            line1: &value.line1,
            line2: value.line2.as_deref(),
            city: &value.city,
            state: &value.state,
            postal_code: &value.postal_code,
            country: value.country.as_deref(),
        })
    }
}

/// Body of `POST /api/v1/checkout`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutBody {
    pub shipping: AddressRequest,
    pub notes: Option<String>,
}

/// Placed order plus whether it was replayed from an earlier request.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    #[schema(value_type = OrderDetailsSchema)]
    pub order: OrderDetails,
    pub replayed: bool,
}

/// Turn the cart into an order and clear the cart.
///
/// # Idempotency
///
/// Clients may send an `Idempotency-Key` header (UUID) for safe retries:
///
/// - First request: `201 Created` with the new order.
/// - Retry with the same body: `200 OK` with the original order and
///   `replayed: true`.
/// - Same key with a different body: `409 Conflict`.
#[utoipa::path(
    post,
    path = "/api/v1/checkout",
    request_body = CheckoutBody,
    params(
        ("Idempotency-Key" = Option<String>, Header, description = "UUID for idempotent checkout")
    ),
    responses(
        (status = 201, description = "Order placed", body = CheckoutResponse),
        (status = 200, description = "Earlier order replayed", body = CheckoutResponse),
        (status = 400, description = "Empty cart or invalid address", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Idempotency key conflict or product unavailable", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "checkout"
)]
#[post("/checkout")]
pub async fn checkout(
    state: web::Data<HttpState>,
    session: SessionContext,
    request: HttpRequest,
    payload: web::Json<CheckoutBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let idempotency_key =
        extract_idempotency_key(request.headers()).map_err(map_idempotency_key_error)?;
    let CheckoutBody { shipping, notes } = payload.into_inner();
    let shipping = ShippingAddress::try_from(&shipping)?;

    let outcome = state
        .checkout
        .checkout(CheckoutRequest {
            user_id,
            shipping,
            notes: notes.filter(|n| !n.trim().is_empty()),
            idempotency_key,
        })
        .await?;

    let mut response = if outcome.replayed {
        HttpResponse::Ok()
    } else {
        HttpResponse::Created()
    };
    Ok(response.json(CheckoutResponse {
        order: outcome.order,
        replayed: outcome.replayed,
    }))
}
