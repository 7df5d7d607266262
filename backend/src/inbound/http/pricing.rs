//! Metal pricing index.
//!
//! ```text
//! GET    /api/v1/pricing
//! POST   /api/v1/admin/pricing
//! PUT    /api/v1/admin/pricing/{id}
//! DELETE /api/v1/admin/pricing/{id}
//! ```
//!
//! The index is plain CRUD so handlers talk to the pricing port directly.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::pricing::{PricingDraft, PricingEntry};
use crate::domain::validation::ValidationError;
use crate::domain::{Error, PricingEntryId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_admin;
use crate::inbound::http::schemas::{ErrorSchema, PricingEntrySchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body of the admin pricing create and update endpoints.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    #[schema(example = "Copper")]
    pub metal: String,
    #[schema(example = "LME Grade A")]
    pub grade: String,
    /// Price in paise.
    #[schema(example = 78_450)]
    pub price_per_unit: i64,
    #[schema(example = "kg")]
    pub unit: String,
    #[serde(default)]
    pub change_percent: f64,
}

impl TryFrom<&PricingRequest> for PricingDraft {
    type Error = ValidationError;

    fn try_from(value: &PricingRequest) -> Result<Self, Self::Error> {
        Self::try_new(
            &value.metal,
            &value.grade,
            value.price_per_unit,
            &value.unit,
            value.change_percent,
        )
    }
}

fn missing(id: &PricingEntryId) -> Error {
    Error::not_found(format!("pricing entry {id} not found"))
}

#[utoipa::path(
    get,
    path = "/api/v1/pricing",
    responses((status = 200, description = "Index by metal then grade", body = [PricingEntrySchema])),
    tags = ["pricing"],
    operation_id = "listPricing"
)]
#[get("/pricing")]
pub async fn list_pricing(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PricingEntry>>> {
    Ok(web::Json(state.pricing.list().await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/pricing",
    request_body = PricingRequest,
    responses(
        (status = 201, description = "Created row", body = PricingEntrySchema),
        (status = 400, description = "Invalid row", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminCreatePricing"
)]
#[post("/admin/pricing")]
pub async fn admin_create_pricing(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PricingRequest>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let draft = PricingDraft::try_from(&*payload)?;
    let entry = PricingEntry::create(PricingEntryId::random(), draft, state.clock.utc());
    state.pricing.insert(&entry).await?;
    info!(pricing_id = %entry.id, metal = %entry.metal, "pricing entry created");
    Ok(HttpResponse::Created().json(entry))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/pricing/{id}",
    params(("id" = uuid::Uuid, Path, description = "Pricing row id")),
    request_body = PricingRequest,
    responses(
        (status = 200, description = "Updated row", body = PricingEntrySchema),
        (status = 400, description = "Invalid row", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminUpdatePricing"
)]
#[put("/admin/pricing/{id}")]
pub async fn admin_update_pricing(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<PricingEntryId>,
    payload: web::Json<PricingRequest>,
) -> ApiResult<web::Json<PricingEntry>> {
    require_admin(&state, &session).await?;
    let id = path.into_inner();
    let draft = PricingDraft::try_from(&*payload)?;
    if state.pricing.find(&id).await?.is_none() {
        return Err(missing(&id));
    }
    let entry = PricingEntry::create(id, draft, state.clock.utc());
    state.pricing.update(&entry).await?;
    Ok(web::Json(entry))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/pricing/{id}",
    params(("id" = uuid::Uuid, Path, description = "Pricing row id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminDeletePricing"
)]
#[delete("/admin/pricing/{id}")]
pub async fn admin_delete_pricing(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<PricingEntryId>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let id = path.into_inner();
    if !state.pricing.delete(&id).await? {
        return Err(missing(&id));
    }
    Ok(HttpResponse::NoContent().finish())
}
