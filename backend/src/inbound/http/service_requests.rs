//! Fabrication and recycling request intake and review.
//!
//! ```text
//! POST /api/v1/service-requests/fabrication
//! POST /api/v1/service-requests/recycling
//! GET  /api/v1/admin/service-requests/fabrication
//! GET  /api/v1/admin/service-requests/recycling
//! PUT  /api/v1/admin/service-requests/{kind}/{id}/status {"status":"quoted"}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::service_requests::{
    FabricationDraft, FabricationRequest, RecyclingDraft, RecyclingRequest, Requester,
    ServiceRequestKind,
};
use crate::domain::validation::ValidationError;
use crate::domain::{RequestStatus, ServiceRequestId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_admin;
use crate::inbound::http::orders::StatusRequest;
use crate::inbound::http::schemas::{
    ErrorSchema, FabricationRequestSchema, RecyclingRequestSchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Contact fields shared by both request bodies.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequesterFields {
    pub name: String,
    pub company: Option<String>,
    pub email: String,
    pub phone: String,
}

impl TryFrom<&RequesterFields> for Requester {
    type Error = ValidationError;

    fn try_from(value: &RequesterFields) -> Result<Self, Self::Error> {
        Self::try_new(
            &value.name,
            value.company.as_deref(),
            &value.email,
            &value.phone,
        )
    }
}

/// Body of `POST /api/v1/service-requests/fabrication`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FabricationBody {
    #[serde(flatten)]
    pub requester: RequesterFields,
    #[schema(example = "MS plate 10mm")]
    pub material: String,
    #[schema(example = "Laser cutting")]
    pub service_type: String,
    #[schema(example = "40 pcs")]
    pub quantity: String,
    pub specifications: Option<String>,
}

impl TryFrom<&FabricationBody> for FabricationDraft {
    type Error = ValidationError;

    fn try_from(value: &FabricationBody) -> Result<Self, Self::Error> {
        Self::try_new(
            Requester::try_from(&value.requester)?,
            &value.material,
            &value.service_type,
            &value.quantity,
            value.specifications.as_deref(),
        )
    }
}

/// Body of `POST /api/v1/service-requests/recycling`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecyclingBody {
    #[serde(flatten)]
    pub requester: RequesterFields,
    #[schema(example = "Copper scrap")]
    pub material_type: String,
    #[schema(example = "2 tonnes")]
    pub estimated_quantity: String,
    pub pickup_address: String,
}

impl TryFrom<&RecyclingBody> for RecyclingDraft {
    type Error = ValidationError;

    fn try_from(value: &RecyclingBody) -> Result<Self, Self::Error> {
        Self::try_new(
            Requester::try_from(&value.requester)?,
            &value.material_type,
            &value.estimated_quantity,
            &value.pickup_address,
        )
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/service-requests/fabrication",
    request_body = FabricationBody,
    responses(
        (status = 201, description = "Request received", body = FabricationRequestSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["service-requests"],
    operation_id = "submitFabricationRequest"
)]
#[post("/service-requests/fabrication")]
pub async fn submit_fabrication(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<FabricationBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.user_id()?;
    let draft = FabricationDraft::try_from(&*payload)?;
    let request = state
        .service_requests
        .submit_fabrication(user_id, draft)
        .await?;
    Ok(HttpResponse::Created().json(request))
}

#[utoipa::path(
    post,
    path = "/api/v1/service-requests/recycling",
    request_body = RecyclingBody,
    responses(
        (status = 201, description = "Request received", body = RecyclingRequestSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["service-requests"],
    operation_id = "submitRecyclingRequest"
)]
#[post("/service-requests/recycling")]
pub async fn submit_recycling(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RecyclingBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.user_id()?;
    let draft = RecyclingDraft::try_from(&*payload)?;
    let request = state
        .service_requests
        .submit_recycling(user_id, draft)
        .await?;
    Ok(HttpResponse::Created().json(request))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/service-requests/fabrication",
    responses(
        (status = 200, description = "Fabrication requests, newest first", body = [FabricationRequestSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListFabricationRequests"
)]
#[get("/admin/service-requests/fabrication")]
pub async fn admin_list_fabrication(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<FabricationRequest>>> {
    require_admin(&state, &session).await?;
    Ok(web::Json(state.service_requests.fabrication(None).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/service-requests/recycling",
    responses(
        (status = 200, description = "Recycling requests, newest first", body = [RecyclingRequestSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListRecyclingRequests"
)]
#[get("/admin/service-requests/recycling")]
pub async fn admin_list_recycling(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<RecyclingRequest>>> {
    require_admin(&state, &session).await?;
    Ok(web::Json(state.service_requests.recycling(None).await?))
}

/// Move a request along `new → reviewing → quoted → accepted → completed`.
#[utoipa::path(
    put,
    path = "/api/v1/admin/service-requests/{kind}/{id}/status",
    params(
        ("kind" = String, Path, description = "`fabrication` or `recycling`"),
        ("id" = uuid::Uuid, Path, description = "Request id")
    ),
    request_body = StatusRequest,
    responses(
        (status = 204, description = "Status changed"),
        (status = 400, description = "Unknown kind or status", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Transition not allowed", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminUpdateServiceRequestStatus"
)]
#[put("/admin/service-requests/{kind}/{id}/status")]
pub async fn admin_update_service_request_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(ServiceRequestKind, ServiceRequestId)>,
    payload: web::Json<StatusRequest>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let (kind, id) = path.into_inner();
    let next: RequestStatus = payload.status.parse()?;
    state.service_requests.update_status(kind, &id, next).await?;
    Ok(HttpResponse::NoContent().finish())
}
