//! Back-office user management and dashboard counts.
//!
//! ```text
//! GET    /api/v1/admin/users
//! PUT    /api/v1/admin/users/{id}/role {"role":"admin"}
//! DELETE /api/v1/admin/users/{id}
//! GET    /api/v1/admin/summary
//! ```

use actix_web::{HttpResponse, delete, get, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Account, AdminSummary, Role, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_admin;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{AccountSchema, AdminSummarySchema, ErrorSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body of `PUT /api/v1/admin/users/{id}/role`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
    #[schema(example = "admin")]
    pub role: String,
}

/// Identity provider accounts with the roles they hold.
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    responses(
        (status = 200, description = "Accounts", body = [AccountSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Identity provider unavailable", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListUsers"
)]
#[get("/admin/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Account>>> {
    require_admin(&state, &session).await?;
    Ok(web::Json(state.accounts.list_accounts().await?))
}

/// Replace a user's role. Administrators cannot demote themselves.
#[utoipa::path(
    put,
    path = "/api/v1/admin/users/{id}/role",
    params(("id" = uuid::Uuid, Path, description = "User id")),
    request_body = RoleRequest,
    responses(
        (status = 204, description = "Role changed"),
        (status = 400, description = "Unknown role", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 409, description = "Self-demotion refused", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminSetUserRole"
)]
#[put("/admin/users/{id}/role")]
pub async fn set_role(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<UserId>,
    payload: web::Json<RoleRequest>,
) -> ApiResult<HttpResponse> {
    let actor = require_admin(&state, &session).await?;
    let role: Role = payload.role.parse()?;
    state
        .accounts
        .set_role(&actor, &path.into_inner(), role)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete an account at the identity provider along with its local data.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/users/{id}",
    params(("id" = uuid::Uuid, Path, description = "User id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Self-deletion refused", body = ErrorSchema),
        (status = 503, description = "Identity provider unavailable", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminDeleteUser"
)]
#[delete("/admin/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<UserId>,
) -> ApiResult<HttpResponse> {
    let actor = require_admin(&state, &session).await?;
    state
        .accounts
        .delete_user(&actor, &path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Badge counts for the back-office navigation. Clients poll this.
#[utoipa::path(
    get,
    path = "/api/v1/admin/summary",
    responses(
        (status = 200, description = "Counts", body = AdminSummarySchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminSummary"
)]
#[get("/admin/summary")]
pub async fn summary(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let counts: AdminSummary = state.summary.summary().await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(counts))
}
