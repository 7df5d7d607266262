//! Job postings and applications.
//!
//! ```text
//! GET    /api/v1/jobs
//! GET    /api/v1/jobs/{id}
//! POST   /api/v1/jobs/{id}/applications
//! GET    /api/v1/admin/jobs
//! POST   /api/v1/admin/jobs
//! PUT    /api/v1/admin/jobs/{id}
//! DELETE /api/v1/admin/jobs/{id}
//! GET    /api/v1/admin/applications?jobId=...
//! PUT    /api/v1/admin/applications/{id}/status {"status":"reviewing"}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::careers::{ApplicationDraft, Job, JobApplication, JobDraft, JobInput};
use crate::domain::validation::ValidationError;
use crate::domain::{ApplicationId, JobId, RequestStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_admin;
use crate::inbound::http::orders::StatusRequest;
use crate::inbound::http::schemas::{ErrorSchema, JobApplicationSchema, JobSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body of the admin job create and update endpoints.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    pub title: String,
    pub department: String,
    pub location: String,
    #[schema(example = "Full-time")]
    pub employment_type: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl TryFrom<&JobRequest> for JobDraft {
    type Error = ValidationError;

    fn try_from(value: &JobRequest) -> Result<Self, Self::Error> {
        Self::try_from_input(JobInput {
            title: &value.title,
            department: &value.department,
            location: &value.location,
            employment_type: &value.employment_type,
            description: &value.description,
            requirements: &value.requirements,
            is_active: value.is_active,
        })
    }
}

/// Body of `POST /api/v1/jobs/{id}/applications`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub cover_letter: Option<String>,
    /// Link to a hosted CV.
    pub resume_url: Option<String>,
}

impl TryFrom<&ApplicationRequest> for ApplicationDraft {
    type Error = ValidationError;

    fn try_from(value: &ApplicationRequest) -> Result<Self, Self::Error> {
        Self::try_new(
            &value.full_name,
            &value.email,
            &value.phone,
            value.cover_letter.as_deref(),
            value.resume_url.as_deref(),
        )
    }
}

/// Query string of `GET /api/v1/admin/applications`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ApplicationQuery {
    /// Only applications to this job.
    #[param(value_type = Option<uuid::Uuid>)]
    pub job_id: Option<JobId>,
}

#[utoipa::path(
    get,
    path = "/api/v1/jobs",
    responses((status = 200, description = "Open postings", body = [JobSchema])),
    tags = ["careers"],
    operation_id = "listJobs"
)]
#[get("/jobs")]
pub async fn list_jobs(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Job>>> {
    Ok(web::Json(state.careers.jobs(false).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/jobs/{id}",
    params(("id" = uuid::Uuid, Path, description = "Job id")),
    responses(
        (status = 200, description = "Open posting", body = JobSchema),
        (status = 404, description = "Not found or closed", body = ErrorSchema)
    ),
    tags = ["careers"],
    operation_id = "getJob"
)]
#[get("/jobs/{id}")]
pub async fn get_job(
    state: web::Data<HttpState>,
    path: web::Path<JobId>,
) -> ApiResult<web::Json<Job>> {
    Ok(web::Json(state.careers.open_job(&path.into_inner()).await?))
}

/// Apply to an open posting. A signed-in applicant is linked to the record.
#[utoipa::path(
    post,
    path = "/api/v1/jobs/{id}/applications",
    params(("id" = uuid::Uuid, Path, description = "Job id")),
    request_body = ApplicationRequest,
    responses(
        (status = 201, description = "Application received", body = JobApplicationSchema),
        (status = 400, description = "Invalid application", body = ErrorSchema),
        (status = 404, description = "Not found or closed", body = ErrorSchema)
    ),
    tags = ["careers"],
    operation_id = "applyForJob"
)]
#[post("/jobs/{id}/applications")]
pub async fn apply(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<JobId>,
    payload: web::Json<ApplicationRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.user_id()?;
    let draft = ApplicationDraft::try_from(&*payload)?;
    let application = state
        .careers
        .apply(&path.into_inner(), user_id, draft)
        .await?;
    Ok(HttpResponse::Created().json(application))
}

/// Every posting, open or closed.
#[utoipa::path(
    get,
    path = "/api/v1/admin/jobs",
    responses(
        (status = 200, description = "Postings", body = [JobSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListJobs"
)]
#[get("/admin/jobs")]
pub async fn admin_list_jobs(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Job>>> {
    require_admin(&state, &session).await?;
    Ok(web::Json(state.careers.jobs(true).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/jobs",
    request_body = JobRequest,
    responses(
        (status = 201, description = "Created posting", body = JobSchema),
        (status = 400, description = "Invalid posting", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminCreateJob"
)]
#[post("/admin/jobs")]
pub async fn admin_create_job(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<JobRequest>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let draft = JobDraft::try_from(&*payload)?;
    Ok(HttpResponse::Created().json(state.careers.create_job(draft).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/jobs/{id}",
    params(("id" = uuid::Uuid, Path, description = "Job id")),
    request_body = JobRequest,
    responses(
        (status = 200, description = "Updated posting", body = JobSchema),
        (status = 400, description = "Invalid posting", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminUpdateJob"
)]
#[put("/admin/jobs/{id}")]
pub async fn admin_update_job(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<JobId>,
    payload: web::Json<JobRequest>,
) -> ApiResult<web::Json<Job>> {
    require_admin(&state, &session).await?;
    let draft = JobDraft::try_from(&*payload)?;
    Ok(web::Json(
        state.careers.update_job(&path.into_inner(), draft).await?,
    ))
}

/// Delete a posting and its applications.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/jobs/{id}",
    params(("id" = uuid::Uuid, Path, description = "Job id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminDeleteJob"
)]
#[delete("/admin/jobs/{id}")]
pub async fn admin_delete_job(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<JobId>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    state.careers.delete_job(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/applications",
    params(ApplicationQuery),
    responses(
        (status = 200, description = "Applications, newest first", body = [JobApplicationSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListApplications"
)]
#[get("/admin/applications")]
pub async fn admin_list_applications(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ApplicationQuery>,
) -> ApiResult<web::Json<Vec<JobApplication>>> {
    require_admin(&state, &session).await?;
    Ok(web::Json(state.careers.applications(query.job_id).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/applications/{id}/status",
    params(("id" = uuid::Uuid, Path, description = "Application id")),
    request_body = StatusRequest,
    responses(
        (status = 200, description = "Updated application", body = JobApplicationSchema),
        (status = 400, description = "Unknown status", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Transition not allowed", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminUpdateApplicationStatus"
)]
#[put("/admin/applications/{id}/status")]
pub async fn admin_update_application_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ApplicationId>,
    payload: web::Json<StatusRequest>,
) -> ApiResult<web::Json<JobApplication>> {
    require_admin(&state, &session).await?;
    let next: RequestStatus = payload.status.parse()?;
    Ok(web::Json(
        state
            .careers
            .update_application_status(&path.into_inner(), next)
            .await?,
    ))
}
