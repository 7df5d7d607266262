//! Sign-in, the signed-in user's profile, and their own service requests.
//!
//! ```text
//! POST /api/v1/login {"email":"buyer@metals.example","password":"..."}
//! POST /api/v1/logout
//! GET  /api/v1/users/me
//! PUT  /api/v1/users/me/profile
//! GET  /api/v1/users/me/service-requests
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::service_requests::{FabricationRequest, RecyclingRequest};
use crate::domain::{
    CurrentUser, Error, LoginCredentials, LoginValidationError, Profile, ProfileUpdate, Role,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{
    ErrorSchema, FabricationRequestSchema, ProfileSchema, RecyclingRequestSchema, RoleSchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "buyer@metals.example")]
    pub email: String,
    pub password: String,
}

impl TryFrom<&LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: &LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Profile and roles of the signed-in user.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    #[schema(value_type = ProfileSchema)]
    pub profile: Profile,
    #[schema(value_type = Vec<RoleSchema>)]
    pub roles: Vec<Role>,
    pub is_admin: bool,
}

impl From<CurrentUser> for CurrentUserResponse {
    fn from(value: CurrentUser) -> Self {
        let is_admin = value.is_admin();
        Self {
            profile: value.profile,
            roles: value.roles,
            is_admin,
        }
    }
}

/// Editable profile fields. Absent or blank fields are cleared.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    #[schema(example = "27AAPFU0939F1ZV")]
    pub gst_number: Option<String>,
}

/// The signed-in user's fabrication and recycling requests.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnServiceRequests {
    #[schema(value_type = Vec<FabricationRequestSchema>)]
    pub fabrication: Vec<FabricationRequest>,
    #[schema(value_type = Vec<RecyclingRequestSchema>)]
    pub recycling: Vec<RecyclingRequest>,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::InvalidEmail => Error::invalid_request("email must be valid")
            .with_details(json!({ "field": "email", "code": "invalid_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Authenticate with the identity provider and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = CurrentUserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Identity provider unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(&payload.into_inner()).map_err(map_login_validation_error)?;
    let user = state.accounts.login(&credentials).await?;
    session.persist_user(&user.id)?;
    let current = state.accounts.current_user(&user.id).await?;
    Ok(HttpResponse::Ok().json(CurrentUserResponse::from(current)))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.forget();
    HttpResponse::NoContent().finish()
}

/// Profile and roles of the signed-in user.
///
/// An empty profile is created on first access.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = CurrentUserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let current = state.accounts.current_user(&user_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(CurrentUserResponse::from(current)))
}

/// Update the signed-in user's profile.
#[utoipa::path(
    put,
    path = "/api/v1/users/me/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = CurrentUserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
#[put("/users/me/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<CurrentUserResponse>> {
    let user_id = session.require_user_id()?;
    let ProfileRequest {
        full_name,
        company_name,
        phone,
        gst_number,
    } = payload.into_inner();
    let update = ProfileUpdate::try_new(
        full_name.as_deref(),
        company_name.as_deref(),
        phone.as_deref(),
        gst_number.as_deref(),
    )?;
    let current = state.accounts.update_profile(&user_id, update).await?;
    Ok(web::Json(current.into()))
}

/// Service requests the signed-in user submitted.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/service-requests",
    responses(
        (status = 200, description = "Own requests", body = OwnServiceRequests),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "ownServiceRequests"
)]
#[get("/users/me/service-requests")]
pub async fn own_service_requests(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let fabrication = state
        .service_requests
        .fabrication(Some(user_id.clone()))
        .await?;
    let recycling = state.service_requests.recycling(Some(user_id)).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(OwnServiceRequests {
            fabrication,
            recycling,
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{TestBed, login_as};
    use crate::outbound::memory::{
        DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD, DEMO_BUYER_EMAIL, DEMO_BUYER_PASSWORD,
    };
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(logout)
            .service(current_user)
            .service(update_profile)
            .service(own_service_requests);
    }

    #[rstest]
    #[case("not-an-email", "secret", "email", "invalid_email")]
    #[case("buyer@metals.example", "", "password", "empty_password")]
    #[actix_web::test]
    async fn login_rejects_malformed_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let bed = TestBed::seeded();
        let app = actix_test::init_service(bed.app(routes)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({ "email": email, "password": password }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["field"], field);
        assert_eq!(body["details"]["code"], code);
    }

    #[actix_web::test]
    async fn login_rejects_wrong_password() {
        let bed = TestBed::seeded();
        let app = actix_test::init_service(bed.app(routes)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({ "email": DEMO_BUYER_EMAIL, "password": "wrong" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(
            response
                .response()
                .cookies()
                .all(|cookie| cookie.name() != "session")
        );
    }

    #[actix_web::test]
    async fn me_reports_roles_in_camel_case() {
        let bed = TestBed::seeded();
        let app = actix_test::init_service(bed.app(routes)).await;
        let cookie = login_as(&app, DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("Cache-Control")
                .and_then(|v| v.to_str().ok()),
            Some("private, no-cache, must-revalidate")
        );
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["isAdmin"], true);
        assert_eq!(body["roles"], json!(["admin"]));
        assert_eq!(body["profile"]["email"], DEMO_ADMIN_EMAIL);
        assert!(body.get("is_admin").is_none());
    }

    #[actix_web::test]
    async fn me_requires_a_session() {
        let bed = TestBed::seeded();
        let app = actix_test::init_service(bed.app(routes)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/users/me").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn profile_update_round_trips() {
        let bed = TestBed::seeded();
        let app = actix_test::init_service(bed.app(routes)).await;
        let cookie = login_as(&app, DEMO_BUYER_EMAIL, DEMO_BUYER_PASSWORD).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/users/me/profile")
                .cookie(cookie.clone())
                .set_json(json!({ "fullName": "Asha Rao", "companyName": "Rao Fabricators" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let me = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body: Value = actix_test::read_body_json(me).await;
        assert_eq!(body["profile"]["fullName"], "Asha Rao");
        assert_eq!(body["profile"]["companyName"], "Rao Fabricators");
        assert_eq!(body["isAdmin"], false);
    }

    #[actix_web::test]
    async fn logout_clears_the_session() {
        let bed = TestBed::seeded();
        let app = actix_test::init_service(bed.app(routes)).await;
        let cookie = login_as(&app, DEMO_BUYER_EMAIL, DEMO_BUYER_PASSWORD).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let cleared = response
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("expired cookie");
        assert_eq!(cleared.value(), "");
    }
}
