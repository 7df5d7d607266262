//! Authorisation helpers used by HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! the session and role checks here. Roles are read on every call so a
//! revoked admin loses access on their next request.

use actix_web::web;

use crate::domain::UserId;

use super::ApiResult;
use super::session::SessionContext;
use super::state::HttpState;

/// Require a signed-in administrator.
///
/// Anonymous callers get `401 Unauthorized`; signed-in users without the
/// admin role get `403 Forbidden`.
pub async fn require_admin(
    state: &web::Data<HttpState>,
    session: &SessionContext,
) -> ApiResult<UserId> {
    let user_id = session.require_user_id()?;
    state.accounts.require_admin(&user_id).await?;
    Ok(user_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error;
    use crate::inbound::http::test_utils::{TestBed, login_as};
    use crate::outbound::memory::{
        DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD, DEMO_BUYER_EMAIL, DEMO_BUYER_PASSWORD,
    };
    use actix_web::http::StatusCode;
    use actix_web::{HttpResponse, test as actix_test};
    use rstest::rstest;

    async fn guarded(
        state: web::Data<HttpState>,
        session: SessionContext,
    ) -> Result<HttpResponse, Error> {
        let user_id = require_admin(&state, &session).await?;
        Ok(HttpResponse::Ok().body(user_id.to_string()))
    }

    #[rstest]
    #[case(None, StatusCode::UNAUTHORIZED)]
    #[case(Some((DEMO_BUYER_EMAIL, DEMO_BUYER_PASSWORD)), StatusCode::FORBIDDEN)]
    #[case(Some((DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD)), StatusCode::OK)]
    #[actix_web::test]
    async fn admin_guard_checks_session_and_role(
        #[case] credentials: Option<(&str, &str)>,
        #[case] expected: StatusCode,
    ) {
        let bed = TestBed::seeded();
        let app = actix_test::init_service(bed.app(|cfg| {
            cfg.route("/guarded", web::get().to(guarded));
        }))
        .await;

        let mut request = actix_test::TestRequest::get().uri("/api/v1/guarded");
        if let Some((email, password)) = credentials {
            request = request.cookie(login_as(&app, email, password).await);
        }
        let response = actix_test::call_service(&app, request.to_request()).await;
        assert_eq!(response.status(), expected);
    }

    #[actix_web::test]
    async fn revoked_admin_is_refused_immediately() {
        let bed = TestBed::seeded();
        let app = actix_test::init_service(bed.app(|cfg| {
            cfg.route("/guarded", web::get().to(guarded));
        }))
        .await;
        let cookie = login_as(&app, DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD).await;

        let admin = bed
            .store
            .identity()
            .user_id_for(DEMO_ADMIN_EMAIL)
            .expect("seeded admin");
        bed.store.grant(&admin, crate::domain::Role::Customer);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/guarded")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
