//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use serde_json::json;

use super::error::{json_config, path_config, query_config};
use super::state::HttpState;
use super::users::login;
use crate::outbound::memory::MemoryStore;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Seeded in-memory store plus the handler state wired over it.
pub struct TestBed {
    pub store: MemoryStore,
    pub state: web::Data<HttpState>,
}

impl TestBed {
    pub fn seeded() -> Self {
        let store = MemoryStore::seeded();
        let state = web::Data::new(HttpState::new(store.ports()));
        Self { store, state }
    }

    /// App serving `POST /api/v1/login` plus whatever `routes` registers
    /// under `/api/v1`.
    pub fn app<F>(
        &self,
        routes: F,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<F>,
    >
    where
        F: FnOnce(&mut web::ServiceConfig),
    {
        App::new()
            .app_data(self.state.clone())
            .app_data(json_config())
            .app_data(path_config())
            .app_data(query_config())
            .wrap(test_session_middleware())
            .service(web::scope("/api/v1").service(login).configure(routes))
    }
}

/// Sign in and return the session cookie.
pub async fn login_as<S>(app: &S, email: &str, password: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request(),
    )
    .await;
    assert!(
        response.status().is_success(),
        "login as {email} failed: {}",
        response.status()
    );
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}
