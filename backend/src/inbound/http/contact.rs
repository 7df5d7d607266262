//! Contact form and the back-office inbox.
//!
//! ```text
//! POST   /api/v1/contact
//! GET    /api/v1/admin/messages
//! PUT    /api/v1/admin/messages/{id}/read
//! DELETE /api/v1/admin/messages/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::contact::{ContactDraft, ContactMessage};
use crate::domain::validation::ValidationError;
use crate::domain::{Error, MessageId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_admin;
use crate::inbound::http::schemas::{ContactMessageSchema, ErrorSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body of `POST /api/v1/contact`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl TryFrom<&ContactRequest> for ContactDraft {
    type Error = ValidationError;

    fn try_from(value: &ContactRequest) -> Result<Self, Self::Error> {
        Self::try_new(
            &value.name,
            &value.email,
            value.phone.as_deref(),
            &value.subject,
            &value.message,
        )
    }
}

fn missing(id: &MessageId) -> Error {
    Error::not_found(format!("message {id} not found"))
}

#[utoipa::path(
    post,
    path = "/api/v1/contact",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Message received", body = ContactMessageSchema),
        (status = 400, description = "Invalid message", body = ErrorSchema)
    ),
    tags = ["contact"],
    operation_id = "submitContactMessage"
)]
#[post("/contact")]
pub async fn submit_message(
    state: web::Data<HttpState>,
    payload: web::Json<ContactRequest>,
) -> ApiResult<HttpResponse> {
    let message = ContactDraft::try_from(&*payload)?.into_message(state.clock.utc());
    state.contact.insert(&message).await?;
    info!(message_id = %message.id, "contact message received");
    Ok(HttpResponse::Created().json(message))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/messages",
    responses(
        (status = 200, description = "Messages, newest first", body = [ContactMessageSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListMessages"
)]
#[get("/admin/messages")]
pub async fn admin_list_messages(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ContactMessage>>> {
    require_admin(&state, &session).await?;
    Ok(web::Json(state.contact.list().await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/messages/{id}/read",
    params(("id" = uuid::Uuid, Path, description = "Message id")),
    responses(
        (status = 204, description = "Marked read"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminMarkMessageRead"
)]
#[put("/admin/messages/{id}/read")]
pub async fn admin_mark_read(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<MessageId>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let id = path.into_inner();
    if !state.contact.mark_read(&id).await? {
        return Err(missing(&id));
    }
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/messages/{id}",
    params(("id" = uuid::Uuid, Path, description = "Message id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminDeleteMessage"
)]
#[delete("/admin/messages/{id}")]
pub async fn admin_delete_message(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<MessageId>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let id = path.into_inner();
    if !state.contact.delete(&id).await? {
        return Err(missing(&id));
    }
    info!(message_id = %id, "contact message deleted");
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{TestBed, login_as};
    use crate::outbound::memory::{DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(submit_message)
            .service(admin_list_messages)
            .service(admin_mark_read)
            .service(admin_delete_message);
    }

    fn message() -> Value {
        json!({
            "name": "Anil Desai",
            "email": "anil@example.com",
            "subject": "Bulk order",
            "message": "Please quote 20 t of TMT 12mm delivered to Nashik."
        })
    }

    #[rstest]
    #[case("email", json!("anil"))]
    #[case("subject", json!("   "))]
    #[case("phone", json!("call me"))]
    #[actix_web::test]
    async fn invalid_fields_are_reported(#[case] field: &str, #[case] value: Value) {
        let bed = TestBed::seeded();
        let app = actix_test::init_service(bed.app(routes)).await;
        let mut body = message();
        body[field] = value;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/contact")
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], field);
    }

    #[actix_web::test]
    async fn admin_reads_and_deletes_messages() {
        let bed = TestBed::seeded();
        let app = actix_test::init_service(bed.app(routes)).await;
        let submitted = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/contact")
                .set_json(message())
                .to_request(),
        )
        .await;
        assert_eq!(submitted.status(), StatusCode::CREATED);
        let submitted: Value = actix_test::read_body_json(submitted).await;
        assert_eq!(submitted["isRead"], false);
        let id = submitted["id"].as_str().expect("id").to_owned();
        let cookie = login_as(&app, DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD).await;

        let read = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/api/v1/admin/messages/{id}/read"))
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(read.status(), StatusCode::NO_CONTENT);

        let inbox = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/admin/messages")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        let inbox: Value = actix_test::read_body_json(inbox).await;
        assert_eq!(inbox[0]["isRead"], true);

        for expected in [StatusCode::NO_CONTENT, StatusCode::NOT_FOUND] {
            let deleted = actix_test::call_service(
                &app,
                actix_test::TestRequest::delete()
                    .uri(&format!("/api/v1/admin/messages/{id}"))
                    .cookie(cookie.clone())
                    .to_request(),
            )
            .await;
            assert_eq!(deleted.status(), expected);
        }
    }
}
