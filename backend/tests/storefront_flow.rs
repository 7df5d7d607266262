//! End-to-end buyer and back-office flows over the seeded in-memory store.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use storefront::inbound::http::error::{json_config, path_config, query_config};
use storefront::inbound::http::routes;
use storefront::inbound::http::state::HttpState;
use storefront::outbound::memory::{
    DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD, DEMO_BUYER_EMAIL, DEMO_BUYER_PASSWORD, MemoryStore,
};

async fn storefront_app() -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
{
    let state = web::Data::new(HttpState::new(MemoryStore::seeded().ports()));
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    actix_test::init_service(
        App::new()
            .app_data(state)
            .app_data(json_config())
            .app_data(path_config())
            .app_data(query_config())
            .wrap(session)
            .service(web::scope("/api/v1").configure(routes::configure)),
    )
    .await
}

async fn login<S>(app: &S, email: &str, password: &str) -> Cookie<'static>
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
    assert_eq!(response.status(), StatusCode::OK, "login for {email}");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie issued")
}

async fn product_id_by_slug<S>(app: &S, slug: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let products: Value = actix_test::call_and_read_body_json(
        app,
        actix_test::TestRequest::get()
            .uri("/api/v1/products")
            .to_request(),
    )
    .await;
    products
        .as_array()
        .expect("product list")
        .iter()
        .find(|product| product["slug"] == slug)
        .and_then(|product| product["id"].as_str())
        .map(str::to_owned)
        .expect("seeded product present")
}

fn shipping() -> Value {
    json!({
        "fullName": "Asha Rao",
        "phone": "+91 98765 43210",
        "line1": "Plot 7, MIDC Bhosari",
        "city": "Pune",
        "state": "Maharashtra",
        "postalCode": "411026"
    })
}

#[actix_web::test]
async fn buyer_checks_out_and_admin_confirms_the_order() {
    let app = storefront_app().await;
    let buyer = login(&app, DEMO_BUYER_EMAIL, DEMO_BUYER_PASSWORD).await;
    let product_id = product_id_by_slug(&app, "mild-steel-plate").await;

    let cart: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/cart/items")
            .cookie(buyer.clone())
            .set_json(json!({ "productId": product_id, "quantity": 5 }))
            .to_request(),
    )
    .await;
    assert_eq!(cart["count"], 5);
    let cart_total = cart["total"].as_i64().expect("cart total");

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/checkout")
            .cookie(buyer.clone())
            .set_json(json!({ "shipping": shipping(), "notes": "Deliver to gate 2" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let placed: Value = actix_test::read_body_json(response).await;
    let order = &placed["order"]["order"];
    assert_eq!(placed["replayed"], false);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["subtotal"].as_i64(), Some(cart_total));
    assert_eq!(
        order["total"].as_i64(),
        Some(cart_total + order["tax"].as_i64().expect("tax"))
    );
    let order_id = order["id"].as_str().expect("order id").to_owned();

    let emptied: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/cart")
            .cookie(buyer.clone())
            .to_request(),
    )
    .await;
    assert_eq!(emptied["count"], 0);

    let admin = login(&app, DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD).await;
    let summary: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/admin/summary")
            .cookie(admin.clone())
            .to_request(),
    )
    .await;
    assert!(summary["pendingOrders"].as_u64().expect("pending count") >= 1);

    let confirmed: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/admin/orders/{order_id}/status"))
            .cookie(admin)
            .set_json(json!({ "status": "confirmed" }))
            .to_request(),
    )
    .await;
    assert_eq!(confirmed["status"], "confirmed");

    let own: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/orders")
            .cookie(buyer)
            .to_request(),
    )
    .await;
    let listed = own.as_array().expect("own orders");
    assert!(
        listed
            .iter()
            .any(|o| o["id"] == order_id.as_str() && o["status"] == "confirmed")
    );
}

#[actix_web::test]
async fn checkout_with_an_empty_cart_is_rejected() {
    let app = storefront_app().await;
    let buyer = login(&app, DEMO_BUYER_EMAIL, DEMO_BUYER_PASSWORD).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/checkout")
            .cookie(buyer)
            .set_json(json!({ "shipping": shipping() }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[case("/api/v1/admin/summary")]
#[case("/api/v1/admin/orders")]
#[case("/api/v1/admin/users")]
#[case("/api/v1/admin/messages")]
#[actix_web::test]
async fn buyers_are_kept_out_of_the_back_office(#[case] uri: &str) {
    let app = storefront_app().await;
    let buyer = login(&app, DEMO_BUYER_EMAIL, DEMO_BUYER_PASSWORD).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(uri)
            .cookie(buyer)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn contact_message_reaches_the_admin_inbox() {
    let app = storefront_app().await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/contact")
            .set_json(json!({
                "name": "Vikram Shah",
                "email": "vikram@fabworks.example",
                "subject": "Bulk rebar quote",
                "message": "Need 20 tonnes of 12mm TMT delivered to Nashik."
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let admin = login(&app, DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD).await;
    let inbox: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/admin/messages")
            .cookie(admin)
            .to_request(),
    )
    .await;
    assert!(
        inbox
            .as_array()
            .expect("messages")
            .iter()
            .any(|m| m["subject"] == "Bulk rebar quote" && m["isRead"] == false)
    );
}
