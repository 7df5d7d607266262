//! Route table for everything served under `/api/v1`.
//!
//! Handlers own their paths through the actix routing macros; this module
//! only decides which of them are mounted.

use actix_web::web;

use super::{
    admin, carbon, careers, cart, catalogue, checkout, contact, news, orders, pricing,
    service_requests, users,
};

/// Register every storefront handler on the supplied scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    accounts(cfg);
    shop(cfg);
    content(cfg);
    back_office(cfg);
}

fn accounts(cfg: &mut web::ServiceConfig) {
    cfg.service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(users::update_profile)
        .service(users::own_service_requests);
}

fn shop(cfg: &mut web::ServiceConfig) {
    cfg.service(catalogue::list_categories)
        .service(catalogue::list_products)
        .service(catalogue::get_product)
        .service(catalogue::list_reviews)
        .service(catalogue::submit_review)
        .service(cart::get_cart)
        .service(cart::add_item)
        .service(cart::set_quantity)
        .service(cart::remove_item)
        .service(cart::clear_cart)
        .service(checkout::checkout)
        .service(orders::list_own_orders)
        .service(orders::get_own_order)
        .service(pricing::list_pricing);
}

fn content(cfg: &mut web::ServiceConfig) {
    cfg.service(careers::list_jobs)
        .service(careers::get_job)
        .service(careers::apply)
        .service(service_requests::submit_fabrication)
        .service(service_requests::submit_recycling)
        .service(news::list_news)
        .service(news::get_article)
        .service(contact::submit_message)
        .service(carbon::estimate);
}

fn back_office(cfg: &mut web::ServiceConfig) {
    cfg.service(admin::list_users)
        .service(admin::set_role)
        .service(admin::delete_user)
        .service(admin::summary)
        .service(catalogue::admin_list_products)
        .service(catalogue::admin_create_product)
        .service(catalogue::admin_update_product)
        .service(catalogue::admin_delete_product)
        .service(orders::admin_list_orders)
        .service(orders::admin_get_order)
        .service(orders::admin_update_order_status)
        .service(pricing::admin_create_pricing)
        .service(pricing::admin_update_pricing)
        .service(pricing::admin_delete_pricing)
        .service(careers::admin_list_jobs)
        .service(careers::admin_create_job)
        .service(careers::admin_update_job)
        .service(careers::admin_delete_job)
        .service(careers::admin_list_applications)
        .service(careers::admin_update_application_status)
        .service(service_requests::admin_list_fabrication)
        .service(service_requests::admin_list_recycling)
        .service(service_requests::admin_update_service_request_status)
        .service(news::admin_list_news)
        .service(news::admin_create_article)
        .service(news::admin_update_article)
        .service(news::admin_delete_article)
        .service(contact::admin_list_messages)
        .service(contact::admin_mark_read)
        .service(contact::admin_delete_message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::error::{json_config, path_config, query_config};
    use crate::inbound::http::test_utils::{TestBed, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    #[rstest]
    #[case("/api/v1/products", StatusCode::OK)]
    #[case("/api/v1/categories", StatusCode::OK)]
    #[case("/api/v1/pricing", StatusCode::OK)]
    #[case("/api/v1/jobs", StatusCode::OK)]
    #[case("/api/v1/news", StatusCode::OK)]
    #[case("/api/v1/cart", StatusCode::UNAUTHORIZED)]
    #[case("/api/v1/orders", StatusCode::UNAUTHORIZED)]
    #[case("/api/v1/admin/summary", StatusCode::UNAUTHORIZED)]
    #[case("/api/v1/nope", StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn table_mounts_public_and_guarded_routes(
        #[case] uri: &str,
        #[case] expected: StatusCode,
    ) {
        let bed = TestBed::seeded();
        let app = actix_test::init_service(
            App::new()
                .app_data(bed.state.clone())
                .app_data(json_config())
                .app_data(path_config())
                .app_data(query_config())
                .wrap(test_session_middleware())
                .service(web::scope("/api/v1").configure(configure)),
        )
        .await;

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        assert_eq!(response.status(), expected);
    }
}
