//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every storefront endpoint, the schema wrappers from
//! [`crate::inbound::http::schemas`], and the session cookie security scheme.
//! The document is served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{
    AccountSchema, AdminSummarySchema, ArticleSchema, CarbonEstimateSchema, CartLineSchema,
    CategorySchema, ContactMessageSchema, ErrorCodeSchema, ErrorSchema,
    FabricationRequestSchema, JobApplicationSchema, JobSchema, OrderDetailsSchema,
    OrderItemSchema, OrderSchema, OrderStatusSchema, PricingEntrySchema, ProductSchema,
    ProfileSchema, RecyclingRequestSchema, RequestStatusSchema, ReviewSchema, RoleSchema,
    ShippingAddressSchema, UnitSchema,
};
use crate::inbound::http::{
    admin, carbon, careers, cart, catalogue, checkout, contact, health, news, orders, pricing,
    service_requests, users,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the storefront REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Storefront API",
        description = "Catalogue, cart, checkout and back-office operations for a metals supplier.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        users::login,
        users::logout,
        users::current_user,
        users::update_profile,
        users::own_service_requests,
        catalogue::list_categories,
        catalogue::list_products,
        catalogue::get_product,
        catalogue::list_reviews,
        catalogue::submit_review,
        catalogue::admin_list_products,
        catalogue::admin_create_product,
        catalogue::admin_update_product,
        catalogue::admin_delete_product,
        cart::get_cart,
        cart::add_item,
        cart::set_quantity,
        cart::remove_item,
        cart::clear_cart,
        checkout::checkout,
        orders::list_own_orders,
        orders::get_own_order,
        orders::admin_list_orders,
        orders::admin_get_order,
        orders::admin_update_order_status,
        pricing::list_pricing,
        pricing::admin_create_pricing,
        pricing::admin_update_pricing,
        pricing::admin_delete_pricing,
        careers::list_jobs,
        careers::get_job,
        careers::apply,
        careers::admin_list_jobs,
        careers::admin_create_job,
        careers::admin_update_job,
        careers::admin_delete_job,
        careers::admin_list_applications,
        careers::admin_update_application_status,
        service_requests::submit_fabrication,
        service_requests::submit_recycling,
        service_requests::admin_list_fabrication,
        service_requests::admin_list_recycling,
        service_requests::admin_update_service_request_status,
        news::list_news,
        news::get_article,
        news::admin_list_news,
        news::admin_create_article,
        news::admin_update_article,
        news::admin_delete_article,
        contact::submit_message,
        contact::admin_list_messages,
        contact::admin_mark_read,
        contact::admin_delete_message,
        carbon::estimate,
        admin::list_users,
        admin::set_role,
        admin::delete_user,
        admin::summary,
        health::ready,
        health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UnitSchema,
        OrderStatusSchema,
        RequestStatusSchema,
        RoleSchema,
        CategorySchema,
        ProductSchema,
        ReviewSchema,
        CartLineSchema,
        ShippingAddressSchema,
        OrderSchema,
        OrderItemSchema,
        OrderDetailsSchema,
        ProfileSchema,
        AccountSchema,
        PricingEntrySchema,
        JobSchema,
        JobApplicationSchema,
        FabricationRequestSchema,
        RecyclingRequestSchema,
        ArticleSchema,
        ContactMessageSchema,
        CarbonEstimateSchema,
        AdminSummarySchema,
    )),
    tags(
        (name = "users", description = "Sign-in, session and profile"),
        (name = "catalogue", description = "Categories, products and reviews"),
        (name = "cart", description = "Per-buyer shopping cart"),
        (name = "orders", description = "Checkout and order history"),
        (name = "pricing", description = "Published metal price list"),
        (name = "careers", description = "Job listings and applications"),
        (name = "service-requests", description = "Fabrication and recycling enquiries"),
        (name = "news", description = "Company news articles"),
        (name = "contact", description = "Contact form messages"),
        (name = "carbon", description = "Recycling carbon savings estimate"),
        (name = "admin", description = "Account administration and dashboard"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", "code")]
    #[case("Error", "message")]
    #[case("Product", "price")]
    #[case("Product", "stockQuantity")]
    #[case("Order", "orderNumber")]
    #[case("AdminSummary", "pendingOrders")]
    fn registered_schemas_expose_fields(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas
            .get(name)
            .unwrap_or_else(|| panic!("{name} schema registered"));

        assert_object_schema_has_field(schema, field);
    }

    #[test]
    fn core_routes_are_documented_under_the_api_prefix() {
        let doc = ApiDoc::openapi();
        let api_paths: Vec<_> = doc
            .paths
            .paths
            .keys()
            .filter(|path| path.starts_with("/api/v1/"))
            .collect();

        assert!(api_paths.iter().any(|p| p.as_str() == "/api/v1/checkout"));
        assert!(api_paths.iter().any(|p| p.as_str() == "/api/v1/cart/items"));
        assert!(api_paths.iter().any(|p| p.as_str() == "/api/v1/admin/summary"));
    }

    #[test]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
