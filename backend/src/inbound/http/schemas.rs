//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror the JSON shape those types serialise to and are
//! registered under the domain type's name, so the document reads `Product`
//! rather than `ProductSchema`.
//!
//! Money fields are integer paise.

use chrono::{DateTime, Utc};
use utoipa::ToSchema;
use uuid::Uuid;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request clashes with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A dependency such as the database or identity provider is down.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "quantity must be greater than zero")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "01HZY8B2W6X5Y7Z9ABCD1234")]
    trace_id: Option<String>,
    /// Supplementary error details, usually `{field, code}`.
    details: Option<serde_json::Value>,
}

/// Selling unit of a price.
#[derive(ToSchema)]
#[schema(as = Unit, rename_all = "snake_case")]
pub enum UnitSchema {
    Kg,
    Tonne,
    Piece,
    Metre,
    Sheet,
    Coil,
}

/// Order lifecycle status.
#[derive(ToSchema)]
#[schema(as = OrderStatus, rename_all = "snake_case")]
pub enum OrderStatusSchema {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// Back-office review status for applications and service requests.
#[derive(ToSchema)]
#[schema(as = RequestStatus, rename_all = "snake_case")]
pub enum RequestStatusSchema {
    New,
    Reviewing,
    Quoted,
    Accepted,
    Completed,
    Rejected,
}

/// Role held by an account.
#[derive(ToSchema)]
#[schema(as = Role, rename_all = "snake_case")]
pub enum RoleSchema {
    Admin,
    Customer,
}

/// Product category.
#[derive(ToSchema)]
#[schema(as = Category, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CategorySchema {
    id: Uuid,
    #[schema(example = "Ferrous Metals")]
    name: String,
    #[schema(example = "ferrous")]
    slug: String,
    description: Option<String>,
}

/// Catalogue product.
#[derive(ToSchema)]
#[schema(as = Product, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProductSchema {
    id: Uuid,
    category_id: Option<Uuid>,
    #[schema(example = "Mild Steel Plate")]
    name: String,
    #[schema(example = "mild-steel-plate")]
    slug: String,
    description: Option<String>,
    material: Option<String>,
    grade: Option<String>,
    /// Price per unit in paise.
    #[schema(example = 6500)]
    price: i64,
    unit: UnitSchema,
    stock_quantity: u32,
    image_url: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Product review.
#[derive(ToSchema)]
#[schema(as = Review, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ReviewSchema {
    id: Uuid,
    product_id: Uuid,
    user_id: Uuid,
    #[schema(minimum = 1, maximum = 5)]
    rating: u8,
    title: Option<String>,
    comment: Option<String>,
    author_name: Option<String>,
    created_at: DateTime<Utc>,
}

/// One cart line. Name, price and unit are copied from the catalogue.
#[derive(ToSchema)]
#[schema(as = CartLine, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CartLineSchema {
    product_id: Uuid,
    name: String,
    unit_price: i64,
    #[schema(minimum = 1)]
    quantity: u32,
    unit: UnitSchema,
}

/// Delivery address captured at checkout.
#[derive(ToSchema)]
#[schema(as = ShippingAddress, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ShippingAddressSchema {
    full_name: String,
    phone: String,
    line1: String,
    line2: Option<String>,
    city: String,
    state: String,
    #[schema(example = "411001")]
    postal_code: String,
    #[schema(example = "India")]
    country: String,
}

/// Order header.
#[derive(ToSchema)]
#[schema(as = Order, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct OrderSchema {
    id: Uuid,
    #[schema(example = "MT-20240601-3FA85F6457174562")]
    order_number: String,
    user_id: Uuid,
    status: OrderStatusSchema,
    subtotal: i64,
    tax: i64,
    total: i64,
    shipping: ShippingAddressSchema,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Order line frozen at checkout.
#[derive(ToSchema)]
#[schema(as = OrderItem, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct OrderItemSchema {
    order_id: Uuid,
    product_id: Uuid,
    product_name: String,
    unit_price: i64,
    quantity: u32,
    unit: UnitSchema,
    line_total: i64,
}

/// Order with its items.
#[derive(ToSchema)]
#[schema(as = OrderDetails, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct OrderDetailsSchema {
    order: OrderSchema,
    items: Vec<OrderItemSchema>,
}

/// Customer profile.
#[derive(ToSchema)]
#[schema(as = Profile, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProfileSchema {
    user_id: Uuid,
    email: Option<String>,
    full_name: Option<String>,
    company_name: Option<String>,
    phone: Option<String>,
    #[schema(example = "27AAPFU0939F1ZV")]
    gst_number: Option<String>,
    updated_at: DateTime<Utc>,
}

/// Identity provider account with its roles.
#[derive(ToSchema)]
#[schema(as = Account, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AccountSchema {
    id: Uuid,
    email: Option<String>,
    created_at: Option<DateTime<Utc>>,
    last_sign_in_at: Option<DateTime<Utc>>,
    roles: Vec<RoleSchema>,
}

/// Market price row.
#[derive(ToSchema)]
#[schema(as = PricingEntry, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PricingEntrySchema {
    id: Uuid,
    #[schema(example = "Copper")]
    metal: String,
    #[schema(example = "LME Grade A")]
    grade: String,
    price_per_unit: i64,
    unit: UnitSchema,
    #[schema(example = 1.2)]
    change_percent: f64,
    updated_at: DateTime<Utc>,
}

/// Job posting.
#[derive(ToSchema)]
#[schema(as = Job, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct JobSchema {
    id: Uuid,
    title: String,
    department: String,
    location: String,
    #[schema(example = "Full-time")]
    employment_type: String,
    description: String,
    requirements: Vec<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Application to a job posting.
#[derive(ToSchema)]
#[schema(as = JobApplication, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct JobApplicationSchema {
    id: Uuid,
    job_id: Uuid,
    user_id: Option<Uuid>,
    full_name: String,
    email: String,
    phone: String,
    cover_letter: Option<String>,
    resume_url: Option<String>,
    status: RequestStatusSchema,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Fabrication quote request.
#[derive(ToSchema)]
#[schema(as = FabricationRequest, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FabricationRequestSchema {
    id: Uuid,
    user_id: Option<Uuid>,
    status: RequestStatusSchema,
    name: String,
    company: Option<String>,
    email: String,
    phone: String,
    material: String,
    #[schema(example = "laser cutting")]
    service_type: String,
    quantity: String,
    specifications: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Scrap pickup request.
#[derive(ToSchema)]
#[schema(as = RecyclingRequest, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RecyclingRequestSchema {
    id: Uuid,
    user_id: Option<Uuid>,
    status: RequestStatusSchema,
    name: String,
    company: Option<String>,
    email: String,
    phone: String,
    material_type: String,
    estimated_quantity: String,
    pickup_address: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// News article.
#[derive(ToSchema)]
#[schema(as = Article, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ArticleSchema {
    id: Uuid,
    title: String,
    #[schema(example = "steel-prices-steady-ahead-of-monsoon")]
    slug: String,
    excerpt: Option<String>,
    content: String,
    category: Option<String>,
    image_url: Option<String>,
    author: Option<String>,
    is_published: bool,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Message left through the contact form.
#[derive(ToSchema)]
#[schema(as = ContactMessage, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ContactMessageSchema {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    subject: String,
    message: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

/// Emissions estimate in tonnes of CO2e.
#[derive(ToSchema)]
#[schema(as = CarbonEstimate, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CarbonEstimateSchema {
    production: f64,
    transport: f64,
    total: f64,
    /// Emissions of the same order made from virgin material only.
    baseline: f64,
    savings: f64,
    savings_percent: f64,
}

/// Back-office badge counts.
#[derive(ToSchema)]
#[schema(as = AdminSummary, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AdminSummarySchema {
    pending_orders: u64,
    unread_messages: u64,
    new_applications: u64,
    new_fabrication_requests: u64,
    new_recycling_requests: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn wrappers_register_under_domain_names() {
        assert_eq!(ErrorSchema::name(), "Error");
        assert_eq!(ProductSchema::name(), "Product");
        assert_eq!(OrderDetailsSchema::name(), "OrderDetails");
    }

    #[rstest]
    #[case("invalid_request")]
    #[case("unauthorized")]
    #[case("forbidden")]
    #[case("not_found")]
    #[case("conflict")]
    #[case("service_unavailable")]
    #[case("internal_error")]
    fn error_code_schema_lists_every_code(#[case] code: &str) {
        assert!(schema_to_json::<ErrorCodeSchema>().contains(code), "missing {code}");
    }

    #[test]
    fn field_names_are_camel_case() {
        let product = schema_to_json::<ProductSchema>();
        assert!(product.contains("stockQuantity"));
        assert!(!product.contains("stock_quantity"));

        let error = schema_to_json::<ErrorSchema>();
        assert!(error.contains("traceId"));
    }

    #[test]
    fn status_enums_use_wire_values() {
        let statuses = schema_to_json::<OrderStatusSchema>();
        assert!(statuses.contains("\"pending\""));
        assert!(statuses.contains("\"cancelled\""));
    }
}
