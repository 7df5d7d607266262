//! Domain primitives, aggregates, and use-case services.
//!
//! Purpose: define the strongly typed storefront model (catalogue, carts,
//! orders, back-office records) and the services that operate on it through
//! the driven ports in [`ports`]. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Cart / Order / Money: checkout arithmetic in integer paise.
//! - `*Service`: use-cases consumed by the HTTP adapter.

pub mod carbon;
pub mod careers;
pub mod catalogue;
pub mod contact;
pub mod news;
pub mod ports;
pub mod pricing;
pub mod service_requests;

mod auth;
mod cart;
mod checkout;
mod dashboard;
mod error;
mod idempotency;
mod ids;
mod money;
mod orders;
mod request_status;
mod slug;
mod trace_id;
mod user;
pub mod validation;

mod account_service;
mod cart_service;
mod catalogue_service;
mod careers_service;
mod checkout_service;
mod news_service;
mod order_service;
mod service_request_service;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::cart::{Cart, CartLine, MAX_LINE_QUANTITY};
pub use self::checkout::{
    AddressInput, CheckoutOutcome, CheckoutRequest, CheckoutTotals, DEFAULT_COUNTRY,
    ShippingAddress, TAX_PERCENT,
};
pub use self::dashboard::AdminSummary;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::idempotency::{IdempotencyKey, IdempotencyKeyValidationError, payload_fingerprint};
pub use self::ids::{
    ApplicationId, ArticleId, CategoryId, JobId, MessageId, OrderId, PricingEntryId, ProductId,
    ReviewId, ServiceRequestId,
};
pub use self::money::Money;
pub use self::orders::{Order, OrderDetails, OrderItem, OrderStatus, order_number};
pub use self::request_status::{RequestStatus, StatusFlow};
pub use self::trace_id::TraceId;
pub use self::user::{
    Account, IdentityUser, Profile, ProfileUpdate, Role, UserId, UserIdValidationError,
};

pub use self::account_service::{AccountService, CurrentUser};
pub use self::cart_service::CartService;
pub use self::catalogue_service::CatalogueService;
pub use self::careers_service::CareersService;
pub use self::checkout_service::CheckoutService;
pub use self::news_service::NewsService;
pub use self::order_service::OrderService;
pub use self::service_request_service::ServiceRequestService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use storefront::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
