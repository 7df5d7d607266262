//! Catalogue endpoints: storefront browsing, reviews, and product admin.
//!
//! ```text
//! GET    /api/v1/categories
//! GET    /api/v1/products?category=ferrous&search=plate
//! GET    /api/v1/products/{id}
//! GET    /api/v1/products/{id}/reviews
//! POST   /api/v1/products/{id}/reviews {"rating":5,"comment":"..."}
//! GET    /api/v1/admin/products
//! POST   /api/v1/admin/products
//! PUT    /api/v1/admin/products/{id}
//! DELETE /api/v1/admin/products/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::catalogue::{
    Category, Product, ProductDraft, ProductFilter, ProductInput, Review, ReviewDraft,
};
use crate::domain::validation::ValidationError;
use crate::domain::{CategoryId, ProductId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_admin;
use crate::inbound::http::schemas::{CategorySchema, ErrorSchema, ProductSchema, ReviewSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query string of `GET /api/v1/products`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Category slug.
    #[param(example = "ferrous")]
    pub category: Option<String>,
    /// Case-insensitive match on name, material, or description.
    #[param(example = "plate")]
    pub search: Option<String>,
}

/// Body of the admin product create and update endpoints.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[schema(value_type = Option<uuid::Uuid>)]
    pub category_id: Option<CategoryId>,
    #[schema(example = "Mild Steel Plate")]
    pub name: String,
    /// Derived from the name when absent.
    pub slug: Option<String>,
    pub description: Option<String>,
    pub material: Option<String>,
    pub grade: Option<String>,
    /// Price in paise.
    #[schema(example = 6_500)]
    pub price: i64,
    #[schema(example = "kg")]
    pub unit: String,
    #[serde(default)]
    pub stock_quantity: u32,
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl TryFrom<&ProductRequest> for ProductDraft {
    type Error = ValidationError;

    fn try_from(value: &ProductRequest) -> Result<Self, Self::Error> {
        Self::try_from_input(ProductInput {
            category_id: value.category_id,
            name: &value.name,
            slug: value.slug.as_deref(),
            description: value.description.as_deref(),
            material: value.material.as_deref(),
            grade: value.grade.as_deref(),
            price_minor: value.price,
            unit: &value.unit,
            stock_quantity: value.stock_quantity,
            image_url: value.image_url.as_deref(),
            is_active: value.is_active,
        })
    }
}

/// Body of `POST /api/v1/products/{id}/reviews`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    #[schema(minimum = 1, maximum = 5)]
    pub rating: u8,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub author_name: Option<String>,
}

impl TryFrom<&ReviewRequest> for ReviewDraft {
    type Error = ValidationError;

    fn try_from(value: &ReviewRequest) -> Result<Self, Self::Error> {
        Self::try_new(
            value.rating,
            value.title.as_deref(),
            value.comment.as_deref(),
            value.author_name.as_deref(),
        )
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses((status = 200, description = "Categories by name", body = [CategorySchema])),
    tags = ["catalogue"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Category>>> {
    Ok(web::Json(state.catalogue.categories().await?))
}

/// Active products, optionally narrowed by category and search text.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(ProductQuery),
    responses((status = 200, description = "Active products by name", body = [ProductSchema])),
    tags = ["catalogue"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    query: web::Query<ProductQuery>,
) -> ApiResult<web::Json<Vec<Product>>> {
    let ProductQuery { category, search } = query.into_inner();
    let filter = ProductFilter::storefront(category, search);
    Ok(web::Json(state.catalogue.products(&filter).await?))
}

/// One active product. Inactive products are reported as missing.
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = uuid::Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = ProductSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "getProduct"
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: web::Path<ProductId>,
) -> ApiResult<web::Json<Product>> {
    Ok(web::Json(
        state.catalogue.active_product(&path.into_inner()).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}/reviews",
    params(("id" = uuid::Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Reviews, newest first", body = [ReviewSchema]),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "listReviews"
)]
#[get("/products/{id}/reviews")]
pub async fn list_reviews(
    state: web::Data<HttpState>,
    path: web::Path<ProductId>,
) -> ApiResult<web::Json<Vec<Review>>> {
    Ok(web::Json(state.catalogue.reviews(&path.into_inner()).await?))
}

/// Post a review. A second review by the same user replaces the first.
#[utoipa::path(
    post,
    path = "/api/v1/products/{id}/reviews",
    params(("id" = uuid::Uuid, Path, description = "Product id")),
    request_body = ReviewRequest,
    responses(
        (status = 201, description = "Stored review", body = ReviewSchema),
        (status = 400, description = "Invalid review", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "submitReview"
)]
#[post("/products/{id}/reviews")]
pub async fn submit_review(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ProductId>,
    payload: web::Json<ReviewRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let draft = ReviewDraft::try_from(&*payload)?;
    let review = state
        .catalogue
        .submit_review(&user_id, &path.into_inner(), draft)
        .await?;
    Ok(HttpResponse::Created().json(review))
}

/// Every product, including inactive ones.
#[utoipa::path(
    get,
    path = "/api/v1/admin/products",
    responses(
        (status = 200, description = "Products", body = [ProductSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListProducts"
)]
#[get("/admin/products")]
pub async fn admin_list_products(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Product>>> {
    require_admin(&state, &session).await?;
    let filter = ProductFilter {
        include_inactive: true,
        ..ProductFilter::default()
    };
    Ok(web::Json(state.catalogue.products(&filter).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Created product", body = ProductSchema),
        (status = 400, description = "Invalid product", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 409, description = "Slug taken", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminCreateProduct"
)]
#[post("/admin/products")]
pub async fn admin_create_product(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProductRequest>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let draft = ProductDraft::try_from(&*payload)?;
    let product = state.catalogue.create_product(draft).await?;
    Ok(HttpResponse::Created().json(product))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/products/{id}",
    params(("id" = uuid::Uuid, Path, description = "Product id")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ProductSchema),
        (status = 400, description = "Invalid product", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Slug taken", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminUpdateProduct"
)]
#[put("/admin/products/{id}")]
pub async fn admin_update_product(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ProductId>,
    payload: web::Json<ProductRequest>,
) -> ApiResult<web::Json<Product>> {
    require_admin(&state, &session).await?;
    let draft = ProductDraft::try_from(&*payload)?;
    Ok(web::Json(
        state
            .catalogue
            .update_product(&path.into_inner(), draft)
            .await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/products/{id}",
    params(("id" = uuid::Uuid, Path, description = "Product id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminDeleteProduct"
)]
#[delete("/admin/products/{id}")]
pub async fn admin_delete_product(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ProductId>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    state.catalogue.delete_product(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
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
    use serde_json::{Value, json};

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(list_categories)
            .service(list_products)
            .service(get_product)
            .service(list_reviews)
            .service(submit_review)
            .service(admin_list_products)
            .service(admin_create_product)
            .service(admin_update_product)
            .service(admin_delete_product);
    }

    async fn product_id(bed: &TestBed, slug: &str) -> ProductId {
        bed.state
            .catalogue
            .products(&ProductFilter {
                include_inactive: true,
                ..ProductFilter::default()
            })
            .await
            .expect("products")
            .into_iter()
            .find(|p| p.slug == slug)
            .map(|p| p.id)
            .expect("seeded product")
    }

    fn product_body(name: &str) -> Value {
        json!({
            "name": name,
            "price": 9_900,
            "unit": "kg",
            "material": "steel",
            "stockQuantity": 50
        })
    }

    #[rstest]
    #[case("/api/v1/products", 5)]
    #[case("/api/v1/products?category=non-ferrous", 2)]
    #[case("/api/v1/products?search=STEEL", 3)]
    #[case("/api/v1/products?category=ferrous&search=rebar", 1)]
    #[case("/api/v1/products?category=unknown", 0)]
    #[actix_web::test]
    async fn storefront_listing_filters(#[case] uri: &str, #[case] expected: usize) {
        let bed = TestBed::seeded();
        let app = actix_test::init_service(bed.app(routes)).await;

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(expected));
    }

    #[actix_web::test]
    async fn products_are_camel_case_and_sorted() {
        let bed = TestBed::seeded();
        let app = actix_test::init_service(bed.app(routes)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/products").to_request(),
        )
        .await;
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body[0]["name"], "Aluminium Sheet");
        assert_eq!(body[0]["unit"], "sheet");
        assert!(body[0].get("stockQuantity").is_some());
        assert!(body[0].get("isActive").is_some());
    }

    #[actix_web::test]
    async fn inactive_product_is_not_found() {
        let bed = TestBed::seeded();
        let brass = product_id(&bed, "brass-hex-rod").await;
        let app = actix_test::init_service(bed.app(routes)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/products/{brass}"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "not_found");
    }

    #[actix_web::test]
    async fn second_review_replaces_the_first() {
        let bed = TestBed::seeded();
        let plate = product_id(&bed, "mild-steel-plate").await;
        let app = actix_test::init_service(bed.app(routes)).await;
        let cookie = login_as(&app, DEMO_BUYER_EMAIL, DEMO_BUYER_PASSWORD).await;
        let uri = format!("/api/v1/products/{plate}/reviews");

        for (rating, comment) in [(3, "Slight rust"), (5, "Replaced promptly")] {
            let response = actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri(&uri)
                    .cookie(cookie.clone())
                    .set_json(json!({ "rating": rating, "comment": comment }))
                    .to_request(),
            )
            .await;
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(&uri).to_request())
                .await;
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["rating"], 5);
        assert_eq!(body[0]["comment"], "Replaced promptly");
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[actix_web::test]
    async fn out_of_range_rating_is_rejected(#[case] rating: u8) {
        let bed = TestBed::seeded();
        let plate = product_id(&bed, "mild-steel-plate").await;
        let app = actix_test::init_service(bed.app(routes)).await;
        let cookie = login_as(&app, DEMO_BUYER_EMAIL, DEMO_BUYER_PASSWORD).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/products/{plate}/reviews"))
                .cookie(cookie)
                .set_json(json!({ "rating": rating }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], "rating");
    }

    #[actix_web::test]
    async fn reviews_require_a_session() {
        let bed = TestBed::seeded();
        let plate = product_id(&bed, "mild-steel-plate").await;
        let app = actix_test::init_service(bed.app(routes)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/products/{plate}/reviews"))
                .set_json(json!({ "rating": 4 }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn admin_manages_products() {
        let bed = TestBed::seeded();
        let app = actix_test::init_service(bed.app(routes)).await;
        let cookie = login_as(&app, DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD).await;

        let created = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/admin/products")
                .cookie(cookie.clone())
                .set_json(product_body("EN8 Round Bar"))
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let created: Value = actix_test::read_body_json(created).await;
        assert_eq!(created["slug"], "en8-round-bar");
        assert_eq!(created["isActive"], true);
        let id = created["id"].as_str().expect("id").to_owned();

        let mut update = product_body("EN8 Round Bar");
        update["isActive"] = json!(false);
        let updated = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/api/v1/admin/products/{id}"))
                .cookie(cookie.clone())
                .set_json(update)
                .to_request(),
        )
        .await;
        assert_eq!(updated.status(), StatusCode::OK);

        let listing = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/admin/products")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        let listing: Value = actix_test::read_body_json(listing).await;
        assert_eq!(listing.as_array().map(Vec::len), Some(7));

        let deleted = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/v1/admin/products/{id}"))
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let again = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/v1/admin/products/{id}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(again.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn duplicate_slug_conflicts() {
        let bed = TestBed::seeded();
        let app = actix_test::init_service(bed.app(routes)).await;
        let cookie = login_as(&app, DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/admin/products")
                .cookie(cookie)
                .set_json(product_body("Mild Steel Plate"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn unknown_unit_is_reported_by_field() {
        let bed = TestBed::seeded();
        let app = actix_test::init_service(bed.app(routes)).await;
        let cookie = login_as(&app, DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD).await;
        let mut body = product_body("Lead Ingot");
        body["unit"] = json!("barrel");

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/admin/products")
                .cookie(cookie)
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], "unit");
    }
}
