//! News articles.
//!
//! ```text
//! GET    /api/v1/news
//! GET    /api/v1/news/{slug}
//! GET    /api/v1/admin/news
//! POST   /api/v1/admin/news
//! PUT    /api/v1/admin/news/{id}
//! DELETE /api/v1/admin/news/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::ArticleId;
use crate::domain::news::{Article, ArticleDraft, ArticleInput};
use crate::domain::validation::ValidationError;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_admin;
use crate::inbound::http::schemas::{ArticleSchema, ErrorSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body of the admin article create and update endpoints.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRequest {
    pub title: String,
    /// Derived from the title when absent.
    #[schema(example = "steel-prices-steady")]
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub author: Option<String>,
    /// Publishing stamps `publishedAt` the first time.
    #[serde(default)]
    pub is_published: bool,
}

impl TryFrom<&ArticleRequest> for ArticleDraft {
    type Error = ValidationError;

    fn try_from(value: &ArticleRequest) -> Result<Self, Self::Error> {
        Self::try_from_input(ArticleInput {
            title: &value.title,
            slug: value.slug.as_deref(),
            excerpt: value.excerpt.as_deref(),
            content: &value.content,
            category: value.category.as_deref(),
            image_url: value.image_url.as_deref(),
            author: value.author.as_deref(),
            is_published: value.is_published,
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/news",
    responses((status = 200, description = "Published articles, newest first", body = [ArticleSchema])),
    tags = ["news"],
    operation_id = "listNews"
)]
#[get("/news")]
pub async fn list_news(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Article>>> {
    Ok(web::Json(state.news.published().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/news/{slug}",
    params(("slug" = String, Path, description = "Article slug")),
    responses(
        (status = 200, description = "Article", body = ArticleSchema),
        (status = 404, description = "Not found or unpublished", body = ErrorSchema)
    ),
    tags = ["news"],
    operation_id = "getNewsArticle"
)]
#[get("/news/{slug}")]
pub async fn get_article(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Article>> {
    Ok(web::Json(state.news.published_by_slug(&path).await?))
}

/// Every article, drafts included.
#[utoipa::path(
    get,
    path = "/api/v1/admin/news",
    responses(
        (status = 200, description = "Articles", body = [ArticleSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListNews"
)]
#[get("/admin/news")]
pub async fn admin_list_news(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Article>>> {
    require_admin(&state, &session).await?;
    Ok(web::Json(state.news.all().await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/news",
    request_body = ArticleRequest,
    responses(
        (status = 201, description = "Created article", body = ArticleSchema),
        (status = 400, description = "Invalid article", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 409, description = "Slug taken", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminCreateNews"
)]
#[post("/admin/news")]
pub async fn admin_create_article(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ArticleRequest>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let draft = ArticleDraft::try_from(&*payload)?;
    Ok(HttpResponse::Created().json(state.news.create(draft).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/news/{id}",
    params(("id" = uuid::Uuid, Path, description = "Article id")),
    request_body = ArticleRequest,
    responses(
        (status = 200, description = "Updated article", body = ArticleSchema),
        (status = 400, description = "Invalid article", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Slug taken", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminUpdateNews"
)]
#[put("/admin/news/{id}")]
pub async fn admin_update_article(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ArticleId>,
    payload: web::Json<ArticleRequest>,
) -> ApiResult<web::Json<Article>> {
    require_admin(&state, &session).await?;
    let draft = ArticleDraft::try_from(&*payload)?;
    Ok(web::Json(state.news.update(&path.into_inner(), draft).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/news/{id}",
    params(("id" = uuid::Uuid, Path, description = "Article id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminDeleteNews"
)]
#[delete("/admin/news/{id}")]
pub async fn admin_delete_article(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ArticleId>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    state.news.delete(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
