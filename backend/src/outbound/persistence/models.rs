//! Internal Diesel row structs and their conversions to domain types.
//!
//! Rows never leave the persistence layer. Reading a row re-validates the
//! enum-like text columns and counters; a row that fails is reported as a
//! query error rather than silently coerced.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::error_mapping::corrupt_row;
use super::schema::{
    carts, categories, contact_messages, fabrication_requests, job_applications, jobs,
    news_articles, order_items, orders, pricing_index, products, profiles, recycling_requests,
    reviews, user_roles,
};
use crate::domain::careers::{Job, JobApplication};
use crate::domain::catalogue::{Category, Product, Rating, Review, Unit};
use crate::domain::contact::ContactMessage;
use crate::domain::news::Article;
use crate::domain::ports::RepositoryError;
use crate::domain::pricing::PricingEntry;
use crate::domain::service_requests::{
    FabricationRequest, RecyclingRequest, RequestMeta, Requester,
};
use crate::domain::{
    Cart, CartLine, Money, Order, OrderItem, OrderStatus, Profile, RequestStatus, Role,
    ShippingAddress, UserId,
};

fn parse_column<T: FromStr>(table: &'static str, raw: &str) -> Result<T, RepositoryError>
where
    T::Err: std::fmt::Display,
{
    T::from_str(raw).map_err(|err| corrupt_row(table, &err))
}

fn count_to_db(table: &'static str, value: u32) -> Result<i32, RepositoryError> {
    i32::try_from(value).map_err(|err| corrupt_row(table, &err))
}

fn count_from_db(table: &'static str, value: i32) -> Result<u32, RepositoryError> {
    u32::try_from(value).map_err(|err| corrupt_row(table, &err))
}

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id.into(),
            name: row.name,
            slug: row.slug,
            description: row.description,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProductRow {
    pub id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub material: Option<String>,
    pub grade: Option<String>,
    pub price_minor: i64,
    pub unit: String,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.into(),
            category_id: row.category_id.map(Into::into),
            name: row.name,
            slug: row.slug,
            description: row.description,
            material: row.material,
            grade: row.grade,
            price: Money::from_minor(row.price_minor),
            unit: parse_column::<Unit>("products", &row.unit)?,
            stock_quantity: count_from_db("products", row.stock_quantity)?,
            image_url: row.image_url,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<&Product> for ProductRow {
    type Error = RepositoryError;

    fn try_from(product: &Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: *product.id.as_uuid(),
            category_id: product.category_id.map(|id| *id.as_uuid()),
            name: product.name.clone(),
            slug: product.slug.clone(),
            description: product.description.clone(),
            material: product.material.clone(),
            grade: product.grade.clone(),
            price_minor: product.price.minor(),
            unit: product.unit.as_str().to_owned(),
            stock_quantity: count_to_db("products", product.stock_quantity)?,
            image_url: product.image_url.clone(),
            is_active: product.is_active,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReviewRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub rating: i16,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = RepositoryError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let stars = u8::try_from(row.rating).map_err(|err| corrupt_row("reviews", &err))?;
        Ok(Self {
            id: row.id.into(),
            product_id: row.product_id.into(),
            user_id: UserId::from_uuid(row.user_id),
            rating: Rating::new(stars).map_err(|err| corrupt_row("reviews", &err))?,
            title: row.title,
            comment: row.comment,
            author_name: row.author_name,
            created_at: row.created_at,
        })
    }
}

impl From<&Review> for ReviewRow {
    fn from(review: &Review) -> Self {
        Self {
            id: *review.id.as_uuid(),
            product_id: *review.product_id.as_uuid(),
            user_id: *review.user_id.as_uuid(),
            rating: i16::from(review.rating.stars()),
            title: review.title.clone(),
            comment: review.comment.clone(),
            author_name: review.author_name.clone(),
            created_at: review.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Carts and orders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = carts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CartRow {
    pub items: serde_json::Value,
}

impl TryFrom<CartRow> for Cart {
    type Error = RepositoryError;

    fn try_from(row: CartRow) -> Result<Self, Self::Error> {
        let lines: Vec<CartLine> =
            serde_json::from_value(row.items).map_err(|err| corrupt_row("carts", &err))?;
        Ok(Self::from_lines(lines))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = carts)]
pub(crate) struct NewCartRow {
    pub user_id: Uuid,
    pub items: serde_json::Value,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderRow {
    pub id: Uuid,
    pub order_number: String,
    pub user_id: Uuid,
    pub status: String,
    pub subtotal_minor: i64,
    pub tax_minor: i64,
    pub total_minor: i64,
    pub shipping_address: serde_json::Value,
    pub notes: Option<String>,
    pub idempotency_key: Option<String>,
    pub request_fingerprint: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let shipping: ShippingAddress = serde_json::from_value(row.shipping_address)
            .map_err(|err| corrupt_row("orders", &err))?;
        Ok(Self {
            id: row.id.into(),
            order_number: row.order_number,
            user_id: UserId::from_uuid(row.user_id),
            status: parse_column::<OrderStatus>("orders", &row.status)?,
            subtotal: Money::from_minor(row.subtotal_minor),
            tax: Money::from_minor(row.tax_minor),
            total: Money::from_minor(row.total_minor),
            shipping,
            notes: row.notes,
            idempotency_key: row.idempotency_key,
            request_fingerprint: row.request_fingerprint,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<&Order> for OrderRow {
    type Error = RepositoryError;

    fn try_from(order: &Order) -> Result<Self, Self::Error> {
        let shipping_address =
            serde_json::to_value(&order.shipping).map_err(|err| corrupt_row("orders", &err))?;
        Ok(Self {
            id: *order.id.as_uuid(),
            order_number: order.order_number.clone(),
            user_id: *order.user_id.as_uuid(),
            status: order.status.as_str().to_owned(),
            subtotal_minor: order.subtotal.minor(),
            tax_minor: order.tax.minor(),
            total_minor: order.total.minor(),
            shipping_address,
            notes: order.notes.clone(),
            idempotency_key: order.idempotency_key.clone(),
            request_fingerprint: order.request_fingerprint.clone(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        })
    }
}

/// Order lines; the surrogate `id` column is generated by the database.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = order_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderItemRow {
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub unit_price_minor: i64,
    pub quantity: i32,
    pub unit: String,
    pub line_total_minor: i64,
}

impl TryFrom<OrderItemRow> for OrderItem {
    type Error = RepositoryError;

    fn try_from(row: OrderItemRow) -> Result<Self, Self::Error> {
        Ok(Self {
            order_id: row.order_id.into(),
            product_id: row.product_id.into(),
            product_name: row.product_name,
            unit_price: Money::from_minor(row.unit_price_minor),
            quantity: count_from_db("order_items", row.quantity)?,
            unit: parse_column::<Unit>("order_items", &row.unit)?,
            line_total: Money::from_minor(row.line_total_minor),
        })
    }
}

impl TryFrom<&OrderItem> for OrderItemRow {
    type Error = RepositoryError;

    fn try_from(item: &OrderItem) -> Result<Self, Self::Error> {
        Ok(Self {
            order_id: *item.order_id.as_uuid(),
            product_id: *item.product_id.as_uuid(),
            product_name: item.product_name.clone(),
            unit_price_minor: item.unit_price.minor(),
            quantity: count_to_db("order_items", item.quantity)?,
            unit: item.unit.as_str().to_owned(),
            line_total_minor: item.line_total.minor(),
        })
    }
}

// ---------------------------------------------------------------------------
// Back office
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = pricing_index)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PricingRow {
    pub id: Uuid,
    pub metal: String,
    pub grade: String,
    pub price_minor: i64,
    pub unit: String,
    pub change_percent: f64,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PricingRow> for PricingEntry {
    type Error = RepositoryError;

    fn try_from(row: PricingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.into(),
            metal: row.metal,
            grade: row.grade,
            price_per_unit: Money::from_minor(row.price_minor),
            unit: parse_column::<Unit>("pricing_index", &row.unit)?,
            change_percent: row.change_percent,
            updated_at: row.updated_at,
        })
    }
}

impl From<&PricingEntry> for PricingRow {
    fn from(entry: &PricingEntry) -> Self {
        Self {
            id: *entry.id.as_uuid(),
            metal: entry.metal.clone(),
            grade: entry.grade.clone(),
            price_minor: entry.price_per_unit.minor(),
            unit: entry.unit.as_str().to_owned(),
            change_percent: entry.change_percent,
            updated_at: entry.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Self {
            id: row.id.into(),
            title: row.title,
            department: row.department,
            location: row.location,
            employment_type: row.employment_type,
            description: row.description,
            requirements: row.requirements,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<&Job> for JobRow {
    fn from(job: &Job) -> Self {
        Self {
            id: *job.id.as_uuid(),
            title: job.title.clone(),
            department: job.department.clone(),
            location: job.location.clone(),
            employment_type: job.employment_type.clone(),
            description: job.description.clone(),
            requirements: job.requirements.clone(),
            is_active: job.is_active,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = job_applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ApplicationRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub user_id: Option<Uuid>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ApplicationRow> for JobApplication {
    type Error = RepositoryError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.into(),
            job_id: row.job_id.into(),
            user_id: row.user_id.map(UserId::from_uuid),
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            cover_letter: row.cover_letter,
            resume_url: row.resume_url,
            status: parse_column::<RequestStatus>("job_applications", &row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl From<&JobApplication> for ApplicationRow {
    fn from(application: &JobApplication) -> Self {
        Self {
            id: *application.id.as_uuid(),
            job_id: *application.job_id.as_uuid(),
            user_id: application.user_id.as_ref().map(|id| *id.as_uuid()),
            full_name: application.full_name.clone(),
            email: application.email.clone(),
            phone: application.phone.clone(),
            cover_letter: application.cover_letter.clone(),
            resume_url: application.resume_url.clone(),
            status: application.status.as_str().to_owned(),
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }
}

fn request_meta(
    table: &'static str,
    id: Uuid,
    user_id: Option<Uuid>,
    status: &str,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Result<RequestMeta, RepositoryError> {
    Ok(RequestMeta {
        id: id.into(),
        user_id: user_id.map(UserId::from_uuid),
        status: parse_column::<RequestStatus>(table, status)?,
        created_at,
        updated_at,
    })
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = fabrication_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FabricationRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub company: Option<String>,
    pub email: String,
    pub phone: String,
    pub material: String,
    pub service_type: String,
    pub quantity: String,
    pub specifications: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<FabricationRow> for FabricationRequest {
    type Error = RepositoryError;

    fn try_from(row: FabricationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            meta: request_meta(
                "fabrication_requests",
                row.id,
                row.user_id,
                &row.status,
                row.created_at,
                row.updated_at,
            )?,
            requester: Requester {
                name: row.name,
                company: row.company,
                email: row.email,
                phone: row.phone,
            },
            material: row.material,
            service_type: row.service_type,
            quantity: row.quantity,
            specifications: row.specifications,
        })
    }
}

impl From<&FabricationRequest> for FabricationRow {
    fn from(request: &FabricationRequest) -> Self {
        Self {
            id: *request.meta.id.as_uuid(),
            user_id: request.meta.user_id.as_ref().map(|id| *id.as_uuid()),
            name: request.requester.name.clone(),
            company: request.requester.company.clone(),
            email: request.requester.email.clone(),
            phone: request.requester.phone.clone(),
            material: request.material.clone(),
            service_type: request.service_type.clone(),
            quantity: request.quantity.clone(),
            specifications: request.specifications.clone(),
            status: request.meta.status.as_str().to_owned(),
            created_at: request.meta.created_at,
            updated_at: request.meta.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = recycling_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecyclingRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub company: Option<String>,
    pub email: String,
    pub phone: String,
    pub material_type: String,
    pub estimated_quantity: String,
    pub pickup_address: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<RecyclingRow> for RecyclingRequest {
    type Error = RepositoryError;

    fn try_from(row: RecyclingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            meta: request_meta(
                "recycling_requests",
                row.id,
                row.user_id,
                &row.status,
                row.created_at,
                row.updated_at,
            )?,
            requester: Requester {
                name: row.name,
                company: row.company,
                email: row.email,
                phone: row.phone,
            },
            material_type: row.material_type,
            estimated_quantity: row.estimated_quantity,
            pickup_address: row.pickup_address,
        })
    }
}

impl From<&RecyclingRequest> for RecyclingRow {
    fn from(request: &RecyclingRequest) -> Self {
        Self {
            id: *request.meta.id.as_uuid(),
            user_id: request.meta.user_id.as_ref().map(|id| *id.as_uuid()),
            name: request.requester.name.clone(),
            company: request.requester.company.clone(),
            email: request.requester.email.clone(),
            phone: request.requester.phone.clone(),
            material_type: request.material_type.clone(),
            estimated_quantity: request.estimated_quantity.clone(),
            pickup_address: request.pickup_address.clone(),
            status: request.meta.status.as_str().to_owned(),
            created_at: request.meta.created_at,
            updated_at: request.meta.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = news_articles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ArticleRow {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub author: Option<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Self {
            id: row.id.into(),
            title: row.title,
            slug: row.slug,
            excerpt: row.excerpt,
            content: row.content,
            category: row.category,
            image_url: row.image_url,
            author: row.author,
            is_published: row.is_published,
            published_at: row.published_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<&Article> for ArticleRow {
    fn from(article: &Article) -> Self {
        Self {
            id: *article.id.as_uuid(),
            title: article.title.clone(),
            slug: article.slug.clone(),
            excerpt: article.excerpt.clone(),
            content: article.content.clone(),
            category: article.category.clone(),
            image_url: article.image_url.clone(),
            author: article.author.clone(),
            is_published: article.is_published,
            published_at: article.published_at,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = contact_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MessageRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<MessageRow> for ContactMessage {
    fn from(row: MessageRow) -> Self {
        Self {
            id: row.id.into(),
            name: row.name,
            email: row.email,
            phone: row.phone,
            subject: row.subject,
            message: row.message,
            is_read: row.is_read,
            created_at: row.created_at,
        }
    }
}

impl From<&ContactMessage> for MessageRow {
    fn from(message: &ContactMessage) -> Self {
        Self {
            id: *message.id.as_uuid(),
            name: message.name.clone(),
            email: message.email.clone(),
            phone: message.phone.clone(),
            subject: message.subject.clone(),
            message: message.message.clone(),
            is_read: message.is_read,
            created_at: message.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = profiles)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProfileRow {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub gst_number: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            user_id: UserId::from_uuid(row.user_id),
            email: row.email,
            full_name: row.full_name,
            company_name: row.company_name,
            phone: row.phone,
            gst_number: row.gst_number,
            updated_at: row.updated_at,
        }
    }
}

impl From<&Profile> for ProfileRow {
    fn from(profile: &Profile) -> Self {
        Self {
            user_id: *profile.user_id.as_uuid(),
            email: profile.email.clone(),
            full_name: profile.full_name.clone(),
            company_name: profile.company_name.clone(),
            phone: profile.phone.clone(),
            gst_number: profile.gst_number.clone(),
            updated_at: profile.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RoleRow {
    pub user_id: Uuid,
    pub role: String,
}

impl TryFrom<RoleRow> for (UserId, Role) {
    type Error = RepositoryError;

    fn try_from(row: RoleRow) -> Result<Self, Self::Error> {
        Ok((
            UserId::from_uuid(row.user_id),
            parse_column::<Role>("user_roles", &row.role)?,
        ))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_roles)]
pub(crate) struct NewRoleRow<'a> {
    pub user_id: Uuid,
    pub role: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn product_row(unit: &str, stock: i32) -> ProductRow {
        let now = Utc::now();
        ProductRow {
            id: Uuid::new_v4(),
            category_id: None,
            name: "Copper Wire Rod".to_owned(),
            slug: "copper-wire-rod".to_owned(),
            description: None,
            material: Some("copper".to_owned()),
            grade: None,
            price_minor: 78_450,
            unit: unit.to_owned(),
            stock_quantity: stock,
            image_url: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn product_rows_convert_both_ways() {
        let row = product_row("kg", 40);
        let product = Product::try_from(row.clone()).expect("valid row");
        assert_eq!(product.unit, Unit::Kg);
        assert_eq!(product.price, Money::from_minor(78_450));
        let back = ProductRow::try_from(&product).expect("fits");
        assert_eq!(back.unit, "kg");
        assert_eq!(back.stock_quantity, 40);
    }

    #[rstest]
    #[case("furlong", 1)]
    #[case("kg", -1)]
    fn corrupt_product_rows_are_rejected(#[case] unit: &str, #[case] stock: i32) {
        let error = Product::try_from(product_row(unit, stock)).expect_err("corrupt row");
        assert!(matches!(error, RepositoryError::Query { .. }));
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(-3)]
    fn review_ratings_outside_one_to_five_are_corrupt(#[case] rating: i16) {
        let row = ReviewRow {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            rating,
            title: None,
            comment: None,
            author_name: None,
            created_at: Utc::now(),
        };
        assert!(Review::try_from(row).is_err());
    }

    #[rstest]
    fn cart_rows_hold_camel_case_lines() {
        let product_id = Uuid::new_v4();
        let row = CartRow {
            items: serde_json::json!([{
                "productId": product_id,
                "name": "Mild Steel Plate",
                "unitPrice": 6_500,
                "quantity": 3,
                "unit": "kg"
            }]),
        };
        let cart = Cart::try_from(row).expect("valid cart");
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total(), Money::from_minor(19_500));
    }

    #[rstest]
    fn unknown_role_is_corrupt() {
        let row = RoleRow {
            user_id: Uuid::new_v4(),
            role: "superuser".to_owned(),
        };
        assert!(<(UserId, Role)>::try_from(row).is_err());
    }
}
