//! Categories and products.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::slug::{slug, slugify};
use crate::domain::validation::{
    self, LONG_TEXT_MAX, SHORT_TEXT_MAX, ValidationError, Violation,
};
use crate::domain::{CategoryId, Money, ProductId};

/// Selling unit for a product price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Kg,
    Tonne,
    Piece,
    Metre,
    Sheet,
    Coil,
}

impl Unit {
    /// Database and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Tonne => "tonne",
            Self::Piece => "piece",
            Self::Metre => "metre",
            Self::Sheet => "sheet",
            Self::Coil => "coil",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "kg" => Ok(Self::Kg),
            "tonne" => Ok(Self::Tonne),
            "piece" => Ok(Self::Piece),
            "metre" => Ok(Self::Metre),
            "sheet" => Ok(Self::Sheet),
            "coil" => Ok(Self::Coil),
            _ => Err(ValidationError::new("unit", Violation::UnknownValue)),
        }
    }
}

/// Product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

/// Catalogue product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub material: Option<String>,
    pub grade: Option<String>,
    pub price: Money,
    pub unit: Unit,
    pub stock_quantity: u32,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a product from a validated draft.
    pub fn create(id: ProductId, draft: ProductDraft, now: DateTime<Utc>) -> Self {
        let ProductDraft {
            category_id,
            name,
            slug,
            description,
            material,
            grade,
            price,
            unit,
            stock_quantity,
            image_url,
            is_active,
        } = draft;
        Self {
            id,
            category_id,
            name,
            slug,
            description,
            material,
            grade,
            price,
            unit,
            stock_quantity,
            image_url,
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace all editable fields with those from `draft`.
    pub fn apply(&mut self, draft: ProductDraft, now: DateTime<Utc>) {
        let created_at = self.created_at;
        *self = Self::create(self.id, draft, now);
        self.created_at = created_at;
    }
}

/// Validated product fields submitted by an administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    category_id: Option<CategoryId>,
    name: String,
    slug: String,
    description: Option<String>,
    material: Option<String>,
    grade: Option<String>,
    price: Money,
    unit: Unit,
    stock_quantity: u32,
    image_url: Option<String>,
    is_active: bool,
}

/// Raw admin input for [`ProductDraft::try_from_input`].
#[derive(Debug, Clone, Default)]
pub struct ProductInput<'a> {
    pub category_id: Option<CategoryId>,
    pub name: &'a str,
    pub slug: Option<&'a str>,
    pub description: Option<&'a str>,
    pub material: Option<&'a str>,
    pub grade: Option<&'a str>,
    pub price_minor: i64,
    pub unit: &'a str,
    pub stock_quantity: u32,
    pub image_url: Option<&'a str>,
    pub is_active: bool,
}

impl ProductDraft {
    /// Validate raw admin input.
    ///
    /// When no slug is supplied one is derived from the name.
    pub fn try_from_input(input: ProductInput<'_>) -> Result<Self, ValidationError> {
        let name = validation::required_text(input.name, "name", SHORT_TEXT_MAX)?;
        let slug = match input.slug.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => slug(raw, "slug")?,
            None => slugify(&name)
                .ok_or_else(|| ValidationError::new("slug", Violation::InvalidFormat))?,
        };
        let price = Money::from_minor(input.price_minor);
        if price.is_negative() {
            return Err(ValidationError::new("price", Violation::OutOfRange));
        }
        Ok(Self {
            category_id: input.category_id,
            name,
            slug,
            description: validation::optional_text(
                input.description,
                "description",
                LONG_TEXT_MAX,
            )?,
            material: validation::optional_text(input.material, "material", SHORT_TEXT_MAX)?,
            grade: validation::optional_text(input.grade, "grade", SHORT_TEXT_MAX)?,
            price,
            unit: input.unit.parse()?,
            stock_quantity: input.stock_quantity,
            image_url: validation::optional_text(input.image_url, "imageUrl", 2_048)?,
            is_active: input.is_active,
        })
    }

    /// Slug the product will be stored under.
    pub fn slug(&self) -> &str {
        &self.slug
    }
}

/// Product listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Restrict to the category with this slug.
    pub category: Option<String>,
    /// Case-insensitive substring over name, material, and description.
    pub search: Option<String>,
    /// Include inactive products (admin listing).
    pub include_inactive: bool,
}

impl ProductFilter {
    /// Public listing of active products.
    pub fn storefront(category: Option<String>, search: Option<String>) -> Self {
        Self {
            category: category.filter(|c| !c.trim().is_empty()),
            search: search
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty()),
            include_inactive: false,
        }
    }

    /// Whether `product` passes the activity and search criteria.
    ///
    /// Category matching needs the category table and is left to adapters.
    pub fn matches(&self, product: &Product) -> bool {
        if !self.include_inactive && !product.is_active {
            return false;
        }
        let Some(needle) = &self.search else {
            return true;
        };
        [
            Some(product.name.as_str()),
            product.material.as_deref(),
            product.description.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle.as_str()))
    }
}
