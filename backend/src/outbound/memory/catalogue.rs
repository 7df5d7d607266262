//! Catalogue and carts.

use async_trait::async_trait;

use super::{MemoryStore, Tables};
use crate::domain::catalogue::{Category, Product, ProductFilter, Review};
use crate::domain::ports::{CartRepository, CatalogueRepository, RepositoryError};
use crate::domain::{Cart, ProductId, UserId};

fn ensure_slug_free(t: &Tables, product: &Product) -> Result<(), RepositoryError> {
    let taken = t
        .products
        .iter()
        .any(|other| other.slug == product.slug && other.id != product.id);
    if taken {
        return Err(RepositoryError::conflict(format!(
            "product slug {} already exists",
            product.slug
        )));
    }
    Ok(())
}

#[async_trait]
impl CatalogueRepository for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        self.with_tables(|t| {
            let mut categories = t.categories.clone();
            categories.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(categories)
        })
    }

    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        self.with_tables(|t| {
            let category_id = match &filter.category {
                Some(slug) => match t.categories.iter().find(|c| &c.slug == slug) {
                    Some(category) => Some(category.id),
                    None => return Ok(Vec::new()),
                },
                None => None,
            };
            let mut products: Vec<Product> = t
                .products
                .iter()
                .filter(|p| category_id.is_none() || p.category_id == category_id)
                .filter(|p| filter.matches(p))
                .cloned()
                .collect();
            products.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(products)
        })
    }

    async fn find_product(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        self.with_tables(|t| Ok(t.products.iter().find(|p| &p.id == id).cloned()))
    }

    async fn insert_product(&self, product: &Product) -> Result<(), RepositoryError> {
        self.with_tables(|t| {
            ensure_slug_free(t, product)?;
            t.products.push(product.clone());
            Ok(())
        })
    }

    async fn update_product(&self, product: &Product) -> Result<(), RepositoryError> {
        self.with_tables(|t| {
            ensure_slug_free(t, product)?;
            let slot = t
                .products
                .iter_mut()
                .find(|p| p.id == product.id)
                .ok_or_else(|| RepositoryError::not_found("product"))?;
            *slot = product.clone();
            Ok(())
        })
    }

    async fn delete_product(&self, id: &ProductId) -> Result<bool, RepositoryError> {
        self.with_tables(|t| {
            let before = t.products.len();
            t.products.retain(|p| &p.id != id);
            t.reviews.retain(|r| &r.product_id != id);
            Ok(t.products.len() != before)
        })
    }

    async fn list_reviews(&self, product_id: &ProductId) -> Result<Vec<Review>, RepositoryError> {
        self.with_tables(|t| {
            let mut reviews: Vec<Review> = t
                .reviews
                .iter()
                .filter(|r| &r.product_id == product_id)
                .cloned()
                .collect();
            reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(reviews)
        })
    }

    async fn upsert_review(&self, review: &Review) -> Result<Review, RepositoryError> {
        self.with_tables(|t| {
            let existing = t
                .reviews
                .iter_mut()
                .find(|r| r.product_id == review.product_id && r.user_id == review.user_id);
            match existing {
                Some(slot) => {
                    let id = slot.id;
                    *slot = Review {
                        id,
                        ..review.clone()
                    };
                    Ok(slot.clone())
                }
                None => {
                    t.reviews.push(review.clone());
                    Ok(review.clone())
                }
            }
        })
    }
}

#[async_trait]
impl CartRepository for MemoryStore {
    async fn load(&self, user_id: &UserId) -> Result<Cart, RepositoryError> {
        self.with_tables(|t| Ok(t.carts.get(user_id).cloned().unwrap_or_default()))
    }

    async fn save(&self, user_id: &UserId, cart: &Cart) -> Result<(), RepositoryError> {
        self.with_tables(|t| {
            if cart.is_empty() {
                t.carts.remove(user_id);
            } else {
                t.carts.insert(user_id.clone(), cart.clone());
            }
            Ok(())
        })
    }
}
