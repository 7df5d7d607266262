//! Catalogue read models and admin drafts: categories, products, reviews.

mod product;
mod review;

pub use product::{Category, Product, ProductDraft, ProductFilter, ProductInput, Unit};
pub use review::{Rating, Review, ReviewDraft};
