//! Behaviour of the in-memory adapters that services rely on.

use super::*;
use crate::domain::catalogue::ProductFilter;
use crate::domain::ports::{
    AdminSummaryQuery, CatalogueRepository, NewsRepository, OrderRepository, PricingRepository,
};
use crate::domain::{OrderStatus, ShippingAddress};
use chrono::Utc;
use rstest::{fixture, rstest};

#[fixture]
fn store() -> MemoryStore {
    MemoryStore::seeded()
}

fn order(user_id: &UserId, key: Option<&str>) -> Order {
    let now = Utc::now();
    let id = crate::domain::OrderId::random();
    Order {
        id,
        order_number: crate::domain::order_number(&id, now),
        user_id: user_id.clone(),
        status: OrderStatus::Pending,
        subtotal: crate::domain::Money::from_minor(100),
        tax: crate::domain::Money::from_minor(18),
        total: crate::domain::Money::from_minor(118),
        shipping: ShippingAddress {
            full_name: "Asha Rao".to_owned(),
            phone: "+919876543210".to_owned(),
            line1: "Plot 14".to_owned(),
            line2: None,
            city: "Pune".to_owned(),
            state: "Maharashtra".to_owned(),
            postal_code: "411001".to_owned(),
            country: "India".to_owned(),
        },
        notes: None,
        idempotency_key: key.map(str::to_owned),
        request_fingerprint: None,
        created_at: now,
        updated_at: now,
    }
}

#[rstest]
#[tokio::test]
async fn storefront_listing_hides_inactive_products(store: MemoryStore) {
    let products = store
        .list_products(&ProductFilter::storefront(None, None))
        .await
        .expect("products");
    assert!(!products.is_empty());
    assert!(products.iter().all(|p| p.is_active));
}

#[rstest]
#[tokio::test]
async fn unknown_category_lists_nothing(store: MemoryStore) {
    let products = store
        .list_products(&ProductFilter::storefront(Some("gold".to_owned()), None))
        .await
        .expect("products");
    assert!(products.is_empty());
}

#[rstest]
#[tokio::test]
async fn duplicate_product_slug_is_a_conflict(store: MemoryStore) {
    let existing = store
        .list_products(&ProductFilter::storefront(None, None))
        .await
        .expect("products")
        .into_iter()
        .next()
        .expect("seeded product");
    let clash = Product {
        id: crate::domain::ProductId::random(),
        ..existing
    };
    let error = store.insert_product(&clash).await.expect_err("slug taken");
    assert!(matches!(error, RepositoryError::Conflict { .. }));
}

#[rstest]
#[tokio::test]
async fn idempotency_key_is_unique_per_user(store: MemoryStore) {
    let user = UserId::random();
    store
        .insert_order(&order(&user, Some("k-1")))
        .await
        .expect("first order");
    let error = store
        .insert_order(&order(&user, Some("k-1")))
        .await
        .expect_err("key reused");
    assert!(matches!(error, RepositoryError::Conflict { .. }));

    store
        .insert_order(&order(&UserId::random(), Some("k-1")))
        .await
        .expect("other user may reuse the key");
}

#[rstest]
#[tokio::test]
async fn summary_counts_pending_orders(store: MemoryStore) {
    let user = UserId::random();
    let placed = order(&user, None);
    store.insert_order(&placed).await.expect("order");
    store
        .insert_order(&order(&user, None))
        .await
        .expect("order");
    OrderRepository::update_status(&store, &placed.id, OrderStatus::Confirmed, Utc::now())
        .await
        .expect("status");

    let summary = store.summary().await.expect("summary");
    assert_eq!(summary.pending_orders, 1);
    assert_eq!(summary.total(), 1);
}

#[rstest]
#[tokio::test]
async fn pricing_lists_by_metal_then_grade(store: MemoryStore) {
    let metals: Vec<String> = PricingRepository::list(&store)
        .await
        .expect("pricing")
        .into_iter()
        .map(|row| row.metal)
        .collect();
    let mut sorted = metals.clone();
    sorted.sort_by_key(|m| m.to_lowercase());
    assert_eq!(metals, sorted);
}

#[rstest]
#[tokio::test]
async fn drafts_are_hidden_from_published_news(store: MemoryStore) {
    let mut draft = NewsRepository::list(&store, true)
        .await
        .expect("news")
        .into_iter()
        .next()
        .expect("seeded article");
    draft.id = crate::domain::ArticleId::random();
    draft.slug = "draft-article".to_owned();
    draft.is_published = false;
    NewsRepository::insert(&store, &draft).await.expect("insert");

    let published = NewsRepository::list(&store, true).await.expect("news");
    assert!(published.iter().all(|a| a.is_published));
    assert_eq!(NewsRepository::list(&store, false).await.expect("all").len(), 2);
}
