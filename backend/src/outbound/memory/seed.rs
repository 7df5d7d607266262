//! Demo content for local development.

use std::sync::PoisonError;

use chrono::Duration;

use super::MemoryStore;
use crate::domain::careers::Job;
use crate::domain::catalogue::{Category, Product, Unit};
use crate::domain::news::Article;
use crate::domain::pricing::PricingEntry;
use crate::domain::{ArticleId, CategoryId, JobId, Money, PricingEntryId, ProductId, Role};

/// Email of the seeded back-office account.
pub const DEMO_ADMIN_EMAIL: &str = "admin@metals.example";
/// Password of the seeded back-office account.
pub const DEMO_ADMIN_PASSWORD: &str = "admin-password";
/// Email of the seeded buyer account.
pub const DEMO_BUYER_EMAIL: &str = "buyer@metals.example";
/// Password of the seeded buyer account.
pub const DEMO_BUYER_PASSWORD: &str = "buyer-password";

fn category(name: &str, slug: &str, description: &str) -> Category {
    Category {
        id: CategoryId::random(),
        name: name.to_owned(),
        slug: slug.to_owned(),
        description: Some(description.to_owned()),
    }
}

struct ProductSeed<'a> {
    category: &'a Category,
    name: &'a str,
    slug: &'a str,
    material: &'a str,
    grade: &'a str,
    price_minor: i64,
    unit: Unit,
    stock: u32,
    active: bool,
}

pub(super) fn populate(store: &MemoryStore) {
    let now = store.clock.utc();
    let admin = store.identity.register(DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD);
    let buyer = store.identity.register(DEMO_BUYER_EMAIL, DEMO_BUYER_PASSWORD);

    let ferrous = category("Ferrous Metals", "ferrous", "Mild steel, alloy steel and cast iron.");
    let non_ferrous = category(
        "Non-Ferrous Metals",
        "non-ferrous",
        "Copper, aluminium, brass, zinc and lead.",
    );
    let stainless = category(
        "Stainless Steel",
        "stainless-steel",
        "Austenitic and ferritic stainless grades.",
    );

    let products = [
        ProductSeed {
            category: &ferrous,
            name: "Mild Steel Plate",
            slug: "mild-steel-plate",
            material: "steel",
            grade: "IS 2062 E250",
            price_minor: 6_500,
            unit: Unit::Kg,
            stock: 12_000,
            active: true,
        },
        ProductSeed {
            category: &ferrous,
            name: "TMT Rebar 12mm",
            slug: "tmt-rebar-12mm",
            material: "steel",
            grade: "Fe 500D",
            price_minor: 5_850_000,
            unit: Unit::Tonne,
            stock: 80,
            active: true,
        },
        ProductSeed {
            category: &non_ferrous,
            name: "Copper Wire Rod",
            slug: "copper-wire-rod",
            material: "copper",
            grade: "ETP 8mm",
            price_minor: 78_000,
            unit: Unit::Kg,
            stock: 3_500,
            active: true,
        },
        ProductSeed {
            category: &non_ferrous,
            name: "Aluminium Sheet",
            slug: "aluminium-sheet",
            material: "aluminium",
            grade: "5052 H32",
            price_minor: 410_000,
            unit: Unit::Sheet,
            stock: 240,
            active: true,
        },
        ProductSeed {
            category: &stainless,
            name: "Stainless Steel Coil",
            slug: "stainless-steel-coil",
            material: "stainless steel",
            grade: "304 2B",
            price_minor: 21_500_000,
            unit: Unit::Coil,
            stock: 14,
            active: true,
        },
        ProductSeed {
            category: &non_ferrous,
            name: "Brass Hex Rod",
            slug: "brass-hex-rod",
            material: "brass",
            grade: "CZ121",
            price_minor: 52_000,
            unit: Unit::Kg,
            stock: 0,
            active: false,
        },
    ]
    .into_iter()
    .map(|seed| Product {
        id: ProductId::random(),
        category_id: Some(seed.category.id),
        name: seed.name.to_owned(),
        slug: seed.slug.to_owned(),
        description: Some(format!("{}, grade {}.", seed.name, seed.grade)),
        material: Some(seed.material.to_owned()),
        grade: Some(seed.grade.to_owned()),
        price: Money::from_minor(seed.price_minor),
        unit: seed.unit,
        stock_quantity: seed.stock,
        image_url: None,
        is_active: seed.active,
        created_at: now,
        updated_at: now,
    })
    .collect::<Vec<_>>();

    let pricing = [
        ("Copper", "LME Grade A", 78_450, Unit::Kg, 1.2),
        ("Aluminium", "Ingot P1020", 23_100, Unit::Kg, -0.4),
        ("Steel", "HR Coil", 5_420_000, Unit::Tonne, 0.0),
        ("Zinc", "SHG 99.995", 27_600, Unit::Kg, 0.8),
    ]
    .into_iter()
    .map(|(metal, grade, price, unit, change)| PricingEntry {
        id: PricingEntryId::random(),
        metal: metal.to_owned(),
        grade: grade.to_owned(),
        price_per_unit: Money::from_minor(price),
        unit,
        change_percent: change,
        updated_at: now,
    })
    .collect::<Vec<_>>();

    let job = Job {
        id: JobId::random(),
        title: "Sales Engineer".to_owned(),
        department: "Sales".to_owned(),
        location: "Mumbai".to_owned(),
        employment_type: "Full-time".to_owned(),
        description: "Grow our structural steel and non-ferrous accounts across western India."
            .to_owned(),
        requirements: vec![
            "Degree or diploma in mechanical or metallurgical engineering".to_owned(),
            "Two years of B2B sales experience".to_owned(),
        ],
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    let article = Article {
        id: ArticleId::random(),
        title: "Steel prices steady ahead of monsoon".to_owned(),
        slug: "steel-prices-steady-ahead-of-monsoon".to_owned(),
        excerpt: Some("HR coil held flat week on week as mills kept list prices unchanged.".to_owned()),
        content: "Domestic hot-rolled coil prices were unchanged this week. Buyers should expect \
                  seasonal softness in construction demand over the coming quarter."
            .to_owned(),
        category: Some("Market update".to_owned()),
        image_url: None,
        author: Some("Market Desk".to_owned()),
        is_published: true,
        published_at: Some(now - Duration::days(1)),
        created_at: now - Duration::days(1),
        updated_at: now - Duration::days(1),
    };

    let mut tables = store.tables.lock().unwrap_or_else(PoisonError::into_inner);
    tables.categories = vec![ferrous, non_ferrous, stainless];
    tables.products = products;
    tables.pricing = pricing;
    tables.jobs = vec![job];
    tables.articles = vec![article];
    tables.roles = vec![(admin, Role::Admin), (buyer, Role::Customer)];
}
