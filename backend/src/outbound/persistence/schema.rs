//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    categories (id) {
        id -> Uuid,
        name -> Text,
        slug -> Text,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Catalogue entries. Prices are held in paise.
    products (id) {
        id -> Uuid,
        category_id -> Nullable<Uuid>,
        name -> Text,
        slug -> Text,
        description -> Nullable<Text>,
        material -> Nullable<Text>,
        grade -> Nullable<Text>,
        price_minor -> Int8,
        unit -> Text,
        stock_quantity -> Int4,
        image_url -> Nullable<Text>,
        is_active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per (product, user); resubmitting overwrites.
    reviews (id) {
        id -> Uuid,
        product_id -> Uuid,
        user_id -> Uuid,
        rating -> Int2,
        title -> Nullable<Text>,
        comment -> Nullable<Text>,
        author_name -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Whole cart per user, stored as a JSON array of lines.
    carts (user_id) {
        user_id -> Uuid,
        items -> Jsonb,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    orders (id) {
        id -> Uuid,
        order_number -> Text,
        user_id -> Uuid,
        status -> Text,
        subtotal_minor -> Int8,
        tax_minor -> Int8,
        total_minor -> Int8,
        shipping_address -> Jsonb,
        notes -> Nullable<Text>,
        idempotency_key -> Nullable<Text>,
        request_fingerprint -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Line snapshots taken at checkout; no foreign key to `products`.
    order_items (id) {
        id -> Uuid,
        order_id -> Uuid,
        product_id -> Uuid,
        product_name -> Text,
        unit_price_minor -> Int8,
        quantity -> Int4,
        unit -> Text,
        line_total_minor -> Int8,
    }
}

diesel::table! {
    pricing_index (id) {
        id -> Uuid,
        metal -> Text,
        grade -> Text,
        price_minor -> Int8,
        unit -> Text,
        change_percent -> Float8,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    jobs (id) {
        id -> Uuid,
        title -> Text,
        department -> Text,
        location -> Text,
        employment_type -> Text,
        description -> Text,
        requirements -> Array<Text>,
        is_active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    job_applications (id) {
        id -> Uuid,
        job_id -> Uuid,
        user_id -> Nullable<Uuid>,
        full_name -> Text,
        email -> Text,
        phone -> Text,
        cover_letter -> Nullable<Text>,
        resume_url -> Nullable<Text>,
        status -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    fabrication_requests (id) {
        id -> Uuid,
        user_id -> Nullable<Uuid>,
        name -> Text,
        company -> Nullable<Text>,
        email -> Text,
        phone -> Text,
        material -> Text,
        service_type -> Text,
        quantity -> Text,
        specifications -> Nullable<Text>,
        status -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    recycling_requests (id) {
        id -> Uuid,
        user_id -> Nullable<Uuid>,
        name -> Text,
        company -> Nullable<Text>,
        email -> Text,
        phone -> Text,
        material_type -> Text,
        estimated_quantity -> Text,
        pickup_address -> Text,
        status -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    news_articles (id) {
        id -> Uuid,
        title -> Text,
        slug -> Text,
        excerpt -> Nullable<Text>,
        content -> Text,
        category -> Nullable<Text>,
        image_url -> Nullable<Text>,
        author -> Nullable<Text>,
        is_published -> Bool,
        published_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    contact_messages (id) {
        id -> Uuid,
        name -> Text,
        email -> Text,
        phone -> Nullable<Text>,
        subject -> Text,
        message -> Text,
        is_read -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Storefront profile keyed by the identity provider's user id.
    profiles (user_id) {
        user_id -> Uuid,
        email -> Nullable<Text>,
        full_name -> Nullable<Text>,
        company_name -> Nullable<Text>,
        phone -> Nullable<Text>,
        gst_number -> Nullable<Text>,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    user_roles (user_id, role) {
        user_id -> Uuid,
        role -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(products -> categories (category_id));
diesel::joinable!(reviews -> products (product_id));
diesel::joinable!(order_items -> orders (order_id));
diesel::joinable!(job_applications -> jobs (job_id));

diesel::allow_tables_to_appear_in_same_query!(
    categories,
    products,
    reviews,
    carts,
    orders,
    order_items,
    pricing_index,
    jobs,
    job_applications,
    fabrication_requests,
    recycling_requests,
    news_articles,
    contact_messages,
    profiles,
    user_roles,
);
