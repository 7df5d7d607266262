//! Cache-Control values shared by handlers.

/// Per-user responses (profile, cart, own orders) must never be served from
/// a shared cache.
pub const PRIVATE_NO_CACHE: &str = "private, no-cache, must-revalidate";

/// Header tuple for per-user responses.
pub const fn private_no_cache_header() -> (&'static str, &'static str) {
    ("Cache-Control", PRIVATE_NO_CACHE)
}
