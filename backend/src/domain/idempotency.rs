//! Idempotency primitives for safe checkout retries.
//!
//! Clients send an `Idempotency-Key` header (a UUID) with a checkout. The
//! order created for that key stores a fingerprint of the request payload so a
//! retry with the same payload replays the order while a different payload
//! under the same key is rejected as a conflict.
//!
//! Payloads are canonicalised before hashing (object keys sorted recursively,
//! compact serialisation) and hashed with SHA-256.

use std::fmt;

use serde_json::Value;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Validation errors for [`IdempotencyKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdempotencyKeyValidationError {
    /// The key string was empty.
    EmptyKey,
    /// The key string was not a valid UUID.
    InvalidKey,
}

impl fmt::Display for IdempotencyKeyValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyKey => write!(f, "idempotency key must not be empty"),
            Self::InvalidKey => write!(f, "idempotency key must be a valid UUID"),
        }
    }
}

impl std::error::Error for IdempotencyKeyValidationError {}

/// Client-provided idempotency key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdempotencyKey(Uuid);

impl IdempotencyKey {
    /// Validate and construct a key from header text.
    ///
    /// ```
    /// use storefront::domain::IdempotencyKey;
    ///
    /// let key = IdempotencyKey::new("550e8400-e29b-41d4-a716-446655440000").unwrap();
    /// assert_eq!(key.to_string(), "550e8400-e29b-41d4-a716-446655440000");
    /// ```
    pub fn new(key: impl AsRef<str>) -> Result<Self, IdempotencyKeyValidationError> {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(IdempotencyKeyValidationError::EmptyKey);
        }
        if key.trim() != key {
            return Err(IdempotencyKeyValidationError::InvalidKey);
        }
        Uuid::parse_str(key)
            .map(Self)
            .map_err(|_| IdempotencyKeyValidationError::InvalidKey)
    }

    /// Generate a random key.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Lowercase hex SHA-256 of the canonical form of `value`.
pub fn payload_fingerprint(value: &Value) -> String {
    let canonical = canonicalize(value);
    // Serialising a `Value` cannot fail: its map keys are always strings.
    let bytes = serde_json::to_vec(&canonical).unwrap_or_default();
    hex::encode(Sha256::digest(&bytes))
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut sorted: Vec<_> = map.iter().collect();
            sorted.sort_by_key(|(k, _)| k.as_str());
            Value::Object(
                sorted
                    .into_iter()
                    .map(|(k, v)| (k.clone(), canonicalize(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("", IdempotencyKeyValidationError::EmptyKey)]
    #[case("abc", IdempotencyKeyValidationError::InvalidKey)]
    #[case(" 550e8400-e29b-41d4-a716-446655440000", IdempotencyKeyValidationError::InvalidKey)]
    fn rejects_invalid_keys(#[case] raw: &str, #[case] expected: IdempotencyKeyValidationError) {
        assert_eq!(IdempotencyKey::new(raw), Err(expected));
    }

    #[rstest]
    fn fingerprint_ignores_key_order() {
        let a = json!({ "b": 2, "a": { "y": 1, "x": [3, 1] } });
        let b = json!({ "a": { "x": [3, 1], "y": 1 }, "b": 2 });
        assert_eq!(payload_fingerprint(&a), payload_fingerprint(&b));
    }

    #[rstest]
    fn fingerprint_respects_array_order() {
        let a = json!([1, 2]);
        let b = json!([2, 1]);
        assert_ne!(payload_fingerprint(&a), payload_fingerprint(&b));
    }

    #[rstest]
    fn fingerprint_is_hex_sha256() {
        assert_eq!(payload_fingerprint(&json!({})).len(), 64);
    }
}
