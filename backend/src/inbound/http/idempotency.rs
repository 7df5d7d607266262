//! Parsing of the `Idempotency-Key` request header.

use actix_web::http::header::HeaderMap;
use serde_json::json;

use crate::domain::{Error, IdempotencyKey, IdempotencyKeyValidationError};

/// HTTP header carrying the client's idempotency key.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Extract the idempotency key, if the client sent one.
pub fn extract_idempotency_key(
    headers: &HeaderMap,
) -> Result<Option<IdempotencyKey>, IdempotencyKeyValidationError> {
    let Some(header_value) = headers.get(IDEMPOTENCY_KEY_HEADER) else {
        return Ok(None);
    };

    let key_str = header_value
        .to_str()
        .map_err(|_| IdempotencyKeyValidationError::InvalidKey)?;

    IdempotencyKey::new(key_str).map(Some)
}

/// Map header validation failures to `invalid_request`.
pub fn map_idempotency_key_error(err: IdempotencyKeyValidationError) -> Error {
    let code = match err {
        IdempotencyKeyValidationError::EmptyKey => "empty_idempotency_key",
        IdempotencyKeyValidationError::InvalidKey => "invalid_idempotency_key",
    };
    Error::invalid_request(format!("{IDEMPOTENCY_KEY_HEADER} header: {err}"))
        .with_details(json!({ "field": IDEMPOTENCY_KEY_HEADER, "code": code }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderName, HeaderValue};
    use rstest::rstest;

    fn headers(value: Option<&'static str>) -> HeaderMap {
        let mut map = HeaderMap::new();
        if let Some(value) = value {
            map.insert(
                HeaderName::from_static("idempotency-key"),
                HeaderValue::from_static(value),
            );
        }
        map
    }

    #[test]
    fn absent_header_is_none() {
        assert_eq!(extract_idempotency_key(&headers(None)), Ok(None));
    }

    #[test]
    fn uuid_header_is_parsed() {
        let key = extract_idempotency_key(&headers(Some("550e8400-e29b-41d4-a716-446655440000")))
            .expect("valid key")
            .expect("present");
        assert_eq!(key.to_string(), "550e8400-e29b-41d4-a716-446655440000");
    }

    #[rstest]
    #[case("", IdempotencyKeyValidationError::EmptyKey)]
    #[case("order-1", IdempotencyKeyValidationError::InvalidKey)]
    fn malformed_header_is_rejected(
        #[case] value: &'static str,
        #[case] expected: IdempotencyKeyValidationError,
    ) {
        assert_eq!(extract_idempotency_key(&headers(Some(value))), Err(expected));
    }

    #[test]
    fn mapped_error_names_the_header() {
        let error = map_idempotency_key_error(IdempotencyKeyValidationError::InvalidKey);
        let details = error.details().expect("details");
        assert_eq!(details["field"], "Idempotency-Key");
        assert_eq!(details["code"], "invalid_idempotency_key");
    }
}
