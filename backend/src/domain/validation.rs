//! Field validation shared by storefront aggregates.
//!
//! Each constructor in the domain reports the first violated field as a
//! [`ValidationError`]; inbound adapters surface it as an `invalid_request`
//! error whose details carry the camelCase field name and a stable code.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::json;

use super::Error;

/// Reason a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// Value was missing or blank once trimmed.
    Empty,
    /// Value exceeded the maximum number of characters.
    TooLong { max: usize },
    /// Value was not a plausible email address.
    InvalidEmail,
    /// Value was not a plausible phone number.
    InvalidPhone,
    /// Value fell outside the permitted numeric range.
    OutOfRange,
    /// Value is not one of the accepted options.
    UnknownValue,
    /// Value does not have the expected format.
    InvalidFormat,
}

impl Violation {
    /// Stable machine-readable code for the violation.
    pub fn code(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::TooLong { .. } => "too_long",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidPhone => "invalid_phone",
            Self::OutOfRange => "out_of_range",
            Self::UnknownValue => "unknown_value",
            Self::InvalidFormat => "invalid_format",
        }
    }
}

/// A single field validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    field: &'static str,
    violation: Violation,
}

impl ValidationError {
    /// Record a violation against `field`.
    pub const fn new(field: &'static str, violation: Violation) -> Self {
        Self { field, violation }
    }

    /// Name of the offending field as exposed over the API.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// What was wrong with it.
    pub fn violation(&self) -> Violation {
        self.violation
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.field;
        match self.violation {
            Violation::Empty => write!(f, "{field} must not be empty"),
            Violation::TooLong { max } => write!(f, "{field} must be at most {max} characters"),
            Violation::InvalidEmail => write!(f, "{field} must be a valid email address"),
            Violation::InvalidPhone => write!(f, "{field} must be a valid phone number"),
            Violation::OutOfRange => write!(f, "{field} is out of range"),
            Violation::UnknownValue => write!(f, "{field} has an unsupported value"),
            Violation::InvalidFormat => write!(f, "{field} has an invalid format"),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Error {
    fn from(value: ValidationError) -> Self {
        Error::invalid_request(value.to_string()).with_details(json!({
            "field": value.field,
            "code": value.violation.code(),
        }))
    }
}

/// Default upper bound for short free-text fields such as names.
pub const SHORT_TEXT_MAX: usize = 200;
/// Upper bound for long free-text fields such as descriptions.
pub const LONG_TEXT_MAX: usize = 20_000;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        // Digits with optional leading plus and common separators.
        Regex::new(r"^\+?[0-9][0-9 ()-]{6,18}[0-9]$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

/// Trim `value` and require it to be non-empty and at most `max` characters.
pub fn required_text(
    value: &str,
    field: &'static str,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, Violation::Empty));
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::new(field, Violation::TooLong { max }));
    }
    Ok(trimmed.to_owned())
}

/// Like [`required_text`] but blank input becomes `None`.
pub fn optional_text(
    value: Option<&str>,
    field: &'static str,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => required_text(v, field, max).map(Some),
        None => Ok(None),
    }
}

/// Require a plausible email address, normalised to lowercase.
pub fn email(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = required_text(value, field, 254)?;
    if !email_regex().is_match(&trimmed) {
        return Err(ValidationError::new(field, Violation::InvalidEmail));
    }
    Ok(trimmed.to_lowercase())
}

/// Require a plausible phone number.
pub fn phone(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = required_text(value, field, 32)?;
    if !phone_regex().is_match(&trimmed) {
        return Err(ValidationError::new(field, Violation::InvalidPhone));
    }
    Ok(trimmed)
}

/// Like [`phone`] but blank input becomes `None`.
pub fn optional_phone(
    value: Option<&str>,
    field: &'static str,
) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => phone(v, field).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn required_text_trims() {
        assert_eq!(required_text("  steel  ", "name", 10), Ok("steel".to_owned()));
    }

    #[rstest]
    #[case("   ", Violation::Empty)]
    #[case("abcdefghijk", Violation::TooLong { max: 10 })]
    fn required_text_rejects(#[case] input: &str, #[case] expected: Violation) {
        let err = required_text(input, "name", 10).expect_err("invalid");
        assert_eq!(err.violation(), expected);
        assert_eq!(err.field(), "name");
    }

    #[rstest]
    fn optional_text_maps_blank_to_none() {
        assert_eq!(optional_text(Some("  "), "notes", 10), Ok(None));
        assert_eq!(optional_text(None, "notes", 10), Ok(None));
    }

    #[rstest]
    #[case("Buyer@Example.COM", true)]
    #[case("buyer@example", false)]
    #[case("buyer example.com", false)]
    fn email_validation(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(email(input, "email").is_ok(), ok);
    }

    #[rstest]
    fn email_is_lowercased() {
        assert_eq!(email("Buyer@Example.COM", "email"), Ok("buyer@example.com".to_owned()));
    }

    #[rstest]
    #[case("+91 98765 43210", true)]
    #[case("022-2345-6789", true)]
    #[case("12", false)]
    #[case("call me", false)]
    fn phone_validation(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(phone(input, "phone").is_ok(), ok);
    }

    #[rstest]
    fn converts_to_invalid_request_with_details() {
        let error: Error = ValidationError::new("email", Violation::InvalidEmail).into();
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().expect("details");
        assert_eq!(details["field"], "email");
        assert_eq!(details["code"], "invalid_email");
    }
}
