//! Slug validation shared by categories, products, and news articles.
//!
//! Slugs are lowercase ASCII letters and digits separated by single hyphens,
//! with no leading or trailing hyphen.

use super::validation::{ValidationError, Violation};

const SLUG_MAX: usize = 120;

/// Return `true` when `value` is a valid slug.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= SLUG_MAX
        && value
            .split('-')
            .all(|part| !part.is_empty() && part.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit()))
}

/// Validate `value` as a slug for `field`.
pub(crate) fn slug(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, Violation::Empty));
    }
    if !is_valid_slug(trimmed) {
        return Err(ValidationError::new(field, Violation::InvalidFormat));
    }
    Ok(trimmed.to_owned())
}

/// Derive a slug from free text, e.g. a product name.
///
/// Returns `None` when the text contains no ASCII alphanumerics.
pub(crate) fn slugify(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out.truncate(SLUG_MAX);
    while out.ends_with('-') {
        out.pop();
    }
    (!out.is_empty()).then_some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("mild-steel-plate", true)]
    #[case("ss304", true)]
    #[case("Mild-Steel", false)]
    #[case("double--hyphen", false)]
    #[case("-leading", false)]
    #[case("trailing-", false)]
    #[case("", false)]
    fn validates_slugs(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_valid_slug(input), expected);
    }

    #[rstest]
    #[case("Mild Steel Plate (IS 2062)", Some("mild-steel-plate-is-2062"))]
    #[case("  Copper -- Wire ", Some("copper-wire"))]
    #[case("***", None)]
    fn slugify_derives_slugs(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(slugify(input).as_deref(), expected);
    }
}
