//! Shipping address captured at checkout.

use serde::{Deserialize, Serialize};

use crate::domain::validation::{self, SHORT_TEXT_MAX, ValidationError, Violation};

/// Country used when the buyer leaves it blank.
pub const DEFAULT_COUNTRY: &str = "India";

/// Raw address fields as submitted.
#[derive(Debug, Clone, Default)]
pub struct AddressInput<'a> {
    pub full_name: &'a str,
    pub phone: &'a str,
    pub line1: &'a str,
    pub line2: Option<&'a str>,
    pub city: &'a str,
    pub state: &'a str,
    pub postal_code: &'a str,
    pub country: Option<&'a str>,
}

/// Validated delivery address stored on the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub phone: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl ShippingAddress {
    /// Validate raw input. Required fields must be non-blank; the postal code
    /// must be six digits.
    pub fn try_from_input(input: AddressInput<'_>) -> Result<Self, ValidationError> {
        let postal_code = validation::required_text(input.postal_code, "postalCode", 6)?;
        if postal_code.len() != 6 || !postal_code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::new("postalCode", Violation::InvalidFormat));
        }
        Ok(Self {
            full_name: validation::required_text(input.full_name, "fullName", SHORT_TEXT_MAX)?,
            phone: validation::phone(input.phone, "phone")?,
            line1: validation::required_text(input.line1, "line1", SHORT_TEXT_MAX)?,
            line2: validation::optional_text(input.line2, "line2", SHORT_TEXT_MAX)?,
            city: validation::required_text(input.city, "city", SHORT_TEXT_MAX)?,
            state: validation::required_text(input.state, "state", SHORT_TEXT_MAX)?,
            postal_code,
            country: validation::optional_text(input.country, "country", SHORT_TEXT_MAX)?
                .unwrap_or_else(|| DEFAULT_COUNTRY.to_owned()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn input() -> AddressInput<'static> {
        AddressInput {
            full_name: "Asha Rao",
            phone: "+91 98765 43210",
            line1: "Plot 14, MIDC",
            city: "Pune",
            state: "Maharashtra",
            postal_code: "411019",
            ..AddressInput::default()
        }
    }

    #[rstest]
    fn defaults_country(input: AddressInput<'static>) {
        let address = ShippingAddress::try_from_input(input).expect("valid address");
        assert_eq!(address.country, DEFAULT_COUNTRY);
    }

    #[rstest]
    #[case("41101")]
    #[case("4110190")]
    #[case("41A019")]
    fn rejects_bad_postal_codes(input: AddressInput<'static>, #[case] postal_code: &'static str) {
        let err = ShippingAddress::try_from_input(AddressInput {
            postal_code,
            ..input
        })
        .expect_err("invalid postal code");
        assert_eq!(err.field(), "postalCode");
    }

    #[rstest]
    fn rejects_blank_city(input: AddressInput<'static>) {
        let err = ShippingAddress::try_from_input(AddressInput { city: "  ", ..input })
            .expect_err("blank city");
        assert_eq!(err.field(), "city");
        assert_eq!(err.violation(), Violation::Empty);
    }
}
