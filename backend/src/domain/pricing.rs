//! Metal pricing index published on the storefront.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalogue::Unit;
use super::validation::{self, SHORT_TEXT_MAX, ValidationError, Violation};
use super::{Money, PricingEntryId};

/// One quoted price in the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingEntry {
    pub id: PricingEntryId,
    pub metal: String,
    pub grade: String,
    pub price_per_unit: Money,
    pub unit: Unit,
    /// Day-on-day movement in percent.
    pub change_percent: f64,
    pub updated_at: DateTime<Utc>,
}

impl PricingEntry {
    /// Build a row from a validated draft.
    pub fn create(id: PricingEntryId, draft: PricingDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            metal: draft.metal,
            grade: draft.grade,
            price_per_unit: draft.price_per_unit,
            unit: draft.unit,
            change_percent: draft.change_percent,
            updated_at: now,
        }
    }

    /// Sort key for the public listing.
    pub fn listing_key(&self) -> (String, String) {
        (self.metal.to_lowercase(), self.grade.to_lowercase())
    }
}

/// Validated admin input for a pricing row.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingDraft {
    metal: String,
    grade: String,
    price_per_unit: Money,
    unit: Unit,
    change_percent: f64,
}

impl PricingDraft {
    /// Validate raw fields.
    pub fn try_new(
        metal: &str,
        grade: &str,
        price_minor: i64,
        unit: &str,
        change_percent: f64,
    ) -> Result<Self, ValidationError> {
        let price_per_unit = Money::from_minor(price_minor);
        if price_per_unit.is_negative() {
            return Err(ValidationError::new("pricePerUnit", Violation::OutOfRange));
        }
        if !change_percent.is_finite() || !(-100.0..=1_000.0).contains(&change_percent) {
            return Err(ValidationError::new("changePercent", Violation::OutOfRange));
        }
        Ok(Self {
            metal: validation::required_text(metal, "metal", SHORT_TEXT_MAX)?,
            grade: validation::required_text(grade, "grade", SHORT_TEXT_MAX)?,
            price_per_unit,
            unit: unit.parse()?,
            change_percent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-1, 0.0, "pricePerUnit")]
    #[case(100, f64::NAN, "changePercent")]
    #[case(100, -150.0, "changePercent")]
    fn rejects_out_of_range(
        #[case] price: i64,
        #[case] change: f64,
        #[case] field: &str,
    ) {
        let err = PricingDraft::try_new("Copper", "LME Grade A", price, "tonne", change)
            .expect_err("invalid row");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn listing_key_is_case_insensitive() {
        let draft = PricingDraft::try_new("Copper", "Grade A", 100, "kg", 1.5).expect("valid");
        let entry = PricingEntry::create(PricingEntryId::random(), draft, Utc::now());
        assert_eq!(entry.listing_key(), ("copper".to_owned(), "grade a".to_owned()));
    }
}
