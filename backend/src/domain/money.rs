//! Integer money amounts.
//!
//! Amounts are held in minor units (paise). Arithmetic saturates rather than
//! wrapping; catalogue prices are far below the overflow range in practice.

use std::fmt;
use std::iter::Sum;

use serde::{Deserialize, Serialize};

/// An amount of Indian rupees in paise.
///
/// # Examples
/// ```
/// use storefront::domain::Money;
///
/// let price = Money::from_minor(12_550);
/// assert_eq!(price.times(2), Money::from_minor(25_100));
/// assert_eq!(price.to_string(), "INR 125.50");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero rupees.
    pub const ZERO: Self = Self(0);

    /// Construct from a paise amount.
    #[must_use]
    pub const fn from_minor(paise: i64) -> Self {
        Self(paise)
    }

    /// Paise held by this amount.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiply by an integer quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(quantity)))
    }

    /// Add two amounts.
    #[must_use]
    pub fn plus(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Take `percent` percent of the amount, rounding half away from zero.
    ///
    /// ```
    /// use storefront::domain::Money;
    ///
    /// assert_eq!(Money::from_minor(1_000).percent(18), Money::from_minor(180));
    /// assert_eq!(Money::from_minor(3).percent(18), Money::from_minor(1));
    /// ```
    #[must_use]
    pub fn percent(self, percent: u32) -> Self {
        let scaled = i128::from(self.0) * i128::from(percent);
        let half = if scaled < 0 { -50 } else { 50 };
        let rounded = (scaled + half) / 100;
        Self(i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX }))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::plus)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "INR {sign}{}.{:02}", abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(10_000, 1_800)]
    #[case(1, 0)]
    #[case(3, 1)]
    #[case(25, 5)]
    #[case(0, 0)]
    fn percent_rounds_half_up(#[case] amount: i64, #[case] expected: i64) {
        assert_eq!(Money::from_minor(amount).percent(18), Money::from_minor(expected));
    }

    #[rstest]
    fn sum_adds_amounts() {
        let total: Money = [100, 250, 5].into_iter().map(Money::from_minor).sum();
        assert_eq!(total, Money::from_minor(355));
    }

    #[rstest]
    fn display_formats_rupees() {
        assert_eq!(Money::from_minor(5).to_string(), "INR 0.05");
        assert_eq!(Money::from_minor(-150).to_string(), "INR -1.50");
    }

    #[rstest]
    fn times_saturates() {
        assert_eq!(Money::from_minor(i64::MAX).times(2), Money::from_minor(i64::MAX));
    }
}
