//! Product reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::validation::{self, LONG_TEXT_MAX, SHORT_TEXT_MAX, ValidationError, Violation};
use crate::domain::{ProductId, ReviewId, UserId};

/// Star rating between one and five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Validate a raw star count.
    pub fn new(stars: u8) -> Result<Self, ValidationError> {
        if (1..=5).contains(&stars) {
            Ok(Self(stars))
        } else {
            Err(ValidationError::new("rating", Violation::OutOfRange))
        }
    }

    /// Number of stars.
    pub fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

/// A customer's review of a product. One per (user, product).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_id: UserId,
    pub rating: Rating,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated review submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    rating: Rating,
    title: Option<String>,
    comment: Option<String>,
    author_name: Option<String>,
}

impl ReviewDraft {
    /// Validate raw review fields.
    pub fn try_new(
        stars: u8,
        title: Option<&str>,
        comment: Option<&str>,
        author_name: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            rating: Rating::new(stars)?,
            title: validation::optional_text(title, "title", SHORT_TEXT_MAX)?,
            comment: validation::optional_text(comment, "comment", LONG_TEXT_MAX)?,
            author_name: validation::optional_text(author_name, "authorName", SHORT_TEXT_MAX)?,
        })
    }

    /// Build the review row for `user_id` on `product_id`.
    pub fn into_review(
        self,
        product_id: ProductId,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Review {
        Review {
            id: ReviewId::random(),
            product_id,
            user_id,
            rating: self.rating,
            title: self.title,
            comment: self.comment,
            author_name: self.author_name,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(5, true)]
    #[case(6, false)]
    fn rating_bounds(#[case] stars: u8, #[case] ok: bool) {
        assert_eq!(Rating::new(stars).is_ok(), ok);
    }

    #[rstest]
    fn rating_deserialise_rejects_out_of_range() {
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[rstest]
    fn draft_blank_comment_is_none() {
        let draft = ReviewDraft::try_new(4, None, Some("   "), None).expect("valid review");
        let review = draft.into_review(ProductId::random(), UserId::random(), Utc::now());
        assert!(review.comment.is_none());
        assert_eq!(review.rating.stars(), 4);
    }
}
