//! Contact form messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{self, LONG_TEXT_MAX, SHORT_TEXT_MAX, ValidationError};
use super::MessageId;

/// Message left through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: MessageId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Validated contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    name: String,
    email: String,
    phone: Option<String>,
    subject: String,
    message: String,
}

impl ContactDraft {
    /// Validate raw form fields.
    pub fn try_new(
        name: &str,
        email: &str,
        phone: Option<&str>,
        subject: &str,
        message: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validation::required_text(name, "name", SHORT_TEXT_MAX)?,
            email: validation::email(email, "email")?,
            phone: validation::optional_phone(phone, "phone")?,
            subject: validation::required_text(subject, "subject", SHORT_TEXT_MAX)?,
            message: validation::required_text(message, "message", LONG_TEXT_MAX)?,
        })
    }

    /// Unread message received at `now`.
    pub fn into_message(self, now: DateTime<Utc>) -> ContactMessage {
        ContactMessage {
            id: MessageId::random(),
            name: self.name,
            email: self.email,
            phone: self.phone,
            subject: self.subject,
            message: self.message,
            is_read: false,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_messages_are_unread() {
        let message = ContactDraft::try_new(
            "Sanjay",
            "sanjay@example.com",
            None,
            "Bulk quote",
            "Need 20 t of TMT bars.",
        )
        .expect("valid message")
        .into_message(Utc::now());
        assert!(!message.is_read);
    }

    #[rstest]
    #[case("", "sanjay@example.com", "s", "m", "name")]
    #[case("Sanjay", "sanjay", "s", "m", "email")]
    #[case("Sanjay", "sanjay@example.com", "", "m", "subject")]
    #[case("Sanjay", "sanjay@example.com", "s", " ", "message")]
    fn rejects_missing_fields(
        #[case] name: &str,
        #[case] email: &str,
        #[case] subject: &str,
        #[case] message: &str,
        #[case] field: &str,
    ) {
        let err = ContactDraft::try_new(name, email, None, subject, message)
            .expect_err("invalid message");
        assert_eq!(err.field(), field);
    }
}
