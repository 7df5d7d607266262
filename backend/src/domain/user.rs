//! Accounts: user identifiers, roles, and customer profiles.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{self, SHORT_TEXT_MAX, ValidationError, Violation};

/// Validation errors for [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIdValidationError {
    EmptyId,
    InvalidId,
}

impl fmt::Display for UserIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
        }
    }
}

impl std::error::Error for UserIdValidationError {}

/// Stable user identifier issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserIdValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Wrap an already-parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    fn from_owned(id: String) -> Result<Self, UserIdValidationError> {
        if id.is_empty() {
            return Err(UserIdValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserIdValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserIdValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Application role stored in `user_roles`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Back-office staff.
    Admin,
    /// Buyer account.
    Customer,
}

impl Role {
    /// Database and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Customer => "customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "customer" => Ok(Self::Customer),
            _ => Err(ValidationError::new("role", Violation::UnknownValue)),
        }
    }
}

/// Customer profile row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: UserId,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub gst_number: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Empty profile created on first access.
    pub fn empty(user_id: UserId, email: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            email,
            full_name: None,
            company_name: None,
            phone: None,
            gst_number: None,
            updated_at: now,
        }
    }

    /// Apply a validated update.
    pub fn apply(&mut self, update: ProfileUpdate, now: DateTime<Utc>) {
        self.full_name = update.full_name;
        self.company_name = update.company_name;
        self.phone = update.phone;
        self.gst_number = update.gst_number;
        self.updated_at = now;
    }
}

/// Validated profile changes submitted by the account owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    full_name: Option<String>,
    company_name: Option<String>,
    phone: Option<String>,
    gst_number: Option<String>,
}

const GST_NUMBER_LEN: usize = 15;

impl ProfileUpdate {
    /// Validate raw profile fields. Blank values clear the field.
    pub fn try_new(
        full_name: Option<&str>,
        company_name: Option<&str>,
        phone: Option<&str>,
        gst_number: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let gst_number = validation::optional_text(gst_number, "gstNumber", GST_NUMBER_LEN)?
            .map(|gst| gst.to_uppercase());
        if let Some(gst) = &gst_number {
            let well_formed = gst.len() == GST_NUMBER_LEN
                && gst.chars().all(|c| c.is_ascii_alphanumeric());
            if !well_formed {
                return Err(ValidationError::new("gstNumber", Violation::InvalidFormat));
            }
        }
        Ok(Self {
            full_name: validation::optional_text(full_name, "fullName", SHORT_TEXT_MAX)?,
            company_name: validation::optional_text(company_name, "companyName", SHORT_TEXT_MAX)?,
            phone: validation::optional_phone(phone, "phone")?,
            gst_number,
        })
    }
}

/// Account as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityUser {
    pub id: UserId,
    pub email: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

/// Identity provider account merged with its application roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: UserId,
    pub email: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_sign_in_at: Option<DateTime<Utc>>,
    pub roles: Vec<Role>,
}

impl Account {
    /// Merge an identity record with its roles.
    pub fn from_identity(user: IdentityUser, roles: Vec<Role>) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
            last_sign_in_at: user.last_sign_in_at,
            roles,
        }
    }

    /// Whether the account holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserIdValidationError::EmptyId)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserIdValidationError::InvalidId)]
    #[case("not-a-uuid", UserIdValidationError::InvalidId)]
    fn user_id_rejects_invalid(#[case] input: &str, #[case] expected: UserIdValidationError) {
        assert_eq!(UserId::new(input), Err(expected));
    }

    #[rstest]
    fn user_id_round_trips_through_serde() {
        let id = UserId::random();
        let json = serde_json::to_string(&id).expect("serialise");
        let parsed: UserId = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(parsed, id);
    }

    #[rstest]
    #[case("admin", Role::Admin)]
    #[case("customer", Role::Customer)]
    fn role_parses(#[case] input: &str, #[case] expected: Role) {
        assert_eq!(input.parse::<Role>(), Ok(expected));
    }

    #[rstest]
    fn role_rejects_unknown() {
        assert!("owner".parse::<Role>().is_err());
    }

    #[rstest]
    fn profile_update_normalises_gst_number() {
        let update = ProfileUpdate::try_new(None, None, None, Some("27aapfu0939f1zv"))
            .expect("valid update");
        assert_eq!(update.gst_number.as_deref(), Some("27AAPFU0939F1ZV"));
    }

    #[rstest]
    fn profile_update_rejects_short_gst_number() {
        let err = ProfileUpdate::try_new(None, None, None, Some("27AAPF")).expect_err("invalid");
        assert_eq!(err.field(), "gstNumber");
    }

    #[rstest]
    fn profile_apply_replaces_fields() {
        let now = Utc::now();
        let mut profile = Profile::empty(UserId::random(), None, now);
        let update = ProfileUpdate::try_new(Some("Asha Rao"), Some("Rao Metals"), None, None)
            .expect("valid update");
        profile.apply(update, now);
        assert_eq!(profile.full_name.as_deref(), Some("Asha Rao"));
        assert_eq!(profile.company_name.as_deref(), Some("Rao Metals"));
        assert!(profile.phone.is_none());
    }
}
