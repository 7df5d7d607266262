//! DTOs for decoding identity provider JSON responses.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::{IdentityUser, UserId};

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) id: Uuid,
    #[serde(default)]
    pub(super) email: Option<String>,
    #[serde(default)]
    pub(super) created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(super) last_sign_in_at: Option<DateTime<Utc>>,
}

impl From<UserDto> for IdentityUser {
    fn from(dto: UserDto) -> Self {
        Self {
            id: UserId::from_uuid(dto.id),
            email: dto.email.filter(|email| !email.is_empty()),
            created_at: dto.created_at,
            last_sign_in_at: dto.last_sign_in_at,
        }
    }
}

/// Password grant response; only the user matters here because sessions are
/// kept by this service rather than by bearer tokens.
#[derive(Debug, Deserialize)]
pub(super) struct TokenResponseDto {
    pub(super) user: UserDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserPageDto {
    #[serde(default)]
    pub(super) users: Vec<UserDto>,
}
