//! DTO definitions for login, registration, and session management.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::state::Session;

use super::format_timestamp;

/// Discord identity submitted on login or registration.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct IdentityRequest {
    /// Raw discord identity; compared trimmed and lowercased.
    #[validate(length(min = 2, max = 64))]
    pub discord_id: String,
}

/// Session handed back after a successful login or registration.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    /// Bearer token for the `X-Session-Token` header.
    pub token: String,
    pub user_id: Uuid,
    /// Normalized discord identity the session belongs to.
    pub discord_id: String,
    /// Whether the session unlocks the admin screen.
    pub owner: bool,
    pub created_at: String,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            user_id: session.user_id,
            discord_id: session.discord_id,
            owner: session.owner,
            created_at: format_timestamp(session.created_at),
        }
    }
}
