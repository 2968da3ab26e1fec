//! Login, registration, and session lifecycle.
//!
//! Identities are compared trimmed and lowercased. The owner role belongs to
//! exactly one configured identity; the first login with that identity
//! auto-creates the owner account.

use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::{
    dao::models::UserEntity,
    error::ServiceError,
    services::roster_service,
    state::{Session, SharedState},
};

/// Normalize a raw discord identity for comparison and storage.
pub fn normalize_identity(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Open a session for an existing identity.
///
/// An unknown identity is a normal `None` outcome, with one exception: the
/// configured owner identity may log in before ever registering, which
/// creates the owner account on the spot.
pub async fn login(
    state: &SharedState,
    raw_identity: &str,
) -> Result<Option<Session>, ServiceError> {
    let normalized = normalize_identity(raw_identity);
    let snapshot = state.snapshot().await;

    if let Some(user) = snapshot
        .users
        .iter()
        .find(|user| normalize_identity(&user.discord_id) == normalized)
    {
        let owner = user.owner || state.config().is_owner_identity(&normalized);
        return Ok(Some(state.sessions().open(user, owner)));
    }

    if state.config().is_owner_identity(&normalized) {
        let user = create_user(state, normalized, true).await?;
        info!(user = %user.id, "auto-created owner account on first login");
        return Ok(Some(state.sessions().open(&user, true)));
    }

    Ok(None)
}

/// Register a new identity and open its first session.
///
/// Returns `None` when the identity is already taken under normalized
/// comparison; no user row is created in that case.
pub async fn register(
    state: &SharedState,
    raw_identity: &str,
) -> Result<Option<Session>, ServiceError> {
    let normalized = normalize_identity(raw_identity);
    let snapshot = state.snapshot().await;

    if snapshot
        .users
        .iter()
        .any(|user| normalize_identity(&user.discord_id) == normalized)
    {
        return Ok(None);
    }

    let owner = state.config().is_owner_identity(&normalized);
    let user = create_user(state, normalized, owner).await?;
    Ok(Some(state.sessions().open(&user, owner)))
}

/// Close the session holding `token`. Purely local; no remote effect.
pub fn logout(state: &SharedState, token: &str) -> bool {
    state.sessions().close(token)
}

/// Session currently associated with `token`.
pub fn current_session(state: &SharedState, token: &str) -> Option<Session> {
    state.sessions().get(token)
}

async fn create_user(
    state: &SharedState,
    discord_id: String,
    owner: bool,
) -> Result<UserEntity, ServiceError> {
    let store = state.require_table_store().await?;
    let user = UserEntity {
        id: Uuid::new_v4(),
        discord_id,
        owner,
        created_at: OffsetDateTime::now_utc(),
    };

    store.insert_user(user.clone()).await?;
    roster_service::load(state).await;
    Ok(user)
}
