//! Business logic powering the admin REST routes. These helpers validate
//! input against the fixed tier ladder, then hand the actual writes to the
//! roster synchronization layer.

use uuid::Uuid;

use crate::{
    dao::models::{GameModeTierEntity, PlayerPatch},
    dto::{
        admin::{
            ActionResponse, CreatePlayerRequest, GameModeTierInput, UpdatePlayerRequest,
        },
        common::{PlayerPage, UserPage},
    },
    error::ServiceError,
    services::{leaderboard, roster_service},
    state::{SharedState, tier::Tier},
};

/// Reject tier labels outside the fixed ladder before they reach storage.
fn validated_entries(
    entries: Vec<GameModeTierInput>,
) -> Result<Vec<GameModeTierEntity>, ServiceError> {
    entries
        .into_iter()
        .map(|entry| {
            if Tier::from_label(&entry.tier).is_none() {
                return Err(ServiceError::InvalidInput(format!(
                    "unknown tier label `{}`",
                    entry.tier
                )));
            }
            Ok(entry.into())
        })
        .collect()
}

/// One page of the player roster, filtered by username substring.
pub async fn list_players(state: &SharedState, query: Option<&str>, page: usize) -> PlayerPage {
    let snapshot = state.snapshot().await;
    let filtered = match query.map(str::trim) {
        Some(fragment) if !fragment.is_empty() => {
            leaderboard::search_players(&snapshot.players, fragment)
        }
        _ => snapshot.players.clone(),
    };

    let page = leaderboard::paginate(&filtered, state.config().page_size(), page);
    PlayerPage::from_page(state.config(), page)
}

/// One page of the registered users, filtered by discord identity substring.
pub async fn list_users(state: &SharedState, query: Option<&str>, page: usize) -> UserPage {
    let snapshot = state.snapshot().await;
    let filtered = match query.map(str::trim) {
        Some(fragment) if !fragment.is_empty() => {
            leaderboard::search_users(&snapshot.users, fragment)
        }
        _ => snapshot.users.clone(),
    };

    let page = leaderboard::paginate(&filtered, state.config().page_size(), page);
    UserPage::from_page(page)
}

/// Create a player record from the admin form.
pub async fn create_player(
    state: &SharedState,
    payload: CreatePlayerRequest,
) -> Result<ActionResponse, ServiceError> {
    let game_modes = validated_entries(payload.game_modes)?;
    let username = payload.username.clone();

    roster_service::add_player(
        state,
        roster_service::NewPlayer {
            username: payload.username,
            premium: payload.premium,
            tested: payload.tested,
            game_modes,
        },
    )
    .await;

    Ok(ActionResponse {
        message: format!("player `{username}` created"),
    })
}

/// Apply a partial edit to a player record.
pub async fn update_player(
    state: &SharedState,
    id: Uuid,
    payload: UpdatePlayerRequest,
) -> Result<ActionResponse, ServiceError> {
    let snapshot = state.snapshot().await;
    if snapshot.player_by_id(id).is_none() {
        return Err(ServiceError::NotFound(format!("player `{id}` not found")));
    }

    let patch = PlayerPatch {
        username: payload.username,
        premium: payload.premium,
        tested: payload.tested,
        game_modes: payload
            .game_modes
            .map(validated_entries)
            .transpose()?,
        ..PlayerPatch::default()
    };

    roster_service::update_player(state, id, patch).await;
    Ok(ActionResponse {
        message: format!("player `{id}` updated"),
    })
}

/// Delete a player record.
pub async fn delete_player(state: &SharedState, id: Uuid) {
    roster_service::delete_player(state, id).await;
}

/// Place a player into one of the three featured slots.
pub async fn feature_player(
    state: &SharedState,
    id: Uuid,
    rank: u8,
) -> Result<ActionResponse, ServiceError> {
    let snapshot = state.snapshot().await;
    if snapshot.player_by_id(id).is_none() {
        return Err(ServiceError::NotFound(format!("player `{id}` not found")));
    }

    roster_service::set_featured_player(state, id, rank).await;
    Ok(ActionResponse {
        message: format!("player `{id}` featured at slot {rank}"),
    })
}

/// Remove a player from the featured slots.
pub async fn unfeature_player(state: &SharedState, id: Uuid) -> ActionResponse {
    roster_service::remove_featured(state, id).await;
    ActionResponse {
        message: format!("player `{id}` no longer featured"),
    }
}

/// Delete a user account, closing any of its live sessions.
///
/// The user's player records are a separate entity and stay untouched.
pub async fn delete_user(state: &SharedState, id: Uuid) {
    roster_service::delete_user(state, id).await;
    state.sessions().drop_user(id);
}

/// Add a name to the administered game mode set.
///
/// Whitespace-only names are ignored without an error.
pub async fn add_game_mode(state: &SharedState, name: &str) -> ActionResponse {
    roster_service::add_game_mode(state, name).await;
    ActionResponse {
        message: "game mode set updated".into(),
    }
}

/// Remove a name from the administered game mode set.
pub async fn remove_game_mode(state: &SharedState, name: &str) {
    roster_service::remove_game_mode(state, name).await;
}
