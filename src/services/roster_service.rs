//! Synchronization between the remote table gateway and the in-memory snapshot.
//!
//! Writes go to the gateway and are followed by a full reload of all three
//! tables; the snapshot is never patched in place. Write failures are logged
//! and swallowed, so the worst observable outcome of a failed call is a stale
//! view that the next successful reload corrects.

use std::sync::Arc;

use futures::try_join;
use time::OffsetDateTime;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    dao::{
        models::{GameModeEntity, GameModeTierEntity, PlayerEntity, PlayerPatch},
        table_store::TableStore,
    },
    services::sse_events,
    state::{SharedState, Snapshot},
};

/// Fields supplied when creating a player record.
#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub username: String,
    pub premium: bool,
    pub tested: bool,
    pub game_modes: Vec<GameModeTierEntity>,
}

/// Reload every table and swap the snapshot.
///
/// The three fetches either all succeed and replace the snapshot together,
/// or the previous snapshot stays in place and the failure is logged. There
/// is no retry; the next change-feed event or caller-triggered reload will
/// try again.
pub async fn load(state: &SharedState) {
    let Some(store) = state.table_store().await else {
        warn!("snapshot reload skipped: no table store installed");
        return;
    };

    match try_join!(
        store.list_players(),
        store.list_users(),
        store.list_game_modes()
    ) {
        Ok((players, users, game_modes)) => {
            let snapshot = Snapshot {
                players,
                users,
                game_modes,
            };
            debug!(
                players = snapshot.players.len(),
                users = snapshot.users.len(),
                game_modes = snapshot.game_modes.len(),
                "snapshot reloaded"
            );
            state.replace_snapshot(snapshot).await;

            // Notify subscribers only once the swap is visible to readers.
            let current = state.snapshot().await;
            sse_events::broadcast_snapshot_refreshed(state, &current);
        }
        Err(err) => {
            warn!(error = %err, "snapshot reload failed; keeping previous snapshot");
        }
    }
}

/// Live handle on the gateway change feed.
///
/// Dropping the guard (or calling [`FeedSubscription::unsubscribe`]) releases
/// the feed exactly once; keeping it alive across the whole server lifetime
/// is what makes remote writes from other clients show up locally.
pub struct FeedSubscription {
    task: JoinHandle<()>,
}

impl FeedSubscription {
    /// Stop listening to the change feed.
    pub fn unsubscribe(self) {
        // Drop performs the actual release.
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start reacting to the gateway change feed.
///
/// Every event triggers a full [`load`]; rapid events each cause their own
/// reload, intentionally uncoalesced. When the store is cleared and a new one
/// installed after a reconnect, the task picks up the new feed and reloads
/// once to resynchronize.
pub fn subscribe(state: SharedState) -> FeedSubscription {
    let task = tokio::spawn(async move {
        let mut degraded = state.degraded_watcher();

        loop {
            let Some(store) = state.table_store().await else {
                if degraded.changed().await.is_err() {
                    break;
                }
                continue;
            };

            // Fresh store handle: resynchronize before consuming events.
            let mut changes = store.changes();
            drop(store);
            load(&state).await;

            loop {
                match changes.recv().await {
                    Ok(change) => {
                        debug!(
                            table = change.table.as_str(),
                            kind = ?change.kind,
                            "change feed event; reloading snapshot"
                        );
                        load(&state).await;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "change feed lagged; reloading snapshot");
                        load(&state).await;
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            info!("change feed closed; waiting for a table store");
            if degraded.changed().await.is_err() {
                break;
            }
        }
    });

    FeedSubscription { task }
}

async fn store_for(state: &SharedState, action: &'static str) -> Option<Arc<dyn TableStore>> {
    let store = state.table_store().await;
    if store.is_none() {
        warn!(action, "write skipped: no table store installed");
    }
    store
}

/// Create a player row, then reload.
pub async fn add_player(state: &SharedState, new_player: NewPlayer) {
    let Some(store) = store_for(state, "add player").await else {
        return;
    };

    let player = PlayerEntity {
        id: Uuid::new_v4(),
        username: new_player.username,
        premium: new_player.premium,
        tested: new_player.tested,
        featured: false,
        featured_rank: None,
        game_modes: new_player.game_modes,
        created_at: OffsetDateTime::now_utc(),
    };

    if let Err(err) = store.insert_player(player).await {
        warn!(error = %err, "failed to insert player");
    }
    load(state).await;
}

/// Apply a partial update to a player row, then reload.
///
/// Absent patch fields never overwrite stored values.
pub async fn update_player(state: &SharedState, id: Uuid, patch: PlayerPatch) {
    let Some(store) = store_for(state, "update player").await else {
        return;
    };

    if let Err(err) = store.update_player(id, patch).await {
        warn!(error = %err, player = %id, "failed to update player");
    }
    load(state).await;
}

/// Delete a player row, then reload.
pub async fn delete_player(state: &SharedState, id: Uuid) {
    let Some(store) = store_for(state, "delete player").await else {
        return;
    };

    if let Err(err) = store.delete_player(id).await {
        warn!(error = %err, player = %id, "failed to delete player");
    }
    load(state).await;
}

/// Assign an exclusive featured slot with two sequential writes.
///
/// The first write clears whichever row currently holds `rank`, the second
/// claims it for `id`. The pair is not a transaction: a crash or concurrent
/// writer between the two steps can leave the slot briefly without a holder.
/// The next reload converges on whatever the gateway last accepted.
pub async fn set_featured_player(state: &SharedState, id: Uuid, rank: u8) {
    let Some(store) = store_for(state, "set featured player").await else {
        return;
    };

    let snapshot = state.snapshot().await;
    let previous_holder = snapshot
        .players
        .iter()
        .find(|player| player.featured_rank == Some(rank) && player.id != id);

    if let Some(holder) = previous_holder {
        if let Err(err) = store
            .update_player(holder.id, PlayerPatch::clear_featured())
            .await
        {
            // Stop rather than end up with two rows claiming the same slot.
            warn!(error = %err, player = %holder.id, "failed to clear previous slot holder");
            load(state).await;
            return;
        }
    }

    if let Err(err) = store.update_player(id, PlayerPatch::assign_featured(rank)).await {
        warn!(error = %err, player = %id, "failed to assign featured slot");
    }
    load(state).await;
}

/// Clear the featured flag and slot on one row, then reload.
pub async fn remove_featured(state: &SharedState, id: Uuid) {
    let Some(store) = store_for(state, "remove featured").await else {
        return;
    };

    if let Err(err) = store.update_player(id, PlayerPatch::clear_featured()).await {
        warn!(error = %err, player = %id, "failed to clear featured slot");
    }
    load(state).await;
}

/// Delete a user row, then reload.
///
/// The user's player records are a separate entity and stay untouched.
pub async fn delete_user(state: &SharedState, id: Uuid) {
    let Some(store) = store_for(state, "delete user").await else {
        return;
    };

    if let Err(err) = store.delete_user(id).await {
        warn!(error = %err, user = %id, "failed to delete user");
    }
    load(state).await;
}

/// Add a game mode to the administered set, then reload.
///
/// Whitespace-only names and duplicates are ignored without an error.
pub async fn add_game_mode(state: &SharedState, name: &str) {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return;
    }

    let Some(store) = store_for(state, "add game mode").await else {
        return;
    };

    let snapshot = state.snapshot().await;
    if snapshot.game_modes.iter().any(|mode| mode.name == trimmed) {
        return;
    }

    if let Err(err) = store
        .insert_game_mode(GameModeEntity {
            name: trimmed.to_owned(),
        })
        .await
    {
        warn!(error = %err, name = trimmed, "failed to insert game mode");
    }
    load(state).await;
}

/// Remove a game mode from the administered set, then reload.
///
/// Players already referencing the name keep their entries; there is no
/// cascade.
pub async fn remove_game_mode(state: &SharedState, name: &str) {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return;
    }

    let Some(store) = store_for(state, "remove game mode").await else {
        return;
    };

    if let Err(err) = store.delete_game_mode(trimmed.to_owned()).await {
        warn!(error = %err, name = trimmed, "failed to delete game mode");
    }
    load(state).await;
}
