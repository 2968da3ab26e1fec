use serde::Serialize;
use tracing::warn;

use crate::{
    dto::sse::{ServerEvent, SnapshotRefreshedEvent, SystemStatusEvent},
    state::{SharedState, Snapshot},
};

const EVENT_SNAPSHOT_REFRESHED: &str = "snapshot.refreshed";
const EVENT_SYSTEM_STATUS: &str = "system.status";

/// Broadcast that a reload produced a fresh snapshot.
///
/// The payload carries only collection sizes; clients refetch whatever view
/// they are showing rather than merging individual rows.
pub fn broadcast_snapshot_refreshed(state: &SharedState, snapshot: &Snapshot) {
    let payload = SnapshotRefreshedEvent {
        players: snapshot.players.len(),
        users: snapshot.users.len(),
        game_modes: snapshot.game_modes.len(),
    };
    send_update_event(state, EVENT_SNAPSHOT_REFRESHED, &payload);
}

/// Broadcast that the backend entered or left degraded mode.
pub fn broadcast_system_status(state: &SharedState, degraded: bool) {
    let payload = SystemStatusEvent { degraded };
    send_update_event(state, EVENT_SYSTEM_STATUS, &payload);
}

fn send_update_event(state: &SharedState, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => state.updates_sse().broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize SSE payload"),
    }
}
