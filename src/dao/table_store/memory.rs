//! In-process [`TableStore`] used by tests and local development.

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::{RwLock, broadcast};
use uuid::Uuid;

use crate::dao::{
    models::{GameModeEntity, PlayerEntity, PlayerPatch, UserEntity},
    storage::StorageResult,
    table_store::{ChangeKind, Table, TableChange, TableStore},
};

const CHANGE_FEED_CAPACITY: usize = 32;

/// Table store holding all rows in memory behind a shared handle.
///
/// Clones share the same tables, so several handles observe each other's
/// writes through the change feed exactly like separate clients of a hosted
/// gateway would.
#[derive(Clone)]
pub struct MemoryTableStore {
    inner: Arc<MemoryInner>,
}

struct MemoryInner {
    players: RwLock<Vec<PlayerEntity>>,
    users: RwLock<Vec<UserEntity>>,
    game_modes: RwLock<Vec<GameModeEntity>>,
    changes_tx: broadcast::Sender<TableChange>,
}

impl MemoryTableStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let (changes_tx, _rx) = broadcast::channel(CHANGE_FEED_CAPACITY);
        Self {
            inner: Arc::new(MemoryInner {
                players: RwLock::new(Vec::new()),
                users: RwLock::new(Vec::new()),
                game_modes: RwLock::new(Vec::new()),
                changes_tx,
            }),
        }
    }

    fn notify(inner: &MemoryInner, table: Table, kind: ChangeKind) {
        // Nobody listening is fine; the feed is best effort.
        let _ = inner.changes_tx.send(TableChange { table, kind });
    }
}

impl Default for MemoryTableStore {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_patch(player: &mut PlayerEntity, patch: PlayerPatch) {
    if let Some(username) = patch.username {
        player.username = username;
    }
    if let Some(premium) = patch.premium {
        player.premium = premium;
    }
    if let Some(tested) = patch.tested {
        player.tested = tested;
    }
    if let Some(featured) = patch.featured {
        player.featured = featured;
    }
    if let Some(featured_rank) = patch.featured_rank {
        player.featured_rank = featured_rank;
    }
    if let Some(game_modes) = patch.game_modes {
        player.game_modes = game_modes;
    }
}

impl TableStore for MemoryTableStore {
    fn list_players(&self) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let mut players = inner.players.read().await.clone();
            players.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(players)
        })
    }

    fn insert_player(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            inner.players.write().await.push(player);
            Self::notify(&inner, Table::Players, ChangeKind::Insert);
            Ok(())
        })
    }

    fn update_player(
        &self,
        id: Uuid,
        patch: PlayerPatch,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            {
                let mut players = inner.players.write().await;
                if let Some(player) = players.iter_mut().find(|p| p.id == id) {
                    apply_patch(player, patch);
                }
            }
            Self::notify(&inner, Table::Players, ChangeKind::Update);
            Ok(())
        })
    }

    fn delete_player(&self, id: Uuid) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            inner.players.write().await.retain(|p| p.id != id);
            Self::notify(&inner, Table::Players, ChangeKind::Delete);
            Ok(())
        })
    }

    fn list_users(&self) -> BoxFuture<'static, StorageResult<Vec<UserEntity>>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let mut users = inner.users.read().await.clone();
            users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(users)
        })
    }

    fn insert_user(&self, user: UserEntity) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            inner.users.write().await.push(user);
            Self::notify(&inner, Table::Users, ChangeKind::Insert);
            Ok(())
        })
    }

    fn delete_user(&self, id: Uuid) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            inner.users.write().await.retain(|u| u.id != id);
            Self::notify(&inner, Table::Users, ChangeKind::Delete);
            Ok(())
        })
    }

    fn list_game_modes(&self) -> BoxFuture<'static, StorageResult<Vec<GameModeEntity>>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let mut modes = inner.game_modes.read().await.clone();
            modes.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(modes)
        })
    }

    fn insert_game_mode(&self, mode: GameModeEntity) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            inner.game_modes.write().await.push(mode);
            Self::notify(&inner, Table::GameModes, ChangeKind::Insert);
            Ok(())
        })
    }

    fn delete_game_mode(&self, name: String) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            inner.game_modes.write().await.retain(|m| m.name != name);
            Self::notify(&inner, Table::GameModes, ChangeKind::Delete);
            Ok(())
        })
    }

    fn changes(&self) -> broadcast::Receiver<TableChange> {
        self.inner.changes_tx.subscribe()
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
