//! Table store abstraction over the hosted data gateway.
//!
//! A store exposes per-table CRUD plus a change feed. Change events are
//! emitted for writes observed by the store handle; subscribers react by
//! reloading the full snapshot rather than merging individual events.

pub mod memory;
#[cfg(feature = "rest-store")]
pub mod rest;

use futures::future::BoxFuture;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::dao::models::{GameModeEntity, PlayerEntity, PlayerPatch, UserEntity};
use crate::dao::storage::StorageResult;

/// Tables managed by the remote gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Players,
    Users,
    GameModes,
}

impl Table {
    /// Wire name of the table on the remote gateway.
    pub fn as_str(self) -> &'static str {
        match self {
            Table::Players => "players",
            Table::Users => "users",
            Table::GameModes => "game_modes",
        }
    }
}

/// Kind of mutation carried by a change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// Single change-feed event keyed by table name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableChange {
    pub table: Table,
    pub kind: ChangeKind,
}

/// Abstraction over the persistence layer for players, users, and game modes.
pub trait TableStore: Send + Sync {
    /// All players, newest first.
    fn list_players(&self) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>>;
    fn insert_player(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Apply a partial update; absent patch fields must not overwrite stored values.
    fn update_player(&self, id: Uuid, patch: PlayerPatch)
    -> BoxFuture<'static, StorageResult<()>>;
    fn delete_player(&self, id: Uuid) -> BoxFuture<'static, StorageResult<()>>;
    /// All users, newest first.
    fn list_users(&self) -> BoxFuture<'static, StorageResult<Vec<UserEntity>>>;
    fn insert_user(&self, user: UserEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn delete_user(&self, id: Uuid) -> BoxFuture<'static, StorageResult<()>>;
    /// Administered game modes, alphabetical.
    fn list_game_modes(&self) -> BoxFuture<'static, StorageResult<Vec<GameModeEntity>>>;
    fn insert_game_mode(&self, mode: GameModeEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn delete_game_mode(&self, name: String) -> BoxFuture<'static, StorageResult<()>>;
    /// Subscribe to the change feed for all three tables.
    fn changes(&self) -> broadcast::Receiver<TableChange>;
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
