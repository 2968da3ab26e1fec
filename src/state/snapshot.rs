use crate::dao::models::{GameModeEntity, PlayerEntity, UserEntity};

/// In-memory copy of the three gateway tables.
///
/// A snapshot is immutable once built; reloads construct a fresh value and
/// swap it in wholesale. Collection order mirrors the gateway queries:
/// players and users newest first, game modes alphabetical.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// All known players, newest first.
    pub players: Vec<PlayerEntity>,
    /// All registered users, newest first.
    pub users: Vec<UserEntity>,
    /// Administered game modes, alphabetical.
    pub game_modes: Vec<GameModeEntity>,
}

impl Snapshot {
    /// Look up a player by its identifier.
    pub fn player_by_id(&self, id: uuid::Uuid) -> Option<&PlayerEntity> {
        self.players.iter().find(|player| player.id == id)
    }

    /// Look up a user by its identifier.
    pub fn user_by_id(&self, id: uuid::Uuid) -> Option<&UserEntity> {
        self.users.iter().find(|user| user.id == id)
    }
}
