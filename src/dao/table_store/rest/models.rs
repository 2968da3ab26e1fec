//! Wire row shapes used by the hosted gateway, mapped to and from entities.
//!
//! Column names follow the remote schema (snake_case, `is_owner`,
//! `featured_rank` as a nullable smallint), so the conversions here are the
//! single place where the external shape meets the local one.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::dao::models::{GameModeTierEntity, PlayerEntity, UserEntity};

/// One element of the `game_modes` JSON column on a player row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameModeTierRow {
    pub game_mode: String,
    pub tier: String,
}

/// Row of the `players` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRow {
    pub id: Uuid,
    pub username: String,
    pub premium: bool,
    pub tested: bool,
    pub featured: bool,
    pub featured_rank: Option<i16>,
    #[serde(default)]
    pub game_modes: Vec<GameModeTierRow>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Row of the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRow {
    pub id: Uuid,
    pub discord_id: String,
    pub is_owner: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Row of the `game_modes` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameModeRow {
    pub name: String,
}

/// Partial player row sent as a PATCH body; absent columns stay untouched.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayerRowPatch {
    pub username: Option<String>,
    pub premium: Option<bool>,
    pub tested: Option<bool>,
    pub featured: Option<bool>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub featured_rank: Option<Option<i16>>,
    pub game_modes: Option<Vec<GameModeTierRow>>,
}

impl From<GameModeTierRow> for GameModeTierEntity {
    fn from(row: GameModeTierRow) -> Self {
        Self {
            game_mode: row.game_mode,
            tier: row.tier,
        }
    }
}

impl From<GameModeTierEntity> for GameModeTierRow {
    fn from(entity: GameModeTierEntity) -> Self {
        Self {
            game_mode: entity.game_mode,
            tier: entity.tier,
        }
    }
}

impl From<PlayerRow> for PlayerEntity {
    fn from(row: PlayerRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            premium: row.premium,
            tested: row.tested,
            featured: row.featured,
            featured_rank: row.featured_rank.and_then(|rank| u8::try_from(rank).ok()),
            game_modes: row.game_modes.into_iter().map(Into::into).collect(),
            created_at: row.created_at,
        }
    }
}

impl From<PlayerEntity> for PlayerRow {
    fn from(entity: PlayerEntity) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            premium: entity.premium,
            tested: entity.tested,
            featured: entity.featured,
            featured_rank: entity.featured_rank.map(i16::from),
            game_modes: entity.game_modes.into_iter().map(Into::into).collect(),
            created_at: entity.created_at,
        }
    }
}

impl From<UserRow> for UserEntity {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            discord_id: row.discord_id,
            owner: row.is_owner,
            created_at: row.created_at,
        }
    }
}

impl From<UserEntity> for UserRow {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            discord_id: entity.discord_id,
            is_owner: entity.owner,
            created_at: entity.created_at,
        }
    }
}
