use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use time::OffsetDateTime;
use uuid::Uuid;

/// One ranked discipline entry on a player record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameModeTierEntity {
    /// Name of the game mode the player is ranked in.
    pub game_mode: String,
    /// Tier label assigned for that mode (e.g. "HT1").
    pub tier: String,
}

/// Player record persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerEntity {
    /// Primary key of the player row.
    pub id: Uuid,
    /// Minecraft username, also used to derive skin image URLs.
    pub username: String,
    /// Whether the account owns the game; gates real-skin rendering.
    pub premium: bool,
    /// Whether the player has been tier-tested by the community.
    pub tested: bool,
    /// Whether the player occupies one of the featured slots.
    pub featured: bool,
    /// Exclusive featured slot (1, 2, or 3) when featured.
    pub featured_rank: Option<u8>,
    /// Ordered list of (game mode, tier) entries; the first is the primary one.
    pub game_modes: Vec<GameModeTierEntity>,
    /// Creation timestamp; list order is newest first.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Partial player update. Absent fields are left untouched by the store;
/// `featured_rank` distinguishes "leave as is" (absent) from "clear" (null).
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPatch {
    pub username: Option<String>,
    pub premium: Option<bool>,
    pub tested: Option<bool>,
    pub featured: Option<bool>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub featured_rank: Option<Option<u8>>,
    pub game_modes: Option<Vec<GameModeTierEntity>>,
}

impl PlayerPatch {
    /// Patch that clears the featured flag and rank on a row.
    pub fn clear_featured() -> Self {
        Self {
            featured: Some(false),
            featured_rank: Some(None),
            ..Self::default()
        }
    }

    /// Patch that assigns a featured slot to a row.
    pub fn assign_featured(rank: u8) -> Self {
        Self {
            featured: Some(true),
            featured_rank: Some(Some(rank)),
            ..Self::default()
        }
    }
}

/// Registered visitor account persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserEntity {
    /// Primary key of the user row.
    pub id: Uuid,
    /// Discord identity, stored normalized (trimmed, lowercase).
    pub discord_id: String,
    /// Whether this account holds the owner role.
    pub owner: bool,
    /// Creation timestamp; list order is newest first.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Administered game mode name; the set is listed alphabetically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameModeEntity {
    /// Unique display name of the mode.
    pub name: String,
}
