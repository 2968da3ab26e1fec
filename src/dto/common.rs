use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    dao::models::{GameModeTierEntity, PlayerEntity, UserEntity},
    services::{leaderboard, skins},
};

use super::format_timestamp;

/// One ranked discipline shown on a player card.
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct GameModeTierSummary {
    pub game_mode: String,
    pub tier: String,
}

impl From<&GameModeTierEntity> for GameModeTierSummary {
    fn from(entry: &GameModeTierEntity) -> Self {
        Self {
            game_mode: entry.game_mode.clone(),
            tier: entry.tier.clone(),
        }
    }
}

/// Projection of a player row enriched with derived display data.
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct PlayerSummary {
    pub id: Uuid,
    pub username: String,
    pub premium: bool,
    pub tested: bool,
    pub featured: bool,
    /// Exclusive featured slot (1, 2, or 3) when featured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_rank: Option<u8>,
    /// Ranked disciplines, primary first.
    pub game_modes: Vec<GameModeTierSummary>,
    /// Best tier label across the player's disciplines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_tier: Option<String>,
    /// Head render used by list views.
    pub avatar_url: String,
    /// Full-body render used by detail views.
    pub body_url: String,
    pub created_at: String,
}

impl PlayerSummary {
    /// Build the projection for one player, deriving skin URLs and best tier.
    pub fn from_entity(config: &AppConfig, player: &PlayerEntity) -> Self {
        Self {
            id: player.id,
            username: player.username.clone(),
            premium: player.premium,
            tested: player.tested,
            featured: player.featured,
            featured_rank: player.featured_rank,
            game_modes: player.game_modes.iter().map(Into::into).collect(),
            best_tier: leaderboard::best_tier(player).map(|tier| tier.label().to_string()),
            avatar_url: skins::avatar_url(config, player, skins::AVATAR_SIZE),
            body_url: skins::body_url(config, player, skins::BODY_SIZE),
            created_at: format_timestamp(player.created_at),
        }
    }
}

/// Projection of a user row for the admin screen.
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct UserSummary {
    pub id: Uuid,
    pub discord_id: String,
    pub owner: bool,
    pub created_at: String,
}

impl From<&UserEntity> for UserSummary {
    fn from(user: &UserEntity) -> Self {
        Self {
            id: user.id,
            discord_id: user.discord_id.clone(),
            owner: user.owner,
            created_at: format_timestamp(user.created_at),
        }
    }
}

/// One page of the player list plus paging metadata.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerPage {
    pub players: Vec<PlayerSummary>,
    /// 1-based page actually served after clamping.
    pub page: usize,
    /// Total number of pages for the current filter.
    pub page_count: usize,
    /// Total number of matching players before paging.
    pub total: usize,
}

impl PlayerPage {
    /// Build a response page from a derived listing page.
    pub fn from_page(config: &AppConfig, page: leaderboard::Page<PlayerEntity>) -> Self {
        Self {
            players: page
                .items
                .iter()
                .map(|player| PlayerSummary::from_entity(config, player))
                .collect(),
            page: page.page,
            page_count: page.page_count,
            total: page.total,
        }
    }
}

/// One page of the user list plus paging metadata.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserPage {
    pub users: Vec<UserSummary>,
    /// 1-based page actually served after clamping.
    pub page: usize,
    /// Total number of pages for the current filter.
    pub page_count: usize,
    /// Total number of matching users before paging.
    pub total: usize,
}

impl UserPage {
    /// Build a response page from a derived listing page.
    pub fn from_page(page: leaderboard::Page<UserEntity>) -> Self {
        Self {
            users: page.items.iter().map(UserSummary::from).collect(),
            page: page.page,
            page_count: page.page_count,
            total: page.total,
        }
    }
}
