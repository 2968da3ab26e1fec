//! DTO definitions used by the admin REST API and documentation layer.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationErrors};

use crate::dao::models::GameModeTierEntity;
use crate::dto::validation::validate_minecraft_username;

/// One (game mode, tier) assignment submitted for a player.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GameModeTierInput {
    /// Name of the game mode the player is ranked in.
    pub game_mode: String,
    /// Canonical tier label (`HT1` .. `LT5`).
    pub tier: String,
}

impl From<GameModeTierInput> for GameModeTierEntity {
    fn from(input: GameModeTierInput) -> Self {
        Self {
            game_mode: input.game_mode,
            tier: input.tier,
        }
    }
}

/// Payload describing a new player record.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePlayerRequest {
    pub username: String,
    /// Whether the account owns the game; gates real-skin rendering.
    #[serde(default)]
    pub premium: bool,
    /// Whether the player has been tier-tested by the community.
    #[serde(default)]
    pub tested: bool,
    /// Ranked disciplines, primary first.
    #[serde(default)]
    pub game_modes: Vec<GameModeTierInput>,
}

impl Validate for CreatePlayerRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_minecraft_username(&self.username) {
            errors.add("username", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Partial player edit; absent fields keep their stored values.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePlayerRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub premium: Option<bool>,
    #[serde(default)]
    pub tested: Option<bool>,
    /// Replaces the whole discipline list when present.
    #[serde(default)]
    pub game_modes: Option<Vec<GameModeTierInput>>,
}

impl Validate for UpdatePlayerRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        // Validate the username only when the edit touches it.
        if let Some(ref username) = self.username {
            if let Err(e) = validate_minecraft_username(username) {
                errors.add("username", e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Request to place a player into one of the three featured slots.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct FeatureRequest {
    /// Exclusive slot, 1 (most prominent) to 3.
    #[validate(range(min = 1, max = 3))]
    pub rank: u8,
}

/// Game mode name submitted for the administered set.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GameModeRequest {
    pub name: String,
}

/// Search and paging parameters for the admin roster listings.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct RosterQuery {
    /// Case-insensitive substring filter.
    pub q: Option<String>,
    /// 1-based page, clamped to the available range.
    pub page: Option<usize>,
}

/// Generic action acknowledgement used by admin endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    pub message: String,
}
