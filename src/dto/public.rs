use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::dto::common::PlayerSummary;

/// Filter and paging parameters for the public leaderboard.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct LeaderboardQuery {
    /// Game mode name, or the sentinel `all` for the unfiltered list.
    pub mode: Option<String>,
    /// 1-based page, clamped to the available range.
    pub page: Option<usize>,
}

/// Username looked up by the landing page search.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Exact username; matching is case-insensitive.
    pub username: String,
}

/// Up to three featured players ordered by slot.
#[derive(Debug, Serialize, ToSchema)]
pub struct FeaturedResponse {
    pub players: Vec<PlayerSummary>,
}

/// Administered game mode names, alphabetical.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameModesResponse {
    pub modes: Vec<String>,
}
