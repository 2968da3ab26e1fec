//! Service helpers that expose read-only public projections of the snapshot.

use crate::{
    dto::{
        common::{PlayerPage, PlayerSummary},
        public::{FeaturedResponse, GameModesResponse},
    },
    services::leaderboard,
    state::SharedState,
};

/// Filtered, tier-sorted, paginated player list for the public list view.
pub async fn get_leaderboard(state: &SharedState, mode: Option<&str>, page: usize) -> PlayerPage {
    let snapshot = state.snapshot().await;
    let mode = mode.unwrap_or(leaderboard::MODE_ALL);

    let filtered = leaderboard::filter_by_mode(&snapshot.players, mode);
    let sorted = leaderboard::sort_by_best_tier(filtered);
    let page = leaderboard::paginate(&sorted, state.config().page_size(), page);

    PlayerPage::from_page(state.config(), page)
}

/// The occupied featured slots for the landing view, at most three.
pub async fn get_featured(state: &SharedState) -> FeaturedResponse {
    let snapshot = state.snapshot().await;
    let players = leaderboard::featured_three(&snapshot.players)
        .iter()
        .map(|player| PlayerSummary::from_entity(state.config(), player))
        .collect();

    FeaturedResponse { players }
}

/// Exact-username lookup; a miss is a normal `None` outcome.
pub async fn search(state: &SharedState, username: &str) -> Option<PlayerSummary> {
    let snapshot = state.snapshot().await;
    leaderboard::find_exact(&snapshot.players, username)
        .map(|player| PlayerSummary::from_entity(state.config(), player))
}

/// Administered game mode names, alphabetical.
pub async fn get_game_modes(state: &SharedState) -> GameModesResponse {
    let snapshot = state.snapshot().await;
    GameModesResponse {
        modes: snapshot
            .game_modes
            .iter()
            .map(|mode| mode.name.clone())
            .collect(),
    }
}
