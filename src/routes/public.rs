use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::{
        common::{PlayerPage, PlayerSummary},
        public::{FeaturedResponse, GameModesResponse, LeaderboardQuery, SearchQuery},
    },
    error::AppError,
    services::public_service,
    state::SharedState,
};

/// Public read-only endpoints exposing the ranked player list.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/public/leaderboard", get(get_leaderboard))
        .route("/public/featured", get(get_featured))
        .route("/public/search", get(search_player))
        .route("/public/game-modes", get(get_game_modes))
}

#[utoipa::path(
    get,
    path = "/public/leaderboard",
    tag = "public",
    params(LeaderboardQuery),
    responses((status = 200, description = "Filtered and tier-sorted player page", body = PlayerPage))
)]
/// Return one page of the player list, filtered by game mode and sorted by best tier.
pub async fn get_leaderboard(
    State(state): State<SharedState>,
    Query(query): Query<LeaderboardQuery>,
) -> Json<PlayerPage> {
    let page = public_service::get_leaderboard(
        &state,
        query.mode.as_deref(),
        query.page.unwrap_or(1),
    )
    .await;
    Json(page)
}

#[utoipa::path(
    get,
    path = "/public/featured",
    tag = "public",
    responses((status = 200, description = "Occupied featured slots, ordered", body = FeaturedResponse))
)]
/// Return the up-to-three featured players for the landing view.
pub async fn get_featured(State(state): State<SharedState>) -> Json<FeaturedResponse> {
    Json(public_service::get_featured(&state).await)
}

#[utoipa::path(
    get,
    path = "/public/search",
    tag = "public",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching player", body = PlayerSummary),
        (status = 404, description = "No player with that username")
    )
)]
/// Look up a single player by exact username, ignoring case.
pub async fn search_player(
    State(state): State<SharedState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<PlayerSummary>, AppError> {
    public_service::search(&state, &query.username)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("no player with that username".into()))
}

#[utoipa::path(
    get,
    path = "/public/game-modes",
    tag = "public",
    responses((status = 200, description = "Administered game modes", body = GameModesResponse))
)]
/// Return the administered game mode names, alphabetical.
pub async fn get_game_modes(State(state): State<SharedState>) -> Json<GameModesResponse> {
    Json(public_service::get_game_modes(&state).await)
}
