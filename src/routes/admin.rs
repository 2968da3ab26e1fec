use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query, State},
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, patch, post, put},
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    dto::{
        admin::{
            ActionResponse, CreatePlayerRequest, FeatureRequest, GameModeRequest, RosterQuery,
            UpdatePlayerRequest,
        },
        common::{PlayerPage, UserPage},
    },
    error::AppError,
    services::{admin_service, auth_service},
    state::SharedState,
};

use super::SESSION_TOKEN_HEADER;

/// Owner-only management endpoints for the player roster, user accounts, and
/// the administered game mode set.
pub fn router(state: SharedState) -> Router<SharedState> {
    Router::new()
        .route("/admin/players", get(list_players).post(create_player))
        .route(
            "/admin/players/{id}",
            patch(update_player).delete(delete_player),
        )
        .route(
            "/admin/players/{id}/featured",
            put(feature_player).delete(unfeature_player),
        )
        .route("/admin/users", get(list_users))
        .route("/admin/users/{id}", delete(delete_user))
        .route("/admin/game-modes", post(add_game_mode))
        .route("/admin/game-modes/{name}", delete(remove_game_mode))
        .route_layer(middleware::from_fn_with_state(state, require_owner))
}

#[utoipa::path(
    get,
    path = "/admin/players",
    tag = "admin",
    params(("X-Session-Token" = String, Header, description = "Owner session token"), RosterQuery),
    responses((status = 200, description = "One page of the player roster", body = PlayerPage))
)]
/// List players for administration, filtered by username substring.
pub async fn list_players(
    State(state): State<SharedState>,
    Query(query): Query<RosterQuery>,
) -> Json<PlayerPage> {
    let page =
        admin_service::list_players(&state, query.q.as_deref(), query.page.unwrap_or(1)).await;
    Json(page)
}

#[utoipa::path(
    post,
    path = "/admin/players",
    tag = "admin",
    params(("X-Session-Token" = String, Header, description = "Owner session token")),
    request_body = CreatePlayerRequest,
    responses(
        (status = 202, description = "Player creation forwarded to the gateway", body = ActionResponse),
        (status = 400, description = "Invalid username or tier label")
    )
)]
/// Create a player record.
pub async fn create_player(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<CreatePlayerRequest>>,
) -> Result<(StatusCode, Json<ActionResponse>), AppError> {
    let response = admin_service::create_player(&state, payload).await?;
    Ok((StatusCode::ACCEPTED, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/admin/players/{id}",
    tag = "admin",
    params(("X-Session-Token" = String, Header, description = "Owner session token"),
    ("id" = Uuid, Path, description = "Identifier of the player to edit")),
    request_body = UpdatePlayerRequest,
    responses(
        (status = 202, description = "Partial update forwarded to the gateway", body = ActionResponse),
        (status = 404, description = "Player not found")
    )
)]
/// Apply a partial edit; absent fields keep their stored values.
pub async fn update_player(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<UpdatePlayerRequest>>,
) -> Result<(StatusCode, Json<ActionResponse>), AppError> {
    let response = admin_service::update_player(&state, id, payload).await?;
    Ok((StatusCode::ACCEPTED, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/admin/players/{id}",
    tag = "admin",
    params(("X-Session-Token" = String, Header, description = "Owner session token"),
    ("id" = Uuid, Path, description = "Identifier of the player to delete")),
    responses((status = 204, description = "Player deletion forwarded to the gateway"))
)]
/// Delete a player record.
pub async fn delete_player(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    admin_service::delete_player(&state, id).await;
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    put,
    path = "/admin/players/{id}/featured",
    tag = "admin",
    params(("X-Session-Token" = String, Header, description = "Owner session token"),
    ("id" = Uuid, Path, description = "Identifier of the player to feature")),
    request_body = FeatureRequest,
    responses(
        (status = 202, description = "Slot assignment forwarded to the gateway", body = ActionResponse),
        (status = 404, description = "Player not found")
    )
)]
/// Place a player into one of the three featured slots, evicting the
/// previous holder of that slot.
pub async fn feature_player(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<FeatureRequest>>,
) -> Result<(StatusCode, Json<ActionResponse>), AppError> {
    let response = admin_service::feature_player(&state, id, payload.rank).await?;
    Ok((StatusCode::ACCEPTED, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/admin/players/{id}/featured",
    tag = "admin",
    params(("X-Session-Token" = String, Header, description = "Owner session token"),
    ("id" = Uuid, Path, description = "Identifier of the player to unfeature")),
    responses((status = 202, description = "Slot removal forwarded to the gateway", body = ActionResponse))
)]
/// Remove a player from the featured slots.
pub async fn unfeature_player(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> (StatusCode, Json<ActionResponse>) {
    let response = admin_service::unfeature_player(&state, id).await;
    (StatusCode::ACCEPTED, Json(response))
}

#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "admin",
    params(("X-Session-Token" = String, Header, description = "Owner session token"), RosterQuery),
    responses((status = 200, description = "One page of the registered users", body = UserPage))
)]
/// List registered users, filtered by discord identity substring.
pub async fn list_users(
    State(state): State<SharedState>,
    Query(query): Query<RosterQuery>,
) -> Json<UserPage> {
    let page = admin_service::list_users(&state, query.q.as_deref(), query.page.unwrap_or(1)).await;
    Json(page)
}

#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    tag = "admin",
    params(("X-Session-Token" = String, Header, description = "Owner session token"),
    ("id" = Uuid, Path, description = "Identifier of the user to delete")),
    responses((status = 204, description = "User deletion forwarded to the gateway"))
)]
/// Delete a user account; the user's player records stay untouched.
pub async fn delete_user(State(state): State<SharedState>, Path(id): Path<Uuid>) -> StatusCode {
    admin_service::delete_user(&state, id).await;
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    post,
    path = "/admin/game-modes",
    tag = "admin",
    params(("X-Session-Token" = String, Header, description = "Owner session token")),
    request_body = GameModeRequest,
    responses((status = 202, description = "Mode insertion forwarded to the gateway", body = ActionResponse))
)]
/// Add a name to the administered game mode set; whitespace-only names are
/// ignored without an error.
pub async fn add_game_mode(
    State(state): State<SharedState>,
    Json(payload): Json<GameModeRequest>,
) -> (StatusCode, Json<ActionResponse>) {
    let response = admin_service::add_game_mode(&state, &payload.name).await;
    (StatusCode::ACCEPTED, Json(response))
}

#[utoipa::path(
    delete,
    path = "/admin/game-modes/{name}",
    tag = "admin",
    params(("X-Session-Token" = String, Header, description = "Owner session token"),
    ("name" = String, Path, description = "Name of the game mode to remove")),
    responses((status = 204, description = "Mode removal forwarded to the gateway"))
)]
/// Remove a name from the administered set; players already referencing it
/// keep their entries.
pub async fn remove_game_mode(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> StatusCode {
    admin_service::remove_game_mode(&state, &name).await;
    StatusCode::NO_CONTENT
}

async fn require_owner(
    State(state): State<SharedState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let provided = req
        .headers()
        .get(SESSION_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_owned())
        .ok_or_else(|| {
            AppError::Unauthorized("missing session token header `X-Session-Token`".into())
        })?;

    let session = auth_service::current_session(&state, &provided)
        .ok_or_else(|| AppError::Unauthorized("unknown or expired session".into()))?;

    if !session.owner {
        return Err(AppError::Unauthorized("owner role required".into()));
    }

    Ok(next.run(req).await)
}
