use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use axum_valid::Valid;

use crate::{
    dto::auth::{IdentityRequest, SessionResponse},
    error::AppError,
    services::auth_service,
    state::SharedState,
};

use super::SESSION_TOKEN_HEADER;

/// Login, registration, and session endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

fn session_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(SESSION_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("missing session token header `X-Session-Token`".into()))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = IdentityRequest,
    responses(
        (status = 200, description = "Session opened", body = SessionResponse),
        (status = 404, description = "No account for that identity")
    )
)]
/// Open a session for a known identity; the configured owner identity may
/// log in before registering.
pub async fn login(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<IdentityRequest>>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = auth_service::login(&state, &payload.discord_id).await?;
    session
        .map(|session| Json(session.into()))
        .ok_or_else(|| AppError::NotFound("no account for that identity".into()))
}

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = IdentityRequest,
    responses(
        (status = 201, description = "Account created and session opened", body = SessionResponse),
        (status = 409, description = "Identity already registered")
    )
)]
/// Register a new identity and open its first session.
pub async fn register(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<IdentityRequest>>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let session = auth_service::register(&state, &payload.discord_id).await?;
    session
        .map(|session| (StatusCode::CREATED, Json(session.into())))
        .ok_or_else(|| AppError::Conflict("identity already registered".into()))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    params(("X-Session-Token" = String, Header, description = "Session token issued on login")),
    responses((status = 204, description = "Session closed"))
)]
/// Close the current session; purely local, no remote effect.
pub async fn logout(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let token = session_token(&headers)?;
    auth_service::logout(&state, token);
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    params(("X-Session-Token" = String, Header, description = "Session token issued on login")),
    responses(
        (status = 200, description = "Current session", body = SessionResponse),
        (status = 401, description = "Unknown or expired session")
    )
)]
/// Return the session associated with the presented token.
pub async fn me(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<SessionResponse>, AppError> {
    let token = session_token(&headers)?;
    auth_service::current_session(&state, token)
        .map(|session| Json(session.into()))
        .ok_or_else(|| AppError::Unauthorized("unknown or expired session".into()))
}
