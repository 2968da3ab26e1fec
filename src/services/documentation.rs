use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for MCTiers Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::updates_stream,
        crate::routes::public::get_leaderboard,
        crate::routes::public::get_featured,
        crate::routes::public::search_player,
        crate::routes::public::get_game_modes,
        crate::routes::auth::login,
        crate::routes::auth::register,
        crate::routes::auth::logout,
        crate::routes::auth::me,
        crate::routes::admin::list_players,
        crate::routes::admin::create_player,
        crate::routes::admin::update_player,
        crate::routes::admin::delete_player,
        crate::routes::admin::feature_player,
        crate::routes::admin::unfeature_player,
        crate::routes::admin::list_users,
        crate::routes::admin::delete_user,
        crate::routes::admin::add_game_mode,
        crate::routes::admin::remove_game_mode,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::sse::SnapshotRefreshedEvent,
            crate::dto::sse::SystemStatusEvent,
            crate::dto::common::GameModeTierSummary,
            crate::dto::common::PlayerSummary,
            crate::dto::common::UserSummary,
            crate::dto::common::PlayerPage,
            crate::dto::common::UserPage,
            crate::dto::auth::IdentityRequest,
            crate::dto::auth::SessionResponse,
            crate::dto::admin::GameModeTierInput,
            crate::dto::admin::CreatePlayerRequest,
            crate::dto::admin::UpdatePlayerRequest,
            crate::dto::admin::FeatureRequest,
            crate::dto::admin::GameModeRequest,
            crate::dto::admin::ActionResponse,
            crate::dto::public::FeaturedResponse,
            crate::dto::public::GameModesResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "public", description = "Read-only leaderboard views"),
        (name = "auth", description = "Login, registration, and sessions"),
        (name = "admin", description = "Owner-only roster administration"),
        (name = "sse", description = "Server-sent events stream"),
    )
)]
pub struct ApiDoc;
