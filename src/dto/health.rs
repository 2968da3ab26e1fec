use serde::Serialize;
use utoipa::ToSchema;

/// Health probe payload returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
}

impl HealthResponse {
    /// The table gateway is reachable and serving requests.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }

    /// The backend is running without a table gateway connection.
    pub fn degraded() -> Self {
        Self {
            status: "degraded".to_string(),
        }
    }
}
