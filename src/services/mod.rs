/// Admin service for roster management operations.
pub mod admin_service;
/// Login, registration, and session lifecycle.
pub mod auth_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Pure filtering, sorting, and pagination over the snapshot.
pub mod leaderboard;
/// Public service for read-only leaderboard information.
pub mod public_service;
/// Snapshot synchronization against the table gateway.
pub mod roster_service;
/// Skin rendering URL construction.
pub mod skins;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events broadcasting service.
pub mod sse_service;
