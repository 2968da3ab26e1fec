use std::convert::Infallible;

use axum::{Router, extract::State, response::sse::Sse, routing::get};
use futures::Stream;
use tracing::info;

use crate::{services::sse_service, state::SharedState};

#[utoipa::path(
    get,
    path = "/sse/updates",
    responses((status = 200, description = "Live updates SSE stream", content_type = "text/event-stream", body = String))
)]
/// Stream snapshot reload and system status events to connected frontends.
pub async fn updates_stream(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<axum::response::sse::Event, Infallible>>> {
    let receiver = sse_service::subscribe_updates(&state);
    info!("New updates SSE connection");
    sse_service::broadcast_update_info(state.updates_sse(), "updates stream connected");
    sse_service::to_sse_stream(receiver)
}

/// Configure the SSE endpoint.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/sse/updates", get(updates_stream))
}
