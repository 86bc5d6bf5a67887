use axum::Router;
use snakeeyes_kernel::server::{AppState, BlueprintRegistry};
use tower_http::trace::TraceLayer;

/// Merges every registered blueprint and binds the shared state.
pub(crate) fn init(state: AppState, blueprints: BlueprintRegistry) -> Router {
    blueprints.into_router().layer(TraceLayer::new_for_http()).with_state(state)
}
