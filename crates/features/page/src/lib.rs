//! Page route group.
//!
//! Serves the landing page at `GET /`. The body is the `HELLO` setting when
//! configured, otherwise [`DEFAULT_GREETING`](snakeeyes_domain::constants::DEFAULT_GREETING).

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use snakeeyes_domain::constants::PAGE_BLUEPRINT;
use snakeeyes_kernel::server::{AppState, Blueprint};

/// Builds the `page` blueprint.
pub fn blueprint() -> Blueprint {
    tracing::debug!("Page blueprint initialized");
    Blueprint::new(PAGE_BLUEPRINT).route("/", get(index))
}

/// Render a Hello World response.
async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.config.greeting().to_owned())
}
