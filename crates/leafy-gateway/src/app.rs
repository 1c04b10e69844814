use axum::routing::{get, post};
use axum::Router;
use std::path::Path;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

use crate::handlers::{create_link_handler, health_handler, preview_handler};
use crate::state::AppState;

/// Paths taken by the gateway itself. Links with these codes could never be
/// previewed, so the store must be built with them reserved.
pub const RESERVED_CODES: &[&str] = &["health", "shorten"];

pub struct App {}

impl App {
    /// Builds the router. `public_dir` must contain `index.html`; a missing
    /// file answers `404` on `/`.
    pub fn router(state: AppState, public_dir: &Path) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/shorten", post(create_link_handler))
            .route("/{code}", get(preview_handler))
            .route_service("/", ServeFile::new(public_dir.join("index.html")))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
