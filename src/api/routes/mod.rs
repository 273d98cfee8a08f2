//! API route modules.

pub mod download;
pub mod health;
pub mod root;

use axum::Router;

use crate::api::server::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(root::router())
        .merge(download::router())
        .merge(health::router())
        .with_state(state)
}
