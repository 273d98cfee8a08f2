//! Root route.
//!
//! Serves the frontend asset shipped alongside the service when it exists;
//! otherwise falls back to a JSON welcome message describing the API.

use axum::{
    Json, Router,
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::get,
};

use crate::api::models::WelcomeResponse;
use crate::api::server::AppState;

/// Create the root router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

async fn index(State(state): State<AppState>) -> Response {
    match tokio::fs::read_to_string(&state.config.index_page).await {
        Ok(html) => Html(html).into_response(),
        Err(_) => Json(WelcomeResponse {
            message: "Welcome to the vidgate video downloader API. \
                      Use /download?url=<video_url>&format=<video_format> to download videos."
                .to_string(),
        })
        .into_response(),
    }
}
