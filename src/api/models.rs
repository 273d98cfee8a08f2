//! API request and response models.

use serde::{Deserialize, Serialize};

/// Query parameters for `/download`.
///
/// `url` is `Option` so a missing value surfaces as a descriptive 400 instead
/// of a generic deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub url: Option<String>,
    pub format: Option<String>,
}

/// Response body for the direct link strategy.
#[derive(Debug, Serialize, Deserialize)]
pub struct DirectLinkResponse {
    pub download_url: String,
    pub filename: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// JSON welcome message served at `/` when no frontend asset is present.
#[derive(Debug, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}
