//! API server setup and configuration.

use axum::Router;
use axum::extract::Request;
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::api::routes;
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::extractor::MediaExtractor;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Server bind address
    pub bind_address: String,
    /// Server port
    pub port: u16,
    /// Origin allowed for cross-origin requests; `None` means permissive.
    pub allowed_origin: Option<String>,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origin: None,
        }
    }
}

impl ApiServerConfig {
    /// Load server config from environment variables, falling back to
    /// defaults.
    ///
    /// Supported env vars:
    /// - `BIND_ADDRESS` (e.g. "0.0.0.0")
    /// - `PORT` (e.g. "8000")
    /// - `ALLOWED_ORIGIN` (e.g. "https://app.example.com")
    pub fn from_env_or_default() -> Self {
        let mut config = Self::default();

        if let Ok(bind_address) = std::env::var("BIND_ADDRESS")
            && !bind_address.trim().is_empty()
        {
            config.bind_address = bind_address;
        }

        if let Ok(port) = std::env::var("PORT")
            && let Ok(parsed) = port.parse::<u16>()
        {
            config.port = parsed;
        }

        if let Ok(origin) = std::env::var("ALLOWED_ORIGIN")
            && !origin.trim().is_empty()
        {
            config.allowed_origin = Some(origin.trim().to_string());
        }

        config
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Server start time for uptime logging
    pub start_time: Instant,
    /// Service configuration (transfer mode, temp dir, index asset)
    pub config: Arc<AppConfig>,
    /// Extraction adapter
    pub extractor: Arc<dyn MediaExtractor>,
    /// Shared HTTP client for proxy streaming
    pub http_client: reqwest::Client,
}

impl AppState {
    /// Create application state from explicit configuration.
    pub fn new(config: AppConfig, extractor: Arc<dyn MediaExtractor>) -> Self {
        Self {
            start_time: Instant::now(),
            config: Arc::new(config),
            extractor,
            http_client: Self::build_http_client(),
        }
    }

    pub(crate) fn build_http_client() -> reqwest::Client {
        // No overall request timeout: a global timeout would cut long-lived
        // media streams short. Only the connect phase is bounded.
        match reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .tcp_nodelay(true)
            .build()
        {
            Ok(client) => client,
            Err(error) => {
                tracing::warn!(error = %error, "failed to build HTTP client; falling back to defaults");
                reqwest::Client::new()
            }
        }
    }
}

/// API server.
pub struct ApiServer {
    config: ApiServerConfig,
    state: AppState,
    cancel_token: CancellationToken,
}

impl ApiServer {
    /// Create a new API server with the given state.
    pub fn with_state(config: ApiServerConfig, state: AppState) -> Self {
        Self {
            config,
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Get the cancellation token for graceful shutdown.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Build the router with all middleware and routes.
    fn build_router(&self) -> Router {
        let mut router = routes::create_router(self.state.clone());

        router = router.layer(self.cors_layer());

        // Request tracing, with /health kept out of the span noise.
        router = router.layer(TraceLayer::new_for_http().make_span_with(|req: &Request| {
            if req.uri().path().starts_with("/health") {
                Span::none()
            } else {
                let mut make_span =
                    tower_http::trace::DefaultMakeSpan::new().level(tracing::Level::INFO);
                use tower_http::trace::MakeSpan;
                make_span.make_span(req)
            }
        }));

        router
    }

    /// CORS policy: restrict to the configured origin when one is set,
    /// otherwise allow any origin.
    fn cors_layer(&self) -> CorsLayer {
        match self
            .config
            .allowed_origin
            .as_deref()
            .and_then(|origin| origin.parse::<HeaderValue>().ok())
        {
            Some(origin) => CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any),
            None => CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        }
    }

    /// Start the server.
    pub async fn run(&self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.bind_address, self.config.port)
            .parse()
            .map_err(|e| Error::config(format!("Invalid address: {e}")))?;

        let router = self.build_router();
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("API server listening on http://{}", addr);

        let cancel_token = self.cancel_token.clone();

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                cancel_token.cancelled().await;
                tracing::info!("API server shutting down...");
            })
            .await?;

        Ok(())
    }

    /// Shutdown the server.
    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
