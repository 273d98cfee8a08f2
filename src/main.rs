use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vidgate::api::{ApiServer, ApiServerConfig, AppState};
use vidgate::config::AppConfig;
use vidgate::extractor::YtDlpExtractor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vidgate=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let app_config = AppConfig::from_env()?;
    let server_config = ApiServerConfig::from_env_or_default();

    tracing::info!(
        mode = ?app_config.transfer_mode,
        temp_dir = %app_config.temp_dir.display(),
        "vidgate starting"
    );

    let extractor = Arc::new(YtDlpExtractor::from_env());
    let state = AppState::new(app_config, extractor);

    let server = ApiServer::with_state(server_config, state);
    server.run().await?;

    Ok(())
}
