use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use media_functions::app;
use media_functions::config::settings::AppConfig;
use media_functions::infrastructure::media::AzureMediaConnector;
use media_functions::infrastructure::storage::blob::AzureBlobCopier;
use media_functions::state::AppState;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("media_functions=info,tower_http=info")),
        )
        .init();

    info!("Starting server...");

    let config = AppConfig::new().context("failed to load configuration")?;

    let http = reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .context("failed to build HTTP client")?;

    let media = AzureMediaConnector::new(
        http.clone(),
        config.credentials.clone(),
        config.endpoints.clone(),
    );
    let blobs = AzureBlobCopier::new(http, &config.storage, config.endpoints.blob.clone())
        .context("invalid STORAGE_ACCOUNT_KEY")?;

    let port = config.server_port;
    let state = AppState::new(config, Arc::new(media), Arc::new(blobs));
    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;
    info!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
