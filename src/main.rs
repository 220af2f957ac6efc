use anyhow::Context;
use tracing_subscriber::EnvFilter;

use catalog_api::app::app;
use catalog_api::config::AppConfig;
use catalog_api::database::DatabaseManager;
use catalog_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SESSION_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("catalog_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    config.validate().context("invalid configuration")?;
    tracing::info!("Starting catalog API in {:?} mode", config.environment);
    if !config.oauth_enabled() {
        tracing::warn!("GOOGLE_CLIENT_ID/GOOGLE_CLIENT_SECRET not set; Google login is disabled");
    }

    let store = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the database")?;

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let state = AppState::new(store, config);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
