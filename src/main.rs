use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use reelrank_api::catalog::Catalog;
use reelrank_api::config::Config;
use reelrank_api::routes::create_router;
use reelrank_api::services::providers::TmdbProvider;
use reelrank_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load the catalog and similarity matrix once; immutable afterwards
    let catalog = Arc::new(Catalog::load(
        Path::new(&config.catalog_path),
        Path::new(&config.similarity_path),
    )?);

    let provider = Arc::new(TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        Duration::from_secs(config.fetch_timeout_secs),
    )?);

    let state = AppState::new(catalog, provider);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
