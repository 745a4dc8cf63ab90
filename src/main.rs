// Social Feed Server

use std::path::Path;

use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use social_feed::{
    api::create_router, app_state::AppState, config::Config, data_seeder::seed_demo_data,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("social_feed=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // SQLite creates the file but not its directory
    if let Some(dir) = database_dir(&config.database.url) {
        tokio::fs::create_dir_all(dir).await?;
    }

    // Initialize application state
    let app_state = AppState::new(config.clone()).await?;

    if config.seed.demo_data {
        seed_demo_data(app_state.store.as_ref()).await?;
    }

    let app = create_router(app_state).layer(CorsLayer::permissive());

    let addr = config.server_address();
    info!("Social feed server starting on http://{}", addr);
    info!(
        "Page cache: {} entries, {}s TTL",
        config.cache.capacity, config.cache.ttl_secs
    );

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn database_dir(url: &str) -> Option<&Path> {
    if url.contains(":memory:") {
        return None;
    }
    let path = url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    let path = path.split('?').next().unwrap_or(path);
    Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
}
