use std::net::SocketAddr;

use catalog_backend::{api, config::CatalogConfig, database::Database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();
    let config = CatalogConfig::from_env();

    // Initialize database
    let database = Database::connect(&config.database_url).await?;

    if config.session_token.is_none() {
        tracing::warn!("SESSION_TOKEN is not set, catalog listing is open to everyone");
    }

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    // Build our application with routes
    let app = api::router(api::AppState::new(database, config));

    tracing::info!("🚀 Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
