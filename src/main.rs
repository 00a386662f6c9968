//! Libris bootstrap binary
//!
//! Prepares a database for the domain core: applies migrations, seeds demo
//! data when the store is empty and logs a catalog summary.

use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use libris::{
    clock::SystemClock,
    config::AppConfig,
    ids::UuidIdGenerator,
    repository::Repository,
    seed::seed_demo_data,
    services::Services,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("libris={}", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Libris v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("Database migrations completed");

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(
        repository.clone(),
        config.circulation.clone(),
        Arc::new(UuidIdGenerator),
        Arc::new(SystemClock),
    );

    seed_demo_data(&repository, &services).await?;

    let stats = services.stats.overview().await?;
    tracing::info!(
        books = stats.total_books,
        users = stats.total_users,
        active_loans = stats.active_loans,
        pending_requests = stats.pending_requests,
        "library ready"
    );

    Ok(())
}
