//! Librarium setup binary
//!
//! Prepares the catalogue database for the desktop front-end: loads
//! configuration, runs migrations and seeds the bootstrap admin account,
//! surfacing its default password exactly once.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use librarium::{config::AppConfig, repository::Repository, services::Services};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("librarium={}", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Librarium v{} catalogue setup", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let options = SqliteConnectOptions::from_str(&config.database.url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_with(options)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("Database migrations completed");

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.bootstrap.clone());

    // Seed the bootstrap admin on first run
    match services.auth.ensure_bootstrap_admin().await {
        Ok(Some(password)) => {
            // One-time notice; the password is not logged again afterwards
            println!(
                "Initial ADMIN account created.\n  Username: {}\n  Password: {}\nChange this password after first login.",
                config.bootstrap.admin_username, password
            );
        }
        Ok(None) => {
            tracing::info!("Admin account already present, skipping bootstrap");
        }
        Err(e) => {
            tracing::error!("Failed to seed bootstrap admin: {}", e);
            return Err(e.into());
        }
    }

    tracing::info!("Catalogue ready");
    Ok(())
}
