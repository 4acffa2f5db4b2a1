//! Hotel reservation server.
//!
//! Main entry point that loads configuration, connects the database and
//! starts the HTTP API.

use tracing_subscriber::{EnvFilter, fmt};

use hotel_core::config::AppConfig;
use hotel_core::error::AppError;
use hotel_database::DatabasePool;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, the `HOTEL_ENV` overlay and `HOTEL__*` variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let dir = std::env::var("HOTEL_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("HOTEL_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load_from(&dir, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting hotel reservation service v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!("Connecting to database...");
    let db = DatabasePool::connect(&config.database).await?;

    hotel_database::migration::run_migrations(db.pool()).await?;
    tracing::info!("Database migrations complete");

    hotel_api::run_server(config, db).await
}
