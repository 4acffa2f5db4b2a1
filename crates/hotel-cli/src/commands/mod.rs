//! CLI command definitions and dispatch.

pub mod booking;
pub mod migrate;
pub mod room;
pub mod serve;
pub mod user;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use hotel_api::AppState;
use hotel_core::config::AppConfig;
use hotel_core::error::AppError;
use hotel_core::traits::SystemClock;
use hotel_database::DatabasePool;
use hotel_service::RequestContext;

use crate::output::OutputFormat;

/// Hotel reservation service administration
#[derive(Debug, Parser)]
#[command(name = "hotel-cli", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and the environment overlays
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    /// Configuration environment (selects `<config_dir>/<env>.toml`)
    #[arg(short, long, env = "HOTEL_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Guest directory management
    User(user::UserArgs),
    /// Room inspection and status overrides
    Room(room::RoomArgs),
    /// Booking inspection and cancellation
    Booking(booking::BookingArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load_from(&self.config_dir, &self.env)?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::User(args) => user::execute(args, config, self.format).await,
            Commands::Room(args) => room::execute(args, config, self.format).await,
            Commands::Booking(args) => booking::execute(args, config, self.format).await,
        }
    }
}

/// Connect to the configured database and wire the services.
pub async fn connect(config: AppConfig) -> Result<AppState, AppError> {
    let db = DatabasePool::connect(&config.database).await?;
    hotel_database::migration::run_migrations(db.pool()).await?;
    Ok(AppState::new(config, db, Arc::new(SystemClock)))
}

/// Resolve the admin a command acts as.
pub async fn admin_context(state: &AppState, username: &str) -> Result<RequestContext, AppError> {
    let user = state.user_service.get_by_username(username).await?;
    let ctx = RequestContext::for_user(&user);
    ctx.require_admin()?;
    Ok(ctx)
}
