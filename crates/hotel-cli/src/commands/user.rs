//! Guest directory CLI commands. Users are provisioned here, not over HTTP.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use hotel_core::config::AppConfig;
use hotel_core::error::AppError;
use hotel_core::types::PageRequest;
use hotel_entity::user::{CreateUser, User, UserRole};

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a user
    Create {
        /// Username
        username: String,
        /// Role (admin or guest)
        #[arg(short, long, default_value = "guest")]
        role: UserRole,
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Display name
        #[arg(long)]
        display_name: Option<String>,
    },
    /// List users
    List {
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Page size
        #[arg(long, default_value_t = 50)]
        per_page: u64,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: String,
    username: String,
    email: String,
    display_name: String,
    role: String,
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            username: u.username.clone(),
            email: u.email.clone().unwrap_or_default(),
            display_name: u.display_name.clone().unwrap_or_default(),
            role: u.role.to_string(),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let state = super::connect(config).await?;

    match &args.command {
        UserCommand::Create {
            username,
            role,
            email,
            display_name,
        } => {
            let user = state
                .user_service
                .create_user(CreateUser {
                    username: username.clone(),
                    email: email.clone(),
                    display_name: display_name.clone(),
                    role: *role,
                })
                .await?;
            output::print_item(&UserRow::from(&user), format);
            output::print_success(&format!("User '{}' created", user.username));
        }
        UserCommand::List { page, per_page } => {
            let users = state
                .user_service
                .list_users(PageRequest::new(*page, *per_page))
                .await?;
            let rows: Vec<UserRow> = users.items.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
