//! Room CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use hotel_core::config::AppConfig;
use hotel_core::error::AppError;
use hotel_core::types::PageRequest;
use hotel_entity::room::{Room, RoomStatus};

use crate::output::{self, OutputFormat};

/// Arguments for room commands
#[derive(Debug, Args)]
pub struct RoomArgs {
    /// Room subcommand
    #[command(subcommand)]
    pub command: RoomCommand,
}

/// Room subcommands
#[derive(Debug, Subcommand)]
pub enum RoomCommand {
    /// List rooms
    List {
        /// Filter by status
        #[arg(short, long)]
        status: Option<RoomStatus>,
    },
    /// Override a room's operational status
    SetStatus {
        /// Room number
        room_number: String,
        /// New status
        status: RoomStatus,
        /// Admin username to act as
        #[arg(long = "as")]
        admin: String,
        /// Override even when the room disagrees with its in-house booking
        #[arg(long)]
        force: bool,
        /// Reason recorded in the admin action log
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct RoomRow {
    id: String,
    room_number: String,
    room_type_id: String,
    status: String,
    updated_at: String,
}

impl From<&Room> for RoomRow {
    fn from(r: &Room) -> Self {
        Self {
            id: r.id.to_string(),
            room_number: r.room_number.clone(),
            room_type_id: r.room_type_id.to_string(),
            status: r.status.to_string(),
            updated_at: r.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute room commands
pub async fn execute(
    args: &RoomArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let state = super::connect(config).await?;

    match &args.command {
        RoomCommand::List { status } => {
            let rooms = state
                .room_registry
                .list_rooms(*status, None, PageRequest::new(1, 100))
                .await?;
            let rows: Vec<RoomRow> = rooms.items.iter().map(RoomRow::from).collect();
            output::print_list(&rows, format);
        }
        RoomCommand::SetStatus {
            room_number,
            status,
            admin,
            force,
            reason,
        } => {
            let ctx = super::admin_context(&state, admin).await?;
            let room = state.room_registry.get_room_by_number(room_number).await?;
            let room = state
                .room_registry
                .set_room_status(&ctx, room.id, *status, *force, reason.clone())
                .await?;
            output::print_item(&RoomRow::from(&room), format);
            output::print_success(&format!("Room {} is now {}", room.room_number, room.status));
        }
    }

    Ok(())
}
