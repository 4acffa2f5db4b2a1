//! Booking CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use hotel_core::config::AppConfig;
use hotel_core::error::AppError;
use hotel_core::types::PageRequest;
use hotel_entity::booking::{Booking, BookingFilter, BookingStatus};

use crate::output::{self, OutputFormat};

/// Arguments for booking commands
#[derive(Debug, Args)]
pub struct BookingArgs {
    /// Booking subcommand
    #[command(subcommand)]
    pub command: BookingCommand,
}

/// Booking subcommands
#[derive(Debug, Subcommand)]
pub enum BookingCommand {
    /// List bookings
    List {
        /// Admin username to act as
        #[arg(long = "as")]
        admin: String,
        /// Filter by status
        #[arg(short, long)]
        status: Option<BookingStatus>,
        /// Filter by guest ID
        #[arg(long)]
        guest: Option<Uuid>,
    },
    /// Cancel a booking
    Cancel {
        /// Booking ID
        id: Uuid,
        /// Admin username to act as
        #[arg(long = "as")]
        admin: String,
        /// Reason recorded in the admin action log
        #[arg(long)]
        reason: Option<String>,
        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct BookingRow {
    id: String,
    guest_id: String,
    room_id: String,
    check_in: String,
    check_out: String,
    status: String,
    total_price: String,
}

impl From<&Booking> for BookingRow {
    fn from(b: &Booking) -> Self {
        Self {
            id: b.id.to_string(),
            guest_id: b.guest_id.to_string(),
            room_id: b.room_id.to_string(),
            check_in: b.check_in.to_string(),
            check_out: b.check_out.to_string(),
            status: b.status.to_string(),
            total_price: b.total_price.to_string(),
        }
    }
}

/// Execute booking commands
pub async fn execute(
    args: &BookingArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let state = super::connect(config).await?;

    match &args.command {
        BookingCommand::List {
            admin,
            status,
            guest,
        } => {
            let ctx = super::admin_context(&state, admin).await?;
            let filter = BookingFilter {
                guest_id: *guest,
                status: *status,
                ..BookingFilter::default()
            };
            let bookings = state
                .booking_ledger
                .list_bookings(&ctx, filter, PageRequest::new(1, 100))
                .await?;
            let rows: Vec<BookingRow> = bookings.items.iter().map(BookingRow::from).collect();
            output::print_list(&rows, format);
        }
        BookingCommand::Cancel {
            id,
            admin,
            reason,
            yes,
        } => {
            let ctx = super::admin_context(&state, admin).await?;

            if !yes {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Cancel booking {id}?"))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Aborted.");
                    return Ok(());
                }
            }

            let booking = state
                .booking_ledger
                .cancel_booking(&ctx, *id, reason.clone())
                .await?;
            output::print_item(&BookingRow::from(&booking), format);
            output::print_success(&format!("Booking {} cancelled", booking.id));
        }
    }

    Ok(())
}
