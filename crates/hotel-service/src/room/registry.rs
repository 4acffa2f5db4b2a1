//! Room registry: room CRUD and the admin status override.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use hotel_core::error::AppError;
use hotel_core::traits::{ActionLogSink, AdminActionRecord, Clock};
use hotel_core::types::{PageRequest, PageResponse};
use hotel_database::{DatabasePool, db_error};
use hotel_database::repositories::{BookingRepository, RoomRepository, RoomTypeRepository};
use hotel_entity::room::{Room, RoomStatus};

use crate::admin::record_admin_action;
use crate::context::RequestContext;

/// Manages physical rooms.
#[derive(Debug, Clone)]
pub struct RoomRegistry {
    db: Arc<DatabasePool>,
    room_repo: Arc<RoomRepository>,
    room_type_repo: Arc<RoomTypeRepository>,
    booking_repo: Arc<BookingRepository>,
    action_log: Arc<dyn ActionLogSink>,
    clock: Arc<dyn Clock>,
}

impl RoomRegistry {
    /// Creates a new room registry.
    pub fn new(
        db: Arc<DatabasePool>,
        room_repo: Arc<RoomRepository>,
        room_type_repo: Arc<RoomTypeRepository>,
        booking_repo: Arc<BookingRepository>,
        action_log: Arc<dyn ActionLogSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            db,
            room_repo,
            room_type_repo,
            booking_repo,
            action_log,
            clock,
        }
    }

    /// Gets a room by ID.
    pub async fn get_room(&self, room_id: Uuid) -> Result<Room, AppError> {
        self.room_repo
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {room_id} not found")))
    }

    /// Gets a room by its room number.
    pub async fn get_room_by_number(&self, room_number: &str) -> Result<Room, AppError> {
        let room_number = normalize_room_number(room_number)?;
        self.room_repo
            .find_by_number(room_number)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {room_number} not found")))
    }

    /// Lists rooms, optionally filtered by status and room type.
    pub async fn list_rooms(
        &self,
        status: Option<RoomStatus>,
        room_type_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<PageResponse<Room>, AppError> {
        self.room_repo.find_all(status, room_type_id, &page).await
    }

    /// Creates a room (admin only). New rooms start `Available`.
    pub async fn create_room(
        &self,
        ctx: &RequestContext,
        room_number: &str,
        room_type_id: Uuid,
    ) -> Result<Room, AppError> {
        ctx.require_admin()?;
        let room_number = normalize_room_number(room_number)?;
        self.ensure_room_type(room_type_id).await?;

        if self.room_repo.find_by_number(room_number).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Room number {room_number} already exists"
            )));
        }

        let room = self
            .room_repo
            .create(room_number, room_type_id, self.clock.now())
            .await?;

        info!(room_id = %room.id, room_number = %room.room_number, actor = %ctx.user_id, "Room created");
        Ok(room)
    }

    /// Changes a room's number and type (admin only).
    pub async fn update_room(
        &self,
        ctx: &RequestContext,
        room_id: Uuid,
        room_number: &str,
        room_type_id: Uuid,
    ) -> Result<Room, AppError> {
        ctx.require_admin()?;
        let room_number = normalize_room_number(room_number)?;
        self.get_room(room_id).await?;
        self.ensure_room_type(room_type_id).await?;

        if let Some(existing) = self.room_repo.find_by_number(room_number).await? {
            if existing.id != room_id {
                return Err(AppError::conflict(format!(
                    "Room number {room_number} already exists"
                )));
            }
        }

        let room = self
            .room_repo
            .update(room_id, room_number, room_type_id, self.clock.now())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {room_id} not found")))?;

        info!(room_id = %room.id, room_number = %room.room_number, actor = %ctx.user_id, "Room updated");
        Ok(room)
    }

    /// Deletes a room that no booking references (admin only).
    pub async fn delete_room(&self, ctx: &RequestContext, room_id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;
        let room = self.get_room(room_id).await?;

        let booking_count = self.room_repo.count_bookings(room_id).await?;
        if booking_count > 0 {
            return Err(AppError::state(format!(
                "Room {} has {booking_count} booking(s) and cannot be deleted",
                room.room_number
            ))
            .with_details(json!({ "booking_count": booking_count })));
        }

        self.room_repo.delete(room_id).await?;
        info!(room_id = %room_id, room_number = %room.room_number, actor = %ctx.user_id, "Room deleted");
        Ok(())
    }

    /// Overrides a room's operational status (admin only).
    ///
    /// An override that would contradict today's in-house booking (marking
    /// an occupied room free, or a free room occupied) is rejected unless
    /// `force` is set.
    pub async fn set_room_status(
        &self,
        ctx: &RequestContext,
        room_id: Uuid,
        status: RoomStatus,
        force: bool,
        reason: Option<String>,
    ) -> Result<Room, AppError> {
        ctx.require_admin()?;

        // Room row first: the write lock spans the in-house check and the update.
        let now = self.clock.now();
        let mut tx = self.db.begin().await?;
        if !self.room_repo.lock(&mut *tx, room_id, now).await? {
            return Err(AppError::not_found(format!("Room {room_id} not found")));
        }
        let room = self
            .room_repo
            .find_by_id_in(&mut *tx, room_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {room_id} not found")))?;

        let in_house = self
            .booking_repo
            .find_in_house(&mut *tx, room_id, self.clock.today())
            .await?;
        let desync = match status {
            RoomStatus::Occupied => in_house.is_empty(),
            _ => !in_house.is_empty(),
        };

        if desync {
            if !force {
                let message = if in_house.is_empty() {
                    format!(
                        "Room {} has no confirmed booking for today and cannot be marked occupied",
                        room.room_number
                    )
                } else {
                    format!(
                        "Room {} has a guest in house; set force to override",
                        room.room_number
                    )
                };
                return Err(AppError::state(message).with_details(json!({
                    "in_house_bookings": in_house.iter().map(|b| b.id).collect::<Vec<_>>(),
                })));
            }
            warn!(
                room_id = %room_id,
                room_number = %room.room_number,
                from = %room.status,
                to = %status,
                in_house_bookings = in_house.len(),
                actor = %ctx.user_id,
                "Forced room status override out of step with bookings"
            );
        }

        self.room_repo
            .set_status(&mut *tx, room_id, status, now)
            .await?;
        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit room status override", e))?;

        info!(room_id = %room_id, from = %room.status, to = %status, actor = %ctx.user_id, "Room status overridden");

        record_admin_action(
            self.action_log.as_ref(),
            AdminActionRecord {
                admin_id: ctx.user_id,
                action_type: "room.status_override".to_string(),
                target_type: "room".to_string(),
                target_id: room_id,
                detail: json!({
                    "from": room.status,
                    "to": status,
                    "forced": desync,
                    "reason": reason,
                }),
            },
        )
        .await;

        Ok(Room {
            status,
            updated_at: now,
            ..room
        })
    }

    async fn ensure_room_type(&self, room_type_id: Uuid) -> Result<(), AppError> {
        if self.room_type_repo.find_by_id(room_type_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Room type {room_type_id} not found"
            )));
        }
        Ok(())
    }
}

fn normalize_room_number(room_number: &str) -> Result<&str, AppError> {
    let trimmed = room_number.trim();
    if trimmed.is_empty() || trimmed.len() > 16 {
        return Err(AppError::validation(
            "Room number must be between 1 and 16 characters",
        ));
    }
    Ok(trimmed)
}
