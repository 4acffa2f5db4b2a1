//! Room type management, including amenity and service associations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use hotel_core::error::AppError;
use hotel_core::traits::Clock;
use hotel_core::types::Money;
use hotel_database::repositories::room_type::RoomTypeFields;
use hotel_database::repositories::{
    AmenityRepository, RoomTypeRepository, ServiceRepository,
};
use hotel_entity::room::{RoomService, RoomType, RoomTypeDetail};

use crate::context::RequestContext;

/// Fields of a room type on create or update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomTypeInput {
    /// Unique name.
    pub name: String,
    /// Price per night, positive.
    pub price: Money,
    /// Maximum guests, positive.
    pub capacity: i64,
    /// Optional description.
    pub description: Option<String>,
}

impl RoomTypeInput {
    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Room type name must not be empty"));
        }
        if !self.price.is_positive() {
            return Err(AppError::validation("Room type price must be positive"));
        }
        if self.capacity < 1 {
            return Err(AppError::validation("Room type capacity must be at least 1"));
        }
        Ok(())
    }

    fn fields(&self) -> RoomTypeFields<'_> {
        RoomTypeFields {
            name: self.name.trim(),
            price: self.price,
            capacity: self.capacity,
            description: self.description.as_deref(),
        }
    }
}

/// Manages room types and what comes with them.
#[derive(Debug, Clone)]
pub struct RoomTypeService {
    room_type_repo: Arc<RoomTypeRepository>,
    amenity_repo: Arc<AmenityRepository>,
    service_repo: Arc<ServiceRepository>,
    clock: Arc<dyn Clock>,
}

impl RoomTypeService {
    /// Creates a new room type service.
    pub fn new(
        room_type_repo: Arc<RoomTypeRepository>,
        amenity_repo: Arc<AmenityRepository>,
        service_repo: Arc<ServiceRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            room_type_repo,
            amenity_repo,
            service_repo,
            clock,
        }
    }

    /// Lists room types, cheapest first.
    pub async fn list_room_types(&self) -> Result<Vec<RoomType>, AppError> {
        self.room_type_repo.find_all().await
    }

    /// Gets a room type with its amenities and services.
    pub async fn get_room_type(&self, id: Uuid) -> Result<RoomTypeDetail, AppError> {
        let room_type = self.find_room_type(id).await?;
        let amenities = self.room_type_repo.amenities(id).await?;
        let services = self.room_type_repo.services(id).await?;
        Ok(RoomTypeDetail {
            room_type,
            amenities,
            services,
        })
    }

    /// Creates a room type (admin only).
    pub async fn create_room_type(
        &self,
        ctx: &RequestContext,
        input: RoomTypeInput,
    ) -> Result<RoomType, AppError> {
        ctx.require_admin()?;
        input.validate()?;

        let room_type = self
            .room_type_repo
            .create(&input.fields(), self.clock.now())
            .await?;

        info!(room_type_id = %room_type.id, name = %room_type.name, price = %room_type.price, "Room type created");
        Ok(room_type)
    }

    /// Replaces a room type's fields (admin only).
    ///
    /// Existing bookings keep the price they were created with.
    pub async fn update_room_type(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: RoomTypeInput,
    ) -> Result<RoomType, AppError> {
        ctx.require_admin()?;
        input.validate()?;

        let room_type = self
            .room_type_repo
            .update(id, &input.fields(), self.clock.now())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room type {id} not found")))?;

        info!(room_type_id = %id, name = %room_type.name, "Room type updated");
        Ok(room_type)
    }

    /// Deletes an unreferenced room type (admin only).
    pub async fn delete_room_type(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;
        let room_type = self.find_room_type(id).await?;

        let refs = self.room_type_repo.references(id).await?;
        if !refs.is_empty() {
            return Err(AppError::state(format!(
                "Room type '{}' is still in use ({} room(s), {} amenity link(s), {} service link(s))",
                room_type.name, refs.rooms, refs.amenities, refs.services
            ))
            .with_details(json!({
                "rooms": refs.rooms,
                "amenities": refs.amenities,
                "services": refs.services,
            })));
        }

        self.room_type_repo.delete(id).await?;
        info!(room_type_id = %id, name = %room_type.name, "Room type deleted");
        Ok(())
    }

    /// Attaches an amenity to a room type (admin only).
    pub async fn attach_amenity(
        &self,
        ctx: &RequestContext,
        room_type_id: Uuid,
        amenity_id: Uuid,
    ) -> Result<(), AppError> {
        ctx.require_admin()?;
        self.find_room_type(room_type_id).await?;
        if self.amenity_repo.find_by_id(amenity_id).await?.is_none() {
            return Err(AppError::not_found(format!("Amenity {amenity_id} not found")));
        }
        self.room_type_repo
            .attach_amenity(room_type_id, amenity_id)
            .await
    }

    /// Detaches an amenity from a room type (admin only).
    pub async fn detach_amenity(
        &self,
        ctx: &RequestContext,
        room_type_id: Uuid,
        amenity_id: Uuid,
    ) -> Result<(), AppError> {
        ctx.require_admin()?;
        if !self
            .room_type_repo
            .detach_amenity(room_type_id, amenity_id)
            .await?
        {
            return Err(AppError::not_found(format!(
                "Amenity {amenity_id} is not attached to room type {room_type_id}"
            )));
        }
        Ok(())
    }

    /// Attaches a service to a room type, or updates its terms (admin only).
    ///
    /// An included service always carries a zero discount.
    pub async fn attach_service(
        &self,
        ctx: &RequestContext,
        room_type_id: Uuid,
        service_id: Uuid,
        included: bool,
        discount_percentage: i64,
    ) -> Result<RoomService, AppError> {
        ctx.require_admin()?;
        let link =
            RoomService::normalized(room_type_id, service_id, included, discount_percentage)?;
        self.find_room_type(room_type_id).await?;
        if self.service_repo.find_by_id(service_id).await?.is_none() {
            return Err(AppError::not_found(format!("Service {service_id} not found")));
        }
        self.room_type_repo.upsert_service(&link).await?;
        Ok(link)
    }

    /// Detaches a service from a room type (admin only).
    pub async fn detach_service(
        &self,
        ctx: &RequestContext,
        room_type_id: Uuid,
        service_id: Uuid,
    ) -> Result<(), AppError> {
        ctx.require_admin()?;
        if !self
            .room_type_repo
            .detach_service(room_type_id, service_id)
            .await?
        {
            return Err(AppError::not_found(format!(
                "Service {service_id} is not attached to room type {room_type_id}"
            )));
        }
        Ok(())
    }

    async fn find_room_type(&self, id: Uuid) -> Result<RoomType, AppError> {
        self.room_type_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room type {id} not found")))
    }
}
