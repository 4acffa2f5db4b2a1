//! Amenity and service catalog.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use hotel_core::error::AppError;
use hotel_core::traits::Clock;
use hotel_core::types::Money;
use hotel_database::repositories::{AmenityRepository, ServiceRepository};
use hotel_entity::room::{Amenity, Service};

use crate::context::RequestContext;

/// Manages the amenities and services that room types refer to.
#[derive(Debug, Clone)]
pub struct CatalogService {
    amenity_repo: Arc<AmenityRepository>,
    service_repo: Arc<ServiceRepository>,
    clock: Arc<dyn Clock>,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(
        amenity_repo: Arc<AmenityRepository>,
        service_repo: Arc<ServiceRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            amenity_repo,
            service_repo,
            clock,
        }
    }

    /// Lists amenities.
    pub async fn list_amenities(&self) -> Result<Vec<Amenity>, AppError> {
        self.amenity_repo.find_all().await
    }

    /// Creates an amenity (admin only).
    pub async fn create_amenity(
        &self,
        ctx: &RequestContext,
        name: &str,
        description: Option<&str>,
    ) -> Result<Amenity, AppError> {
        ctx.require_admin()?;
        let name = non_empty(name, "Amenity")?;
        let amenity = self
            .amenity_repo
            .create(name, description, self.clock.now())
            .await?;
        info!(amenity_id = %amenity.id, name = %amenity.name, "Amenity created");
        Ok(amenity)
    }

    /// Deletes an amenity no room type uses (admin only).
    pub async fn delete_amenity(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;
        let amenity = self
            .amenity_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Amenity {id} not found")))?;

        let links = self.amenity_repo.count_links(id).await?;
        if links > 0 {
            return Err(AppError::state(format!(
                "Amenity '{}' is attached to {links} room type(s)",
                amenity.name
            )));
        }
        self.amenity_repo.delete(id).await?;
        info!(amenity_id = %id, name = %amenity.name, "Amenity deleted");
        Ok(())
    }

    /// Lists services.
    pub async fn list_services(&self) -> Result<Vec<Service>, AppError> {
        self.service_repo.find_all().await
    }

    /// Creates a service (admin only).
    pub async fn create_service(
        &self,
        ctx: &RequestContext,
        name: &str,
        price: Money,
        description: Option<&str>,
    ) -> Result<Service, AppError> {
        ctx.require_admin()?;
        let name = non_empty(name, "Service")?;
        if price < Money::ZERO {
            return Err(AppError::validation("Service price cannot be negative"));
        }
        let service = self
            .service_repo
            .create(name, price, description, self.clock.now())
            .await?;
        info!(service_id = %service.id, name = %service.name, price = %service.price, "Service created");
        Ok(service)
    }

    /// Deletes a service no room type uses (admin only).
    pub async fn delete_service(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;
        let service = self
            .service_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Service {id} not found")))?;

        let links = self.service_repo.count_links(id).await?;
        if links > 0 {
            return Err(AppError::state(format!(
                "Service '{}' is attached to {links} room type(s)",
                service.name
            )));
        }
        self.service_repo.delete(id).await?;
        info!(service_id = %id, name = %service.name, "Service deleted");
        Ok(())
    }
}

fn non_empty<'a>(name: &'a str, what: &str) -> Result<&'a str, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{what} name must not be empty")));
    }
    Ok(trimmed)
}
