//! Read access to the admin action log.

use std::sync::Arc;

use hotel_core::error::AppError;
use hotel_core::types::{PageRequest, PageResponse};
use hotel_database::repositories::AdminActionRepository;
use hotel_entity::admin::{AdminAction, AdminActionFilter};

use crate::context::RequestContext;

/// Browses the admin action log. Nothing in the ledgers reads it.
#[derive(Debug, Clone)]
pub struct AdminActionService {
    repo: Arc<AdminActionRepository>,
}

impl AdminActionService {
    /// Creates a new admin action service.
    pub fn new(repo: Arc<AdminActionRepository>) -> Self {
        Self { repo }
    }

    /// Searches the log (admin only).
    pub async fn list_actions(
        &self,
        ctx: &RequestContext,
        filter: AdminActionFilter,
        page: PageRequest,
    ) -> Result<PageResponse<AdminAction>, AppError> {
        ctx.require_admin()?;
        self.repo.search(&filter, &page).await
    }
}
