//! [`ActionLogSink`] backed by the admin_actions table.

use std::sync::Arc;

use async_trait::async_trait;

use hotel_core::result::AppResult;
use hotel_core::traits::{ActionLogSink, AdminActionRecord, Clock};
use hotel_database::repositories::AdminActionRepository;

/// Writes admin actions to the database.
#[derive(Debug, Clone)]
pub struct DbActionLog {
    repo: Arc<AdminActionRepository>,
    clock: Arc<dyn Clock>,
}

impl DbActionLog {
    /// Creates a new database-backed action log.
    pub fn new(repo: Arc<AdminActionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

#[async_trait]
impl ActionLogSink for DbActionLog {
    async fn log(&self, record: AdminActionRecord) -> AppResult<()> {
        self.repo.create(&record, self.clock.now()).await?;
        Ok(())
    }
}
