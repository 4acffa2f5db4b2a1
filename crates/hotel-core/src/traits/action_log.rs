//! Append-only administrative action sink.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::result::AppResult;

/// One administrative action to append.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminActionRecord {
    /// The admin who acted.
    pub admin_id: Uuid,
    /// Dotted action name, e.g. `"booking.cancel"`.
    pub action_type: String,
    /// Kind of target, e.g. `"booking"` or `"room"`.
    pub target_type: String,
    /// Target identifier.
    pub target_id: Uuid,
    /// Free-form detail (reason, previous/next status).
    pub detail: serde_json::Value,
}

/// Sink for admin actions.
///
/// Callers treat the sink as fire-and-forget: an error here is logged and
/// never undoes the action being recorded.
#[async_trait]
pub trait ActionLogSink: Send + Sync + std::fmt::Debug + 'static {
    /// Append one record.
    async fn log(&self, record: AdminActionRecord) -> AppResult<()>;
}
