//! Admin action entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An append-only record of something an administrator did.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminAction {
    /// Unique action identifier.
    pub id: Uuid,
    /// The administrator.
    pub admin_id: Uuid,
    /// Dotted action name (`booking.cancel`, `room.status_override`, ...).
    pub action_type: String,
    /// Kind of the target (`booking`, `room`).
    pub target_type: String,
    /// Target identifier.
    pub target_id: Uuid,
    /// Structured context.
    pub detail: sqlx::types::Json<serde_json::Value>,
    /// When the action was recorded.
    pub created_at: DateTime<Utc>,
}

/// Filters for browsing the action log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminActionFilter {
    /// Only actions by this admin.
    pub admin_id: Option<Uuid>,
    /// Only actions of this type.
    pub action_type: Option<String>,
    /// Only actions on this target.
    pub target_id: Option<Uuid>,
}
