//! Admin action log: the database sink and the read side.

pub mod action_log;
pub mod service;

pub use action_log::DbActionLog;
pub use service::AdminActionService;

use hotel_core::traits::{ActionLogSink, AdminActionRecord};
use tracing::warn;

/// Append to the action log, downgrading any failure to a warning.
pub(crate) async fn record_admin_action(sink: &dyn ActionLogSink, record: AdminActionRecord) {
    let action_type = record.action_type.clone();
    let target_id = record.target_id;
    if let Err(e) = sink.log(record).await {
        warn!(
            action_type = %action_type,
            target_id = %target_id,
            error = %e,
            "Failed to record admin action"
        );
    }
}
