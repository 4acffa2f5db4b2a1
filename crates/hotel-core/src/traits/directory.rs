//! Guest directory collaborator.

use async_trait::async_trait;
use uuid::Uuid;

use crate::result::AppResult;

/// Answers whether a guest identity is known.
///
/// The booking ledger consults this before accepting a booking for a guest.
#[async_trait]
pub trait GuestDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Whether a user with this ID exists.
    async fn guest_exists(&self, id: Uuid) -> AppResult<bool>;
}
