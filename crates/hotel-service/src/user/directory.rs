//! [`GuestDirectory`] backed by the users table.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use hotel_core::result::AppResult;
use hotel_core::traits::GuestDirectory;
use hotel_database::repositories::UserRepository;

/// Guest directory over the local users table.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    user_repo: Arc<UserRepository>,
}

impl UserDirectory {
    /// Creates a new user directory.
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl GuestDirectory for UserDirectory {
    async fn guest_exists(&self, id: Uuid) -> AppResult<bool> {
        self.user_repo.exists(id).await
    }
}
