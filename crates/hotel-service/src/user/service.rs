//! User provisioning and lookup.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use hotel_core::error::AppError;
use hotel_core::traits::Clock;
use hotel_core::types::{PageRequest, PageResponse};
use hotel_database::repositories::UserRepository;
use hotel_entity::user::{CreateUser, User};

/// Creates and looks up users. Users are provisioned by the CLI; the HTTP
/// API only resolves callers.
#[derive(Debug, Clone)]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    clock: Arc<dyn Clock>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(user_repo: Arc<UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { user_repo, clock }
    }

    /// Gets a user by ID.
    pub async fn get_user(&self, id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Resolves a caller identity, failing with `Authentication` when unknown.
    pub async fn resolve_caller(&self, id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::authentication(format!("Unknown caller {id}")))
    }

    /// Gets a user by username.
    pub async fn get_by_username(&self, username: &str) -> Result<User, AppError> {
        self.user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))
    }

    /// Lists users.
    pub async fn list_users(&self, page: PageRequest) -> Result<PageResponse<User>, AppError> {
        self.user_repo.find_all(&page).await
    }

    /// Creates a user.
    pub async fn create_user(&self, data: CreateUser) -> Result<User, AppError> {
        let username = data.username.trim();
        if username.is_empty() || username.len() > 64 {
            return Err(AppError::validation(
                "Username must be between 1 and 64 characters",
            ));
        }
        if self.user_repo.find_by_username(username).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Username '{username}' already exists"
            )));
        }

        let data = CreateUser {
            username: username.to_string(),
            ..data
        };
        let user = self.user_repo.create(&data, self.clock.now()).await?;

        info!(user_id = %user.id, username = %user.username, role = %user.role, "User created");
        Ok(user)
    }
}
