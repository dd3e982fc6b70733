// application/ports/outgoing/user_repository.rs
use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::User;

/// Data needed to insert a new, unverified user
#[derive(Debug, Clone)]
pub struct CreateUserData {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts the user with `is_verified = false`.
    /// A unique-index violation is reported as `UserAlreadyExists`.
    async fn create_user(&self, data: CreateUserData) -> Result<User, UserRepositoryError>;

    /// Sets `is_verified = true` and returns the updated row.
    async fn mark_verified(&self, user_id: Uuid) -> Result<User, UserRepositoryError>;
}
