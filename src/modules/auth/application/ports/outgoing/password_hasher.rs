use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error)]
pub enum HashError {
    #[error("Password hashing failed: {0}")]
    HashFailed(String),

    /// The stored hash could not be parsed. A plain mismatch is `Ok(false)`.
    #[error("Password verification failed: {0}")]
    VerifyFailed(String),

    #[error("Hashing task did not complete: {0}")]
    TaskFailed(String),
}

/// One-way password hashing. Implementations must not block the async runtime.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, HashError>;
    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError>;
}
