use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone, thiserror::Error)]
pub enum VerificationTokenError {
    #[error("Token store connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Token store command failed: {0}")]
    CommandFailed(String),
}

/// Holds at most one live verification token per user.
/// Expired tokens must be unreadable.
#[async_trait]
pub trait VerificationTokenRepository: Send + Sync {
    /// Stores `token` for `user_id`, replacing any previous one.
    async fn save_token(
        &self,
        user_id: Uuid,
        token: &str,
        ttl_seconds: u64,
    ) -> Result<(), VerificationTokenError>;

    /// Returns the live token for `user_id`, if any.
    async fn find_token(&self, user_id: Uuid) -> Result<Option<String>, VerificationTokenError>;

    async fn delete_token(&self, user_id: Uuid) -> Result<(), VerificationTokenError>;
}
