use crate::modules::auth::application::ports::outgoing::verification_token_repository::{
    VerificationTokenError, VerificationTokenRepository,
};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};

use std::sync::Arc;

use uuid::Uuid;

/// Redis-backed implementation of `VerificationTokenRepository`.
///
/// ## Redis data model
///
/// ```text
/// auth:verification:user:{user_id} -> "{token}"
/// ```
/// - One key per user, so a user has at most one live token
/// - TTL = verification window; Redis drops the key when it lapses
#[derive(Clone)]
pub struct RedisVerificationTokenRepository {
    pool: Arc<Pool>,
}

impl RedisVerificationTokenRepository {
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    fn user_key(user_id: Uuid) -> String {
        format!("auth:verification:user:{user_id}")
    }

    async fn get_conn(&self) -> Result<deadpool_redis::Connection, VerificationTokenError> {
        self.pool
            .get()
            .await
            .map_err(|e| VerificationTokenError::ConnectionFailed(format!("Pool error: {}", e)))
    }
}

#[async_trait]
impl VerificationTokenRepository for RedisVerificationTokenRepository {
    /// ```text
    /// SET auth:verification:user:{user_id} {token} EX <ttl>
    /// ```
    async fn save_token(
        &self,
        user_id: Uuid,
        token: &str,
        ttl_seconds: u64,
    ) -> Result<(), VerificationTokenError> {
        let mut conn = self.get_conn().await?;

        let _: () = conn
            .set_ex(Self::user_key(user_id), token, ttl_seconds)
            .await
            .map_err(|e| VerificationTokenError::CommandFailed(e.to_string()))?;

        Ok(())
    }

    async fn find_token(&self, user_id: Uuid) -> Result<Option<String>, VerificationTokenError> {
        let mut conn = self.get_conn().await?;

        let token: Option<String> = conn
            .get(Self::user_key(user_id))
            .await
            .map_err(|e| VerificationTokenError::CommandFailed(e.to_string()))?;

        Ok(token)
    }

    /// Deleting a missing key is a no-op.
    async fn delete_token(&self, user_id: Uuid) -> Result<(), VerificationTokenError> {
        let mut conn = self.get_conn().await?;

        let _: () = conn
            .del(Self::user_key(user_id))
            .await
            .map_err(|e| VerificationTokenError::CommandFailed(e.to_string()))?;

        Ok(())
    }
}
