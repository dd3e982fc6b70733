use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::application::domain::entities::PublicUser;
use crate::auth::application::ports::outgoing::user_repository::{
    UserRepository, UserRepositoryError,
};
use crate::auth::application::services::validation::{validate_verification, ValidationError};
use crate::auth::application::services::verification::VerificationTokenService;

#[derive(Debug, Clone, thiserror::Error)]
pub enum VerifyUserError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Token does not exist")]
    TokenNotFound,

    #[error("Unable to verify user")]
    UpdateFailed,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Raw query parameters; either may be absent.
#[derive(Debug, Clone, Default)]
pub struct VerifyUserInput {
    pub user_id: Option<String>,
    pub token: Option<String>,
}

#[async_trait]
pub trait IVerifyUserUseCase: Send + Sync {
    async fn execute(&self, input: VerifyUserInput) -> Result<PublicUser, VerifyUserError>;
}

#[derive(Clone)]
pub struct VerifyUserUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    repository: R,
    verification_tokens: VerificationTokenService,
}

impl<R> VerifyUserUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    pub fn new(repository: R, verification_tokens: VerificationTokenService) -> Self {
        Self {
            repository,
            verification_tokens,
        }
    }
}

#[async_trait]
impl<R> IVerifyUserUseCase for VerifyUserUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    async fn execute(&self, input: VerifyUserInput) -> Result<PublicUser, VerifyUserError> {
        let params = validate_verification(input.user_id.as_deref(), input.token.as_deref())?;

        // A malformed id can never have a stored token
        let user_id = Uuid::parse_str(&params.user_id).map_err(|_| VerifyUserError::TokenNotFound)?;

        let is_live = self
            .verification_tokens
            .matches(user_id, &params.token)
            .await
            .map_err(|e| VerifyUserError::Unexpected(e.to_string()))?;

        if !is_live {
            return Err(VerifyUserError::TokenNotFound);
        }

        let user = self
            .repository
            .mark_verified(user_id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => VerifyUserError::UpdateFailed,
                other => VerifyUserError::Unexpected(other.to_string()),
            })?;

        if let Err(e) = self.verification_tokens.consume(user_id).await {
            error!(user_id = %user_id, error = %e, "Failed to delete verification token");
        }

        info!(user_id = %user_id, "User email verified");
        Ok(user.into())
    }
}
