use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::auth::application::domain::entities::PublicUser;
use crate::auth::application::ports::outgoing::{
    password_hasher::PasswordHasher,
    token_provider::{SessionToken, TokenProvider},
    user_query::UserQuery,
};
use crate::auth::application::services::validation::{
    validate_login, LoginInput, ValidationError,
};
use crate::auth::application::services::verification::{IssuedToken, VerificationTokenService};
use crate::email::application::ports::outgoing::user_email_notifier::UserEmailNotifier;

#[derive(Debug, Clone, thiserror::Error)]
pub enum LoginError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

#[derive(Debug, Clone)]
pub enum LoginOutcome {
    Authenticated {
        user: PublicUser,
        session: SessionToken,
    },
    /// Account not verified yet; a link was (re)sent.
    /// `token_reissued` is false when the live token was resent.
    VerificationRequired { token_reissued: bool },
}

#[async_trait]
pub trait ILoginUserUseCase: Send + Sync {
    async fn execute(&self, input: LoginInput) -> Result<LoginOutcome, LoginError>;
}

#[derive(Clone)]
pub struct LoginUserUseCase<Q>
where
    Q: UserQuery + Send + Sync,
{
    query: Q,
    password_hasher: Arc<dyn PasswordHasher>,
    token_provider: Arc<dyn TokenProvider>,
    verification_tokens: VerificationTokenService,
    email_notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
}

impl<Q> LoginUserUseCase<Q>
where
    Q: UserQuery + Send + Sync,
{
    pub fn new(
        query: Q,
        password_hasher: Arc<dyn PasswordHasher>,
        token_provider: Arc<dyn TokenProvider>,
        verification_tokens: VerificationTokenService,
        email_notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
    ) -> Self {
        Self {
            query,
            password_hasher,
            token_provider,
            verification_tokens,
            email_notifier,
        }
    }
}

#[async_trait]
impl<Q> ILoginUserUseCase for LoginUserUseCase<Q>
where
    Q: UserQuery + Send + Sync,
{
    async fn execute(&self, input: LoginInput) -> Result<LoginOutcome, LoginError> {
        let credentials = validate_login(&input)?;

        let user = self
            .query
            .find_by_email(&credentials.email)
            .await
            .map_err(|e| LoginError::Unexpected(e.to_string()))?
            .ok_or(LoginError::InvalidCredentials)?;

        let is_valid = self
            .password_hasher
            .verify_password(&credentials.password, &user.password_hash)
            .await
            .map_err(|e| LoginError::Unexpected(e.to_string()))?;

        if !is_valid {
            return Err(LoginError::InvalidCredentials);
        }

        if !user.is_verified {
            let issued = self
                .verification_tokens
                .live_or_issue(user.id)
                .await
                .map_err(|e| LoginError::Unexpected(e.to_string()))?;

            if let Err(e) = self
                .email_notifier
                .send_verification_email(user.id, &user.email, issued.token())
                .await
            {
                error!(user_id = %user.id, error = %e, "Failed to resend verification email");
            }

            let token_reissued = matches!(issued, IssuedToken::Fresh(_));
            warn!(user_id = %user.id, token_reissued, "Login blocked pending email verification");
            return Ok(LoginOutcome::VerificationRequired { token_reissued });
        }

        let session = self
            .token_provider
            .generate_session_token(user.id, &user.email)
            .map_err(|e| LoginError::Unexpected(e.to_string()))?;

        info!(user_id = %user.id, "Session issued");

        Ok(LoginOutcome::Authenticated {
            user: user.into(),
            session,
        })
    }
}
