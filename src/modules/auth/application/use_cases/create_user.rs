use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};
use uuid::Uuid;

use crate::auth::application::ports::incoming::password_policy::PasswordPolicy;
use crate::auth::application::ports::outgoing::{
    password_hasher::PasswordHasher,
    user_query::UserQuery,
    user_repository::{CreateUserData, UserRepository, UserRepositoryError},
};
use crate::auth::application::services::validation::{
    validate_registration, RegistrationInput, ValidationError,
};
use crate::auth::application::services::verification::VerificationTokenService;

#[derive(Debug, Clone, thiserror::Error)]
pub enum CreateUserError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("User already exist")]
    DuplicateUser,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

#[derive(Debug, Clone)]
pub struct CreateUserOutput {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    /// None when the token could not be stored; a later login issues one.
    pub verification_token: Option<String>,
}

#[async_trait]
pub trait ICreateUserUseCase: Send + Sync {
    async fn execute(&self, input: RegistrationInput) -> Result<CreateUserOutput, CreateUserError>;
}

#[derive(Clone)]
pub struct CreateUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    query: Q,
    repository: R,
    password_hasher: Arc<dyn PasswordHasher>,
    password_policy: Arc<dyn PasswordPolicy>,
    verification_tokens: VerificationTokenService,
}

impl<Q, R> CreateUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    pub fn new(
        query: Q,
        repository: R,
        password_hasher: Arc<dyn PasswordHasher>,
        password_policy: Arc<dyn PasswordPolicy>,
        verification_tokens: VerificationTokenService,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
            password_policy,
            verification_tokens,
        }
    }

    async fn ensure_unique(&self, email: &str, username: &str) -> Result<(), CreateUserError> {
        let by_email = self
            .query
            .find_by_email(email)
            .await
            .map_err(|e| CreateUserError::Unexpected(e.to_string()))?;

        let by_username = self
            .query
            .find_by_username(username)
            .await
            .map_err(|e| CreateUserError::Unexpected(e.to_string()))?;

        if by_email.is_some() || by_username.is_some() {
            return Err(CreateUserError::DuplicateUser);
        }
        Ok(())
    }
}

#[async_trait]
impl<Q, R> ICreateUserUseCase for CreateUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn execute(&self, input: RegistrationInput) -> Result<CreateUserOutput, CreateUserError> {
        let validated = validate_registration(&input, self.password_policy.as_ref())?;

        self.ensure_unique(&validated.email, &validated.username)
            .await?;

        let password_hash = self
            .password_hasher
            .hash_password(&validated.password)
            .await
            .map_err(|e| CreateUserError::Unexpected(e.to_string()))?;

        let user = self
            .repository
            .create_user(CreateUserData {
                username: validated.username,
                email: validated.email,
                password_hash,
                first_name: validated.first_name,
                last_name: validated.last_name,
            })
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent registration
                UserRepositoryError::UserAlreadyExists => {
                    warn!("Unique constraint hit on user insert");
                    CreateUserError::DuplicateUser
                }
                other => CreateUserError::Unexpected(other.to_string()),
            })?;

        let verification_token = match self.verification_tokens.issue(user.id).await {
            Ok(token) => Some(token),
            Err(e) => {
                error!(user_id = %user.id, error = %e, "Failed to store verification token");
                None
            }
        };

        Ok(CreateUserOutput {
            user_id: user.id,
            username: user.username,
            email: user.email,
            verification_token,
        })
    }
}
