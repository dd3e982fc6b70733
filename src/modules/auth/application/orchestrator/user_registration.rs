use std::sync::Arc;

use tracing::{error, warn};

use crate::auth::application::services::validation::RegistrationInput;
use crate::auth::application::use_cases::create_user::{
    CreateUserError, CreateUserOutput, ICreateUserUseCase,
};
use crate::email::application::ports::outgoing::user_email_notifier::UserEmailNotifier;

pub const REGISTRATION_MESSAGE: &str = "Email verification link sent to your email";

#[derive(Debug)]
pub struct UserRegistrationOutput {
    pub user_id: uuid::Uuid,
    pub email: String,
    pub username: String,
    pub message: String,
}

impl From<CreateUserOutput> for UserRegistrationOutput {
    fn from(output: CreateUserOutput) -> Self {
        Self {
            user_id: output.user_id,
            email: output.email,
            username: output.username,
            message: REGISTRATION_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UserRegistrationError {
    #[error("User creation failed: {0}")]
    CreateUserFailed(#[from] CreateUserError),
}

/// Creates the account, then mails the verification link.
#[derive(Clone)]
pub struct UserRegistrationOrchestrator {
    create_user_use_case: Arc<dyn ICreateUserUseCase + Send + Sync>,
    email_service: Arc<dyn UserEmailNotifier + Send + Sync>,
}

impl UserRegistrationOrchestrator {
    pub fn new(
        create_user_use_case: Arc<dyn ICreateUserUseCase + Send + Sync>,
        email_service: Arc<dyn UserEmailNotifier + Send + Sync>,
    ) -> Self {
        Self {
            create_user_use_case,
            email_service,
        }
    }

    /// Mail failures are logged only; the account exists and login resends the link.
    pub async fn register_user(
        &self,
        input: RegistrationInput,
    ) -> Result<UserRegistrationOutput, UserRegistrationError> {
        let created_user = self.create_user_use_case.execute(input).await?;

        match &created_user.verification_token {
            Some(token) => {
                if let Err(e) = self
                    .email_service
                    .send_verification_email(created_user.user_id, &created_user.email, token)
                    .await
                {
                    error!(
                        user_id = %created_user.user_id,
                        error = %e,
                        "Verification email failed"
                    );
                }
            }
            None => warn!(
                user_id = %created_user.user_id,
                "No verification token stored, skipping email"
            ),
        }

        Ok(created_user.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::services::validation::ValidationError;
    use crate::tests::support::in_memory::RecordingNotifier;
    use async_trait::async_trait;
    use uuid::Uuid;

    #[derive(Clone)]
    struct MockCreateUserUseCase {
        result: Result<CreateUserOutput, CreateUserError>,
    }

    #[async_trait]
    impl ICreateUserUseCase for MockCreateUserUseCase {
        async fn execute(
            &self,
            _input: RegistrationInput,
        ) -> Result<CreateUserOutput, CreateUserError> {
            self.result.clone()
        }
    }

    fn created(token: Option<&str>) -> CreateUserOutput {
        CreateUserOutput {
            user_id: Uuid::new_v4(),
            username: "janedoe".to_string(),
            email: "jane@example.com".to_string(),
            verification_token: token.map(str::to_string),
        }
    }

    fn orchestrator(
        result: Result<CreateUserOutput, CreateUserError>,
        notifier: Arc<RecordingNotifier>,
    ) -> UserRegistrationOrchestrator {
        UserRegistrationOrchestrator::new(Arc::new(MockCreateUserUseCase { result }), notifier)
    }

    #[tokio::test]
    async fn sends_verification_email_with_issued_token() {
        let notifier = Arc::new(RecordingNotifier::default());
        let output = created(Some("tok"));
        let user_id = output.user_id;

        let registered = orchestrator(Ok(output), notifier.clone())
            .register_user(RegistrationInput::default())
            .await
            .unwrap();

        assert_eq!(registered.user_id, user_id);
        assert_eq!(registered.message, REGISTRATION_MESSAGE);

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].email, "jane@example.com");
        assert_eq!(sent[0].token, "tok");
    }

    #[tokio::test]
    async fn email_failure_still_succeeds() {
        let notifier = Arc::new(RecordingNotifier::failing());

        let result = orchestrator(Ok(created(Some("tok"))), notifier.clone())
            .register_user(RegistrationInput::default())
            .await;

        assert!(result.is_ok());
        assert_eq!(notifier.sent().len(), 1);
    }

    #[tokio::test]
    async fn missing_token_skips_email() {
        let notifier = Arc::new(RecordingNotifier::default());

        let result = orchestrator(Ok(created(None)), notifier.clone())
            .register_user(RegistrationInput::default())
            .await;

        assert!(result.is_ok());
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn create_failure_sends_nothing() {
        let notifier = Arc::new(RecordingNotifier::default());

        let result = orchestrator(
            Err(CreateUserError::Validation(ValidationError::InvalidEmail)),
            notifier.clone(),
        )
        .register_user(RegistrationInput::default())
        .await;

        assert!(matches!(
            result,
            Err(UserRegistrationError::CreateUserFailed(
                CreateUserError::Validation(ValidationError::InvalidEmail)
            ))
        ));
        assert!(notifier.sent().is_empty());
    }
}
