use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::application::domain::entities::PublicUser;
use crate::auth::application::ports::outgoing::token_provider::SessionToken;
use crate::auth::application::services::validation::{LoginInput, RegistrationInput};
use crate::auth::application::use_cases::create_user::{
    CreateUserError, CreateUserOutput, ICreateUserUseCase,
};
use crate::auth::application::use_cases::login_user::{ILoginUserUseCase, LoginError, LoginOutcome};
use crate::auth::application::use_cases::verify_user::{
    IVerifyUserUseCase, VerifyUserError, VerifyUserInput,
};
use crate::email::application::ports::outgoing::user_email_notifier::{
    UserEmailNotificationError, UserEmailNotifier,
};

fn stub_user(email: &str) -> PublicUser {
    let now = Utc::now();
    PublicUser {
        id: Uuid::new_v4(),
        username: "stubuser".to_string(),
        email: email.to_string(),
        first_name: "Stub".to_string(),
        last_name: "User".to_string(),
        is_verified: true,
        created_at: now,
        updated_at: now,
    }
}

#[derive(Clone)]
pub struct StubCreateUserUseCase;

#[async_trait]
impl ICreateUserUseCase for StubCreateUserUseCase {
    async fn execute(&self, input: RegistrationInput) -> Result<CreateUserOutput, CreateUserError> {
        Ok(CreateUserOutput {
            user_id: Uuid::new_v4(),
            username: input.username,
            email: input.email,
            verification_token: Some("stub-token".to_string()),
        })
    }
}

#[derive(Clone)]
pub struct StubLoginUserUseCase;

#[async_trait]
impl ILoginUserUseCase for StubLoginUserUseCase {
    async fn execute(&self, input: LoginInput) -> Result<LoginOutcome, LoginError> {
        Ok(LoginOutcome::Authenticated {
            user: stub_user(&input.email),
            session: SessionToken {
                token: "stub-session".to_string(),
                max_age_seconds: 1800,
            },
        })
    }
}

#[derive(Clone)]
pub struct StubVerifyUserUseCase;

#[async_trait]
impl IVerifyUserUseCase for StubVerifyUserUseCase {
    async fn execute(&self, _input: VerifyUserInput) -> Result<PublicUser, VerifyUserError> {
        Ok(stub_user("stub@example.com"))
    }
}

#[derive(Clone)]
pub struct StubUserEmailNotifier;

#[async_trait]
impl UserEmailNotifier for StubUserEmailNotifier {
    async fn send_verification_email(
        &self,
        _user_id: Uuid,
        _email: &str,
        _token: &str,
    ) -> Result<(), UserEmailNotificationError> {
        Ok(())
    }
}
