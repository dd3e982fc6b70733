//! In-memory implementations of the auth and email ports.
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::application::domain::entities::User;
use crate::auth::application::ports::outgoing::password_hasher::{HashError, PasswordHasher};
use crate::auth::application::ports::outgoing::user_query::{UserQuery, UserQueryError};
use crate::auth::application::ports::outgoing::user_repository::{
    CreateUserData, UserRepository, UserRepositoryError,
};
use crate::auth::application::ports::outgoing::verification_token_repository::{
    VerificationTokenError, VerificationTokenRepository,
};
use crate::email::application::ports::outgoing::user_email_notifier::{
    UserEmailNotificationError, UserEmailNotifier,
};

/// Shared user table; clones see the same rows.
#[derive(Clone, Default)]
pub struct InMemoryUsers {
    rows: Arc<Mutex<Vec<User>>>,
}

impl InMemoryUsers {
    pub fn with_user(user: User) -> Self {
        let users = Self::default();
        users.insert(user);
        users
    }

    pub fn insert(&self, user: User) {
        self.rows.lock().unwrap().push(user);
    }

    pub fn remove(&self, user_id: Uuid) {
        self.rows.lock().unwrap().retain(|u| u.id != user_id);
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn get(&self, user_id: Uuid) -> Option<User> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
    }
}

#[async_trait]
impl UserQuery for InMemoryUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserQueryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create_user(&self, data: CreateUserData) -> Result<User, UserRepositoryError> {
        let mut rows = self.rows.lock().unwrap();

        // Same contract as the unique indexes
        if rows
            .iter()
            .any(|u| u.email == data.email || u.username == data.username)
        {
            return Err(UserRepositoryError::UserAlreadyExists);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            first_name: data.first_name,
            last_name: data.last_name,
            is_verified: false,
            created_at: now,
            updated_at: now,
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn mark_verified(&self, user_id: Uuid) -> Result<User, UserRepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let user = rows
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(UserRepositoryError::UserNotFound)?;

        user.is_verified = true;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

/// Token store without expiry; records the TTL it was given.
#[derive(Default)]
pub struct InMemoryVerificationTokens {
    tokens: Mutex<HashMap<Uuid, (String, u64)>>,
    saves: Mutex<usize>,
}

impl InMemoryVerificationTokens {
    pub fn token_for(&self, user_id: Uuid) -> Option<String> {
        self.tokens
            .lock()
            .unwrap()
            .get(&user_id)
            .map(|(t, _)| t.clone())
    }

    pub fn ttl_for(&self, user_id: Uuid) -> Option<u64> {
        self.tokens.lock().unwrap().get(&user_id).map(|(_, ttl)| *ttl)
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

#[async_trait]
impl VerificationTokenRepository for InMemoryVerificationTokens {
    async fn save_token(
        &self,
        user_id: Uuid,
        token: &str,
        ttl_seconds: u64,
    ) -> Result<(), VerificationTokenError> {
        self.tokens
            .lock()
            .unwrap()
            .insert(user_id, (token.to_string(), ttl_seconds));
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }

    async fn find_token(&self, user_id: Uuid) -> Result<Option<String>, VerificationTokenError> {
        Ok(self.token_for(user_id))
    }

    async fn delete_token(&self, user_id: Uuid) -> Result<(), VerificationTokenError> {
        self.tokens.lock().unwrap().remove(&user_id);
        Ok(())
    }
}

/// Reversible "hash" so tests skip bcrypt.
#[derive(Debug, Clone, Default)]
pub struct FakePasswordHasher;

impl FakePasswordHasher {
    pub fn hash_of(password: &str) -> String {
        format!("hashed:{}", password)
    }
}

#[async_trait]
impl PasswordHasher for FakePasswordHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        Ok(Self::hash_of(password))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        Ok(Self::hash_of(password) == hash)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentVerification {
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

/// Clones share the recorded sends.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<SentVerification>>>,
    fail: bool,
}

impl RecordingNotifier {
    /// Records the attempt, then fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<SentVerification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserEmailNotifier for RecordingNotifier {
    async fn send_verification_email(
        &self,
        user_id: Uuid,
        email: &str,
        token: &str,
    ) -> Result<(), UserEmailNotificationError> {
        self.sent.lock().unwrap().push(SentVerification {
            user_id,
            email: email.to_string(),
            token: token.to_string(),
        });
        if self.fail {
            return Err(UserEmailNotificationError::EmailSendingFailed(
                "SMTP connection failed".to_string(),
            ));
        }
        Ok(())
    }
}

/// Stored user with the given verification state and password.
pub fn stored_user(email: &str, password: &str, is_verified: bool) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        username: "janedoe".to_string(),
        email: email.to_string(),
        password_hash: FakePasswordHasher::hash_of(password),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        is_verified,
        created_at: now,
        updated_at: now,
    }
}
