use std::fmt::Write;
use std::sync::Arc;

use rand::{rngs::OsRng, RngCore};
use uuid::Uuid;

use crate::auth::application::ports::outgoing::verification_token_repository::{
    VerificationTokenError, VerificationTokenRepository,
};
use crate::shared::config::{self, ConfigError};

const TOKEN_BYTES: usize = 64;

#[derive(Debug, Clone)]
pub struct VerificationConfig {
    pub frontend_url: String,
    pub token_ttl_seconds: u64,
    pub single_use: bool,
}

impl VerificationConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let frontend_url = config::required("FRONTEND_URL")?;
        let token_ttl_seconds = config::parse_or("VERIFICATION_TOKEN_TTL", 1800_u64)?;
        let single_use = config::bool_or("VERIFICATION_TOKEN_SINGLE_USE", true)?;

        if token_ttl_seconds == 0 {
            return Err(ConfigError::Invalid {
                key: "VERIFICATION_TOKEN_TTL",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
            token_ttl_seconds,
            single_use,
        })
    }
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            token_ttl_seconds: 1800,
            single_use: true,
        }
    }
}

/// 64 random bytes from the OS, hex encoded (128 chars).
pub fn generate_verification_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);

    bytes
        .iter()
        .fold(String::with_capacity(TOKEN_BYTES * 2), |mut out, b| {
            let _ = write!(out, "{:02x}", b);
            out
        })
}

/// Token handed back by `live_or_issue`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssuedToken {
    Existing(String),
    Fresh(String),
}

impl IssuedToken {
    pub fn token(&self) -> &str {
        match self {
            IssuedToken::Existing(t) | IssuedToken::Fresh(t) => t,
        }
    }
}

#[derive(Clone)]
pub struct VerificationTokenService {
    repository: Arc<dyn VerificationTokenRepository>,
    config: VerificationConfig,
}

impl VerificationTokenService {
    pub fn new(repository: Arc<dyn VerificationTokenRepository>, config: VerificationConfig) -> Self {
        Self { repository, config }
    }

    /// Mints and stores a new token, replacing any live one.
    pub async fn issue(&self, user_id: Uuid) -> Result<String, VerificationTokenError> {
        let token = generate_verification_token();
        self.repository
            .save_token(user_id, &token, self.config.token_ttl_seconds)
            .await?;
        Ok(token)
    }

    /// Reuses the live token when there is one.
    pub async fn live_or_issue(&self, user_id: Uuid) -> Result<IssuedToken, VerificationTokenError> {
        match self.repository.find_token(user_id).await? {
            Some(token) => Ok(IssuedToken::Existing(token)),
            None => self.issue(user_id).await.map(IssuedToken::Fresh),
        }
    }

    /// True when `token` is the live token for `user_id`.
    pub async fn matches(&self, user_id: Uuid, token: &str) -> Result<bool, VerificationTokenError> {
        Ok(self
            .repository
            .find_token(user_id)
            .await?
            .is_some_and(|live| constant_time_eq(live.as_bytes(), token.as_bytes())))
    }

    /// Deletes the token when single-use tokens are enabled.
    pub async fn consume(&self, user_id: Uuid) -> Result<(), VerificationTokenError> {
        if !self.config.single_use {
            return Ok(());
        }
        self.repository.delete_token(user_id).await
    }
}

/// Byte equality whose running time depends only on the lengths.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
