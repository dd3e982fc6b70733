use crate::shared::config::{self, ConfigError};

const MIN_SECRET_LEN: usize = 32;
const MAX_SESSION_EXPIRY: i64 = 86_400;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    pub session_expiry: i64, // seconds, also used as cookie Max-Age
}

impl JwtConfig {
    /// Load JWT configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret_key = config::required("JWT_SECRET")?;
        let issuer = config::string_or("JWT_ISSUER", "account-auth");
        let session_expiry = config::parse_or("JWT_SESSION_EXPIRY", 1800_i64)?;

        Self::new(secret_key, issuer, session_expiry)
    }

    pub fn new(
        secret_key: String,
        issuer: String,
        session_expiry: i64,
    ) -> Result<Self, ConfigError> {
        // HS256 needs at least 32 bytes of key material
        if secret_key.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                reason: format!("must be at least {} characters long", MIN_SECRET_LEN),
            });
        }

        if session_expiry <= 0 || session_expiry > MAX_SESSION_EXPIRY {
            return Err(ConfigError::Invalid {
                key: "JWT_SESSION_EXPIRY",
                reason: format!("must be between 1 and {} seconds", MAX_SESSION_EXPIRY),
            });
        }

        Ok(Self {
            secret_key,
            issuer,
            session_expiry,
        })
    }
}
