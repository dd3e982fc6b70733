//! Pure input checks shared by the registration and login flows.
//!
//! Text fields are trimmed before any rule runs; passwords are taken as-is.
use std::sync::LazyLock;

use regex::Regex;

use crate::auth::application::ports::incoming::password_policy::{
    PasswordPolicy, PasswordPolicyError,
};

/// Characters rejected in usernames and personal names.
pub const FORBIDDEN_CHARACTERS: &[char] = &['|', '!', '{', '}', '(', ')', '&', '=', '[', ']', '<', '>'];

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_REGEX: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN));

/// Column widths of the `users` table, counted in characters.
pub const USERNAME_MAX_LEN: usize = 50;
pub const EMAIL_MAX_LEN: usize = 255;
pub const NAME_MAX_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingField(&'static str),

    #[error("Invalid character in {0}")]
    InvalidCharacter(&'static str),

    #[error("{0} is too long")]
    TooLong(&'static str),

    #[error("Invalid input for email")]
    InvalidEmail,

    #[error("Password must contain at least 1 special character, 1 number, 1 lowercase letter, and 1 uppercase letter. Also it must be minimum of 8 characters and maximum of 20 characters")]
    WeakPassword(PasswordPolicyError),
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Registration fields after every rule passed. Email is lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLogin {
    pub email: String,
    pub password: String,
}

fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed)
}

fn require_password(value: &str) -> Result<&str, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingField("password"));
    }
    Ok(value)
}

fn limit_length(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong(field));
    }
    Ok(())
}

fn reject_forbidden(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.contains(FORBIDDEN_CHARACTERS) {
        return Err(ValidationError::InvalidCharacter(field));
    }
    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    match EMAIL_REGEX.as_ref() {
        Ok(re) => re.is_match(email),
        Err(e) => {
            tracing::error!(error = %e, "Email pattern failed to compile");
            false
        }
    }
}

/// Applies presence, length, character, email and password rules in that order.
pub fn validate_registration(
    input: &RegistrationInput,
    password_policy: &dyn PasswordPolicy,
) -> Result<ValidatedRegistration, ValidationError> {
    let username = require("username", &input.username)?;
    let email = require("email", &input.email)?;
    let password = require_password(&input.password)?;
    let first_name = require("firstName", &input.first_name)?;
    let last_name = require("lastName", &input.last_name)?;

    limit_length("username", username, USERNAME_MAX_LEN)?;
    limit_length("email", email, EMAIL_MAX_LEN)?;
    limit_length("first name", first_name, NAME_MAX_LEN)?;
    limit_length("last name", last_name, NAME_MAX_LEN)?;

    reject_forbidden("username", username)?;
    reject_forbidden("first name", first_name)?;
    reject_forbidden("last name", last_name)?;

    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    password_policy
        .validate(password)
        .map_err(ValidationError::WeakPassword)?;

    Ok(ValidatedRegistration {
        username: username.to_string(),
        email: email.to_lowercase(),
        password: password.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedVerification {
    pub user_id: String,
    pub token: String,
}

/// Presence only. The id format is checked against the token store.
pub fn validate_verification(
    user_id: Option<&str>,
    token: Option<&str>,
) -> Result<ValidatedVerification, ValidationError> {
    let user_id = require("userId", user_id.unwrap_or_default())?;
    let token = require("token", token.unwrap_or_default())?;

    Ok(ValidatedVerification {
        user_id: user_id.to_string(),
        token: token.to_string(),
    })
}

/// Presence only. A malformed email simply fails the lookup later.
pub fn validate_login(input: &LoginInput) -> Result<ValidatedLogin, ValidationError> {
    let email = require("email", &input.email)?;
    let password = require_password(&input.password)?;

    Ok(ValidatedLogin {
        email: email.to_lowercase(),
        password: password.to_string(),
    })
}
