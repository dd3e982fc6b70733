use crate::api::schemas::{ErrorResponse, MessageResponse};
use crate::auth::application::orchestrator::user_registration::{
    UserRegistrationError, REGISTRATION_MESSAGE,
};
use crate::auth::application::services::validation::RegistrationInput;
use crate::auth::application::use_cases::create_user::CreateUserError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use super::errors::validation_error_response;

/// Request body for user registration.
///
/// Absent fields deserialize to empty strings so they are reported as
/// missing rather than as malformed JSON.
#[derive(Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUserRequest {
    #[schema(example = "janedoe")]
    pub username: String,

    #[schema(example = "jane@example.com")]
    pub email: String,

    /// 8-20 characters with an uppercase, a lowercase, a digit and a symbol
    #[schema(example = "Abcdefg1!")]
    pub password: String,

    #[schema(example = "Jane")]
    pub first_name: String,

    #[schema(example = "Doe")]
    pub last_name: String,
}

impl From<&CreateUserRequest> for RegistrationInput {
    fn from(req: &CreateUserRequest) -> Self {
        Self {
            username: req.username.clone(),
            email: req.email.clone(),
            password: req.password.clone(),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
        }
    }
}

fn map_create_user_error(err: CreateUserError, req: &CreateUserRequest) -> HttpResponse {
    match &err {
        CreateUserError::Validation(validation) => {
            warn!(
                username = %req.username,
                email = %req.email,
                error = %validation,
                "Invalid registration input"
            );
            validation_error_response(validation)
        }

        CreateUserError::DuplicateUser => {
            warn!(
                username = %req.username,
                email = %req.email,
                "User already exists"
            );
            ApiResponse::conflict("DUPLICATE_USER", "User already exist")
        }

        CreateUserError::Unexpected(detail) => {
            error!(
                username = %req.username,
                email = %req.email,
                error = %detail,
                "Unhandled user creation error"
            );
            ApiResponse::internal_error()
        }
    }
}

/// Register a new user
///
/// Creates an unverified account and mails a verification link.
/// The account cannot log in until the link is followed.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = CreateUserRequest,
    responses(
        (
            status = 201,
            description = "User created, verification link sent",
            body = MessageResponse,
            example = json!({
                "success": true,
                "status": 201,
                "message": "Email verification link sent to your email"
            })
        ),
        (
            status = 400,
            description = "Validation error",
            body = ErrorResponse,
            examples(
                ("Missing field" = (value = json!({
                    "success": false,
                    "status": 400,
                    "code": "MISSING_FIELD",
                    "message": "All fields are required",
                    "error": "firstName is required"
                }))),
                ("Invalid character" = (value = json!({
                    "success": false,
                    "status": 400,
                    "code": "INVALID_CHARACTER",
                    "message": "Invalid character in username"
                }))),
                ("Invalid email" = (value = json!({
                    "success": false,
                    "status": 400,
                    "code": "INVALID_EMAIL",
                    "message": "Invalid input for email"
                }))),
                ("Weak password" = (value = json!({
                    "success": false,
                    "status": 400,
                    "code": "WEAK_PASSWORD",
                    "message": "Password must contain at least 1 special character, 1 number, 1 lowercase letter, and 1 uppercase letter. Also it must be minimum of 8 characters and maximum of 20 characters",
                    "error": "Password is missing a digit"
                })))
            )
        ),
        (
            status = 409,
            description = "Email or username already registered",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "status": 409,
                "code": "DUPLICATE_USER",
                "message": "User already exist"
            })
        ),
        (
            status = 500,
            description = "Internal server error",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "status": 500,
                "code": "INTERNAL_ERROR",
                "message": "An unexpected error occurred"
            })
        ),
    )
)]
#[post("/api/auth/register")]
pub async fn register_user_handler(
    req: web::Json<CreateUserRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let orchestrator = &data.register_user_orchestrator;

    info!(
        username = %req.username,
        email = %req.email,
        "User registration attempt"
    );

    match orchestrator.register_user(RegistrationInput::from(&*req)).await {
        Ok(user) => {
            info!(
                user_id = %user.user_id,
                username = %user.username,
                email = %user.email,
                "User created successfully"
            );
            ApiResponse::created(REGISTRATION_MESSAGE)
        }

        Err(UserRegistrationError::CreateUserFailed(e)) => map_create_user_error(e, &req),
    }
}
