use crate::api::schemas::{ErrorResponse, UserEnvelope};
use crate::auth::application::ports::outgoing::token_provider::SessionToken;
use crate::auth::application::services::validation::LoginInput;
use crate::auth::application::use_cases::login_user::{LoginError, LoginOutcome};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use super::errors::validation_error_response;

pub const SESSION_COOKIE: &str = "token";

const RESENT_MESSAGE: &str = "Check your email to verify your email";
const REISSUED_MESSAGE: &str = "Email verification link sent to your email address";

#[derive(Serialize, Deserialize, ToSchema, Default)]
#[serde(default)]
pub struct LoginRequestDto {
    #[schema(example = "jane@example.com")]
    pub email: String,

    #[schema(example = "Abcdefg1!")]
    pub password: String,
}

impl From<LoginRequestDto> for LoginInput {
    fn from(dto: LoginRequestDto) -> Self {
        Self {
            email: dto.email,
            password: dto.password,
        }
    }
}

/// Session cookie: HttpOnly, Secure, SameSite=None, lives as long as the JWT.
fn session_cookie(session: SessionToken) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, session.token)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/")
        .max_age(Duration::seconds(session.max_age_seconds))
        .finish()
}

fn map_login_error(err: LoginError, email: &str) -> HttpResponse {
    match &err {
        LoginError::Validation(validation) => {
            warn!(email = %email, error = %validation, "Invalid login input");
            validation_error_response(validation)
        }

        LoginError::InvalidCredentials => {
            warn!(email = %email, "Login failed: invalid credentials");
            ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid credentials")
        }

        LoginError::Unexpected(detail) => {
            error!(email = %email, error = %detail, "Login failed unexpectedly");
            ApiResponse::internal_error()
        }
    }
}

/// Log in
///
/// Verified accounts receive the session JWT in the `token` cookie.
/// Unverified accounts are refused and the verification link is mailed again.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (
            status = 200,
            description = "Login successful, session cookie set",
            body = UserEnvelope,
            headers(
                ("Set-Cookie" = String, description = "token=<jwt>; HttpOnly; Secure; SameSite=None; Path=/; Max-Age=<session expiry>")
            ),
            example = json!({
                "success": true,
                "status": 200,
                "message": "Login successful",
                "user": {
                    "id": "123e4567-e89b-12d3-a456-426614174000",
                    "username": "janedoe",
                    "email": "jane@example.com",
                    "firstName": "Jane",
                    "lastName": "Doe",
                    "isVerified": true,
                    "createdAt": "2025-03-04T10:54:28Z",
                    "updatedAt": "2025-03-04T10:54:28Z"
                }
            })
        ),
        (
            status = 400,
            description = "Email or password missing",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "status": 400,
                "code": "MISSING_FIELD",
                "message": "All fields are required",
                "error": "password is required"
            })
        ),
        (
            status = 401,
            description = "Unknown email or wrong password",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "status": 401,
                "code": "INVALID_CREDENTIALS",
                "message": "Invalid credentials"
            })
        ),
        (
            status = 403,
            description = "Email not verified, link mailed again",
            body = ErrorResponse,
            examples(
                ("Live token resent" = (value = json!({
                    "success": false,
                    "status": 403,
                    "code": "EMAIL_NOT_VERIFIED",
                    "message": "Check your email to verify your email"
                }))),
                ("New token issued" = (value = json!({
                    "success": false,
                    "status": 403,
                    "code": "EMAIL_NOT_VERIFIED",
                    "message": "Email verification link sent to your email address"
                })))
            )
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
#[post("/api/auth/login")]
pub async fn login_user_handler(
    req: web::Json<LoginRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = req.into_inner();
    let email = request.email.clone();

    info!(email = %email, "Login attempt");

    match data.login_user_use_case.execute(request.into()).await {
        Ok(LoginOutcome::Authenticated { user, session }) => {
            info!(user_id = %user.id, "Login successful");
            ApiResponse::success_with_cookie("Login successful", user, session_cookie(session))
        }

        Ok(LoginOutcome::VerificationRequired { token_reissued }) => {
            info!(email = %email, token_reissued, "Login refused: email not verified");
            let message = if token_reissued {
                REISSUED_MESSAGE
            } else {
                RESENT_MESSAGE
            };
            ApiResponse::forbidden("EMAIL_NOT_VERIFIED", message)
        }

        Err(e) => map_login_error(e, &email),
    }
}
