// src/shared/api/response.rs
use actix_web::{cookie::Cookie, http::StatusCode, HttpResponse};
use serde::Serialize;

/// Envelope returned by every endpoint.
///
/// `status` always mirrors the HTTP status line so clients can read either.
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn body(status: StatusCode, message: &str, user: Option<T>) -> Self {
        Self {
            success: true,
            status: status.as_u16(),
            message: message.to_string(),
            code: None,
            user,
            error: None,
        }
    }

    pub fn success(message: &str, user: T) -> HttpResponse {
        HttpResponse::Ok().json(Self::body(StatusCode::OK, message, Some(user)))
    }

    pub fn success_with_cookie(message: &str, user: T, cookie: Cookie<'_>) -> HttpResponse {
        HttpResponse::Ok()
            .cookie(cookie)
            .json(Self::body(StatusCode::OK, message, Some(user)))
    }
}

impl ApiResponse<()> {
    pub fn created(message: &str) -> HttpResponse {
        HttpResponse::Created().json(Self::body(StatusCode::CREATED, message, None))
    }

    pub fn error(status: StatusCode, code: &str, message: &str) -> HttpResponse {
        Self::error_with_detail(status, code, message, None)
    }

    pub fn error_with_detail(
        status: StatusCode,
        code: &str,
        message: &str,
        detail: Option<String>,
    ) -> HttpResponse {
        HttpResponse::build(status).json(ApiResponse::<()> {
            success: false,
            status: status.as_u16(),
            message: message.to_string(),
            code: Some(code.to_string()),
            user: None,
            error: detail,
        })
    }

    pub fn not_found(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::NOT_FOUND, code, message)
    }

    pub fn bad_request(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn forbidden(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::FORBIDDEN, code, message)
    }

    pub fn unauthorized(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::UNAUTHORIZED, code, message)
    }

    pub fn conflict(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::CONFLICT, code, message)
    }

    pub fn internal_error() -> HttpResponse {
        Self::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An unexpected error occurred",
        )
    }
}
