use actix_web::{http::StatusCode, HttpResponse};

use crate::auth::application::services::validation::ValidationError;
use crate::shared::api::ApiResponse;

/// Input rule failures, shared by every auth route. All are 400s.
pub(super) fn validation_error_response(err: &ValidationError) -> HttpResponse {
    let message = err.to_string();
    let (code, detail) = match err {
        ValidationError::MissingField(field) => ("MISSING_FIELD", Some(format!("{field} is required"))),
        ValidationError::InvalidCharacter(_) => ("INVALID_CHARACTER", None),
        ValidationError::TooLong(_) => ("FIELD_TOO_LONG", None),
        ValidationError::InvalidEmail => ("INVALID_EMAIL", None),
        ValidationError::WeakPassword(reason) => ("WEAK_PASSWORD", Some(reason.to_string())),
    };

    ApiResponse::error_with_detail(StatusCode::BAD_REQUEST, code, &message, detail)
}
