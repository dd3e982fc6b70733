use crate::api::schemas::{ErrorResponse, UserEnvelope};
use crate::auth::application::use_cases::verify_user::{VerifyUserError, VerifyUserInput};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::IntoParams;

use super::errors::validation_error_response;

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VerifyUserQuery {
    /// Account id from the verification link
    #[serde(rename = "userId")]
    #[param(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub user_id: Option<String>,

    /// Token from the verification link
    pub token: Option<String>,
}

fn map_verify_error(err: VerifyUserError, user_id: &str) -> HttpResponse {
    match &err {
        VerifyUserError::Validation(validation) => {
            warn!(user_id = %user_id, error = %validation, "Invalid verification input");
            validation_error_response(validation)
        }

        VerifyUserError::TokenNotFound => {
            warn!(user_id = %user_id, "Verification token not found");
            ApiResponse::not_found("TOKEN_NOT_FOUND", "Token does not exist")
        }

        VerifyUserError::UpdateFailed => {
            warn!(user_id = %user_id, "Verified user could not be updated");
            ApiResponse::bad_request("UPDATE_FAILED", "Unable to verify user")
        }

        VerifyUserError::Unexpected(detail) => {
            error!(user_id = %user_id, error = %detail, "Verification failed unexpectedly");
            ApiResponse::internal_error()
        }
    }
}

/// Verify an email address
///
/// Consumes the `(userId, token)` pair from the verification link and marks
/// the account verified.
#[utoipa::path(
    post,
    path = "/api/auth/user-verification",
    tag = "auth",
    params(VerifyUserQuery),
    responses(
        (
            status = 200,
            description = "Account verified",
            body = UserEnvelope,
            example = json!({
                "success": true,
                "status": 200,
                "message": "User updated successfully",
                "user": {
                    "id": "123e4567-e89b-12d3-a456-426614174000",
                    "username": "janedoe",
                    "email": "jane@example.com",
                    "firstName": "Jane",
                    "lastName": "Doe",
                    "isVerified": true,
                    "createdAt": "2025-03-04T10:54:28Z",
                    "updatedAt": "2025-03-04T11:02:10Z"
                }
            })
        ),
        (
            status = 400,
            description = "Missing parameter or account could not be updated",
            body = ErrorResponse,
            examples(
                ("Missing parameter" = (value = json!({
                    "success": false,
                    "status": 400,
                    "code": "MISSING_FIELD",
                    "message": "All fields are required",
                    "error": "token is required"
                }))),
                ("Update failed" = (value = json!({
                    "success": false,
                    "status": 400,
                    "code": "UPDATE_FAILED",
                    "message": "Unable to verify user"
                })))
            )
        ),
        (
            status = 404,
            description = "No live token for this user",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "status": 404,
                "code": "TOKEN_NOT_FOUND",
                "message": "Token does not exist"
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
#[post("/api/auth/user-verification")]
pub async fn verify_user_handler(
    query: web::Query<VerifyUserQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let VerifyUserQuery { user_id, token } = query.into_inner();
    let log_id = user_id.clone().unwrap_or_default();

    info!(user_id = %log_id, "Email verification attempt");

    match data
        .verify_user_use_case
        .execute(VerifyUserInput { user_id, token })
        .await
    {
        Ok(user) => {
            info!(user_id = %user.id, "Email verified");
            ApiResponse::success("User updated successfully", user)
        }
        Err(e) => map_verify_error(e, &log_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::PublicUser;
    use crate::auth::application::services::validation::ValidationError;
    use crate::auth::application::use_cases::verify_user::IVerifyUserUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    /// Echoes the parsed query back as a verified user.
    #[derive(Default, Clone)]
    struct MockVerifyUserSuccess {
        seen: Arc<Mutex<Option<VerifyUserInput>>>,
    }

    #[async_trait]
    impl IVerifyUserUseCase for MockVerifyUserSuccess {
        async fn execute(&self, input: VerifyUserInput) -> Result<PublicUser, VerifyUserError> {
            *self.seen.lock().unwrap() = Some(input);
            let now = Utc::now();
            Ok(PublicUser {
                id: Uuid::new_v4(),
                username: "janedoe".to_string(),
                email: "jane@example.com".to_string(),
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                is_verified: true,
                created_at: now,
                updated_at: now,
            })
        }
    }

    struct MockVerifyUserFailure(VerifyUserError);

    #[async_trait]
    impl IVerifyUserUseCase for MockVerifyUserFailure {
        async fn execute(&self, _: VerifyUserInput) -> Result<PublicUser, VerifyUserError> {
            Err(self.0.clone())
        }
    }

    async fn call(
        uc: impl IVerifyUserUseCase + Send + Sync + 'static,
        uri: &str,
    ) -> (u16, serde_json::Value) {
        let app_state = TestAppStateBuilder::default().with_verify_user(uc).build();

        let app =
            test::init_service(App::new().app_data(app_state).service(verify_user_handler)).await;

        let req = test::TestRequest::post().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_verify_user_success() {
        let uc = MockVerifyUserSuccess::default();
        let seen = uc.seen.clone();
        let user_id = Uuid::new_v4();

        let (status, body) = call(
            uc,
            &format!("/api/auth/user-verification?userId={user_id}&token=abc123"),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "User updated successfully");
        assert_eq!(body["user"]["isVerified"], true);

        let input = seen.lock().unwrap().clone().unwrap();
        assert_eq!(input.user_id, Some(user_id.to_string()));
        assert_eq!(input.token.as_deref(), Some("abc123"));
    }

    #[actix_web::test]
    async fn test_verify_user_absent_params_reach_use_case_as_none() {
        let uc = MockVerifyUserSuccess::default();
        let seen = uc.seen.clone();

        let (status, _) = call(uc, "/api/auth/user-verification").await;

        assert_eq!(status, 200);
        let input = seen.lock().unwrap().clone().unwrap();
        assert!(input.user_id.is_none());
        assert!(input.token.is_none());
    }

    #[actix_web::test]
    async fn test_verify_user_missing_field() {
        let (status, body) = call(
            MockVerifyUserFailure(VerifyUserError::Validation(ValidationError::MissingField(
                "token",
            ))),
            "/api/auth/user-verification?userId=abc",
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(body["code"], "MISSING_FIELD");
        assert_eq!(body["error"], "token is required");
    }

    #[actix_web::test]
    async fn test_verify_user_token_not_found() {
        let (status, body) = call(
            MockVerifyUserFailure(VerifyUserError::TokenNotFound),
            "/api/auth/user-verification?userId=abc&token=def",
        )
        .await;

        assert_eq!(status, 404);
        assert_eq!(body["status"], 404);
        assert_eq!(body["code"], "TOKEN_NOT_FOUND");
        assert_eq!(body["message"], "Token does not exist");
    }

    #[actix_web::test]
    async fn test_verify_user_update_failed() {
        let (status, body) = call(
            MockVerifyUserFailure(VerifyUserError::UpdateFailed),
            "/api/auth/user-verification?userId=abc&token=def",
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(body["code"], "UPDATE_FAILED");
        assert_eq!(body["message"], "Unable to verify user");
    }

    #[actix_web::test]
    async fn test_verify_user_unexpected_error() {
        let (status, body) = call(
            MockVerifyUserFailure(VerifyUserError::Unexpected("timeout".to_string())),
            "/api/auth/user-verification?userId=abc&token=def",
        )
        .await;

        assert_eq!(status, 500);
        assert_eq!(body["code"], "INTERNAL_ERROR");
    }
}
