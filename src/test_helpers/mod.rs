use actix_web::{web, HttpResponse, Result};
use rand::Rng;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::ports::outgoing::verification_token_repository::VerificationTokenRepository;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomAccountResponse {
    username: String,
    email: String,
    password: String,
    first_name: String,
    last_name: String,
}

#[derive(Serialize)]
pub struct CleanupResponse {
    deleted_users: u64,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    environment: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationTokenResponse {
    user_id: Uuid,
    token: String,
}

fn random_hex(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| format!("{:x}", rng.gen_range(0..16u8)))
        .collect()
}

/// Generate a registration payload that passes every input rule
/// GET /test/account/random
pub async fn generate_random_account() -> Result<HttpResponse> {
    let suffix = random_hex(8);

    Ok(HttpResponse::Ok().json(RandomAccountResponse {
        username: format!("user_{suffix}"),
        email: format!("user.{suffix}@example.test"),
        // 16 chars: upper, lower, digit and symbol present
        password: format!("Aa1!{}", random_hex(12)),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
    }))
}

/// Live verification token for a user, so e2e suites can follow the mailed link
/// GET /test/verification-token/{user_id}
pub async fn get_verification_token(
    user_id: web::Path<Uuid>,
    tokens: web::Data<Arc<dyn VerificationTokenRepository>>,
) -> Result<HttpResponse> {
    let user_id = user_id.into_inner();

    let token = tokens.find_token(user_id).await.map_err(|e| {
        actix_web::error::ErrorInternalServerError(format!("Token store error: {}", e))
    })?;

    match token {
        Some(token) => Ok(HttpResponse::Ok().json(VerificationTokenResponse { user_id, token })),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": "No live verification token"
        }))),
    }
}

/// Delete a test user
/// DELETE /test/cleanup/{user_id}
pub async fn cleanup_test_user(
    user_id: web::Path<Uuid>,
    db: web::Data<Arc<DatabaseConnection>>,
    tokens: web::Data<Arc<dyn VerificationTokenRepository>>,
) -> Result<HttpResponse> {
    let user_id = user_id.into_inner();

    let result = db
        .execute(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            "DELETE FROM users WHERE id = $1",
            vec![user_id.into()],
        ))
        .await
        .map_err(|e| {
            actix_web::error::ErrorInternalServerError(format!("Failed to delete user: {}", e))
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": "User not found"
        })));
    }

    if let Err(e) = tokens.delete_token(user_id).await {
        tracing::warn!(user_id = %user_id, error = %e, "Leftover verification token not deleted");
    }

    Ok(HttpResponse::Ok().json(CleanupResponse {
        deleted_users: result.rows_affected(),
    }))
}

/// Health check for test helpers
/// GET /test/health
pub async fn health_check() -> Result<HttpResponse> {
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    if env == "production" {
        tracing::error!("Test helper routes active in production!");
        return Ok(HttpResponse::InternalServerError().json(serde_json::json!({
            "status": "error",
            "reason": "test-helper-running-in-production"
        })));
    }

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        environment: env,
    }))
}

/// Configure test helper routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/test")
            .route("/health", web::get().to(health_check))
            .route("/account/random", web::get().to(generate_random_account))
            .route(
                "/verification-token/{user_id}",
                web::get().to(get_verification_token),
            )
            .route("/cleanup/{user_id}", web::delete().to(cleanup_test_user)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::ports::incoming::password_policy::PasswordPolicy;
    use crate::auth::application::services::password::StrongPasswordPolicy;
    use crate::tests::support::in_memory::InMemoryVerificationTokens;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn random_account_passes_password_policy() {
        let app = test::init_service(App::new().configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/test/account/random").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let password = body["password"].as_str().unwrap();
        assert!(StrongPasswordPolicy.validate(password).is_ok());
        assert!(body["email"].as_str().unwrap().ends_with("@example.test"));
        assert_eq!(body["firstName"], "Test");
    }

    #[actix_web::test]
    async fn verification_token_lookup() {
        let store = Arc::new(InMemoryVerificationTokens::default());
        let user_id = Uuid::new_v4();
        store.save_token(user_id, "live-token", 60).await.unwrap();
        let tokens: Arc<dyn VerificationTokenRepository> = store;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(tokens))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/test/verification-token/{user_id}"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["token"], "live-token");

        let req = test::TestRequest::get()
            .uri(&format!("/test/verification-token/{}", Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }
}
