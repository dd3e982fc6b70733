use crate::api::schemas::{ErrorResponse, MessageResponse, UserEnvelope, UserResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

use crate::auth::adapter::incoming::web::routes::{CreateUserRequest, LoginRequestDto};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Account Auth API",
        version = "1.0.0",
        description = "Registration, email verification and login",
        contact(
            name = "API Support",
            email = "support@example.com"
        )
    ),
    paths(
        crate::auth::adapter::incoming::web::routes::register_user_handler,
        crate::auth::adapter::incoming::web::routes::login_user_handler,
        crate::auth::adapter::incoming::web::routes::verify_user_handler,
    ),
    components(
        schemas(
            MessageResponse,
            UserEnvelope,
            UserResponse,
            ErrorResponse,
            CreateUserRequest,
            LoginRequestDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication endpoints"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "SessionCookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "token",
                    "Session JWT set by /api/auth/login",
                ))),
            )
        }
    }
}
