// src/api/schemas.rs
use serde::Serialize;
use utoipa::ToSchema;

/// Success envelope without a user, e.g. registration
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = true)]
    pub success: bool,
    /// Mirrors the HTTP status
    #[schema(example = 201)]
    pub status: u16,
    #[schema(example = "Email verification link sent to your email")]
    pub message: String,
}

/// Success envelope carrying the account
#[derive(Serialize, ToSchema)]
pub struct UserEnvelope {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = 200)]
    pub status: u16,
    #[schema(example = "Login successful")]
    pub message: String,
    pub user: UserResponse,
}

/// Account as exposed to clients. The password hash is never included.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: String,
    #[schema(example = "janedoe")]
    pub username: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "Jane")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = true)]
    pub is_verified: bool,
    #[schema(example = "2025-03-04T10:54:28Z")]
    pub created_at: String,
    #[schema(example = "2025-03-04T10:54:28Z")]
    pub updated_at: String,
}

/// Failure envelope
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = 400)]
    pub status: u16,
    /// Human-readable message
    #[schema(example = "All fields are required")]
    pub message: String,
    /// Error code for programmatic handling
    #[schema(example = "MISSING_FIELD")]
    pub code: String,
    /// Optional detail, e.g. which field is missing
    #[schema(example = "email is required")]
    pub error: Option<String>,
}
