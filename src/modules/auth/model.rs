use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Claims embedded in every issued token.
///
/// A fixed record rather than an open claim bag, so validation stays
/// exhaustive. None of these fields are trusted until the signature,
/// issuer, audience, and (outside refresh) expiry have all been checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id.
    pub sub: String,
    pub email: String,
    pub username: String,
    pub role: String,
    /// Random per-token id, for uniqueness and auditability.
    pub jti: String,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    // Minimum length comes from runtime config, checked in the service.
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "token is required"))]
    pub token: String,
}

/// Response for register, login, and refresh: the account's public identity
/// plus a bearer token and its expiry. Never persisted.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub id: uuid::Uuid,
    pub email: String,
    pub username: String,
    pub token: String,
    pub expire_at: chrono::DateTime<chrono::Utc>,
    pub role: String,
}

/// Claims summary returned by the protected `/me` endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub role: String,
}
