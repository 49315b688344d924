use axum::Json;
use axum::extract::State;
use tracing::instrument;
use utoipa::ToSchema;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AuthError;
use crate::validator::ValidatedJson;

use super::model::{AuthResponse, LoginRequest, MeResponse, RefreshRequest, RegisterRequest};
use super::service::AuthService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Register a new account and sign it in
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created, token issued", body = AuthResponse),
        (status = 400, description = "Validation failure or email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let response =
        AuthService::register(&state.store, &state.jwt_config, &state.auth_config, dto).await?;
    Ok(Json(response))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 400, description = "Validation failure", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let response = AuthService::login(&state.store, &state.jwt_config, dto).await?;
    Ok(Json(response))
}

/// Exchange a correctly signed token for a fresh one
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New token issued", body = AuthResponse),
        (status = 401, description = "Invalid token", body = ErrorResponse),
        (status = 400, description = "Validation failure", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RefreshRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let response = AuthService::refresh_session(&state.store, &state.jwt_config, &dto.token).await?;
    Ok(Json(response))
}

/// Identity behind the presented bearer token
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Claims of the authenticated account", body = MeResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn me(AuthUser(claims): AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        id: claims.sub,
        email: claims.email,
        username: claims.username,
        role: claims.role,
    })
}
