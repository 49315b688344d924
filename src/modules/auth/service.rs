use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::config::auth::AuthConfig;
use crate::config::jwt::JwtConfig;
use crate::modules::users::model::{NewAccount, User, roles};
use crate::modules::users::store::CredentialStore;
use crate::utils::errors::AuthError;
use crate::utils::jwt::{IssuedToken, decode_ignoring_expiry, issue_token};
use crate::utils::password::burn_password_check;

use super::model::{AuthResponse, LoginRequest, RegisterRequest};

pub struct AuthService;

impl AuthService {
    /// Registers a new account with the default "User" role and signs it in
    /// immediately.
    ///
    /// The email existence pre-check is best-effort; the store's uniqueness
    /// constraint is what actually decides a registration race, and it
    /// surfaces as the same [`AuthError::DuplicateEmail`].
    #[instrument(skip_all, fields(username = %dto.username))]
    pub async fn register<S: CredentialStore>(
        store: &S,
        jwt_config: &JwtConfig,
        auth_config: &AuthConfig,
        dto: RegisterRequest,
    ) -> Result<AuthResponse, AuthError> {
        if dto.password.chars().count() < auth_config.min_password_length {
            return Err(AuthError::validation(format!(
                "password must be at least {} characters",
                auth_config.min_password_length
            )));
        }
        if dto.password != dto.confirm_password {
            return Err(AuthError::validation("passwords do not match"));
        }

        if store.find_by_email(&dto.email).await?.is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        let user = store
            .create(
                NewAccount {
                    username: dto.username,
                    email: dto.email,
                },
                &dto.password,
            )
            .await?;
        store.assign_role(user.id, roles::USER).await?;

        let issued = issue_token(&user, roles::USER, jwt_config)?;
        Ok(build_response(user, issued, roles::USER.to_string()))
    }

    /// Verifies email and password and issues a token.
    ///
    /// An unknown email and a wrong password take the same path out so the
    /// caller cannot tell which factor failed. The unknown-email branch
    /// burns a bcrypt check against a phantom hash to keep both failures in
    /// the same latency class.
    #[instrument(skip_all)]
    pub async fn login<S: CredentialStore>(
        store: &S,
        jwt_config: &JwtConfig,
        dto: LoginRequest,
    ) -> Result<AuthResponse, AuthError> {
        let Some(user) = store.find_by_email(&dto.email).await? else {
            burn_password_check(&dto.password);
            return Err(AuthError::InvalidCredentials);
        };

        if !store.verify_password(&user, &dto.password).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let role = primary_role(store, &user).await?;
        let issued = issue_token(&user, &role, jwt_config)?;
        Ok(build_response(user, issued, role))
    }

    /// Exchanges a correctly signed (possibly expired) token for a fresh one.
    ///
    /// The account is re-fetched by subject id rather than rebuilt from the
    /// embedded claims, so role changes since the original issuance take
    /// effect. Tokens expired for longer than the configured refresh window,
    /// and tokens whose account has vanished, are rejected as invalid.
    #[instrument(skip_all)]
    pub async fn refresh_session<S: CredentialStore>(
        store: &S,
        jwt_config: &JwtConfig,
        token: &str,
    ) -> Result<AuthResponse, AuthError> {
        let claims = decode_ignoring_expiry(token, jwt_config)?;

        let expired_for = Utc::now().timestamp() - claims.exp as i64;
        if expired_for > jwt_config.refresh_window_minutes * 60 {
            return Err(AuthError::InvalidToken);
        }

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?;
        let user = store
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let role = primary_role(store, &user).await?;
        let issued = issue_token(&user, &role, jwt_config)?;
        Ok(build_response(user, issued, role))
    }
}

/// First assigned role wins. An account with no roles is an inconsistent
/// state that should not occur after a successful registration; it falls
/// back to "User" rather than failing the whole login.
async fn primary_role<S: CredentialStore>(store: &S, user: &User) -> Result<String, AuthError> {
    let assigned = store.get_roles(user.id).await?;
    Ok(assigned
        .into_iter()
        .next()
        .unwrap_or_else(|| roles::USER.to_string()))
}

fn build_response(user: User, issued: IssuedToken, role: String) -> AuthResponse {
    AuthResponse {
        id: user.id,
        email: user.email,
        username: user.username,
        token: issued.token,
        expire_at: issued.expires_at,
        role,
    }
}
