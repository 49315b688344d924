use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::Claims;
use crate::modules::users::model::User;
use crate::utils::errors::AuthError;

/// A freshly signed token together with its expiry, so callers never have
/// to decode what they just issued.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs a token for the user's current identity and role.
///
/// Each token gets a random `jti` for uniqueness and audit trails; there is
/// no server-side revocation list, tokens simply expire.
pub fn issue_token(user: &User, role: &str, config: &JwtConfig) -> Result<IssuedToken, AuthError> {
    let now = Utc::now();
    let expires_at = now + Duration::minutes(config.token_lifetime_minutes);

    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        username: user.username.clone(),
        role: role.to_string(),
        jti: Uuid::new_v4().to_string(),
        iat: now.timestamp() as usize,
        exp: expires_at.timestamp() as usize,
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AuthError::Internal(anyhow::anyhow!("failed to sign token: {e}")))?;

    Ok(IssuedToken { token, expires_at })
}

fn base_validation(config: &JwtConfig) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);
    // Issuing and validating host are the same process; no skew allowance.
    validation.leeway = 0;
    validation
}

/// Full verification: signature, issuer, audience, and expiry. Any failure
/// collapses to [`AuthError::InvalidToken`].
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &base_validation(config),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}

/// Verification for the refresh path: signature, issuer, and audience are
/// still enforced, expiry is not. An expired-but-correctly-signed token is
/// accepted as proof of prior authentication.
pub fn decode_ignoring_expiry(token: &str, config: &JwtConfig) -> Result<Claims, AuthError> {
    let mut validation = base_validation(config);
    validation.validate_exp = false;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}
