use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::modules::auth::model::Claims;
use crate::state::AppState;
use crate::utils::errors::AuthError;
use crate::utils::jwt::verify_token;

/// Extractor for protected routes: pulls the bearer token from the
/// `Authorization` header and fully validates it (signature, issuer,
/// audience, expiry) before the handler runs.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<uuid::Uuid, AuthError> {
        uuid::Uuid::parse_str(&self.0.sub).map_err(|_| AuthError::InvalidToken)
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.0.role == role
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::InvalidToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidToken)?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::users::model::roles;
    use uuid::Uuid;

    fn claims_with_role(role: &str) -> Claims {
        Claims {
            sub: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            username: "test".to_string(),
            role: role.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: 1_234_567_890,
            exp: 9_999_999_999,
            iss: "notewall".to_string(),
            aud: "notewall-app".to_string(),
        }
    }

    #[test]
    fn has_role_matches_exactly() {
        let user = AuthUser(claims_with_role(roles::ADMIN));
        assert!(user.has_role(roles::ADMIN));
        assert!(!user.has_role(roles::USER));
    }

    #[test]
    fn user_id_parses_subject() {
        let claims = claims_with_role(roles::USER);
        let expected = Uuid::parse_str(&claims.sub).unwrap();
        assert_eq!(AuthUser(claims).user_id().unwrap(), expected);
    }

    #[test]
    fn user_id_rejects_garbage_subject() {
        let mut claims = claims_with_role(roles::USER);
        claims.sub = "not-a-uuid".to_string();
        assert!(AuthUser(claims).user_id().is_err());
    }
}
