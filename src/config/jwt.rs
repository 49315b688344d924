use anyhow::Context;
use std::env;

/// Signing configuration for issued tokens.
///
/// Loaded once at startup. `JWT_SECRET`, `JWT_ISSUER`, and `JWT_AUDIENCE`
/// are mandatory; a missing value aborts startup rather than surfacing as a
/// per-request failure.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    /// Access token lifetime in minutes.
    pub token_lifetime_minutes: i64,
    /// How long past expiry a token is still accepted by the refresh
    /// endpoint. Refresh trusts an expired-but-signed token as proof of
    /// prior authentication, so this window bounds that trust.
    pub refresh_window_minutes: i64,
}

impl JwtConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: env::var("JWT_ISSUER").context("JWT_ISSUER must be set")?,
            audience: env::var("JWT_AUDIENCE").context("JWT_AUDIENCE must be set")?,
            token_lifetime_minutes: env::var("JWT_LIFETIME_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
            refresh_window_minutes: env::var("JWT_REFRESH_WINDOW_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10_080), // 7 days
        })
    }
}
