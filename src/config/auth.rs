use anyhow::Context;
use std::env;

/// Account policy and bootstrap configuration.
///
/// The admin credentials feed the startup seeder; without them the service
/// refuses to start, since an unseeded deployment would have no
/// administrator at all.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub min_password_length: usize,
    pub admin_email: String,
    pub admin_password: String,
}

impl AuthConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            min_password_length: env::var("MIN_PASSWORD_LENGTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(6),
            admin_email: env::var("ADMIN_EMAIL").context("ADMIN_EMAIL must be set")?,
            admin_password: env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?,
        })
    }
}
