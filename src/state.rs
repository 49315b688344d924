use crate::config::auth::AuthConfig;
use crate::config::database::init_db_pool;
use crate::config::jwt::JwtConfig;
use crate::modules::users::store::PgCredentialStore;

/// Shared application state: the credential store handle plus immutable
/// configuration, built once at startup and cloned into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: PgCredentialStore,
    pub jwt_config: JwtConfig,
    pub auth_config: AuthConfig,
}

/// Loads all configuration and connects to the database. Any missing
/// required configuration fails here, before the server accepts traffic.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env()?;
    let auth_config = AuthConfig::from_env()?;
    let pool = init_db_pool().await?;

    Ok(AppState {
        store: PgCredentialStore::new(pool),
        jwt_config,
        auth_config,
    })
}
