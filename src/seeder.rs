//! Startup seeding: baseline roles and the bootstrap administrator.
//!
//! Runs once from `main` before the server binds. Every step is
//! check-then-create, so repeated startups leave the database unchanged.
//! A failure here aborts startup; a deployment without roles or an admin
//! account would be unusable.

use tracing::info;

use crate::config::auth::AuthConfig;
use crate::modules::users::model::{NewAccount, roles};
use crate::modules::users::store::CredentialStore;
use crate::utils::errors::AuthError;

const ADMIN_USERNAME: &str = "admin";

/// Creates each named role unless it already exists.
pub async fn ensure_roles<S: CredentialStore>(
    store: &S,
    names: &[&str],
) -> Result<(), AuthError> {
    for name in names {
        if !store.role_exists(name).await? {
            store.create_role(name).await?;
            info!(role = %name, "seeded role");
        }
    }
    Ok(())
}

/// Creates the administrator account if absent and ensures it carries the
/// Admin role. Roles must already be seeded.
pub async fn ensure_admin<S: CredentialStore>(
    store: &S,
    email: &str,
    password: &str,
) -> Result<(), AuthError> {
    let admin = match store.find_by_email(email).await? {
        Some(existing) => existing,
        None => {
            let created = store
                .create(
                    NewAccount {
                        username: ADMIN_USERNAME.to_string(),
                        email: email.to_string(),
                    },
                    password,
                )
                .await?;
            info!(id = %created.id, "seeded admin account");
            created
        }
    };

    // Idempotent; also repairs a partially seeded admin.
    store.assign_role(admin.id, roles::ADMIN).await?;
    Ok(())
}

/// Roles first, then the admin account that depends on them.
pub async fn run<S: CredentialStore>(store: &S, config: &AuthConfig) -> Result<(), AuthError> {
    ensure_roles(store, &[roles::ADMIN, roles::USER]).await?;
    ensure_admin(store, &config.admin_email, &config.admin_password).await?;
    Ok(())
}
