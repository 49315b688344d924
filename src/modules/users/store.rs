use anyhow::anyhow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::utils::errors::AuthError;
use crate::utils::password::{hash_password, verify_password};

use super::model::{NewAccount, User};

/// Persistence boundary for accounts and role assignments.
///
/// The store owns password hashing and verification, and is the source of
/// truth for email uniqueness: `create` must reject a duplicate email even
/// when two registrations race past the service-level pre-check.
#[allow(async_fn_in_trait)]
pub trait CredentialStore: Send + Sync {
    /// Case-insensitive lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError>;

    /// Creates the account, hashing the password. Fails with
    /// [`AuthError::DuplicateEmail`] on a uniqueness conflict.
    async fn create(&self, account: NewAccount, password: &str) -> Result<User, AuthError>;

    /// Checks a plaintext password against the stored hash. A missing
    /// account verifies as `false`, never as an error.
    async fn verify_password(&self, user: &User, password: &str) -> Result<bool, AuthError>;

    /// Idempotent; the role must already exist.
    async fn assign_role(&self, user_id: Uuid, role: &str) -> Result<(), AuthError>;

    /// Role names in assignment order.
    async fn get_roles(&self, user_id: Uuid) -> Result<Vec<String>, AuthError>;

    async fn role_exists(&self, role: &str) -> Result<bool, AuthError>;

    async fn create_role(&self, role: &str) -> Result<(), AuthError>;
}

/// PostgreSQL-backed credential store.
///
/// Emails are stored lowercase and protected by a unique index on
/// `lower(email)`, which closes the TOCTOU window between the service's
/// existence pre-check and the insert.
#[derive(Clone, Debug)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CredentialStore for PgCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, created_at FROM users WHERE email = lower($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, account: NewAccount, password: &str) -> Result<User, AuthError> {
        let hashed = hash_password(password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password)
             VALUES ($1, lower($2), $3)
             RETURNING id, username, email, created_at",
        )
        .bind(&account.username)
        .bind(&account.email)
        .bind(&hashed)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AuthError::DuplicateEmail;
                }
            }
            AuthError::from(e)
        })?;

        Ok(user)
    }

    async fn verify_password(&self, user: &User, password: &str) -> Result<bool, AuthError> {
        let hash: Option<(String,)> =
            sqlx::query_as("SELECT password FROM users WHERE id = $1")
                .bind(user.id)
                .fetch_optional(&self.pool)
                .await?;

        match hash {
            Some((hash,)) => verify_password(password, &hash),
            None => Ok(false),
        }
    }

    async fn assign_role(&self, user_id: Uuid, role: &str) -> Result<(), AuthError> {
        let role_id: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM roles WHERE name = $1")
            .bind(role)
            .fetch_optional(&self.pool)
            .await?;

        let (role_id,) =
            role_id.ok_or_else(|| AuthError::Internal(anyhow!("role {role} has not been seeded")))?;

        sqlx::query(
            "INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(role_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_roles(&self, user_id: Uuid) -> Result<Vec<String>, AuthError> {
        let roles: Vec<(String,)> = sqlx::query_as(
            "SELECT r.name FROM roles r
             JOIN user_roles ur ON ur.role_id = r.id
             WHERE ur.user_id = $1
             ORDER BY ur.assigned_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(roles.into_iter().map(|(name,)| name).collect())
    }

    async fn role_exists(&self, role: &str) -> Result<bool, AuthError> {
        let found: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM roles WHERE name = $1")
            .bind(role)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    async fn create_role(&self, role: &str) -> Result<(), AuthError> {
        sqlx::query("INSERT INTO roles (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(role)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryCredentialStore;

#[cfg(any(test, feature = "test-utils"))]
mod memory {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use chrono::Utc;
    use uuid::Uuid;

    use crate::utils::errors::AuthError;
    use crate::utils::password::{hash_password, verify_password};

    use super::super::model::{NewAccount, User};
    use super::CredentialStore;

    #[derive(Default)]
    struct Inner {
        users: Vec<StoredUser>,
        roles: Vec<String>,
        // user id -> role names in assignment order
        assignments: HashMap<Uuid, Vec<String>>,
    }

    struct StoredUser {
        user: User,
        password_hash: String,
    }

    /// In-memory [`CredentialStore`] with the same observable semantics as
    /// the PostgreSQL store, including case-insensitive email uniqueness.
    /// Used by tests and local tooling; no database required.
    #[derive(Clone, Default)]
    pub struct MemoryCredentialStore {
        inner: Arc<Mutex<Inner>>,
    }

    impl MemoryCredentialStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Deletes an account, simulating out-of-band removal. Not part of
        /// the store contract; refresh must fail for vanished accounts.
        pub fn remove_user(&self, id: Uuid) {
            let mut inner = self.inner.lock().unwrap();
            inner.users.retain(|stored| stored.user.id != id);
            inner.assignments.remove(&id);
        }
    }

    impl CredentialStore for MemoryCredentialStore {
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
            let inner = self.inner.lock().unwrap();
            let email = email.to_lowercase();
            Ok(inner
                .users
                .iter()
                .find(|stored| stored.user.email == email)
                .map(|stored| stored.user.clone()))
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
            let inner = self.inner.lock().unwrap();
            Ok(inner
                .users
                .iter()
                .find(|stored| stored.user.id == id)
                .map(|stored| stored.user.clone()))
        }

        async fn create(&self, account: NewAccount, password: &str) -> Result<User, AuthError> {
            let password_hash = hash_password(password)?;
            let mut inner = self.inner.lock().unwrap();

            let email = account.email.to_lowercase();
            if inner.users.iter().any(|stored| stored.user.email == email) {
                return Err(AuthError::DuplicateEmail);
            }

            let user = User {
                id: Uuid::new_v4(),
                username: account.username,
                email,
                created_at: Utc::now(),
            };
            inner.users.push(StoredUser {
                user: user.clone(),
                password_hash,
            });

            Ok(user)
        }

        async fn verify_password(&self, user: &User, password: &str) -> Result<bool, AuthError> {
            let hash = {
                let inner = self.inner.lock().unwrap();
                inner
                    .users
                    .iter()
                    .find(|stored| stored.user.id == user.id)
                    .map(|stored| stored.password_hash.clone())
            };

            match hash {
                Some(hash) => verify_password(password, &hash),
                None => Ok(false),
            }
        }

        async fn assign_role(&self, user_id: Uuid, role: &str) -> Result<(), AuthError> {
            let mut inner = self.inner.lock().unwrap();

            if !inner.roles.iter().any(|name| name == role) {
                return Err(AuthError::Internal(anyhow::anyhow!(
                    "role {role} has not been seeded"
                )));
            }

            let assigned = inner.assignments.entry(user_id).or_default();
            if !assigned.iter().any(|name| name == role) {
                assigned.push(role.to_string());
            }

            Ok(())
        }

        async fn get_roles(&self, user_id: Uuid) -> Result<Vec<String>, AuthError> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.assignments.get(&user_id).cloned().unwrap_or_default())
        }

        async fn role_exists(&self, role: &str) -> Result<bool, AuthError> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.roles.iter().any(|name| name == role))
        }

        async fn create_role(&self, role: &str) -> Result<(), AuthError> {
            let mut inner = self.inner.lock().unwrap();
            if !inner.roles.iter().any(|name| name == role) {
                inner.roles.push(role.to_string());
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn account(username: &str, email: &str) -> NewAccount {
            NewAccount {
                username: username.to_string(),
                email: email.to_string(),
            }
        }

        #[tokio::test]
        async fn email_uniqueness_is_case_insensitive() {
            let store = MemoryCredentialStore::new();
            store
                .create(account("alice", "A@x.com"), "Secret1!")
                .await
                .unwrap();

            let err = store
                .create(account("alice2", "a@X.COM"), "Secret1!")
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::DuplicateEmail));
        }

        #[tokio::test]
        async fn lookup_normalizes_email_case() {
            let store = MemoryCredentialStore::new();
            let created = store
                .create(account("bob", "Bob@Example.com"), "Secret1!")
                .await
                .unwrap();

            let found = store.find_by_email("BOB@EXAMPLE.COM").await.unwrap();
            assert_eq!(found.map(|u| u.id), Some(created.id));
        }

        #[tokio::test]
        async fn assign_role_requires_seeded_role() {
            let store = MemoryCredentialStore::new();
            let user = store
                .create(account("carol", "c@x.com"), "Secret1!")
                .await
                .unwrap();

            assert!(store.assign_role(user.id, "User").await.is_err());

            store.create_role("User").await.unwrap();
            store.assign_role(user.id, "User").await.unwrap();
            store.assign_role(user.id, "User").await.unwrap();
            assert_eq!(store.get_roles(user.id).await.unwrap(), vec!["User"]);
        }

        #[tokio::test]
        async fn roles_keep_assignment_order() {
            let store = MemoryCredentialStore::new();
            let user = store
                .create(account("dave", "d@x.com"), "Secret1!")
                .await
                .unwrap();
            store.create_role("User").await.unwrap();
            store.create_role("Admin").await.unwrap();

            store.assign_role(user.id, "User").await.unwrap();
            store.assign_role(user.id, "Admin").await.unwrap();

            assert_eq!(
                store.get_roles(user.id).await.unwrap(),
                vec!["User", "Admin"]
            );
        }
    }
}
