use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Baseline role names, seeded at startup before any account can be
/// assigned a role.
pub mod roles {
    pub const ADMIN: &str = "Admin";
    pub const USER: &str = "User";
}

/// A registered account.
///
/// The password hash never leaves the credential store; this struct is safe
/// to serialize into responses.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Stored lowercase; uniqueness is case-insensitive.
    pub email: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Input for creating an account. The plaintext password travels separately
/// so it is hashed exactly once, at the store boundary.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
}
