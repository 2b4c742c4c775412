//! User model for storage.

use serde::Deserialize;
use validator::Validate;

/// Registered user as stored in the `users` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Auto-assigned row ID
    pub id: i64,
    /// Unique login name
    pub username: String,
    /// Argon2id PHC string (column `password`)
    #[sqlx(rename = "password")]
    pub password_hash: String,
}

/// Credentials submitted by the login and register forms.
#[derive(Debug, Deserialize, Validate)]
pub struct Credentials {
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}
