//! User Model
//!
//! Core user data structures and type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User representation for external API responses
///
/// This struct represents a user profile without sensitive information like password hashes.
/// All datetime fields use UTC timezone for consistency across different deployments.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// User's email address (unique, normalized), if registered with one
    pub email: Option<String>,

    /// User's phone number (unique, normalized), if registered with one
    pub phone: Option<String>,

    /// Timestamp when the user account was created
    pub created_at: DateTime<Utc>,
}

/// Internal user representation including password hash
///
/// This struct is used internally for database operations that require access to the
/// password hash. It's never exposed in API responses for security reasons.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserWithPassword {
    /// Unique identifier for the user
    pub id: Uuid,

    /// User's email address, if registered with one
    pub email: Option<String>,

    /// User's phone number, if registered with one
    pub phone: Option<String>,

    /// bcrypt hashed password
    pub password_hash: String,

    /// Timestamp when the user account was created
    pub created_at: DateTime<Utc>,
}

impl From<UserWithPassword> for User {
    /// Convert internal user representation to public user struct
    ///
    /// This conversion strips the password hash for security, ensuring it's never
    /// accidentally exposed in API responses.
    fn from(user_with_password: UserWithPassword) -> Self {
        User {
            id: user_with_password.id,
            email: user_with_password.email,
            phone: user_with_password.phone,
            created_at: user_with_password.created_at,
        }
    }
}
