//! Authentication Models
//!
//! Data structures for JWT authentication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure for access tokens
///
/// Contains standard JWT claims plus a unique token identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject - user ID
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// JWT ID - unique token identifier
    pub jti: String,
}

impl TokenClaims {
    /// Create new token claims for a user
    pub fn new(user_id: Uuid, expires_at: DateTime<Utc>, issued_at: DateTime<Utc>) -> Self {
        Self {
            sub: user_id.to_string(),
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Authenticated caller identity extracted from a verified token
///
/// Handlers receive this after the auth middleware has validated the
/// bearer token, so they never touch raw JWT claims themselves.
#[derive(Debug, Clone)]
pub struct UserContext {
    /// The authenticated user's ID
    pub user_id: Uuid,

    /// Unique identifier of the token used to authenticate
    pub token_id: String,

    /// When the token expires
    pub expires_at: DateTime<Utc>,
}

impl UserContext {
    /// Build a user context from verified token claims
    ///
    /// Fails when the subject is not a valid UUID or the expiry
    /// timestamp is out of range.
    pub fn from_claims(claims: &TokenClaims) -> Option<Self> {
        let user_id = Uuid::parse_str(&claims.sub).ok()?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0)?;
        Some(Self {
            user_id,
            token_id: claims.jti.clone(),
            expires_at,
        })
    }
}

/// Signed token returned to a user on successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    /// The signed JWT
    pub token: String,

    /// Token type (always "Bearer" for JWT)
    pub token_type: String,

    /// Token lifetime in seconds
    pub expires_in: i64,
}

impl AuthToken {
    /// Create a new bearer token envelope
    pub fn new(token: String, expires_in: i64) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}
