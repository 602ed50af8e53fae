//! JWT Authentication Service
//!
//! Provides JWT token generation and validation for bearer authentication.

use crate::models::{AuthToken, TokenClaims, UserContext};
use crate::utils::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during JWT operations
#[derive(Error, Debug)]
pub enum JwtServiceError {
    /// Token signing failed
    #[error("Token generation failed: {0}")]
    TokenGeneration(String),

    /// Token could not be verified (bad signature, malformed, or expired)
    #[error("Invalid token: {0}")]
    TokenInvalid(String),
}

impl From<JwtServiceError> for AppError {
    fn from(error: JwtServiceError) -> Self {
        match error {
            JwtServiceError::TokenGeneration(msg) => AppError::Internal(msg),
            JwtServiceError::TokenInvalid(msg) => AppError::TokenInvalid(msg),
        }
    }
}

/// JWT authentication service for token management and validation
#[derive(Clone)]
pub struct JwtService {
    /// HS256 signing secret
    secret: String,
    /// Token expiration duration (default: 7 days)
    expires_in: Duration,
}

impl JwtService {
    /// Create a new JWT service instance with the default 7-day expiry
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            expires_in: Duration::days(7),
        }
    }

    /// Create a new JWT service with a custom token expiration time
    pub fn with_expiration(secret: String, expires_in: Duration) -> Self {
        Self { secret, expires_in }
    }

    /// Issue a signed bearer token for a user
    pub fn issue_token(&self, user_id: Uuid) -> Result<AuthToken, JwtServiceError> {
        let now = Utc::now();
        let expires_at = now + self.expires_in;

        let claims = TokenClaims::new(user_id, expires_at, now);
        let token = self.encode_token(&claims)?;

        Ok(AuthToken::new(token, self.expires_in.num_seconds()))
    }

    /// Verify a bearer token and extract the caller's identity
    pub fn verify_token(&self, token: &str) -> Result<UserContext, JwtServiceError> {
        let claims = self.decode_token(token)?;
        UserContext::from_claims(&claims)
            .ok_or_else(|| JwtServiceError::TokenInvalid("Invalid user ID in token".into()))
    }

    /// Encode a token with the given claims
    fn encode_token(&self, claims: &TokenClaims) -> Result<String, JwtServiceError> {
        let header = Header::new(Algorithm::HS256);
        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());

        encode(&header, claims, &encoding_key)
            .map_err(|e| JwtServiceError::TokenGeneration(e.to_string()))
    }

    /// Decode and validate a token
    fn decode_token(&self, token: &str) -> Result<TokenClaims, JwtServiceError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;

        let decoding_key = DecodingKey::from_secret(self.secret.as_ref());

        decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    JwtServiceError::TokenInvalid("Token expired".into())
                }
                _ => JwtServiceError::TokenInvalid(e.to_string()),
            })
    }
}
