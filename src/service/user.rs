//! User Service Implementation
//!
//! Core business logic for account registration and login.

use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

use crate::models::{
    auth::AuthToken,
    requests::{LoginRequest, RegisterRequest},
    user::{User, UserWithPassword},
};
use crate::service::JwtService;
use crate::utils::{
    error::AppError,
    security::{hash_password_with_cost, verify_password, DEFAULT_BCRYPT_COST},
    validation::{normalize_email, normalize_phone},
};

/// Custom error types for the user service
#[derive(Error, Debug)]
pub enum UserServiceError {
    /// User with the specified identifier was not found
    #[error("User not found")]
    UserNotFound,

    /// Attempted to register an email or phone that already exists
    #[error("Email or phone already registered")]
    IdentifierAlreadyExists,

    /// Invalid login credentials provided
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Input validation failed with detailed error message
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Password hashing operation failed
    #[error("Password hashing error: {0}")]
    HashingError(#[from] bcrypt::BcryptError),

    /// Token signing failed after successful authentication
    #[error("Token generation failed: {0}")]
    TokenError(String),
}

impl From<UserServiceError> for AppError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::UserNotFound => AppError::NotFound("User not found".to_string()),
            UserServiceError::IdentifierAlreadyExists => {
                AppError::Conflict("Email or phone already registered".to_string())
            }
            UserServiceError::InvalidCredentials => {
                AppError::Authentication("Invalid credentials".to_string())
            }
            UserServiceError::ValidationError(msg) => AppError::Validation(msg),
            UserServiceError::DatabaseError(e) => AppError::Database(e),
            UserServiceError::HashingError(e) => AppError::HashingError(e),
            UserServiceError::TokenError(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type for user service operations
pub type UserServiceResult<T> = Result<T, UserServiceError>;

/// Core user service providing registration and login
#[derive(Clone)]
pub struct UserService {
    /// Database connection pool for efficient connection management
    db_pool: PgPool,

    /// bcrypt cost factor for password hashing (higher = more secure but slower)
    bcrypt_cost: u32,

    /// JWT service for issuing tokens on login
    jwt_service: Arc<JwtService>,
}

impl UserService {
    /// Creates a new UserService instance with the provided database connection pool
    pub fn new(db_pool: PgPool, jwt_service: Arc<JwtService>) -> Self {
        Self {
            db_pool,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            jwt_service,
        }
    }

    /// Creates a new UserService with a custom bcrypt cost
    pub fn with_bcrypt_cost(db_pool: PgPool, jwt_service: Arc<JwtService>, cost: u32) -> Self {
        Self {
            db_pool,
            bcrypt_cost: cost,
            jwt_service,
        }
    }

    /// Registers a new user account with at least one identifier
    pub async fn register(&self, request: RegisterRequest) -> UserServiceResult<User> {
        // Validate the request
        request.validate().map_err(|e| {
            UserServiceError::ValidationError(format!("Invalid registration data: {}", e))
        })?;

        // Normalize identifiers
        let email = request.email.as_deref().map(normalize_email);
        let phone = request.phone.as_deref().map(normalize_phone);

        // Hash the password
        let password_hash = hash_password_with_cost(&request.password, self.bcrypt_cost)?;

        // Insert user into database
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, phone, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, email, phone, created_at
            "#,
        )
        .bind(email)
        .bind(phone)
        .bind(password_hash)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) => {
                if matches!(
                    db_err.constraint(),
                    Some("users_email_key") | Some("users_phone_key")
                ) {
                    UserServiceError::IdentifierAlreadyExists
                } else {
                    UserServiceError::DatabaseError(sqlx::Error::Database(db_err))
                }
            }
            _ => UserServiceError::DatabaseError(e),
        })?;

        Ok(user)
    }

    /// Authenticates a user by either identifier and issues a bearer token
    pub async fn login(&self, request: LoginRequest) -> UserServiceResult<AuthToken> {
        // Validate the request
        request
            .validate()
            .map_err(|e| UserServiceError::ValidationError(format!("Invalid login data: {}", e)))?;

        // Normalize identifiers the same way registration does
        let email = request.email.as_deref().map(normalize_email);
        let phone = request.phone.as_deref().map(normalize_phone);

        // Look the user up by whichever identifier was supplied
        let user = sqlx::query_as::<_, UserWithPassword>(
            r#"
            SELECT id, email, phone, password_hash, created_at
            FROM users
            WHERE ($1::text IS NOT NULL AND email = $1)
               OR ($2::text IS NOT NULL AND phone = $2)
            "#,
        )
        .bind(email)
        .bind(phone)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or(UserServiceError::UserNotFound)?;

        // Verify the password against the stored hash
        let valid = verify_password(&request.password, &user.password_hash)?;
        if !valid {
            return Err(UserServiceError::InvalidCredentials);
        }

        self.jwt_service
            .issue_token(user.id)
            .map_err(|e| UserServiceError::TokenError(e.to_string()))
    }

    /// Checks that the database connection is alive
    pub async fn health_check(&self) -> UserServiceResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.db_pool)
            .await?;
        Ok(())
    }
}
