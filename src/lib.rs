//! Booking Service Library
//!
//! A booking management backend providing account registration, login, and
//! per-user bookings with file attachments and message threads. Designed for
//! microservices architecture with a focus on security, performance, and
//! maintainability.
//!
//! # Features
//!
//! - **Account Management**: Registration and login by email or phone
//! - **Password Security**: bcrypt hashing with configurable cost factors
//! - **Bearer Authentication**: HS256 JWT tokens guarding every booking route
//! - **Booking Lifecycle**: Create, list, and fetch bookings per user
//! - **Attachments**: Multipart uploads stored behind a swappable object store
//! - **Message Threads**: Append-only per-booking conversations
//! - **Flexible Router**: Configurable endpoints via RouterBuilder pattern
//! - **Database Integration**: PostgreSQL with connection pooling
//!
//! # Quick Start
//!
//! ## As a Service Library
//!
//! ```rust,no_run
//! use booking_service::{JwtService, RegisterRequest, UserService};
//! use sqlx::PgPool;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = PgPool::connect("postgres://localhost/bookings").await?;
//!     let jwt_service = Arc::new(JwtService::new("secret".to_string()));
//!     let user_service = UserService::new(pool, jwt_service);
//!
//!     let request = RegisterRequest {
//!         email: Some("alice@example.com".to_string()),
//!         phone: None,
//!         password: "SecurePass123".to_string(),
//!     };
//!
//!     let user = user_service.register(request).await?;
//!     println!("Registered user {}", user.id);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## As a Web Server Library
//!
//! ```rust,no_run
//! use booking_service::{
//!     api::{AppState, RouterBuilder},
//!     database::DatabaseConfig,
//!     service::{BookingService, JwtService, LocalObjectStore, UserService},
//! };
//! use std::{path::PathBuf, sync::Arc};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Setup database and services
//!     let pool = DatabaseConfig::from_env().create_pool().await?;
//!     let jwt_service = Arc::new(JwtService::new("secret".to_string()));
//!     let store = Arc::new(LocalObjectStore::new(
//!         PathBuf::from("uploads"),
//!         "/uploads".to_string(),
//!     ));
//!
//!     // Create application state
//!     let app_state = AppState {
//!         user_service: Arc::new(UserService::new(pool.clone(), jwt_service.clone())),
//!         booking_service: Arc::new(BookingService::new(pool, store)),
//!         jwt_service: jwt_service.clone(),
//!     };
//!
//!     // Build the router with bearer auth on the booking routes
//!     let app = RouterBuilder::with_all_routes()
//!         .with_auth(jwt_service)
//!         .build()
//!         .with_state(app_state);
//!
//!     // Start server
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Router Builder Examples
//!
//! Create different service configurations:
//!
//! ```rust,no_run
//! use booking_service::api::RouterBuilder;
//!
//! // Full service with every endpoint
//! let full_router = RouterBuilder::with_all_routes().build();
//!
//! // Account-only deployment
//! let auth_router = RouterBuilder::with_auth_routes().build();
//!
//! // Monitoring-only deployment
//! let minimal_router = RouterBuilder::new().health_check(true).build();
//! ```
//!
//! # Architecture
//!
//! The library is organized into several layers:
//!
//! - **API Layer**: HTTP handlers, auth middleware, and configurable routes
//! - **Service Layer**: Business logic for accounts, bookings, and storage
//! - **Models**: Data structures and type definitions
//! - **Database**: Connection management and queries
//! - **Utils**: Shared utilities for security, validation, and error handling
//!
//! # Security
//!
//! - bcrypt password hashing with configurable cost
//! - SQL injection prevention through prepared statements
//! - Ownership checks on every booking-scoped operation
//! - Sanitized object names for uploaded files
//! - Configurable endpoint exposure for attack surface reduction

/// HTTP API layer with handlers and configurable routing
pub mod api;

/// Configuration management for all service settings
pub mod config;

/// Database connection management and configuration
pub mod database;

/// Data models and request/response structures
pub mod models;

/// Business logic for accounts, bookings, and attachment storage
pub mod service;

/// Shared utilities for security, validation, and error handling
pub mod utils;

// Re-export commonly used types for convenient access
pub use api::{create_routes, AppState, RouterBuilder};
pub use models::{
    auth::{AuthToken, TokenClaims, UserContext},
    booking::{Attachment, Booking, BookingStatus, Message, MessageWithSender, SenderProfile},
    requests::{
        CreateBookingRequest, HealthCheckResponse, LoginRequest, PostMessageRequest,
        RegisterRequest,
    },
    user::User,
};
pub use service::{BookingService, JwtService, LocalObjectStore, ObjectStore, UserService};
pub use utils::error::{AppError, AppResult, ErrorResponse};

// Re-export database utilities for configuration
pub use database::{DatabaseConfig, DatabasePool};

// Re-export configuration system
pub use config::{env, AppConfig, JwtConfig, ServerConfig, StorageConfig};

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
