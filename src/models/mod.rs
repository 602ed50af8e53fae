//! Data Models Module
//!
//! This module contains all data structures used throughout the booking service.
//! It includes user and booking entities, request/response types, and validation logic.

pub mod auth;
pub mod booking;
pub mod requests;
pub mod user;

// Re-export commonly used types
pub use auth::*;
pub use booking::*;
pub use requests::*;
pub use user::*;
