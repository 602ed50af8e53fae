//! Service Layer
//!
//! Business logic and data access layer for the booking service.

pub mod booking;
pub mod jwt;
pub mod storage;
pub mod user;

// Re-export services
pub use booking::BookingService;
pub use jwt::JwtService;
pub use storage::{LocalObjectStore, ObjectStore};
pub use user::UserService;
