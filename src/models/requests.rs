//! Request and Response Models
//!
//! Data structures for API request and response payloads with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::validation::{email_validator, messages, not_blank_validator, phone_validator};

/// Request payload for registering a new user account
///
/// At least one of email or phone must be provided; both are accepted.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_identifier_present"))]
pub struct RegisterRequest {
    /// User's email address (must be valid format when provided)
    #[validate(custom(function = "email_validator"))]
    pub email: Option<String>,

    /// User's phone number (must be valid format when provided)
    #[validate(custom(function = "phone_validator"))]
    pub phone: Option<String>,

    /// User's password (8-128 characters)
    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be between 8 and 128 characters"
    ))]
    pub password: String,
}

/// Request payload for logging in with either identifier
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_identifier_present"))]
pub struct LoginRequest {
    /// Email address to log in with
    #[validate(custom(function = "email_validator"))]
    pub email: Option<String>,

    /// Phone number to log in with
    #[validate(custom(function = "phone_validator"))]
    pub phone: Option<String>,

    /// Password to verify (cannot be empty)
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

/// Struct-level check that a login or registration names at least one identifier
fn validate_identifier_present<T: HasIdentifiers>(request: &T) -> Result<(), ValidationError> {
    if request.email().is_none() && request.phone().is_none() {
        let mut error = ValidationError::new("identifier_required");
        error.message = Some(messages::IDENTIFIER_REQUIRED.into());
        return Err(error);
    }
    Ok(())
}

/// Shared accessor trait so both auth payloads use one schema validator
trait HasIdentifiers {
    fn email(&self) -> Option<&str>;
    fn phone(&self) -> Option<&str>;
}

// The Validate derive hands schema functions a double reference.
impl<T: HasIdentifiers> HasIdentifiers for &T {
    fn email(&self) -> Option<&str> {
        (**self).email()
    }
    fn phone(&self) -> Option<&str> {
        (**self).phone()
    }
}

impl HasIdentifiers for RegisterRequest {
    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
    fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}

impl HasIdentifiers for LoginRequest {
    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
    fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}

/// Request payload for creating a new booking
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBookingRequest {
    /// Name of the service being booked (cannot be blank)
    #[validate(custom(function = "not_blank_validator"))]
    pub service: String,

    /// Scheduled date and time of the appointment
    pub date: DateTime<Utc>,

    /// Optional initial messages, encoded as a JSON array of strings
    ///
    /// A malformed value does not fail the request; the booking is created
    /// without the messages and a warning is logged.
    pub messages: Option<String>,
}

/// Request payload for posting a message to a booking's thread
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostMessageRequest {
    /// Message body (cannot be blank)
    #[validate(custom(function = "not_blank_validator"))]
    pub content: String,
}

/// Response for health check
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}
