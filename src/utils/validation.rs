//! Validation Utilities
//!
//! Input validation functions for user data and API requests.

use regex::Regex;
use std::sync::OnceLock;
use validator::ValidationError;

/// Validates email address format using a comprehensive regex pattern
pub fn validate_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    regex.is_match(email)
}

/// Normalizes email address to lowercase and removes whitespace
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates phone number format: optional leading +, then 7 to 15 digits
pub fn validate_phone(phone: &str) -> bool {
    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = PHONE_REGEX
        .get_or_init(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("Failed to compile phone regex"));

    regex.is_match(phone)
}

/// Normalizes a phone number by stripping separators while keeping a leading +
pub fn normalize_phone(phone: &str) -> String {
    let trimmed = phone.trim();
    let mut normalized = String::with_capacity(trimmed.len());
    for (i, c) in trimmed.chars().enumerate() {
        if c.is_ascii_digit() || (i == 0 && c == '+') {
            normalized.push(c);
        }
    }
    normalized
}

/// Custom validator wrapper for use with the validator derive
///
/// Checks the normalized form, so padded or mixed-case input passes the
/// same way it will be stored.
pub fn email_validator(email: &str) -> Result<(), ValidationError> {
    if validate_email(&normalize_email(email)) {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_email");
        error.message = Some(messages::INVALID_EMAIL.into());
        Err(error)
    }
}

/// Custom validator wrapper for phone numbers in request structs
pub fn phone_validator(phone: &str) -> Result<(), ValidationError> {
    if validate_phone(&normalize_phone(phone)) {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_phone");
        error.message = Some(messages::INVALID_PHONE.into());
        Err(error)
    }
}

/// Validates that a required free-text field has visible content
pub fn validate_not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Custom validator for required free-text fields; whitespace-only counts as empty
pub fn not_blank_validator(value: &str) -> Result<(), ValidationError> {
    if validate_not_blank(value) {
        Ok(())
    } else {
        let mut error = ValidationError::new("blank");
        error.message = Some(messages::BLANK_FIELD.into());
        Err(error)
    }
}

/// Common validation error messages
pub mod messages {
    pub const IDENTIFIER_REQUIRED: &str = "Either email or phone must be provided";
    pub const INVALID_EMAIL: &str = "Invalid email format";
    pub const INVALID_PHONE: &str = "Invalid phone number format";
    pub const BLANK_FIELD: &str = "Cannot be blank";
}
