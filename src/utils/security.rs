//! Security Utilities
//!
//! Password hashing helpers built on bcrypt.

use bcrypt::{hash, verify, DEFAULT_COST};

/// Default bcrypt cost for password hashing
pub const DEFAULT_BCRYPT_COST: u32 = DEFAULT_COST;

/// Hash a password using bcrypt
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash_password_with_cost(password, DEFAULT_BCRYPT_COST)
}

/// Hash a password with custom bcrypt cost
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Verify a password against its hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low cost keeps the hashing tests fast.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_password_produces_bcrypt_hash() {
        let hash = hash_password_with_cost("secure_password123", TEST_COST).unwrap();
        assert!(hash.starts_with("$2"));
        assert_ne!(hash, "secure_password123");
    }

    #[test]
    fn test_verify_password_accepts_correct_password() {
        let hash = hash_password_with_cost("secure_password123", TEST_COST).unwrap();
        assert!(verify_password("secure_password123", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_rejects_wrong_password() {
        let hash = hash_password_with_cost("secure_password123", TEST_COST).unwrap();
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let first = hash_password_with_cost("secure_password123", TEST_COST).unwrap();
        let second = hash_password_with_cost("secure_password123", TEST_COST).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_password_rejects_garbage_hash() {
        assert!(verify_password("password", "not-a-bcrypt-hash").is_err());
    }
}
