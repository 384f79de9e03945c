//! Password hashing utilities

use bcrypt::{hash, verify, HashParts, DEFAULT_COST};

/// Hash a password using bcrypt
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}

/// Verify a password against a hash.
///
/// bcrypt compares the recomputed digest in constant time.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

/// Check that `hash` is a well-formed bcrypt hash without verifying anything against it
pub fn is_bcrypt_hash(hash: &str) -> bool {
    hash.parse::<HashParts>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "0123074";
        let hashed = hash_password(password).unwrap();

        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("wrong_password", &hashed).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn recognises_bcrypt_format() {
        let hashed = bcrypt::hash("secret", 4).unwrap();
        assert!(is_bcrypt_hash(&hashed));
        assert!(!is_bcrypt_hash("plaintext"));
        assert!(!is_bcrypt_hash(""));
    }
}
