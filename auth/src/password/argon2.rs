use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Produces salted Argon2id digests in PHC string format.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password.
    ///
    /// A fresh random salt is generated on every call, so hashing the same
    /// password twice yields two different credentials that both verify.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored credential.
    ///
    /// Credentials that are not PHC digests (for example a legacy plaintext
    /// value) never verify.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `credential` - Stored credential
    ///
    /// # Returns
    /// True if the credential is a digest of `password`
    pub fn verify(&self, password: &str, credential: &str) -> bool {
        match PasswordHash::new(credential) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// Whether a stored credential is a PHC digest rather than a raw secret.
    pub fn is_hash(&self, credential: &str) -> bool {
        PasswordHash::new(credential).is_ok()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("secret1").expect("Failed to hash password");
        let second = hasher.hash("secret1").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("secret1", &first));
        assert!(hasher.verify("secret1", &second));
    }

    #[test]
    fn test_verify_plaintext_credential_is_false() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("secret1", "secret1"));
        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("", ""));
    }

    #[test]
    fn test_is_hash() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("secret1").expect("Failed to hash password");

        assert!(hasher.is_hash(&hash));
        assert!(!hasher.is_hash("secret1"));
        assert!(!hasher.is_hash("$not-a-phc-string"));
    }
}
