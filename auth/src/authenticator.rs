use std::sync::Arc;

use crate::access;
use crate::access::AccessDecision;
use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::JwtError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::role::Role;
use crate::token::TokenConfig;
use crate::token::TokenService;
use crate::token::VerifiedToken;

/// Authentication coordinator combining password hashing, token handling
/// and access decisions.
///
/// Reads the current time from its [`Clock`] and forwards it to the
/// time-dependent operations, so services never deal with clocks directly.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
    clock: Arc<dyn Clock>,
}

impl Authenticator {
    /// Create an authenticator reading the system clock.
    pub fn new(config: &TokenConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &TokenConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_service: TokenService::new(config),
            clock,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored credential.
    pub fn verify_password(&self, password: &str, credential: &str) -> bool {
        self.password_hasher.verify(password, credential)
    }

    /// Whether a stored credential is already a hash.
    pub fn is_hashed(&self, credential: &str) -> bool {
        self.password_hasher.is_hash(credential)
    }

    /// Issue a session token for an authenticated account.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, subject: &str, role: Role) -> Result<String, JwtError> {
        self.token_service.issue(subject, role, self.clock.now())
    }

    /// Validate a session token at the current time.
    ///
    /// # Errors
    /// * `JwtError` - Token invalid or expired
    pub fn validate_token(&self, token: &str) -> Result<VerifiedToken, JwtError> {
        self.token_service.verify(token, self.clock.now())
    }

    /// Access decision for `token` against an endpoint requirement.
    pub fn authorize(&self, token: &str, required: Option<Role>) -> AccessDecision {
        access::authorize(&self.token_service, token, required, self.clock.now())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;
    use crate::access::DenyReason;
    use crate::clock::FixedClock;

    fn config() -> TokenConfig {
        TokenConfig::new(b"test_secret_key_at_least_32_bytes!".to_vec(), Duration::hours(1))
            .unwrap()
    }

    #[test]
    fn test_issue_and_validate_token() {
        let authenticator = Authenticator::new(&config());

        let token = authenticator
            .issue_token("user123", Role::Student)
            .expect("Failed to generate token");

        let verified = authenticator
            .validate_token(&token)
            .expect("Token validation failed");
        assert_eq!(verified.subject, "user123");
        assert_eq!(verified.role, Role::Student);
    }

    #[test]
    fn test_password_round_trip() {
        let authenticator = Authenticator::new(&config());

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        assert!(authenticator.is_hashed(&hash));
        assert!(authenticator.verify_password("my_password", &hash));
        assert!(!authenticator.verify_password("wrong_password", &hash));
    }

    #[test]
    fn test_clock_drives_expiry() {
        let issued = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let issuer = Authenticator::with_clock(&config(), Arc::new(FixedClock(issued)));
        let token = issuer.issue_token("user123", Role::Admin).unwrap();

        let before_expiry = Authenticator::with_clock(
            &config(),
            Arc::new(FixedClock(issued + Duration::minutes(59))),
        );
        assert!(before_expiry.authorize(&token, Some(Role::Admin)).is_allowed());

        let at_expiry =
            Authenticator::with_clock(&config(), Arc::new(FixedClock(issued + Duration::hours(1))));
        assert_eq!(
            at_expiry.authorize(&token, None),
            AccessDecision::Deny(DenyReason::Unauthenticated)
        );
        assert_eq!(at_expiry.validate_token(&token), Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = Authenticator::new(&config());

        let result = authenticator.validate_token("invalid.token.here");
        assert!(result.is_err());
    }
}
