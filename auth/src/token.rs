use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use thiserror::Error;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::NumericDate;
use crate::role::Role;

/// Signing key and lifetime for session tokens.
///
/// Built once at startup and handed to [`TokenService::new`].
#[derive(Clone)]
pub struct TokenConfig {
    signing_key: Vec<u8>,
    ttl: Duration,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenConfigError {
    #[error("Token signing key must not be empty")]
    EmptySigningKey,

    #[error("Token lifetime must be at least one second, got {0} seconds")]
    NonPositiveTtl(i64),
}

impl TokenConfig {
    /// Validate and build a token configuration.
    ///
    /// # Errors
    /// * `EmptySigningKey` - `signing_key` has no bytes
    /// * `NonPositiveTtl` - `ttl` is shorter than one second
    pub fn new(signing_key: impl Into<Vec<u8>>, ttl: Duration) -> Result<Self, TokenConfigError> {
        let signing_key = signing_key.into();
        if signing_key.is_empty() {
            return Err(TokenConfigError::EmptySigningKey);
        }
        if ttl.num_seconds() < 1 {
            return Err(TokenConfigError::NonPositiveTtl(ttl.num_seconds()));
        }

        Ok(Self { signing_key, ttl })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("signing_key", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Identity recovered from a valid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub subject: String,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl TryFrom<Claims> for VerifiedToken {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let instant = |date: NumericDate| {
            date.to_datetime()
                .ok_or_else(|| JwtError::InvalidToken("Timestamp out of range".to_string()))
        };

        Ok(Self {
            issued_at: instant(claims.iat)?,
            expires_at: instant(claims.exp)?,
            subject: claims.sub,
            role: claims.role,
        })
    }
}

/// Issues and verifies stateless, time-bounded session tokens.
///
/// Validity is a pure function of the token, the signing key and the
/// supplied time; no store is consulted.
pub struct TokenService {
    jwt_handler: JwtHandler,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            jwt_handler: JwtHandler::new(&config.signing_key),
            ttl: config.ttl,
        }
    }

    /// Issue a token for `subject` with `role`, valid from `now` for the configured lifetime.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, subject: &str, role: Role, now: DateTime<Utc>) -> Result<String, JwtError> {
        let claims = Claims::for_account(subject, role, now, self.ttl);
        self.jwt_handler.encode(&claims)
    }

    /// Verify a token at time `now`.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature mismatch or malformed payload
    /// * `TokenExpired` - `now` is at or past the token's expiry
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<VerifiedToken, JwtError> {
        let claims: Claims = self.jwt_handler.decode(token)?;

        if claims.is_expired(now) {
            return Err(JwtError::TokenExpired);
        }

        claims.try_into()
    }

    /// Subject of a token valid at `now`.
    pub fn extract_subject(&self, token: &str, now: DateTime<Utc>) -> Result<String, JwtError> {
        self.verify(token, now).map(|verified| verified.subject)
    }
}
