//! Authentication and authorization core
//!
//! Provides the reusable pieces behind the student service's login and
//! access control:
//! - Password hashing (Argon2id)
//! - Stateless, time-bounded JWT session tokens carrying a role claim
//! - The access decision (allow / deny as unauthenticated or forbidden)
//!
//! Services own their persistence and adapt these building blocks.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("my_password", "my_password"));
//! ```
//!
//! ## Tokens and access decisions
//! ```
//! use auth::{authorize, AccessDecision, DenyReason, Role, TokenConfig, TokenService};
//! use chrono::{Duration, Utc};
//!
//! let config = TokenConfig::new(b"secret_key_at_least_32_bytes_long!".to_vec(), Duration::hours(1)).unwrap();
//! let tokens = TokenService::new(&config);
//! let now = Utc::now();
//!
//! let token = tokens.issue("alice", Role::Student, now).unwrap();
//! assert_eq!(tokens.extract_subject(&token, now).unwrap(), "alice");
//! assert_eq!(
//!     authorize(&tokens, &token, Some(Role::Admin), now),
//!     AccessDecision::Deny(DenyReason::Forbidden)
//! );
//! ```

pub mod access;
pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;
pub mod role;
pub mod token;

// Re-export commonly used items
pub use access::authorize;
pub use access::AccessDecision;
pub use access::DenyReason;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::NumericDate;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use role::Role;
pub use role::UnknownRole;
pub use token::TokenConfig;
pub use token::TokenConfigError;
pub use token::TokenService;
pub use token::VerifiedToken;
