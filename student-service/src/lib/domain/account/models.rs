use std::fmt;

use auth::Role;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::errors::PasswordPolicyError;
use crate::domain::account::errors::UsernameError;
use crate::domain::validation::FieldErrors;

/// Account aggregate entity.
///
/// One per user; the username is its identifier.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub username: Username,
    pub credential: Credential,
    pub role: Option<Role>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// New account with a fresh id.
    pub fn new(username: Username, credential: Credential, role: Role) -> Self {
        Self {
            id: AccountId::new(),
            username,
            credential,
            role: Some(role),
            created_at: Utc::now(),
        }
    }

    /// Stored role, or `STUDENT` when the record has none.
    pub fn resolved_role(&self) -> Role {
        self.role.unwrap_or_default()
    }
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures the username is not blank and is 3-50 characters long.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 50;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `Blank` - Username is empty or whitespace only
    /// * `InvalidLength` - Username is shorter than 3 or longer than 50 characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        if username.trim().is_empty() {
            return Err(UsernameError::Blank);
        }

        let length = username.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(UsernameError::InvalidLength {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(username))
    }

    /// Username of an already persisted account.
    ///
    /// The length policy applies at registration only; records that predate
    /// it are kept as they are.
    pub fn from_stored(username: String) -> Self {
        Self(username)
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password as submitted by a caller.
///
/// Never stored and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;
    const MAX_LENGTH: usize = 100;

    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.trim().is_empty() {
            return Err(PasswordPolicyError::Blank);
        }

        let length = password.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(PasswordPolicyError::InvalidLength {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Stored representation of an account secret.
///
/// Normally an Argon2 PHC string; accounts created before hashing was
/// introduced may still hold the plaintext until their next login.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(credential: String) -> Self {
        Self(credential)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Validated login or registration input.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: Username,
    pub password: Password,
}

impl Credentials {
    /// Validate raw input, reporting every offending field.
    ///
    /// Missing fields are treated as blank.
    pub fn parse(username: Option<String>, password: Option<String>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = errors.check("username", Username::new(username.unwrap_or_default()));
        let password = errors.check("password", Password::new(password.unwrap_or_default()));

        match (username, password) {
            (Some(username), Some(password)) if errors.is_empty() => {
                Ok(Self { username, password })
            }
            _ => Err(errors),
        }
    }
}

/// Outcome of a successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub username: Username,
}

/// What the admin bootstrap did at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminBootstrap {
    /// No admin password configured.
    Skipped,
    Created,
    Updated,
}
