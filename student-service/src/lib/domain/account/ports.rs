use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AdminBootstrap;
use crate::domain::account::models::Credential;
use crate::domain::account::models::Credentials;
use crate::domain::account::models::Session;
use crate::domain::account::models::Username;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new STUDENT account and open a session for it.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `Password` / `Token` / `DatabaseError` - Unexpected failures
    async fn register(&self, credentials: Credentials) -> Result<Session, AccountError>;

    /// Verify credentials and open a session.
    ///
    /// Accounts still holding a legacy plaintext credential are migrated to
    /// a hashed credential on their first successful login.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `Password` / `Token` / `DatabaseError` - Unexpected failures
    async fn login(&self, credentials: Credentials) -> Result<Session, AccountError>;

    /// All accounts.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError>;

    /// Account by username.
    ///
    /// # Errors
    /// * `NotFound` - No account with this username
    /// * `DatabaseError` - Database operation failed
    async fn get_account(&self, username: &Username) -> Result<Account, AccountError>;

    /// Ensure an ADMIN account exists with the given username and password.
    ///
    /// Overwrites the role and credential of an existing account with the
    /// same username. Does nothing when `password` is blank.
    ///
    /// # Errors
    /// * `Password` / `DatabaseError` - Unexpected failures
    async fn ensure_admin(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<AdminBootstrap, AccountError>;
}

/// Persistence operations for the account aggregate (the credential store).
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Insert a new account.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve account by username.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Account>, AccountError>;

    /// Retrieve all accounts.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_all(&self) -> Result<Vec<Account>, AccountError>;

    /// Insert or replace the account with the same username.
    ///
    /// The stored id and creation time are kept when the username exists.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn save(&self, account: Account) -> Result<Account, AccountError>;

    /// Replace an account's credential only if it still equals `expected`.
    ///
    /// # Returns
    /// True if the credential was replaced, false if it had changed
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn replace_credential(
        &self,
        username: &Username,
        expected: &Credential,
        replacement: &Credential,
    ) -> Result<bool, AccountError>;
}
