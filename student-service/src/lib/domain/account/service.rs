use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Role;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AdminBootstrap;
use crate::domain::account::models::Credential;
use crate::domain::account::models::Credentials;
use crate::domain::account::models::Session;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;

/// Domain service for account registration, login and bootstrap.
///
/// This is where credentials are verified: it consults the credential store
/// and the password hasher, then asks the token service for a session token.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn open_session(&self, username: &Username, role: Role) -> Result<Session, AccountError> {
        let token = self.authenticator.issue_token(username.as_str(), role)?;

        Ok(Session {
            token,
            role,
            username: username.clone(),
        })
    }

    fn hash(&self, password: &str) -> Result<Credential, AccountError> {
        Ok(Credential::new(self.authenticator.hash_password(password)?))
    }

    /// Accept a login against a credential stored before hashing was introduced,
    /// replacing it with a hash in the same request.
    ///
    /// Delete once no plaintext credentials remain in the store.
    async fn migrate_legacy_credential(
        &self,
        account: &Account,
        password: &str,
    ) -> Result<bool, AccountError> {
        let stored = account.credential.as_str();
        if self.authenticator.is_hashed(stored) || stored != password {
            return Ok(false);
        }

        let hashed = self.hash(password)?;
        let replaced = self
            .repository
            .replace_credential(&account.username, &account.credential, &hashed)
            .await?;

        if replaced {
            tracing::info!(
                username = %account.username,
                "Migrated legacy plaintext credential"
            );
            return Ok(true);
        }

        // A concurrent request changed the credential first; judge against what it stored.
        tracing::debug!(
            username = %account.username,
            "Legacy credential changed concurrently"
        );
        let current = self.repository.find_by_username(&account.username).await?;
        Ok(current.is_some_and(|account| {
            self.authenticator
                .verify_password(password, account.credential.as_str())
        }))
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, credentials: Credentials) -> Result<Session, AccountError> {
        let Credentials { username, password } = credentials;

        if self.repository.find_by_username(&username).await?.is_some() {
            return Err(AccountError::UsernameAlreadyExists(username.to_string()));
        }

        let account = Account::new(username, self.hash(password.as_str())?, Role::Student);
        let created = self.repository.create(account).await?;

        tracing::info!(username = %created.username, "Account registered");

        self.open_session(&created.username, created.resolved_role())
    }

    async fn login(&self, credentials: Credentials) -> Result<Session, AccountError> {
        let Credentials { username, password } = credentials;

        let account = self
            .repository
            .find_by_username(&username)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let authenticated = self
            .authenticator
            .verify_password(password.as_str(), account.credential.as_str())
            || self
                .migrate_legacy_credential(&account, password.as_str())
                .await?;

        if !authenticated {
            tracing::debug!(username = %account.username, "Login rejected");
            return Err(AccountError::InvalidCredentials);
        }

        self.open_session(&account.username, account.resolved_role())
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError> {
        self.repository.find_all().await
    }

    async fn get_account(&self, username: &Username) -> Result<Account, AccountError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or(AccountError::NotFound(username.to_string()))
    }

    async fn ensure_admin(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<AdminBootstrap, AccountError> {
        if password.trim().is_empty() {
            return Ok(AdminBootstrap::Skipped);
        }

        let credential = self.hash(password)?;
        let (account, outcome) = match self.repository.find_by_username(username).await? {
            Some(mut existing) => {
                existing.credential = credential;
                existing.role = Some(Role::Admin);
                (existing, AdminBootstrap::Updated)
            }
            None => (
                Account::new(username.clone(), credential, Role::Admin),
                AdminBootstrap::Created,
            ),
        };

        self.repository.save(account).await?;

        Ok(outcome)
    }
}
