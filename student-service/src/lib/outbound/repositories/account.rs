use async_trait::async_trait;
use auth::Role;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Credential;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountRepository;

const USERNAME_CONSTRAINT: &str = "accounts_username_key";

#[derive(Debug, FromRow)]
struct AccountRow {
    id: Uuid,
    username: String,
    password: String,
    role: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .map(|role| role.parse::<Role>())
            .transpose()
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(Account {
            id: AccountId(row.id),
            username: Username::from_stored(row.username),
            credential: Credential::new(row.password),
            role,
            created_at: row.created_at,
        })
    }
}

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, username, password, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(account.id.0)
        .bind(account.username.as_str())
        .bind(account.credential.as_str())
        .bind(account.role.map(|role| role.as_str()))
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some(USERNAME_CONSTRAINT)
                {
                    return AccountError::UsernameAlreadyExists(account.username.to_string());
                }
            }
            AccountError::DatabaseError(e.to_string())
        })?;

        Ok(account)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, username, password, role, created_at
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Account>, AccountError> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, username, password, role, created_at
            FROM accounts
            ORDER BY username
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Account::try_from).collect()
    }

    async fn save(&self, account: Account) -> Result<Account, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (id, username, password, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (username)
            DO UPDATE SET password = EXCLUDED.password, role = EXCLUDED.role
            RETURNING id, username, password, role, created_at
            "#,
        )
        .bind(account.id.0)
        .bind(account.username.as_str())
        .bind(account.credential.as_str())
        .bind(account.role.map(|role| role.as_str()))
        .bind(account.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Account::try_from(row)
    }

    async fn replace_credential(
        &self,
        username: &Username,
        expected: &Credential,
        replacement: &Credential,
    ) -> Result<bool, AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET password = $3
            WHERE username = $1 AND password = $2
            "#,
        )
        .bind(username.as_str())
        .bind(expected.as_str())
        .bind(replacement.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }
}
