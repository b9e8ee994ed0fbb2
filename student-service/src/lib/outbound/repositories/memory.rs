//! In-process stores implementing the repository ports.
//!
//! Used by the integration tests and for running without PostgreSQL.

use std::collections::BTreeMap;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::Credential;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountRepository;
use crate::domain::student::errors::StudentError;
use crate::domain::student::models::Student;
use crate::domain::student::models::StudentId;
use crate::domain::student::ports::StudentRepository;

#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<Username, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an account as-is, bypassing hashing.
    ///
    /// Seeds records that predate credential hashing.
    pub async fn insert_raw(&self, account: Account) {
        self.accounts
            .write()
            .await
            .insert(account.username.clone(), account);
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.username) {
            return Err(AccountError::UsernameAlreadyExists(
                account.username.to_string(),
            ));
        }

        accounts.insert(account.username.clone(), account.clone());
        Ok(account)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.read().await.get(username).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Account>, AccountError> {
        let mut accounts: Vec<Account> = self.accounts.read().await.values().cloned().collect();
        accounts.sort_by(|a, b| a.username.as_str().cmp(b.username.as_str()));
        Ok(accounts)
    }

    async fn save(&self, mut account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;
        if let Some(existing) = accounts.get(&account.username) {
            account.id = existing.id;
            account.created_at = existing.created_at;
        }

        accounts.insert(account.username.clone(), account.clone());
        Ok(account)
    }

    async fn replace_credential(
        &self,
        username: &Username,
        expected: &Credential,
        replacement: &Credential,
    ) -> Result<bool, AccountError> {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(username) {
            Some(account) if account.credential == *expected => {
                account.credential = replacement.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct InMemoryStudentRepository {
    students: RwLock<BTreeMap<StudentId, Student>>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn find_all(&self) -> Result<Vec<Student>, StudentError> {
        Ok(self.students.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentError> {
        Ok(self.students.read().await.get(&id).cloned())
    }

    async fn create(&self, student: Student) -> Result<Student, StudentError> {
        let mut students = self.students.write().await;
        if students.contains_key(&student.id) {
            return Err(StudentError::AlreadyExists(student.id));
        }

        students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn update(&self, student: Student) -> Result<Student, StudentError> {
        let mut students = self.students.write().await;
        match students.get_mut(&student.id) {
            Some(stored) => {
                *stored = student.clone();
                Ok(student)
            }
            None => Err(StudentError::NotFound(student.id)),
        }
    }

    async fn delete(&self, id: StudentId) -> Result<(), StudentError> {
        self.students
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StudentError::NotFound(id))
    }
}
