//! Serializable message types for the HTTP layer.
//!
//! Request bodies keep every field optional so that missing fields surface as
//! field-level validation errors instead of deserialization failures.

use auth::Role;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::account::models::Account;
use crate::domain::account::models::Credentials;
use crate::domain::account::models::Session;
use crate::domain::student::models::Student;
use crate::domain::student::models::StudentDetails;
use crate::domain::student::models::StudentInput;
use crate::domain::validation::FieldErrors;

/// Body of `/auth/register` and `/auth/login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthRequestBody {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl AuthRequestBody {
    pub fn try_into_credentials(self) -> Result<Credentials, FieldErrors> {
        Credentials::parse(self.username, self.password)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResponseData {
    pub token: String,
    pub role: Role,
    pub username: String,
}

impl From<Session> for SessionResponseData {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            role: session.role,
            username: session.username.to_string(),
        }
    }
}

/// Public view of an account. Never carries the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountResponseData {
    pub username: String,
    pub role: Role,
}

impl From<&Account> for AccountResponseData {
    fn from(account: &Account) -> Self {
        Self {
            username: account.username.to_string(),
            role: account.resolved_role(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequestBody {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub branch: Option<String>,
    pub student_year: Option<i32>,
    pub attendance_percentage: Option<f64>,
}

impl StudentRequestBody {
    fn input(self) -> (Option<i64>, StudentInput) {
        (
            self.id,
            StudentInput {
                name: self.name,
                branch: self.branch,
                student_year: self.student_year,
                attendance_percentage: self.attendance_percentage,
            },
        )
    }

    /// Validate as a new record; the id is required.
    pub fn try_into_student(self) -> Result<Student, FieldErrors> {
        let (id, input) = self.input();
        Student::parse(id, input)
    }

    /// Validate as replacement fields; any id in the body is ignored.
    pub fn try_into_details(self) -> Result<StudentDetails, FieldErrors> {
        let (_, input) = self.input();
        StudentDetails::parse(input)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponseData {
    pub id: i64,
    pub name: String,
    pub branch: String,
    pub student_year: i32,
    pub attendance_percentage: f64,
}

impl From<&Student> for StudentResponseData {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id.as_i64(),
            name: student.details.name.clone(),
            branch: student.details.branch.clone(),
            student_year: student.details.student_year,
            attendance_percentage: student.details.attendance_percentage,
        }
    }
}
