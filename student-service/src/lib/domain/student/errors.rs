use thiserror::Error;

use crate::domain::student::models::StudentId;

/// Error type for student record validation failures
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum StudentFieldError {
    #[error("Student ID is required")]
    MissingId,

    #[error("Student ID must be positive")]
    NonPositiveId,

    #[error("Student ID must be a number")]
    InvalidId,

    #[error("Name is required")]
    BlankName,

    #[error("Branch is required")]
    BlankBranch,

    #[error("Year must be at least 1")]
    YearTooLow,

    #[error("Year must be at most 4")]
    YearTooHigh,

    #[error("Attendance percentage is required")]
    MissingAttendance,

    #[error("Attendance must be >= 0")]
    AttendanceTooLow,

    #[error("Attendance must be <= 100")]
    AttendanceTooHigh,
}

/// Top-level error type for all student-related operations
#[derive(Debug, Clone, Error)]
pub enum StudentError {
    #[error("Student not found: {0}")]
    NotFound(StudentId),

    #[error("Student already exists: {0}")]
    AlreadyExists(StudentId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for StudentError {
    fn from(err: anyhow::Error) -> Self {
        StudentError::Unknown(err.to_string())
    }
}
