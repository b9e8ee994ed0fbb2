use std::fmt;
use std::str::FromStr;

use crate::domain::student::errors::StudentFieldError;
use crate::domain::validation::FieldErrors;

/// Student identifier, assigned by the caller on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StudentId(pub i64);

impl StudentId {
    /// # Errors
    /// * `NonPositiveId` - Identifier is zero or negative
    pub fn new(id: i64) -> Result<Self, StudentFieldError> {
        if id <= 0 {
            return Err(StudentFieldError::NonPositiveId);
        }
        Ok(Self(id))
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl FromStr for StudentId {
    type Err = StudentFieldError;

    /// Parse from string for HTTP path parameters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .trim()
            .parse::<i64>()
            .map_err(|_| StudentFieldError::InvalidId)?;
        Self::new(id)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Student record.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: StudentId,
    pub details: StudentDetails,
}

impl Student {
    /// Validate a full record, reporting every offending field.
    pub fn parse(id: Option<i64>, input: StudentInput) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let id = errors.check(
            "id",
            id.ok_or(StudentFieldError::MissingId)
                .and_then(StudentId::new),
        );
        let details = StudentDetails::collect(input, &mut errors);

        match (id, details) {
            (Some(id), Some(details)) if errors.is_empty() => Ok(Self { id, details }),
            _ => Err(errors),
        }
    }
}

/// Raw, unvalidated student fields as received from a caller.
#[derive(Debug, Clone, Default)]
pub struct StudentInput {
    pub name: Option<String>,
    pub branch: Option<String>,
    pub student_year: Option<i32>,
    pub attendance_percentage: Option<f64>,
}

/// Mutable fields of a student record.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentDetails {
    pub name: String,
    pub branch: String,
    pub student_year: i32,
    pub attendance_percentage: f64,
}

impl StudentDetails {
    const MIN_YEAR: i32 = 1;
    const MAX_YEAR: i32 = 4;

    /// Validate the mutable fields, reporting every offending field.
    ///
    /// A missing year is reported as below the minimum.
    pub fn parse(input: StudentInput) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        match Self::collect(input, &mut errors) {
            Some(details) if errors.is_empty() => Ok(details),
            _ => Err(errors),
        }
    }

    /// Attach an identifier.
    pub fn with_id(self, id: StudentId) -> Student {
        Student { id, details: self }
    }

    fn collect(input: StudentInput, errors: &mut FieldErrors) -> Option<Self> {
        let name = errors.check("name", not_blank(input.name, StudentFieldError::BlankName));
        let branch = errors.check(
            "branch",
            not_blank(input.branch, StudentFieldError::BlankBranch),
        );
        let student_year = errors.check(
            "studentYear",
            Self::check_year(input.student_year.unwrap_or_default()),
        );
        let attendance_percentage = errors.check(
            "attendancePercentage",
            Self::check_attendance(input.attendance_percentage),
        );

        Some(Self {
            name: name?,
            branch: branch?,
            student_year: student_year?,
            attendance_percentage: attendance_percentage?,
        })
    }

    fn check_year(year: i32) -> Result<i32, StudentFieldError> {
        if year < Self::MIN_YEAR {
            Err(StudentFieldError::YearTooLow)
        } else if year > Self::MAX_YEAR {
            Err(StudentFieldError::YearTooHigh)
        } else {
            Ok(year)
        }
    }

    fn check_attendance(attendance: Option<f64>) -> Result<f64, StudentFieldError> {
        match attendance {
            None => Err(StudentFieldError::MissingAttendance),
            Some(value) if value.is_nan() || value < 0.0 => {
                Err(StudentFieldError::AttendanceTooLow)
            }
            Some(value) if value > 100.0 => Err(StudentFieldError::AttendanceTooHigh),
            Some(value) => Ok(value),
        }
    }
}

fn not_blank(value: Option<String>, error: StudentFieldError) -> Result<String, StudentFieldError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(error),
    }
}

/// Mean attendance over `students`, or 0.0 when there are none.
pub fn average_attendance(students: &[Student]) -> f64 {
    if students.is_empty() {
        return 0.0;
    }

    let total: f64 = students
        .iter()
        .map(|student| student.details.attendance_percentage)
        .sum();
    total / students.len() as f64
}
