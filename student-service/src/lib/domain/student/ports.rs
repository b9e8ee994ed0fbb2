use async_trait::async_trait;

use crate::domain::student::errors::StudentError;
use crate::domain::student::models::Student;
use crate::domain::student::models::StudentDetails;
use crate::domain::student::models::StudentId;

/// Port for student domain service operations.
#[async_trait]
pub trait StudentServicePort: Send + Sync + 'static {
    /// All student records.
    async fn list_students(&self) -> Result<Vec<Student>, StudentError>;

    /// # Errors
    /// * `NotFound` - No student with this id
    async fn get_student(&self, id: StudentId) -> Result<Student, StudentError>;

    /// Mean attendance percentage over all students; 0.0 when there are none.
    async fn average_attendance(&self) -> Result<f64, StudentError>;

    /// # Errors
    /// * `AlreadyExists` - A student with this id exists
    async fn create_student(&self, student: Student) -> Result<Student, StudentError>;

    /// Replace the mutable fields of an existing student.
    ///
    /// # Errors
    /// * `NotFound` - No student with this id
    async fn update_student(
        &self,
        id: StudentId,
        details: StudentDetails,
    ) -> Result<Student, StudentError>;

    /// # Errors
    /// * `NotFound` - No student with this id
    async fn delete_student(&self, id: StudentId) -> Result<(), StudentError>;
}

/// Persistence operations for student records.
#[async_trait]
pub trait StudentRepository: Send + Sync + 'static {
    async fn find_all(&self) -> Result<Vec<Student>, StudentError>;

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentError>;

    /// Insert a new student.
    ///
    /// # Errors
    /// * `AlreadyExists` - A student with this id exists
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, student: Student) -> Result<Student, StudentError>;

    /// Overwrite an existing student.
    ///
    /// # Errors
    /// * `NotFound` - No student with this id
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, student: Student) -> Result<Student, StudentError>;

    /// # Errors
    /// * `NotFound` - No student with this id
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: StudentId) -> Result<(), StudentError>;
}
