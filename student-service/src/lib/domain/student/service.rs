use std::sync::Arc;

use async_trait::async_trait;

use super::errors::StudentError;
use super::models;
use super::models::Student;
use super::models::StudentDetails;
use super::models::StudentId;
use super::ports::StudentRepository;
use super::ports::StudentServicePort;

/// Concrete implementation of StudentServicePort.
///
/// Generic over repository for testability.
pub struct StudentService<SR>
where
    SR: StudentRepository,
{
    student_repository: Arc<SR>,
}

impl<SR> StudentService<SR>
where
    SR: StudentRepository,
{
    pub fn new(student_repository: Arc<SR>) -> Self {
        Self { student_repository }
    }
}

#[async_trait]
impl<SR> StudentServicePort for StudentService<SR>
where
    SR: StudentRepository,
{
    async fn list_students(&self) -> Result<Vec<Student>, StudentError> {
        self.student_repository.find_all().await
    }

    async fn get_student(&self, id: StudentId) -> Result<Student, StudentError> {
        self.student_repository
            .find_by_id(id)
            .await?
            .ok_or(StudentError::NotFound(id))
    }

    async fn average_attendance(&self) -> Result<f64, StudentError> {
        let students = self.student_repository.find_all().await?;
        Ok(models::average_attendance(&students))
    }

    async fn create_student(&self, student: Student) -> Result<Student, StudentError> {
        if self.student_repository.find_by_id(student.id).await?.is_some() {
            return Err(StudentError::AlreadyExists(student.id));
        }

        let created = self.student_repository.create(student).await?;
        tracing::info!(student_id = %created.id, "Student created");

        Ok(created)
    }

    async fn update_student(
        &self,
        id: StudentId,
        details: StudentDetails,
    ) -> Result<Student, StudentError> {
        let updated = self.student_repository.update(details.with_id(id)).await?;
        tracing::info!(student_id = %id, "Student updated");

        Ok(updated)
    }

    async fn delete_student(&self, id: StudentId) -> Result<(), StudentError> {
        self.student_repository.delete(id).await?;
        tracing::info!(student_id = %id, "Student deleted");

        Ok(())
    }
}
