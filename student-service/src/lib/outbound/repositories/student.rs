use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::student::errors::StudentError;
use crate::domain::student::models::Student;
use crate::domain::student::models::StudentDetails;
use crate::domain::student::models::StudentId;
use crate::domain::student::ports::StudentRepository;

#[derive(Debug, FromRow)]
struct StudentRow {
    id: i64,
    name: String,
    branch: String,
    student_year: i32,
    attendance_percentage: f64,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        StudentDetails {
            name: row.name,
            branch: row.branch,
            student_year: row.student_year,
            attendance_percentage: row.attendance_percentage,
        }
        .with_id(StudentId(row.id))
    }
}

pub struct PostgresStudentRepository {
    pool: PgPool,
}

impl PostgresStudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepository for PostgresStudentRepository {
    async fn find_all(&self) -> Result<Vec<Student>, StudentError> {
        let rows = sqlx::query_as::<_, StudentRow>(
            r#"
            SELECT id, name, branch, student_year, attendance_percentage
            FROM students
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StudentError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Student::from).collect())
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentError> {
        let row = sqlx::query_as::<_, StudentRow>(
            r#"
            SELECT id, name, branch, student_year, attendance_percentage
            FROM students
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StudentError::DatabaseError(e.to_string()))?;

        Ok(row.map(Student::from))
    }

    async fn create(&self, student: Student) -> Result<Student, StudentError> {
        sqlx::query(
            r#"
            INSERT INTO students (id, name, branch, student_year, attendance_percentage)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(student.id.as_i64())
        .bind(&student.details.name)
        .bind(&student.details.branch)
        .bind(student.details.student_year)
        .bind(student.details.attendance_percentage)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return StudentError::AlreadyExists(student.id);
                }
            }
            StudentError::DatabaseError(e.to_string())
        })?;

        Ok(student)
    }

    async fn update(&self, student: Student) -> Result<Student, StudentError> {
        let result = sqlx::query(
            r#"
            UPDATE students
            SET name = $2, branch = $3, student_year = $4, attendance_percentage = $5
            WHERE id = $1
            "#,
        )
        .bind(student.id.as_i64())
        .bind(&student.details.name)
        .bind(&student.details.branch)
        .bind(student.details.student_year)
        .bind(student.details.attendance_percentage)
        .execute(&self.pool)
        .await
        .map_err(|e| StudentError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StudentError::NotFound(student.id));
        }

        Ok(student)
    }

    async fn delete(&self, id: StudentId) -> Result<(), StudentError> {
        let result = sqlx::query(
            r#"
            DELETE FROM students
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| StudentError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StudentError::NotFound(id));
        }

        Ok(())
    }
}
