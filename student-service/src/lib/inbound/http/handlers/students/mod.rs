pub mod average_attendance;
pub mod create_student;
pub mod delete_student;
pub mod get_student;
pub mod list_students;
pub mod update_student;

pub use average_attendance::average_attendance;
pub use create_student::create_student;
pub use delete_student::delete_student;
pub use get_student::get_student;
pub use list_students::list_students;
pub use update_student::update_student;

use crate::domain::student::models::StudentId;
use crate::inbound::http::handlers::ApiError;

fn parse_student_id(raw: &str) -> Result<StudentId, ApiError> {
    raw.parse::<StudentId>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}
