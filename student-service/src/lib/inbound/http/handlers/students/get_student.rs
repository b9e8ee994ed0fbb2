use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::parse_student_id;
use crate::domain::student::ports::StudentServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::StudentResponseData;
use crate::inbound::http::router::AppState;

pub async fn get_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<ApiSuccess<StudentResponseData>, ApiError> {
    let student_id = parse_student_id(&student_id)?;

    state
        .student_service
        .get_student(student_id)
        .await
        .map_err(ApiError::from)
        .map(|ref student| ApiSuccess::new(StatusCode::OK, student.into()))
}
