use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use crate::domain::student::ports::StudentServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::StudentRequestBody;
use crate::inbound::http::messages::StudentResponseData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn create_student(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    body: Result<Json<StudentRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<StudentResponseData>, ApiError> {
    let Json(body) = body?;
    let student = body.try_into_student()?;

    tracing::debug!(by = %caller.username, student_id = %student.id, "Creating student");

    state
        .student_service
        .create_student(student)
        .await
        .map_err(ApiError::from)
        .map(|ref student| ApiSuccess::new(StatusCode::CREATED, student.into()))
}
