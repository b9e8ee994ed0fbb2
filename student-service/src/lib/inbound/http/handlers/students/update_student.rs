use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::parse_student_id;
use crate::domain::student::ports::StudentServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::StudentRequestBody;
use crate::inbound::http::messages::StudentResponseData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// Replace every mutable field of an existing student. The path id wins over any id in the body.
pub async fn update_student(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(student_id): Path<String>,
    body: Result<Json<StudentRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<StudentResponseData>, ApiError> {
    let student_id = parse_student_id(&student_id)?;
    let Json(body) = body?;
    let details = body.try_into_details()?;

    tracing::debug!(by = %caller.username, student_id = %student_id, "Updating student");

    state
        .student_service
        .update_student(student_id, details)
        .await
        .map_err(ApiError::from)
        .map(|ref student| ApiSuccess::new(StatusCode::OK, student.into()))
}
