use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::parse_student_id;
use crate::domain::student::ports::StudentServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn delete_student(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(student_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let student_id = parse_student_id(&student_id)?;

    tracing::debug!(by = %caller.username, student_id = %student_id, "Deleting student");

    state
        .student_service
        .delete_student(student_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
