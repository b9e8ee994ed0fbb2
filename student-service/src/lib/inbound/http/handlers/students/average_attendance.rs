use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::student::ports::StudentServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Mean attendance as a bare JSON number.
pub async fn average_attendance(
    State(state): State<AppState>,
) -> Result<ApiSuccess<f64>, ApiError> {
    state
        .student_service
        .average_attendance()
        .await
        .map_err(ApiError::from)
        .map(|average| ApiSuccess::new(StatusCode::OK, average))
}
