use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::AuthRequestBody;
use crate::inbound::http::messages::SessionResponseData;
use crate::inbound::http::router::AppState;

/// Create a STUDENT account and return a session for it.
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<AuthRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let Json(body) = body?;
    let credentials = body.try_into_credentials()?;

    state
        .account_service
        .register(credentials)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}
