use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::AccountResponseData;
use crate::inbound::http::router::AppState;

pub async fn get_account(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<AccountResponseData>, ApiError> {
    let username = Username::from_stored(username);

    state
        .account_service
        .get_account(&username)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}
