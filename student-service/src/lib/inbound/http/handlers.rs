pub mod accounts;
pub mod session;
pub mod students;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::account::errors::AccountError;
use crate::domain::student::errors::StudentError;
use crate::domain::validation::FieldErrors;

/// Successful response with a flat JSON body.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    ValidationFailed(FieldErrors),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    InternalServerError(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        Self::ValidationFailed(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, ApiErrorData::new(message))
            }
            ApiError::ValidationFailed(errors) => (
                StatusCode::BAD_REQUEST,
                ApiErrorData {
                    message: "Validation failed".to_string(),
                    errors: Some(errors),
                },
            ),
            ApiError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, ApiErrorData::new(message))
            }
            ApiError::Forbidden(message) => (StatusCode::FORBIDDEN, ApiErrorData::new(message)),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, ApiErrorData::new(message)),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, ApiErrorData::new(message)),
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorData::new("Something went wrong".to_string()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::UsernameAlreadyExists(_) => {
                ApiError::Conflict("Username already exists".to_string())
            }
            AccountError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid username or password".to_string())
            }
            AccountError::NotFound(username) => {
                ApiError::NotFound(format!("User not found: {}", username))
            }
            AccountError::InvalidUsername(_)
            | AccountError::Password(_)
            | AccountError::Token(_)
            | AccountError::DatabaseError(_)
            | AccountError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<StudentError> for ApiError {
    fn from(err: StudentError) -> Self {
        match err {
            StudentError::NotFound(_) => ApiError::NotFound("Student not found".to_string()),
            StudentError::AlreadyExists(id) => {
                ApiError::Conflict(format!("Student already exists: {}", id))
            }
            StudentError::DatabaseError(msg) | StudentError::Unknown(msg) => {
                ApiError::InternalServerError(msg)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ApiErrorData {
    pub fn new(message: String) -> Self {
        Self {
            message,
            errors: None,
        }
    }
}
