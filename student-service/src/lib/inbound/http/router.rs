use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::Role;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::accounts::get_account;
use super::handlers::accounts::list_accounts;
use super::handlers::session::login;
use super::handlers::session::register;
use super::handlers::students::average_attendance;
use super::handlers::students::create_student;
use super::handlers::students::delete_student;
use super::handlers::students::get_student;
use super::handlers::students::list_students;
use super::handlers::students::update_student;
use super::middleware::authorize;
use super::middleware::AccessGuard;
use super::middleware::AccessPolicy;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::student::ports::StudentServicePort;

/// Application state shared by all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub student_service: Arc<dyn StudentServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    student_service: Arc<dyn StudentServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        account_service,
        student_service,
        authenticator,
    };

    let reader_guard = AccessGuard::new(
        state.authenticator.clone(),
        AccessPolicy::authenticated(),
    );
    let admin_guard = AccessGuard::new(
        state.authenticator.clone(),
        AccessPolicy::require(Role::Admin),
    );

    let public_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login));

    let reader_routes = Router::new()
        .route("/api/students", get(list_students))
        .route("/api/students/average-attendance", get(average_attendance))
        .route("/api/students/:student_id", get(get_student))
        .route_layer(middleware::from_fn_with_state(reader_guard, authorize));

    let admin_routes = Router::new()
        .route("/api/students", post(create_student))
        .route("/api/students/:student_id", put(update_student))
        .route("/api/students/:student_id", delete(delete_student))
        .route("/api/users", get(list_accounts))
        .route("/api/users/:username", get(get_account))
        .route_layer(middleware::from_fn_with_state(admin_guard, authorize));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(reader_routes)
        .merge(admin_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
