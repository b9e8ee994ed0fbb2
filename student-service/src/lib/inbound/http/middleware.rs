use std::sync::Arc;

use auth::AccessDecision;
use auth::Authenticator;
use auth::DenyReason;
use auth::Role;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;

/// Requirement a route group places on its callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    required: Option<Role>,
}

impl AccessPolicy {
    /// Any caller with a valid token.
    pub const fn authenticated() -> Self {
        Self { required: None }
    }

    /// Callers whose token carries exactly `role`.
    pub const fn require(role: Role) -> Self {
        Self {
            required: Some(role),
        }
    }

    pub fn required_role(&self) -> Option<Role> {
        self.required
    }
}

/// State of the [`authorize`] middleware for one route group.
#[derive(Clone)]
pub struct AccessGuard {
    authenticator: Arc<Authenticator>,
    policy: AccessPolicy,
}

impl AccessGuard {
    pub fn new(authenticator: Arc<Authenticator>, policy: AccessPolicy) -> Self {
        Self {
            authenticator,
            policy,
        }
    }
}

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub username: String,
    pub role: Role,
}

/// Middleware that enforces a route group's [`AccessPolicy`] before any handler runs.
///
/// A missing or non-Bearer `Authorization` header is treated like an invalid token.
pub async fn authorize(
    State(guard): State<AccessGuard>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let decision = match bearer_token(&req) {
        Some(token) => guard
            .authenticator
            .authorize(token, guard.policy.required_role()),
        None => AccessDecision::Deny(DenyReason::Unauthenticated),
    };

    match decision {
        AccessDecision::Allow { subject, role } => {
            req.extensions_mut().insert(AuthenticatedAccount {
                username: subject,
                role,
            });
            Ok(next.run(req).await)
        }
        AccessDecision::Deny(DenyReason::Unauthenticated) => {
            tracing::debug!(uri = %req.uri(), "Rejected request without a valid token");
            Err(ApiError::Unauthorized("Authentication required".to_string()))
        }
        AccessDecision::Deny(DenyReason::Forbidden) => {
            tracing::warn!(
                uri = %req.uri(),
                required = ?guard.policy.required_role(),
                "Rejected request lacking the required role"
            );
            Err(ApiError::Forbidden("Access denied".to_string()))
        }
    }
}

fn bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();

    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use auth::TokenConfig;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::middleware;
    use axum::routing::get;
    use axum::Extension;
    use axum::Router;
    use chrono::Duration;
    use tower::ServiceExt;

    use super::*;

    fn authenticator() -> Arc<Authenticator> {
        let config = TokenConfig::new(
            b"middleware-test-secret-key-32-bytes!".to_vec(),
            Duration::minutes(5),
        )
        .unwrap();
        Arc::new(Authenticator::new(&config))
    }

    async fn whoami(Extension(account): Extension<AuthenticatedAccount>) -> String {
        format!("{}:{}", account.username, account.role)
    }

    fn app(authenticator: Arc<Authenticator>, policy: AccessPolicy) -> Router {
        Router::new()
            .route("/", get(whoami))
            .route_layer(middleware::from_fn_with_state(
                AccessGuard::new(authenticator, policy),
                authorize,
            ))
    }

    async fn call(app: Router, authorization: Option<String>) -> (StatusCode, String) {
        let mut request = axum::http::Request::builder().uri("/");
        if let Some(value) = authorization {
            request = request.header(header::AUTHORIZATION, value);
        }

        let response = app
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_allows_valid_token_and_exposes_caller() {
        let authenticator = authenticator();
        let token = authenticator.issue_token("alice", Role::Student).unwrap();

        let (status, body) = call(
            app(authenticator, AccessPolicy::authenticated()),
            Some(format!("Bearer {}", token)),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "alice:STUDENT");
    }

    #[tokio::test]
    async fn test_missing_or_malformed_header_is_unauthorized() {
        let authenticator = authenticator();
        let token = authenticator.issue_token("alice", Role::Admin).unwrap();
        let policy = AccessPolicy::authenticated();

        let headers = [
            None,
            Some(token.clone()),
            Some(format!("Basic {}", token)),
            Some("Bearer ".to_string()),
        ];
        for authorization in headers {
            let (status, _) = call(app(authenticator.clone(), policy), authorization).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn test_wrong_role_is_forbidden() {
        let authenticator = authenticator();
        let token = authenticator.issue_token("alice", Role::Student).unwrap();

        let (status, _) = call(
            app(authenticator, AccessPolicy::require(Role::Admin)),
            Some(format!("Bearer {}", token)),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_token_from_other_key_is_unauthorized() {
        let other = Arc::new(Authenticator::new(
            &TokenConfig::new(b"another-secret".to_vec(), Duration::minutes(5)).unwrap(),
        ));
        let token = other.issue_token("alice", Role::Admin).unwrap();

        let (status, _) = call(
            app(authenticator(), AccessPolicy::require(Role::Admin)),
            Some(format!("Bearer {}", token)),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
