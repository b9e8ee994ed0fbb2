//! Access Decision Point.
//!
//! Turns a presented token and an endpoint's role requirement into an
//! allow/deny decision. Expected failures (bad token, wrong role) are
//! outcomes, not errors.

use chrono::DateTime;
use chrono::Utc;

use crate::role::Role;
use crate::token::TokenService;

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// Token missing, malformed, badly signed, or expired.
    Unauthenticated,
    /// Token valid but its role does not satisfy the requirement.
    Forbidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow { subject: String, role: Role },
    Deny(DenyReason),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow { .. })
    }
}

/// Decide whether `token` grants access to an endpoint requiring `required`.
///
/// `None` means any authenticated caller is allowed.
pub fn authorize(
    tokens: &TokenService,
    token: &str,
    required: Option<Role>,
    now: DateTime<Utc>,
) -> AccessDecision {
    let verified = match tokens.verify(token, now) {
        Ok(verified) => verified,
        Err(_) => return AccessDecision::Deny(DenyReason::Unauthenticated),
    };

    match required {
        Some(role) if role != verified.role => AccessDecision::Deny(DenyReason::Forbidden),
        _ => AccessDecision::Allow {
            subject: verified.subject,
            role: verified.role,
        },
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::TimeZone;

    use super::*;
    use crate::token::TokenConfig;

    fn tokens() -> TokenService {
        TokenService::new(
            &TokenConfig::new(b"test_secret_key_at_least_32_bytes!".to_vec(), Duration::hours(1))
                .unwrap(),
        )
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_student_token_is_forbidden_for_admin_endpoint() {
        let tokens = tokens();
        let token = tokens.issue("alice", Role::Student, now()).unwrap();

        assert_eq!(
            authorize(&tokens, &token, Some(Role::Admin), now()),
            AccessDecision::Deny(DenyReason::Forbidden)
        );
    }

    #[test]
    fn test_student_token_is_allowed_without_requirement() {
        let tokens = tokens();
        let token = tokens.issue("alice", Role::Student, now()).unwrap();

        assert_eq!(
            authorize(&tokens, &token, None, now()),
            AccessDecision::Allow {
                subject: "alice".to_string(),
                role: Role::Student,
            }
        );
    }

    #[test]
    fn test_admin_token_is_allowed_for_admin_endpoint() {
        let tokens = tokens();
        let token = tokens.issue("root", Role::Admin, now()).unwrap();

        let decision = authorize(&tokens, &token, Some(Role::Admin), now());
        assert!(decision.is_allowed());
    }

    #[test]
    fn test_admin_token_does_not_satisfy_student_requirement() {
        let tokens = tokens();
        let token = tokens.issue("root", Role::Admin, now()).unwrap();

        assert_eq!(
            authorize(&tokens, &token, Some(Role::Student), now()),
            AccessDecision::Deny(DenyReason::Forbidden)
        );
    }

    #[test]
    fn test_expired_token_is_unauthenticated() {
        let tokens = tokens();
        let token = tokens.issue("alice", Role::Admin, now()).unwrap();
        let later = now() + Duration::hours(1);

        assert_eq!(
            authorize(&tokens, &token, None, later),
            AccessDecision::Deny(DenyReason::Unauthenticated)
        );
        assert_eq!(
            authorize(&tokens, &token, Some(Role::Admin), later),
            AccessDecision::Deny(DenyReason::Unauthenticated)
        );
    }

    #[test]
    fn test_garbage_token_is_unauthenticated() {
        assert_eq!(
            authorize(&tokens(), "not-a-token", Some(Role::Admin), now()),
            AccessDecision::Deny(DenyReason::Unauthenticated)
        );
    }
}
