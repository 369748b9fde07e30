use super::*;
use crate::net::types::{User, UserStatus};

fn user(role: Role) -> User {
    User {
        id: "1".to_owned(),
        username: "ada".to_owned(),
        email: "a@b.com".to_owned(),
        role,
        status: UserStatus::Active,
    }
}

fn authenticated(role: Role) -> SessionState {
    SessionState::Authenticated { user: user(role), token: "T1".to_owned() }
}

// =============================================================================
// Public capability
// =============================================================================

#[test]
fn public_allows_anonymous() {
    assert_eq!(decide(&SessionState::Anonymous, Capability::Public), GateDecision::Allow);
}

#[test]
fn public_allows_authenticated() {
    assert_eq!(decide(&authenticated(Role::User), Capability::Public), GateDecision::Allow);
}

#[test]
fn public_allows_failed() {
    let failed = SessionState::Failed { error: "invalid email or password".to_owned() };
    assert_eq!(decide(&failed, Capability::Public), GateDecision::Allow);
}

// =============================================================================
// Authenticated capability
// =============================================================================

#[test]
fn authenticated_allows_signed_in_user() {
    assert_eq!(decide(&authenticated(Role::User), Capability::Authenticated), GateDecision::Allow);
}

#[test]
fn authenticated_redirects_anonymous_to_login() {
    assert_eq!(
        decide(&SessionState::Anonymous, Capability::Authenticated),
        GateDecision::Redirect(View::Login)
    );
}

#[test]
fn authenticated_treats_failed_like_anonymous() {
    let failed = SessionState::Failed { error: "x".to_owned() };
    assert_eq!(decide(&failed, Capability::Authenticated), GateDecision::Redirect(View::Login));
}

// =============================================================================
// Admin capability
// =============================================================================

#[test]
fn admin_allows_admin_role() {
    assert_eq!(decide(&authenticated(Role::Admin), Capability::Admin), GateDecision::Allow);
}

#[test]
fn admin_forbids_plain_user() {
    assert_eq!(decide(&authenticated(Role::User), Capability::Admin), GateDecision::Forbidden);
}

#[test]
fn admin_redirects_anonymous_to_login() {
    assert_eq!(decide(&SessionState::Anonymous, Capability::Admin), GateDecision::Redirect(View::Login));
}

// =============================================================================
// Authenticating is always pending
// =============================================================================

#[test]
fn authenticating_is_pending_for_every_capability() {
    for capability in [Capability::Public, Capability::Authenticated, Capability::Admin] {
        assert_eq!(decide(&SessionState::Authenticating, capability), GateDecision::Pending);
    }
}
