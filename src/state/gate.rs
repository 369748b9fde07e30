//! Capability gate — pure access decisions over session state.
//!
//! Decoupled from any rendering mechanism: the router (or a test)
//! feeds in a session snapshot and a required capability and acts on
//! the decision.

use crate::net::types::Role;
use crate::state::nav::View;
use crate::state::session::SessionState;

/// Access level a view declares it requires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Capability {
    /// Anyone, signed in or not.
    #[default]
    Public,
    /// Any authenticated user.
    Authenticated,
    /// Authenticated with the admin role.
    Admin,
}

/// Outcome of gating a view against the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// Mount the view.
    Allow,
    /// An auth check is in flight; show a loading state instead of a
    /// premature redirect.
    Pending,
    /// Not signed in; switch to the given view (the login prompt).
    Redirect(View),
    /// Signed in but lacking the required role.
    Forbidden,
}

/// Decide whether a session may reach a view requiring `capability`.
///
/// `Failed` is treated like `Anonymous` here; it only differs in the
/// error text it carries for the login screen.
#[must_use]
pub fn decide(session: &SessionState, capability: Capability) -> GateDecision {
    if session.is_authenticating() {
        return GateDecision::Pending;
    }
    match capability {
        Capability::Public => GateDecision::Allow,
        Capability::Authenticated => match session {
            SessionState::Authenticated { .. } => GateDecision::Allow,
            _ => GateDecision::Redirect(View::Login),
        },
        Capability::Admin => match session {
            SessionState::Authenticated { user, .. } if user.role == Role::Admin => GateDecision::Allow,
            SessionState::Authenticated { .. } => GateDecision::Forbidden,
            _ => GateDecision::Redirect(View::Login),
        },
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
