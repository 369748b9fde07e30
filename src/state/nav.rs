//! Views and the router that gates them.
//!
//! The router owns nothing but the intended view. On each resolve it
//! asks the gate for a decision against that view's declared capability
//! and tells the host what to render.

use crate::state::gate::{self, Capability, GateDecision};
use crate::state::session::SessionState;

/// The screens the shell can show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    /// Public product catalog; the landing screen.
    #[default]
    Products,
    ProductCreate,
    Login,
    Register,
    Profile,
    Users,
}

impl View {
    /// Access level this view requires.
    #[must_use]
    pub const fn capability(self) -> Capability {
        match self {
            Self::Products | Self::Login | Self::Register => Capability::Public,
            Self::ProductCreate | Self::Profile => Capability::Authenticated,
            Self::Users => Capability::Admin,
        }
    }
}

/// What the host should render after a resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// An auth check is in flight; render a loading placeholder.
    Loading,
    /// The session may not reach the intended view; render access
    /// denied.
    Denied,
    /// Mount this view.
    View(View),
}

/// Holds the intended view and applies the gate on each resolve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Router {
    intended: View,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The view the user is trying to reach.
    #[must_use]
    pub fn intended(&self) -> View {
        self.intended
    }

    /// Point the router at a view; gating happens on the next resolve.
    pub fn navigate(&mut self, to: View) {
        self.intended = to;
    }

    /// Gate the intended view against the session. A redirect rewrites
    /// the intended view so the next resolve is stable.
    pub fn resolve(&mut self, session: &SessionState) -> Resolution {
        match gate::decide(session, self.intended.capability()) {
            GateDecision::Allow => Resolution::View(self.intended),
            GateDecision::Pending => Resolution::Loading,
            GateDecision::Forbidden => Resolution::Denied,
            GateDecision::Redirect(target) => {
                self.intended = target;
                Resolution::View(target)
            }
        }
    }
}

#[cfg(test)]
#[path = "nav_test.rs"]
mod tests;
