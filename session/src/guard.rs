//! Route guard: decide whether a protected view may render.
//!
//! The checks run in a fixed order: loading, then authentication, then role.
//! Checking authentication before startup validation finishes would bounce a
//! reloaded page to `/login`.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::routes::{self, Access};
use crate::session::Session;
use crate::types::Role;

/// Outcome of evaluating a route against the current session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still resolving; show a neutral waiting state.
    Wait,
    /// No session; go to login, remembering where the user was headed.
    RedirectToLogin { from: String },
    /// Authenticated but lacking the role; go to the user's own landing view.
    Redirect(&'static str),
    Render,
}

impl GuardDecision {
    /// Navigation target for redirect decisions.
    #[must_use]
    pub fn target(&self) -> Option<String> {
        match self {
            Self::RedirectToLogin { from } => Some(routes::login_with_return(from)),
            Self::Redirect(path) => Some((*path).to_owned()),
            Self::Wait | Self::Render => None,
        }
    }
}

/// Evaluate a route requiring one of `required` (empty means any role).
#[must_use]
pub fn evaluate(session: &Session, required: &[Role], requested: &str) -> GuardDecision {
    if session.is_loading() {
        return GuardDecision::Wait;
    }
    let Some(role) = session.role().filter(|_| session.is_authenticated()) else {
        return GuardDecision::RedirectToLogin { from: requested.to_owned() };
    };
    if !routes::role_permits(role, required) {
        return GuardDecision::Redirect(routes::landing_for(role));
    }
    GuardDecision::Render
}

/// Evaluate a location using the application route table.
///
/// Public and unknown locations always render.
#[must_use]
pub fn evaluate_location(session: &Session, location: &str) -> GuardDecision {
    match routes::access_for(location) {
        Some(Access::Protected(required)) => evaluate(session, required, location),
        Some(Access::Public) | None => GuardDecision::Render,
    }
}
