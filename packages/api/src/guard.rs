//! Page access decisions.
//!
//! A guarded page declares a [`GuardConfig`]; [`decide`] turns it and the
//! current [`Session`] into a [`GuardDecision`]. Until startup restoration has
//! finished the answer is always [`GuardDecision::Pending`], because "not yet
//! checked" must not be mistaken for "not signed in".

use crate::models::Role;
use crate::session::Session;

/// Requirements a page places on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardConfig {
    pub require_auth: bool,
    pub required_role: Option<Role>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            required_role: None,
        }
    }
}

impl GuardConfig {
    /// Any signed-in user.
    pub fn authenticated() -> Self {
        Self::default()
    }

    /// Signed-in users with `role` only.
    pub fn role(role: Role) -> Self {
        Self {
            require_auth: true,
            required_role: Some(role),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Startup restoration has not finished; show a placeholder.
    Pending,
    Render,
    RedirectToLogin,
    RedirectToHome,
}

pub fn decide(config: &GuardConfig, session: &Session) -> GuardDecision {
    if !session.has_initialized {
        return GuardDecision::Pending;
    }
    if config.require_auth && !session.is_authenticated() {
        return GuardDecision::RedirectToLogin;
    }
    if let Some(required) = config.required_role {
        if session.role() != Some(required) {
            return GuardDecision::RedirectToHome;
        }
    }
    GuardDecision::Render
}
