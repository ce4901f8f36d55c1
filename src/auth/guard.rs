//! Route gating by session and role

use serde::Serialize;

use super::session::Session;

pub const SIGN_IN_PATH: &str = "/auth";
pub const HOME_PATH: &str = "/";

/// Who may render a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    Public,
    Authenticated,
    AdminOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

pub struct RouteGuard;

impl RouteGuard {
    /// Decide whether `session` may render `path`
    ///
    /// Anonymous visitors are sent to the sign-in page with the requested
    /// path attached; signed-in users lacking the admin role go home.
    pub fn check(session: Option<&Session>, access: Access, path: &str) -> GuardDecision {
        match (access, session) {
            (Access::Public, _) => GuardDecision::Allow,
            (_, None) => GuardDecision::Redirect(format!(
                "{SIGN_IN_PATH}?redirect={}",
                urlencoding::encode(path)
            )),
            (Access::AdminOnly, Some(session)) if !session.user.is_admin() => {
                GuardDecision::Redirect(HOME_PATH.to_string())
            }
            _ => GuardDecision::Allow,
        }
    }
}
