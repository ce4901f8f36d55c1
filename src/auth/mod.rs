//! Authentication and session state
//!
//! The auth collaborator is reached through [`AuthClient`]. Session state is
//! an immutable [`Session`] snapshot published through a [`SessionContext`]
//! that callers receive explicitly; there is no process-wide singleton.

pub mod client;
pub mod gotrue;
pub mod guard;
pub mod memory;
pub mod session;

pub use client::AuthClient;
pub use gotrue::GoTrueAuthClient;
pub use guard::{Access, GuardDecision, RouteGuard};
pub use memory::InMemoryAuthClient;
pub use session::{Role, Session, SessionContext, User};
