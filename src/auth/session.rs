//! Session snapshot and the context that publishes it

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

use super::client::AuthClient;
use crate::errors::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Map a role claim to a role; anything but `admin` is a regular user
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim {
            Some(role) if role.eq_ignore_ascii_case("admin") => Role::Admin,
            _ => Role::User,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub access_token: String,
}

type SessionSlot = Option<Arc<Session>>;

/// Current session plus change notification
///
/// Cloning a context shares the same slot; every clone observes sign-in and
/// sign-out performed through any other.
#[derive(Clone)]
pub struct SessionContext {
    auth: Arc<dyn AuthClient>,
    slot: Arc<watch::Sender<SessionSlot>>,
}

impl SessionContext {
    pub fn new(auth: Arc<dyn AuthClient>) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            auth,
            slot: Arc::new(slot),
        }
    }

    /// Snapshot of the current session
    pub fn current(&self) -> Option<Arc<Session>> {
        self.slot.borrow().clone()
    }

    /// Receiver notified whenever the session changes
    pub fn subscribe(&self) -> watch::Receiver<SessionSlot> {
        self.slot.subscribe()
    }

    fn publish(&self, session: SessionSlot) {
        self.slot.send_replace(session);
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Arc<Session>> {
        let session = Arc::new(self.auth.sign_in_with_password(email, password).await?);
        info!(email = %session.user.email, role = ?session.user.role, "Signed in");
        self.publish(Some(session.clone()));
        Ok(session)
    }

    /// Rebuild the session for an access token issued earlier
    pub async fn restore(&self, access_token: &str) -> AuthResult<Arc<Session>> {
        let user = self.auth.get_user(access_token).await?;
        let session = Arc::new(Session {
            user,
            access_token: access_token.to_string(),
        });
        self.publish(Some(session.clone()));
        Ok(session)
    }

    /// Revoke the current session; the snapshot is cleared only on success
    pub async fn sign_out(&self) -> AuthResult<()> {
        let session = self.current().ok_or(AuthError::NotSignedIn)?;
        match self.auth.sign_out(&session.access_token).await {
            Ok(()) => {
                info!(email = %session.user.email, "Signed out");
                self.publish(None);
                Ok(())
            }
            Err(e) => {
                warn!(email = %session.user.email, error = %e, "Sign-out rejected");
                Err(e)
            }
        }
    }
}
