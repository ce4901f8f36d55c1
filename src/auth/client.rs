use async_trait::async_trait;

use super::session::{Session, User};
use crate::errors::AuthResult;

/// Operations the application needs from the auth service
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Exchange credentials for a session
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<Session>;

    /// Resolve the user owning `access_token`
    async fn get_user(&self, access_token: &str) -> AuthResult<User>;

    /// Revoke `access_token`
    async fn sign_out(&self, access_token: &str) -> AuthResult<()>;
}
