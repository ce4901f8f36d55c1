//! Process-local auth client for demos and tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use super::client::AuthClient;
use super::session::{Role, Session, User};
use crate::errors::{AuthError, AuthResult};

#[derive(Default)]
pub struct InMemoryAuthClient {
    accounts: Mutex<HashMap<String, (String, User)>>,
    tokens: Mutex<HashMap<String, User>>,
    reject_sign_out: AtomicBool,
    sign_out_attempts: AtomicUsize,
}

impl InMemoryAuthClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an account and return an access token already issued for it
    pub fn register(&self, email: &str, password: &str, role: Role) -> String {
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role,
        };
        self.accounts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(email.to_string(), (password.to_string(), user.clone()));
        self.issue(user)
    }

    fn issue(&self, user: User) -> String {
        let token = Uuid::new_v4().to_string();
        self.tokens
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token.clone(), user);
        token
    }

    /// Make sign-out requests fail until reset
    pub fn fail_sign_out(&self, fail: bool) {
        self.reject_sign_out.store(fail, Ordering::SeqCst);
    }

    pub fn sign_out_attempts(&self) -> usize {
        self.sign_out_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthClient for InMemoryAuthClient {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<Session> {
        let user = {
            let accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
            match accounts.get(email) {
                Some((expected, user)) if expected == password => user.clone(),
                _ => return Err(AuthError::InvalidCredentials),
            }
        };
        let access_token = self.issue(user.clone());
        Ok(Session { user, access_token })
    }

    async fn get_user(&self, access_token: &str) -> AuthResult<User> {
        self.tokens
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(access_token)
            .cloned()
            .ok_or_else(|| AuthError::invalid_session("unknown access token"))
    }

    async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        self.sign_out_attempts.fetch_add(1, Ordering::SeqCst);
        if self.reject_sign_out.load(Ordering::SeqCst) {
            return Err(AuthError::rejected(503, "auth service unavailable"));
        }
        self.tokens
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(access_token);
        Ok(())
    }
}
