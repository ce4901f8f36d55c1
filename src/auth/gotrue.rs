//! GoTrue (Supabase auth) client

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::client::AuthClient;
use super::session::{Role, Session, User};
use crate::errors::{AppError, AppResult, AuthError, AuthResult};

#[derive(Debug, Deserialize)]
struct AppMetadata {
    role: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: String,
    email: Option<String>,
    app_metadata: Option<AppMetadata>,
}

impl From<GoTrueUser> for User {
    fn from(user: GoTrueUser) -> Self {
        let role = Role::from_claim(
            user.app_metadata
                .as_ref()
                .and_then(|metadata| metadata.role.as_deref()),
        );
        Self {
            id: user.id,
            email: user.email.unwrap_or_default(),
            role,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: GoTrueUser,
}

#[derive(Debug, Deserialize)]
struct GoTrueErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

pub struct GoTrueAuthClient {
    client: Client,
    auth_url: Url,
    api_key: String,
}

impl GoTrueAuthClient {
    pub fn new(project_url: &str, api_key: &str, timeout: Duration) -> AppResult<Self> {
        let auth_url = Url::parse(project_url)
            .and_then(|base| base.join("auth/v1/"))
            .map_err(|e| AppError::configuration(format!("invalid auth url {project_url}: {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            auth_url,
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> AuthResult<Url> {
        self.auth_url
            .join(path)
            .map_err(|e| AuthError::rejected(400, e.to_string()))
    }

    async fn check(response: Response) -> AuthResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<GoTrueErrorBody>(&body)
            .ok()
            .and_then(|e| e.error_description.or(e.msg).or(e.message))
            .unwrap_or(body);

        Err(match status.as_u16() {
            400 => AuthError::InvalidCredentials,
            401 | 403 => AuthError::invalid_session(message),
            code => AuthError::rejected(code, message),
        })
    }
}

#[async_trait]
impl AuthClient for GoTrueAuthClient {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<Session> {
        let mut url = self.endpoint("token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");
        debug!(email = %email, "Requesting password grant");

        let response = self
            .client
            .post(url)
            .header("apikey", &self.api_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let token: TokenResponse = Self::check(response).await?.json().await?;

        Ok(Session {
            user: token.user.into(),
            access_token: token.access_token,
        })
    }

    async fn get_user(&self, access_token: &str) -> AuthResult<User> {
        let response = self
            .client
            .get(self.endpoint("user")?)
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {access_token}"))
            .send()
            .await?;
        let user: GoTrueUser = Self::check(response).await?.json().await?;
        Ok(user.into())
    }

    async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        let response = self
            .client
            .post(self.endpoint("logout")?)
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {access_token}"))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
