//! Request extractors

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
    response::Response,
};
use std::sync::Arc;

use super::responses::unauthorized;
use crate::auth::{Session, SessionContext};

/// Cookie carrying the access token for browser page loads
pub const ACCESS_TOKEN_COOKIE: &str = "sv-access-token";

/// Access token from `Authorization: Bearer` or the access-token cookie
pub fn access_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|cookie| cookie.trim().split_once('='))
        .find(|(name, _)| *name == ACCESS_TOKEN_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|token| !token.is_empty())
}

/// Access token presented with the request
#[derive(Debug, Clone)]
pub struct AccessToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for AccessToken
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        access_token(&parts.headers)
            .map(AccessToken)
            .ok_or_else(|| unauthorized("Missing access token"))
    }
}

/// Session context of an operator admitted by the admin guard
#[derive(Clone)]
pub struct AdminSession {
    pub context: SessionContext,
    pub session: Arc<Session>,
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminSession>()
            .cloned()
            .ok_or_else(|| unauthorized("Admin session required"))
    }
}
