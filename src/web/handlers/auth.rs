//! Sign-in handler

use axum::{extract::State, response::Response, Json};
use serde::{Deserialize, Serialize};

use crate::auth::{Role, Session};
use crate::web::{
    responses::{handle_error, ok},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub access_token: String,
    pub email: String,
    pub role: Role,
}

impl From<&Session> for SignInResponse {
    fn from(session: &Session) -> Self {
        Self {
            access_token: session.access_token.clone(),
            email: session.user.email.clone(),
            role: session.user.role,
        }
    }
}

pub async fn sign_in(State(state): State<AppState>, Json(request): Json<SignInRequest>) -> Response {
    match state
        .session_context()
        .sign_in(&request.email, &request.password)
        .await
    {
        Ok(session) => ok(SignInResponse::from(session.as_ref())),
        Err(e) => handle_error(e.into()),
    }
}
