//! HTTP middleware

use axum::{
    extract::{Request, State},
    http::{Method, Uri},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};

use super::extractors::{AccessToken, AdminSession};
use super::responses::{handle_error, unauthorized};
use super::AppState;
use crate::auth::{Access, GuardDecision, RouteGuard};
use crate::errors::AppError;

/// Email of the admin a response was produced for
///
/// Set on responses by [`require_admin`] so the request log can name the
/// operator behind each admin call.
#[derive(Debug, Clone)]
pub struct Operator(pub String);

/// Request logging middleware
///
/// One event when the request arrives and one when it completes, carrying
/// status, duration and the admin operator if one was admitted.
pub async fn request_logging_middleware(
    method: Method,
    uri: Uri,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string();
    info!(method = %method, path = %uri.path(), request_id = %request_id, "Request received");

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis();
    let operator = response
        .extensions()
        .get::<Operator>()
        .map(|operator| operator.0.as_str())
        .unwrap_or("-");

    if status.is_client_error() || status.is_server_error() {
        warn!(
            method = %method,
            path = %uri.path(),
            status = status.as_u16(),
            operator = %operator,
            request_id = %request_id,
            elapsed_ms,
            "Request failed"
        );
    } else {
        info!(
            method = %method,
            path = %uri.path(),
            status = status.as_u16(),
            operator = %operator,
            request_id = %request_id,
            elapsed_ms,
            "Request served"
        );
    }

    response
}

/// Admit only signed-in admins
///
/// Resolves the presented access token through the auth service and attaches
/// an [`AdminSession`] for downstream handlers. A missing token is refused by
/// the [`AccessToken`] extractor before this runs.
pub async fn require_admin(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    mut request: Request,
    next: Next,
) -> Response {
    let context = state.session_context();
    let session = match context.restore(&token).await {
        Ok(session) => session,
        Err(e) => {
            warn!(error = %e, "Rejected admin request with invalid session");
            return unauthorized("Session expired or invalid");
        }
    };

    match RouteGuard::check(Some(&session), Access::AdminOnly, request.uri().path()) {
        GuardDecision::Allow => {
            let operator = Operator(session.user.email.clone());
            request
                .extensions_mut()
                .insert(AdminSession { context, session });
            let mut response = next.run(request).await;
            response.extensions_mut().insert(operator);
            response
        }
        GuardDecision::Redirect(_) => {
            warn!(email = %session.user.email, "Non-admin attempted to reach the admin API");
            handle_error(AppError::permission_denied("access", "admin panel"))
        }
    }
}
