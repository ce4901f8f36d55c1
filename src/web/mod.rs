//! Web layer module
//!
//! HTTP surface of the back office: the page shell behind the application
//! route table, the sign-in endpoint and the admin API. Admin routes sit
//! behind [`middleware::require_admin`]; handlers stay thin and delegate to
//! [`crate::admin::AdminPanel`].

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    admin::PanelOptions,
    auth::{AuthClient, SessionContext},
    backend::RowBackend,
    config::Config,
    errors::{AppError, AppResult},
};

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod responses;

pub use responses::{handle_error, ApiResponse};

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(
        config: Config,
        backend: Arc<dyn RowBackend>,
        auth: Arc<dyn AuthClient>,
    ) -> AppResult<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port)
            .parse()
            .map_err(|e| {
                AppError::configuration(format!(
                    "invalid listen address {}:{}: {e}",
                    config.web.host, config.web.port
                ))
            })?;

        let app = Self::router(AppState {
            config,
            backend,
            auth,
        });

        Ok(Self { app, addr })
    }

    /// Build the router with all routes and middleware
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health::health_check))
            .route("/api/auth/sign-in", post(handlers::auth::sign_in))
            .nest("/api/admin", Self::admin_routes(state.clone()))
            // Everything else is a page of the application shell
            .fallback(handlers::pages::page)
            .layer(from_fn(middleware::request_logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    fn admin_routes(state: AppState) -> Router<AppState> {
        Router::new()
            .route("/dashboard", get(handlers::admin::dashboard))
            .route("/channels", post(handlers::admin::create_channel))
            .route("/channels/:id", delete(handlers::admin::delete_channel))
            .route("/playlists", post(handlers::admin::create_playlist))
            .route("/settings", put(handlers::admin::update_settings))
            .route("/logout", post(handlers::admin::logout))
            .route_layer(from_fn_with_state(state, middleware::require_admin))
    }

    /// Start the web server
    pub async fn serve(self) -> AppResult<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr)
            .await
            .map_err(|e| AppError::internal(format!("failed to bind {}: {e}", self.addr)))?;
        axum::serve(listener, self.app)
            .await
            .map_err(|e| AppError::internal(format!("server error: {e}")))?;
        Ok(())
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub backend: Arc<dyn RowBackend>,
    pub auth: Arc<dyn AuthClient>,
}

impl AppState {
    pub fn panel_options(&self) -> PanelOptions {
        PanelOptions {
            notify_on_logout_failure: self.config.admin.notify_on_logout_failure,
        }
    }

    /// A fresh session context; each request restores its own session
    pub fn session_context(&self) -> SessionContext {
        SessionContext::new(self.auth.clone())
    }
}
