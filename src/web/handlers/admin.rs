//! Admin panel HTTP handlers
//!
//! Each request mounts a fresh [`AdminPanel`] against the backend scoped to
//! the operator's token, applies one action and answers with the reloaded
//! dashboard plus the toasts the action produced.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::admin::{
    AdminPanel, ChannelCard, ChannelDraft, LogoutOutcome, MutationOutcome, PlaylistCard,
    PlaylistDraft, SectionCard, SettingsForm,
};
use crate::models::SiteSettingsUpdate;
use crate::notifications::{CollectingNotifier, Notification};
use crate::web::{extractors::AdminSession, responses::ApiResponse, AppState};

#[derive(Debug, Clone, Serialize)]
pub struct SectionChoice {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub user_email: String,
    pub sections: Vec<SectionCard>,
    pub section_choices: Vec<SectionChoice>,
    pub channels: Vec<ChannelCard>,
    pub playlists: Vec<PlaylistCard>,
    pub settings: SettingsForm,
}

#[derive(Debug, Serialize)]
pub struct AdminActionResponse<D> {
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub invalid_fields: Vec<&'static str>,
    /// Form contents after the action: cleared on success, kept otherwise
    pub draft: D,
    pub dashboard: DashboardView,
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub redirect: Option<String>,
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SettingsPayload {
    pub title: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

struct RequestPanel {
    panel: AdminPanel,
    notifier: Arc<CollectingNotifier>,
    user_email: String,
}

impl RequestPanel {
    async fn open(state: &AppState, admin: &AdminSession) -> Self {
        let notifier = Arc::new(CollectingNotifier::new());
        let backend = state.backend.scoped(&admin.session.access_token);
        let mut panel = AdminPanel::new(backend, notifier.clone(), state.panel_options());
        panel.mount().await;
        Self {
            panel,
            notifier,
            user_email: admin.session.user.email.clone(),
        }
    }

    fn dashboard(&self) -> DashboardView {
        DashboardView {
            user_email: self.user_email.clone(),
            sections: self.panel.section_cards(),
            section_choices: self
                .panel
                .section_choices()
                .into_iter()
                .map(|(id, name)| SectionChoice { id, name })
                .collect(),
            channels: self.panel.channel_cards(),
            playlists: self.panel.playlist_cards(),
            settings: self.panel.settings_form().clone(),
        }
    }

    fn respond<D: Serialize>(self, outcome: MutationOutcome, draft: D, failure: &str) -> Response {
        let (status, label, invalid_fields) = match &outcome {
            MutationOutcome::Applied => (StatusCode::OK, "applied", Vec::new()),
            MutationOutcome::Invalid(e) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid", e.fields().to_vec())
            }
            MutationOutcome::Failed => (StatusCode::BAD_GATEWAY, "failed", Vec::new()),
        };

        let body = AdminActionResponse {
            outcome: label,
            invalid_fields,
            draft,
            dashboard: self.dashboard(),
            notifications: self.notifier.drain(),
        };

        let envelope = if outcome.is_applied() {
            ApiResponse::success(body)
        } else {
            ApiResponse::failure(failure.to_string(), body)
        };
        (status, Json(envelope)).into_response()
    }
}

/// Load everything the panel displays
pub async fn dashboard(State(state): State<AppState>, admin: AdminSession) -> Response {
    let request = RequestPanel::open(&state, &admin).await;
    let body = serde_json::json!({
        "dashboard": request.dashboard(),
        "notifications": request.notifier.drain(),
    });
    (StatusCode::OK, Json(ApiResponse::success(body))).into_response()
}

pub async fn create_channel(
    State(state): State<AppState>,
    admin: AdminSession,
    Json(draft): Json<ChannelDraft>,
) -> Response {
    let mut request = RequestPanel::open(&state, &admin).await;
    request.panel.set_channel_draft(draft);
    let outcome = request.panel.add_channel().await;
    let draft = request.panel.channel_draft().clone();
    request.respond(outcome, draft, "Failed to add channel")
}

pub async fn delete_channel(
    State(state): State<AppState>,
    admin: AdminSession,
    Path(channel_id): Path<String>,
) -> Response {
    let mut request = RequestPanel::open(&state, &admin).await;
    let outcome = request.panel.delete_channel(&channel_id).await;
    request.respond(outcome, serde_json::Value::Null, "Failed to delete channel")
}

pub async fn create_playlist(
    State(state): State<AppState>,
    admin: AdminSession,
    Json(draft): Json<PlaylistDraft>,
) -> Response {
    let mut request = RequestPanel::open(&state, &admin).await;
    request.panel.set_playlist_draft(draft);
    let outcome = request.panel.add_playlist().await;
    let draft = request.panel.playlist_draft().clone();
    request.respond(outcome, draft, "Failed to add playlist")
}

pub async fn update_settings(
    State(state): State<AppState>,
    admin: AdminSession,
    Json(payload): Json<SettingsPayload>,
) -> Response {
    let mut request = RequestPanel::open(&state, &admin).await;
    request.panel.settings_form_mut().apply(SiteSettingsUpdate {
        title: payload.title,
        description: payload.description,
        logo_url: payload.logo_url,
    });
    let outcome = request.panel.save_settings().await;
    let form = request.panel.settings_form().clone();
    request.respond(outcome, form, "Failed to save settings")
}

/// Sign the operator out; a rejected sign-out keeps them on the panel
pub async fn logout(State(state): State<AppState>, admin: AdminSession) -> Response {
    let notifier = Arc::new(CollectingNotifier::new());
    let panel = AdminPanel::new(
        state.backend.scoped(&admin.session.access_token),
        notifier.clone(),
        state.panel_options(),
    );

    let redirect = match panel.logout(&admin.context).await {
        LogoutOutcome::Navigate(path) => Some(path),
        LogoutOutcome::Stay => None,
    };

    let body = LogoutResponse {
        redirect,
        notifications: notifier.drain(),
    };
    (StatusCode::OK, Json(ApiResponse::success(body))).into_response()
}
