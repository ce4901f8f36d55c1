//! Admin panel controller

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::channels::{ChannelCard, ChannelDraft};
use super::loader::{load_admin_data, AdminData};
use super::playlists::{PlaylistCard, PlaylistDraft};
use super::sections::{section_cards, SectionCard};
use super::settings::SettingsForm;
use crate::auth::{guard::HOME_PATH, SessionContext};
use crate::backend::{AdminRepository, RowBackend};
use crate::errors::ValidationError;
use crate::notifications::{Notification, Notifier};

#[derive(Debug, Clone, Default)]
pub struct PanelOptions {
    /// Show a toast when sign-out is rejected. Off by default: a rejected
    /// sign-out is otherwise only logged.
    pub notify_on_logout_failure: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelPhase {
    Loading,
    Ready,
}

/// Result of a create, delete or save action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The backend accepted the change
    Applied,
    /// Blocked before any backend call
    Invalid(ValidationError),
    /// The backend rejected the change or could not be reached
    Failed,
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutOutcome {
    Navigate(String),
    Stay,
}

pub struct AdminPanel {
    repository: AdminRepository,
    notifier: Arc<dyn Notifier>,
    options: PanelOptions,
    phase: PanelPhase,
    mounted: bool,
    load_count: u64,
    data: AdminData,
    channel_draft: ChannelDraft,
    playlist_draft: PlaylistDraft,
    settings_form: SettingsForm,
}

impl AdminPanel {
    pub fn new(backend: Arc<dyn RowBackend>, notifier: Arc<dyn Notifier>, options: PanelOptions) -> Self {
        Self {
            repository: AdminRepository::new(backend),
            notifier,
            options,
            phase: PanelPhase::Loading,
            mounted: false,
            load_count: 0,
            data: AdminData::default(),
            channel_draft: ChannelDraft::default(),
            playlist_draft: PlaylistDraft::default(),
            settings_form: SettingsForm::default(),
        }
    }

    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    pub fn data(&self) -> &AdminData {
        &self.data
    }

    /// Number of completed load cycles, the initial mount included
    pub fn load_count(&self) -> u64 {
        self.load_count
    }

    /// Initial load; later calls do nothing
    pub async fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.reload().await;
    }

    /// Refetch everything and replace the snapshot
    pub async fn reload(&mut self) {
        self.phase = PanelPhase::Loading;
        let report = load_admin_data(&self.repository).await;

        if !report.is_complete() {
            self.notifier
                .notify(Notification::error("Error", "Failed to load admin data"));
        }

        let settings_loaded = report.settings.is_some();
        report.apply_to(&mut self.data);
        if settings_loaded {
            if let Some(settings) = &self.data.settings {
                self.settings_form = SettingsForm::from_settings(settings);
            }
        }

        self.load_count += 1;
        self.phase = PanelPhase::Ready;
    }

    pub fn section_cards(&self) -> Vec<SectionCard> {
        section_cards(&self.data.sections, &self.data.channels)
    }

    /// `(id, name)` pairs offered by the channel form's section picker
    pub fn section_choices(&self) -> Vec<(String, String)> {
        self.data
            .sections
            .iter()
            .map(|section| (section.id.clone(), section.name.clone()))
            .collect()
    }

    pub fn channel_cards(&self) -> Vec<ChannelCard> {
        self.data.channels.iter().map(ChannelCard::from).collect()
    }

    pub fn playlist_cards(&self) -> Vec<PlaylistCard> {
        self.data.playlists.iter().map(PlaylistCard::from).collect()
    }

    pub fn channel_draft(&self) -> &ChannelDraft {
        &self.channel_draft
    }

    pub fn set_channel_draft(&mut self, draft: ChannelDraft) {
        self.channel_draft = draft;
    }

    pub fn playlist_draft(&self) -> &PlaylistDraft {
        &self.playlist_draft
    }

    pub fn playlist_draft_mut(&mut self) -> &mut PlaylistDraft {
        &mut self.playlist_draft
    }

    pub fn set_playlist_draft(&mut self, draft: PlaylistDraft) {
        self.playlist_draft = draft;
    }

    pub fn settings_form(&self) -> &SettingsForm {
        &self.settings_form
    }

    pub fn settings_form_mut(&mut self) -> &mut SettingsForm {
        &mut self.settings_form
    }

    /// Insert the channel draft
    ///
    /// On success the draft is cleared and the snapshot reloaded once. On
    /// failure the draft is left as typed and nothing is reloaded.
    pub async fn add_channel(&mut self) -> MutationOutcome {
        let request = match self.channel_draft.validate() {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, "Channel draft rejected");
                self.notifier.notify(Notification::error(
                    "Missing fields",
                    "Please fill in all required fields",
                ));
                return MutationOutcome::Invalid(e);
            }
        };

        match self.repository.create_channel(&request).await {
            Ok(_) => {
                info!(name = %request.name, section_id = %request.section_id, "Channel added");
                self.notifier.notify(Notification::success(
                    "Channel added",
                    format!("{} has been added successfully", request.name),
                ));
                self.channel_draft = ChannelDraft::default();
                self.reload().await;
                MutationOutcome::Applied
            }
            Err(e) => {
                warn!(name = %request.name, error = %e, "Failed to add channel");
                self.notifier
                    .notify(Notification::error("Error", "Failed to add channel"));
                MutationOutcome::Failed
            }
        }
    }

    /// Delete one channel by id; there is no confirmation step
    pub async fn delete_channel(&mut self, channel_id: &str) -> MutationOutcome {
        match self.repository.delete_channel(channel_id).await {
            Ok(()) => {
                info!(channel_id = %channel_id, "Channel deleted");
                self.notifier.notify(Notification::success(
                    "Channel deleted",
                    "Channel has been removed successfully",
                ));
                self.reload().await;
                MutationOutcome::Applied
            }
            Err(e) => {
                warn!(channel_id = %channel_id, error = %e, "Failed to delete channel");
                self.notifier
                    .notify(Notification::error("Error", "Failed to delete channel"));
                MutationOutcome::Failed
            }
        }
    }

    /// Insert the playlist draft; the URL is stored without being fetched
    pub async fn add_playlist(&mut self) -> MutationOutcome {
        let request = match self.playlist_draft.validate() {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, "Playlist draft rejected");
                self.notifier.notify(Notification::error(
                    "Missing fields",
                    "Please provide playlist name and URL",
                ));
                return MutationOutcome::Invalid(e);
            }
        };

        match self.repository.create_playlist(&request).await {
            Ok(_) => {
                info!(name = %request.name, "Playlist added");
                self.notifier.notify(Notification::success(
                    "Playlist added",
                    format!("{} has been added successfully", request.name),
                ));
                self.playlist_draft = PlaylistDraft::default();
                self.reload().await;
                MutationOutcome::Applied
            }
            Err(e) => {
                warn!(name = %request.name, error = %e, "Failed to add playlist");
                self.notifier
                    .notify(Notification::error("Error", "Failed to add playlist"));
                MutationOutcome::Failed
            }
        }
    }

    /// Patch title, description and logo of the loaded settings row
    pub async fn save_settings(&mut self) -> MutationOutcome {
        let Some(id) = self.settings_form.id().map(str::to_string) else {
            warn!("No settings row loaded; nothing to update");
            self.notifier
                .notify(Notification::error("Error", "Failed to save settings"));
            return MutationOutcome::Failed;
        };

        match self
            .repository
            .update_site_settings(&id, &self.settings_form.patch())
            .await
        {
            Ok(_) => {
                info!(settings_id = %id, "Site settings saved");
                self.data.settings = self.settings_form.to_settings();
                self.notifier.notify(Notification::success(
                    "Settings saved",
                    "Site settings have been updated successfully",
                ));
                MutationOutcome::Applied
            }
            Err(e) => {
                warn!(settings_id = %id, error = %e, "Failed to save settings");
                self.notifier
                    .notify(Notification::error("Error", "Failed to save settings"));
                MutationOutcome::Failed
            }
        }
    }

    /// Sign out and leave the panel
    ///
    /// A rejected sign-out keeps the operator on the panel. It is logged, and
    /// only surfaced as a toast when [`PanelOptions::notify_on_logout_failure`]
    /// is set.
    pub async fn logout(&self, session: &SessionContext) -> LogoutOutcome {
        match session.sign_out().await {
            Ok(()) => LogoutOutcome::Navigate(HOME_PATH.to_string()),
            Err(e) => {
                warn!(error = %e, "Logout failed; staying on the admin panel");
                if self.options.notify_on_logout_failure {
                    self.notifier
                        .notify(Notification::error("Error", "Failed to log out"));
                }
                LogoutOutcome::Stay
            }
        }
    }
}
