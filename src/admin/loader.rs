//! Snapshot loading for the admin panel

use serde::Serialize;
use tracing::{debug, warn};

use crate::backend::AdminRepository;
use crate::errors::BackendResult;
use crate::models::{tables, Channel, Playlist, Section, SiteSettings};

/// In-memory copy of everything the panel displays
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdminData {
    pub sections: Vec<Section>,
    pub channels: Vec<Channel>,
    pub playlists: Vec<Playlist>,
    pub settings: Option<SiteSettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadFailure {
    pub table: &'static str,
    pub error: String,
}

/// Result of one load cycle: whatever succeeded plus what failed
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub sections: Option<Vec<Section>>,
    pub channels: Option<Vec<Channel>>,
    pub playlists: Option<Vec<Playlist>>,
    pub settings: Option<SiteSettings>,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Apply the report onto `data`
    ///
    /// Failed lists are emptied; a failed settings read keeps the previous row.
    pub fn apply_to(self, data: &mut AdminData) {
        data.sections = self.sections.unwrap_or_default();
        data.channels = self.channels.unwrap_or_default();
        data.playlists = self.playlists.unwrap_or_default();
        if let Some(settings) = self.settings {
            data.settings = Some(settings);
        }
    }
}

fn keep<T>(table: &'static str, result: BackendResult<T>, failures: &mut Vec<LoadFailure>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(table = %table, error = %e, "Failed to load admin table");
            failures.push(LoadFailure {
                table,
                error: e.to_string(),
            });
            None
        }
    }
}

/// Fetch sections, channels, playlists and settings concurrently
///
/// No query is retried and result sets are loaded whole.
pub async fn load_admin_data(repository: &AdminRepository) -> LoadReport {
    let (sections, channels, playlists, settings) = tokio::join!(
        repository.list_sections(),
        repository.list_channels(),
        repository.list_playlists(),
        repository.site_settings(),
    );

    let mut failures = Vec::new();
    let report = LoadReport {
        sections: keep(tables::SECTIONS, sections, &mut failures),
        channels: keep(tables::CHANNELS, channels, &mut failures),
        playlists: keep(tables::PLAYLISTS, playlists, &mut failures),
        settings: keep(tables::SITE_SETTINGS, settings, &mut failures),
        failures,
    };

    debug!(
        sections = report.sections.as_ref().map_or(0, Vec::len),
        channels = report.channels.as_ref().map_or(0, Vec::len),
        playlists = report.playlists.as_ref().map_or(0, Vec::len),
        failures = report.failures.len(),
        "Admin data loaded"
    );
    report
}
