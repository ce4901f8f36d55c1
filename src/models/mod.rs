use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend table names
pub mod tables {
    pub const SECTIONS: &str = "sections";
    pub const CHANNELS: &str = "channels";
    pub const PLAYLISTS: &str = "playlists";
    pub const SITE_SETTINGS: &str = "site_settings";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// Embedded `sections(name)` relation returned alongside a channel row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionName {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub section_id: String,
    pub stream_url: String,
    pub logo_url: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    #[serde(rename = "sections", default, skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionName>,
}

fn default_is_active() -> bool {
    true
}

impl Channel {
    /// Name of the joined section, if the backend resolved it
    pub fn section_name(&self) -> Option<&str> {
        self.section.as_ref().map(|s| s.name.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelCreateRequest {
    pub name: String,
    pub section_id: String,
    pub stream_url: String,
    pub logo_url: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub url: String, // stored opaque, never fetched here
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaylistCreateRequest {
    pub name: String,
    pub url: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteSettings {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

/// Patch applied to the singleton settings row; the id is only ever a filter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteSettingsUpdate {
    pub title: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

impl From<&SiteSettings> for SiteSettingsUpdate {
    fn from(settings: &SiteSettings) -> Self {
        Self {
            title: settings.title.clone(),
            description: settings.description.clone(),
            logo_url: settings.logo_url.clone(),
        }
    }
}
