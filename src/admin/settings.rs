//! Site settings form

use serde::Serialize;

use crate::models::{SiteSettings, SiteSettingsUpdate};

/// Editable copy of the settings row
///
/// The row id is captured at load time and cannot be edited; saves are keyed
/// by it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SettingsForm {
    id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

impl SettingsForm {
    pub fn from_settings(settings: &SiteSettings) -> Self {
        Self {
            id: Some(settings.id.clone()),
            title: settings.title.clone(),
            description: settings.description.clone(),
            logo_url: settings.logo_url.clone(),
        }
    }

    /// Id of the loaded row, if any row was loaded
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_title<S: Into<String>>(&mut self, title: S) {
        self.title = title.into();
    }

    pub fn set_logo_url<S: Into<String>>(&mut self, logo_url: S) {
        self.logo_url = Some(logo_url.into());
    }

    /// Apply an update to the editable fields
    pub fn apply(&mut self, update: SiteSettingsUpdate) {
        self.title = update.title;
        self.description = update.description;
        self.logo_url = update.logo_url;
    }

    pub fn patch(&self) -> SiteSettingsUpdate {
        SiteSettingsUpdate {
            title: self.title.clone(),
            description: self.description.clone(),
            logo_url: self.logo_url.clone(),
        }
    }

    /// The settings row as it will read after a successful save
    pub fn to_settings(&self) -> Option<SiteSettings> {
        self.id.as_ref().map(|id| SiteSettings {
            id: id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            logo_url: self.logo_url.clone(),
        })
    }
}
