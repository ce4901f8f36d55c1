//! Playlist form and list entries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::models::{Playlist, PlaylistCreateRequest};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistDraft {
    pub name: String,
    pub url: String,
    pub description: String,
}

impl PlaylistDraft {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<PlaylistCreateRequest, ValidationError> {
        let missing: Vec<&'static str> = [("name", &self.name), ("url", &self.url)]
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| field)
            .collect();

        if !missing.is_empty() {
            return Err(ValidationError::missing_fields(missing));
        }

        Ok(PlaylistCreateRequest {
            name: self.name.clone(),
            url: self.url.clone(),
            description: self.description.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistCard {
    pub id: String,
    pub name: String,
    /// Omitted when the playlist has no (or an empty) description
    pub description: Option<String>,
    pub added: NaiveDate,
}

impl From<&Playlist> for PlaylistCard {
    fn from(playlist: &Playlist) -> Self {
        Self {
            id: playlist.id.clone(),
            name: playlist.name.clone(),
            description: playlist
                .description
                .clone()
                .filter(|description| !description.is_empty()),
            added: playlist.created_at.date_naive(),
        }
    }
}
