//! Channel form and list entries

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::models::{Channel, ChannelCreateRequest};

/// Unsaved channel form contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelDraft {
    pub name: String,
    pub section_id: String,
    pub stream_url: String,
    pub logo_url: String,
    pub description: String,
}

impl ChannelDraft {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check the required fields and build the insert payload
    pub fn validate(&self) -> Result<ChannelCreateRequest, ValidationError> {
        let missing: Vec<&'static str> = [
            ("name", &self.name),
            ("section_id", &self.section_id),
            ("stream_url", &self.stream_url),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(ValidationError::missing_fields(missing));
        }

        Ok(ChannelCreateRequest {
            name: self.name.clone(),
            section_id: self.section_id.clone(),
            stream_url: self.stream_url.clone(),
            logo_url: self.logo_url.clone(),
            description: self.description.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelStatus {
    Active,
    Inactive,
}

impl ChannelStatus {
    pub fn label(self) -> &'static str {
        match self {
            ChannelStatus::Active => "Active",
            ChannelStatus::Inactive => "Inactive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelCard {
    pub id: String,
    pub name: String,
    pub section_name: Option<String>,
    pub status: ChannelStatus,
}

impl From<&Channel> for ChannelCard {
    fn from(channel: &Channel) -> Self {
        Self {
            id: channel.id.clone(),
            name: channel.name.clone(),
            section_name: channel.section_name().map(str::to_string),
            status: if channel.is_active {
                ChannelStatus::Active
            } else {
                ChannelStatus::Inactive
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> ChannelDraft {
        ChannelDraft {
            name: "Euronews".to_string(),
            section_id: "s-news".to_string(),
            stream_url: "https://example.com/euronews.m3u8".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_each_required_field_is_checked() {
        let mut draft = complete_draft();
        draft.stream_url.clear();
        assert_eq!(draft.validate().unwrap_err().fields(), &["stream_url"]);

        let empty = ChannelDraft::default();
        assert_eq!(
            empty.validate().unwrap_err().fields(),
            &["name", "section_id", "stream_url"]
        );
    }

    #[test]
    fn test_optional_fields_pass_through() {
        let mut draft = complete_draft();
        draft.logo_url = "https://example.com/logo.png".to_string();

        let request = draft.validate().unwrap();
        assert_eq!(request.logo_url, "https://example.com/logo.png");
        assert_eq!(request.description, "");
    }

    #[test]
    fn test_inactive_channel_card() {
        let channel = Channel {
            id: "c1".to_string(),
            name: "Archive".to_string(),
            section_id: "s1".to_string(),
            stream_url: "u".to_string(),
            logo_url: None,
            description: None,
            is_active: false,
            section: None,
        };

        let card = ChannelCard::from(&channel);
        assert_eq!(card.status.label(), "Inactive");
        assert_eq!(card.section_name, None);
    }
}
