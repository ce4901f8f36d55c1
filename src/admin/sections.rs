//! Section cards

use serde::Serialize;

use crate::models::{Channel, Section};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionCard {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub channel_count: usize,
}

/// Number of channels filed under `section_id`
pub fn channel_count(section_id: &str, channels: &[Channel]) -> usize {
    channels
        .iter()
        .filter(|channel| channel.section_id == section_id)
        .count()
}

/// One card per section, counts recomputed from `channels` on every call
pub fn section_cards(sections: &[Section], channels: &[Channel]) -> Vec<SectionCard> {
    sections
        .iter()
        .map(|section| SectionCard {
            id: section.id.clone(),
            name: section.name.clone(),
            slug: section.slug.clone(),
            channel_count: channel_count(&section.id, channels),
        })
        .collect()
}
