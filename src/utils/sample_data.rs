//! Fictional demo content for the in-memory backend
//!
//! Names are invented to keep real broadcaster brands out of demos and tests.

use serde_json::{json, Value};

use crate::backend::InMemoryBackend;
use crate::models::tables;

pub const SETTINGS_ROW_ID: &str = "00000000-0000-0000-0000-000000000001";

pub fn sections() -> Vec<Value> {
    vec![
        json!({"id": "8d3c1a52-0f0e-4b4e-9a51-3c7f0b1e2a01", "name": "Live TV", "slug": "live-tv"}),
        json!({"id": "8d3c1a52-0f0e-4b4e-9a51-3c7f0b1e2a02", "name": "Movies", "slug": "movies"}),
        json!({"id": "8d3c1a52-0f0e-4b4e-9a51-3c7f0b1e2a03", "name": "Sports", "slug": "sports"}),
    ]
}

pub fn channels() -> Vec<Value> {
    let sections = sections();
    let live = &sections[0]["id"];
    let movies = &sections[1]["id"];
    let sports = &sections[2]["id"];

    vec![
        json!({
            "id": "5b1f7d0e-2c39-4a0b-8f1e-000000000001",
            "name": "Northwind News",
            "section_id": live,
            "stream_url": "https://streams.example.com/northwind-news/index.m3u8",
            "logo_url": "https://images.example.com/logos/northwind.png",
            "description": "Round-the-clock headlines",
            "is_active": true,
            "created_at": "2024-01-10T09:00:00+00:00"
        }),
        json!({
            "id": "5b1f7d0e-2c39-4a0b-8f1e-000000000002",
            "name": "Harbor One",
            "section_id": live,
            "stream_url": "https://streams.example.com/harbor-one/index.m3u8",
            "logo_url": null,
            "description": "",
            "is_active": true,
            "created_at": "2024-01-11T09:00:00+00:00"
        }),
        json!({
            "id": "5b1f7d0e-2c39-4a0b-8f1e-000000000003",
            "name": "Cinema Vault",
            "section_id": movies,
            "stream_url": "https://streams.example.com/cinema-vault/index.m3u8",
            "logo_url": null,
            "description": "Classic features",
            "is_active": false,
            "created_at": "2024-01-12T09:00:00+00:00"
        }),
        json!({
            "id": "5b1f7d0e-2c39-4a0b-8f1e-000000000004",
            "name": "Fieldside Sports",
            "section_id": sports,
            "stream_url": "https://streams.example.com/fieldside/index.m3u8",
            "logo_url": null,
            "description": "Live fixtures",
            "is_active": true,
            "created_at": "2024-01-13T09:00:00+00:00"
        }),
    ]
}

pub fn playlists() -> Vec<Value> {
    vec![json!({
        "id": "c0ffee00-0000-4000-8000-000000000001",
        "name": "Community Channels",
        "url": "https://lists.example.com/community.m3u",
        "description": "Volunteer-maintained list",
        "created_at": "2024-02-01T12:00:00+00:00"
    })]
}

pub fn site_settings() -> Value {
    json!({
        "id": SETTINGS_ROW_ID,
        "title": "StreamVibe",
        "description": "Live TV, movies and sports in one place",
        "logo_url": null
    })
}

/// Fill an empty backend with the demo content
pub fn seed(backend: &InMemoryBackend) {
    backend.seed(tables::SECTIONS, sections());
    backend.seed(tables::CHANNELS, channels());
    backend.seed(tables::PLAYLISTS, playlists());
    backend.seed(tables::SITE_SETTINGS, vec![site_settings()]);
}
