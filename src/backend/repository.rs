//! Typed access to the admin tables

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use super::query::{Embed, Filter, Row, SelectQuery};
use super::traits::RowBackend;
use crate::errors::BackendResult;
use crate::models::{
    tables, Channel, ChannelCreateRequest, Playlist, PlaylistCreateRequest, Section, SiteSettings,
    SiteSettingsUpdate,
};

fn decode<T: DeserializeOwned>(rows: Vec<Row>) -> BackendResult<Vec<T>> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(Into::into))
        .collect()
}

fn encode<T: Serialize>(value: &T) -> BackendResult<Row> {
    Ok(serde_json::to_value(value)?)
}

#[derive(Clone)]
pub struct AdminRepository {
    backend: Arc<dyn RowBackend>,
}

impl AdminRepository {
    pub fn new(backend: Arc<dyn RowBackend>) -> Self {
        Self { backend }
    }

    /// Sections ordered by name
    pub async fn list_sections(&self) -> BackendResult<Vec<Section>> {
        let query = SelectQuery::all().order_by("name", true);
        decode(self.backend.select(tables::SECTIONS, &query).await?)
    }

    /// Channels ordered by name, each carrying its section's name
    pub async fn list_channels(&self) -> BackendResult<Vec<Channel>> {
        let query = SelectQuery::all()
            .embed(Embed::new(tables::SECTIONS, "section_id", ["name"]))
            .order_by("name", true);
        decode(self.backend.select(tables::CHANNELS, &query).await?)
    }

    /// Playlists, newest first
    pub async fn list_playlists(&self) -> BackendResult<Vec<Playlist>> {
        let query = SelectQuery::all().order_by("created_at", false);
        decode(self.backend.select(tables::PLAYLISTS, &query).await?)
    }

    /// The singleton settings row
    pub async fn site_settings(&self) -> BackendResult<SiteSettings> {
        let rows = self
            .backend
            .select(tables::SITE_SETTINGS, &SelectQuery::all().single())
            .await?;
        let mut settings: Vec<SiteSettings> = decode(rows)?;
        settings
            .pop()
            .ok_or_else(|| crate::errors::BackendError::no_rows(tables::SITE_SETTINGS))
    }

    pub async fn create_channel(&self, request: &ChannelCreateRequest) -> BackendResult<Vec<Row>> {
        self.backend
            .insert(tables::CHANNELS, vec![encode(request)?])
            .await
    }

    pub async fn delete_channel(&self, id: &str) -> BackendResult<()> {
        self.backend
            .delete(tables::CHANNELS, &[Filter::eq("id", id)])
            .await
    }

    pub async fn create_playlist(&self, request: &PlaylistCreateRequest) -> BackendResult<Vec<Row>> {
        self.backend
            .insert(tables::PLAYLISTS, vec![encode(request)?])
            .await
    }

    /// Patch the settings row identified by `id`
    pub async fn update_site_settings(&self, id: &str, update: &SiteSettingsUpdate) -> BackendResult<Vec<Row>> {
        self.backend
            .update(tables::SITE_SETTINGS, encode(update)?, &[Filter::eq("id", id)])
            .await
    }
}
