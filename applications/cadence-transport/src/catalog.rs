//! Catalog collaborator
//!
//! Reads album listings from JSON and resolves them into [`Track`]
//! descriptors for the playback controller, the way the album and playlist
//! pages do: catalog durations arrive as `"m:ss"` and rows without their own
//! artwork fall back to the album cover.

use crate::error::{Result, TransportError};
use cadence_core::{CoreError, Track};
use serde::Deserialize;
use std::path::Path;

/// A catalog file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub albums: Vec<AlbumEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumEntry {
    pub id: String,
    pub name: String,
    pub artist: String,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub tracks: Vec<TrackEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackEntry {
    pub id: String,
    pub title: String,
    /// Falls back to the album artist
    #[serde(default)]
    pub artist: Option<String>,
    /// `m:ss`
    pub duration: String,
    #[serde(default)]
    pub album_art_url: Option<String>,
}

impl Catalog {
    /// Load and check a catalog file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&text)?;
        tracing::info!(
            albums = catalog.albums.len(),
            path = %path.display(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse a catalog and resolve every row once so bad data fails early
    pub fn from_json(text: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(text)?;
        for album in &catalog.albums {
            album.resolve_all()?;
        }
        Ok(catalog)
    }

    pub fn album(&self, id: &str) -> Result<&AlbumEntry> {
        self.albums
            .iter()
            .find(|album| album.id == id)
            .ok_or_else(|| TransportError::UnknownAlbum(id.to_string()))
    }

    /// Resolve a track by id from whichever album lists it first
    pub fn track(&self, id: &str) -> Result<Track> {
        self.albums
            .iter()
            .find_map(|album| {
                album
                    .tracks
                    .iter()
                    .find(|row| row.id == id)
                    .map(|row| album.resolve(row))
            })
            .ok_or_else(|| TransportError::UnknownTrack(id.to_string()))?
    }

    /// Every track of an album in listing order ("Play all")
    pub fn album_tracks(&self, id: &str) -> Result<Vec<Track>> {
        self.album(id)?.resolve_all()
    }
}

impl AlbumEntry {
    fn resolve(&self, row: &TrackEntry) -> Result<Track> {
        if row.id.trim().is_empty() {
            return Err(CoreError::invalid_track(format!(
                "row {:?} in album {} has no id",
                row.title, self.id
            ))
            .into());
        }

        let artist = row.artist.clone().unwrap_or_else(|| self.artist.clone());
        let mut track = Track::from_catalog(
            row.id.as_str(),
            row.title.clone(),
            artist,
            row.album_art_url.clone(),
            &row.duration,
        )?;
        if let Some(cover) = &self.cover_image_url {
            track = track.with_fallback_artwork(cover.clone());
        }
        Ok(track)
    }

    fn resolve_all(&self) -> Result<Vec<Track>> {
        self.tracks.iter().map(|row| self.resolve(row)).collect()
    }
}
