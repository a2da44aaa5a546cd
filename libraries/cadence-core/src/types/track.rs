/// Track descriptor handed over by the catalog pages
use crate::error::Result;
use crate::time::parse_duration;
use crate::types::TrackId;
use serde::{Deserialize, Deserializer, Serialize};

/// Immutable track descriptor
///
/// Built by a catalog page from its own data. The playback core reads it
/// and never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Catalog identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Artwork URL or asset reference
    #[serde(default)]
    pub artwork: Option<String>,

    /// Track duration in seconds (never negative)
    #[serde(deserialize_with = "deserialize_duration")]
    pub duration_seconds: f64,
}

impl Track {
    /// Create a new track
    ///
    /// Negative or non-finite durations are stored as zero.
    pub fn new(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        artist: impl Into<String>,
        duration_seconds: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            artwork: None,
            duration_seconds: sanitize_duration(duration_seconds),
        }
    }

    /// Build a track from a catalog row whose duration reads like `"3:58"`
    pub fn from_catalog(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        artist: impl Into<String>,
        artwork: Option<String>,
        duration: &str,
    ) -> Result<Self> {
        let seconds = parse_duration(duration)?;
        Ok(Self::new(id, title, artist, seconds).with_artwork(artwork))
    }

    /// Set the artwork reference
    #[must_use]
    pub fn with_artwork(mut self, artwork: Option<String>) -> Self {
        self.artwork = artwork;
        self
    }

    /// Use the album cover when the row has no artwork of its own
    #[must_use]
    pub fn with_fallback_artwork(mut self, cover: impl Into<String>) -> Self {
        if self.artwork.is_none() {
            self.artwork = Some(cover.into());
        }
        self
    }

    /// First letter of the artist, shown when artwork fails to load
    pub fn artist_initial(&self) -> Option<char> {
        self.artist.chars().next()
    }

    /// Duration in seconds, read as 0 when the field was set to a negative
    /// or non-finite value after construction
    pub fn duration(&self) -> f64 {
        sanitize_duration(self.duration_seconds)
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(sanitize_duration)
}

fn sanitize_duration(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}
