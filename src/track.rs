//! Track model shared by the catalog, browse and list layers.
//!
//! A `Track` is owned by the catalog side; everything downstream holds a
//! `TrackRef`, a cheap shared handle that never outlives its usefulness to
//! the catalog.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

mod display;

pub use display::display_from_fields;

/// Opaque catalog identifier for a track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub disc_number: Option<u32>,
    pub track_number: Option<u32>,
    pub duration: Option<Duration>,
    /// Local file backing the track, when the catalog knows one.
    pub path: Option<PathBuf>,
}

impl Track {
    /// Create a track with only an id and a title; all other metadata unset.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: TrackId::new(id),
            title: title.into(),
            artist: None,
            album: None,
            disc_number: None,
            track_number: None,
            duration: None,
            path: None,
        }
    }
}

/// Shared, non-owning handle to a catalog track.
pub type TrackRef = Arc<Track>;

#[cfg(test)]
mod tests;
