//! TOML catalog fixtures.
//!
//! ```toml
//! [[album]]
//! title = "Kind of Blue"
//! artist = "Miles Davis"
//! year = 1959
//! cover = "covers/kind-of-blue.jpg"
//!
//!   [[album.track]]
//!   title = "So What"
//!   number = 1
//!   duration = 562
//!
//! [[artist]]
//! name = "Miles Davis"
//! biography = "Trumpeter, bandleader."
//! ```
//!
//! Relative `cover`, `portrait` and track `path` values are resolved against
//! the fixture's directory when loaded from disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::track::Track;

use super::{AlbumInfo, MemoryCatalog};

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read catalog fixture {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog fixture: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FixtureDoc {
    #[serde(rename = "album")]
    albums: Vec<AlbumFixture>,
    #[serde(rename = "artist")]
    artists: Vec<ArtistFixture>,
}

#[derive(Debug, Deserialize)]
struct AlbumFixture {
    title: String,
    artist: Option<String>,
    year: Option<u32>,
    cover: Option<PathBuf>,
    #[serde(default, rename = "track")]
    tracks: Vec<TrackFixture>,
}

#[derive(Debug, Deserialize)]
struct TrackFixture {
    id: Option<String>,
    title: String,
    artist: Option<String>,
    disc: Option<u32>,
    number: Option<u32>,
    /// Seconds.
    duration: Option<u64>,
    path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ArtistFixture {
    name: String,
    biography: Option<String>,
    portrait: Option<PathBuf>,
}

/// Parse a fixture document. Relative paths are kept as written.
pub fn from_toml_str(doc: &str) -> Result<MemoryCatalog, FixtureError> {
    build(doc, None)
}

/// Read and parse the fixture at `path`.
pub fn load(path: &Path) -> Result<MemoryCatalog, FixtureError> {
    let doc = fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    build(&doc, path.parent())
}

fn build(doc: &str, base: Option<&Path>) -> Result<MemoryCatalog, FixtureError> {
    let parsed: FixtureDoc = toml::from_str(doc)?;
    let resolve = |p: PathBuf| match base {
        Some(base) if p.is_relative() => base.join(p),
        _ => p,
    };

    let mut catalog = MemoryCatalog::new();

    for (album_idx, album) in parsed.albums.into_iter().enumerate() {
        let tracks = album
            .tracks
            .into_iter()
            .enumerate()
            .map(|(track_idx, t)| {
                let id = t
                    .id
                    .unwrap_or_else(|| format!("fixture:{album_idx}:{track_idx}"));
                let mut track = Track::new(id, t.title);
                track.artist = t.artist;
                track.disc_number = t.disc;
                track.track_number = t.number;
                track.duration = t.duration.map(Duration::from_secs);
                track.path = t.path.map(&resolve);
                track
            })
            .collect();

        catalog.add_album(
            AlbumInfo {
                title: album.title,
                artist: album.artist,
                year: album.year,
                cover: album.cover.map(&resolve),
            },
            tracks,
        );
    }

    for artist in parsed.artists {
        catalog.set_artist_details(&artist.name, artist.biography, artist.portrait.map(&resolve));
    }

    log::debug!(
        "catalog fixture: {} albums, {} tracks",
        catalog.album_titles().len(),
        catalog.track_count()
    );

    Ok(catalog)
}
