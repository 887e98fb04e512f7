//! Catalog client boundary.
//!
//! The catalog answers album and artist detail requests and hands out track
//! listings page by page. Browse sources talk to it from worker threads, so
//! implementations must be `Send + Sync`. `MemoryCatalog` is the in-process
//! implementation; `fixture` and `scan` build one from a TOML document or a
//! directory of audio files.

use std::path::PathBuf;

use crate::track::Track;

pub mod fixture;
mod memory;
pub mod scan;

pub use memory::MemoryCatalog;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("album not found: {0}")]
    AlbumNotFound(String),

    #[error("artist not found: {0}")]
    ArtistNotFound(String),

    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    #[error("catalog returned page at offset {offset} pointing back to {next}")]
    StalledPaging { offset: usize, next: usize },

    #[error("browse stream closed before loading finished")]
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlbumInfo {
    pub title: String,
    pub artist: Option<String>,
    pub year: Option<u32>,
    /// Cover art reference; loading it is the artwork layer's business.
    pub cover: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArtistInfo {
    pub name: String,
    pub biography: Option<String>,
    /// Album titles, in the order the catalog lists the artist's tracks.
    pub albums: Vec<String>,
    pub portrait: Option<PathBuf>,
}

/// One slice of a track listing. `next_offset` is `None` on the last page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackPage {
    pub tracks: Vec<Track>,
    pub next_offset: Option<usize>,
}

pub trait Catalog: Send + Sync {
    fn album(&self, title: &str) -> Result<AlbumInfo, CatalogError>;

    fn album_tracks(
        &self,
        title: &str,
        offset: usize,
        limit: usize,
    ) -> Result<TrackPage, CatalogError>;

    fn artist(&self, name: &str) -> Result<ArtistInfo, CatalogError>;

    fn artist_tracks(
        &self,
        name: &str,
        offset: usize,
        limit: usize,
    ) -> Result<TrackPage, CatalogError>;
}
