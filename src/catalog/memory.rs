use std::collections::HashMap;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use crate::track::Track;

use super::{AlbumInfo, ArtistInfo, Catalog, CatalogError, TrackPage};

/// In-process catalog with optional simulated request latency.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    albums: Vec<AlbumRecord>,
    artists: HashMap<String, ArtistRecord>,
    latency: Duration,
}

#[derive(Debug, Clone)]
struct AlbumRecord {
    info: AlbumInfo,
    tracks: Vec<Track>,
}

#[derive(Debug, Clone, Default)]
struct ArtistRecord {
    biography: Option<String>,
    portrait: Option<PathBuf>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep for `latency` before answering each request.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Add an album and its tracks.
    ///
    /// Tracks are stored in disc/track-number order (unnumbered tracks last,
    /// ties keep insertion order). Missing album/artist tags are filled in
    /// from `info`.
    pub fn add_album(&mut self, info: AlbumInfo, mut tracks: Vec<Track>) {
        tracks.sort_by_key(|t| {
            (
                t.disc_number.unwrap_or(1),
                t.track_number.unwrap_or(u32::MAX),
            )
        });
        for t in &mut tracks {
            if t.album.is_none() {
                t.album = Some(info.title.clone());
            }
            if t.artist.is_none() {
                t.artist = info.artist.clone();
            }
        }
        self.albums.push(AlbumRecord { info, tracks });
    }

    pub fn set_artist_details(
        &mut self,
        name: &str,
        biography: Option<String>,
        portrait: Option<PathBuf>,
    ) {
        self.artists.insert(
            fold(name),
            ArtistRecord {
                biography,
                portrait,
            },
        );
    }

    pub fn album_titles(&self) -> Vec<&str> {
        self.albums.iter().map(|a| a.info.title.as_str()).collect()
    }

    /// Distinct album artists, in first-seen order.
    pub fn artist_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for artist in self.albums.iter().filter_map(|a| a.info.artist.as_deref()) {
            if !names.iter().any(|n| same_name(n, artist)) {
                names.push(artist);
            }
        }
        names
    }

    pub fn track_count(&self) -> usize {
        self.albums.iter().map(|a| a.tracks.len()).sum()
    }

    fn find_album(&self, title: &str) -> Result<&AlbumRecord, CatalogError> {
        self.albums
            .iter()
            .find(|a| same_name(&a.info.title, title))
            .ok_or_else(|| CatalogError::AlbumNotFound(title.to_string()))
    }

    /// Albums credited to `name`, oldest first, then by title.
    fn artist_albums(&self, name: &str) -> Vec<&AlbumRecord> {
        let mut albums: Vec<&AlbumRecord> = self
            .albums
            .iter()
            .filter(|a| a.info.artist.as_deref().is_some_and(|n| same_name(n, name)))
            .collect();
        albums.sort_by(|a, b| {
            a.info
                .year
                .unwrap_or(u32::MAX)
                .cmp(&b.info.year.unwrap_or(u32::MAX))
                .then_with(|| fold(&a.info.title).cmp(&fold(&b.info.title)))
        });
        albums
    }

    fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
    }
}

impl Catalog for MemoryCatalog {
    fn album(&self, title: &str) -> Result<AlbumInfo, CatalogError> {
        self.simulate_latency();
        self.find_album(title).map(|a| a.info.clone())
    }

    fn album_tracks(
        &self,
        title: &str,
        offset: usize,
        limit: usize,
    ) -> Result<TrackPage, CatalogError> {
        self.simulate_latency();
        let album = self.find_album(title)?;
        Ok(page(album.tracks.iter(), album.tracks.len(), offset, limit))
    }

    fn artist(&self, name: &str) -> Result<ArtistInfo, CatalogError> {
        self.simulate_latency();
        let albums = self.artist_albums(name);
        let record = self.artists.get(&fold(name));
        if albums.is_empty() && record.is_none() {
            return Err(CatalogError::ArtistNotFound(name.to_string()));
        }

        let display_name = albums
            .first()
            .and_then(|a| a.info.artist.clone())
            .unwrap_or_else(|| name.trim().to_string());

        Ok(ArtistInfo {
            name: display_name,
            biography: record.and_then(|r| r.biography.clone()),
            albums: albums.iter().map(|a| a.info.title.clone()).collect(),
            portrait: record.and_then(|r| r.portrait.clone()),
        })
    }

    fn artist_tracks(
        &self,
        name: &str,
        offset: usize,
        limit: usize,
    ) -> Result<TrackPage, CatalogError> {
        self.simulate_latency();
        let albums = self.artist_albums(name);
        if albums.is_empty() && !self.artists.contains_key(&fold(name)) {
            return Err(CatalogError::ArtistNotFound(name.to_string()));
        }
        let total = albums.iter().map(|a| a.tracks.len()).sum();
        Ok(page(
            albums.iter().flat_map(|a| a.tracks.iter()),
            total,
            offset,
            limit,
        ))
    }
}

fn page<'a>(
    tracks: impl Iterator<Item = &'a Track>,
    total: usize,
    offset: usize,
    limit: usize,
) -> TrackPage {
    let tracks: Vec<Track> = tracks.skip(offset).take(limit.max(1)).cloned().collect();
    let end = offset + tracks.len();
    TrackPage {
        tracks,
        next_offset: (end < total).then_some(end),
    }
}

fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

fn same_name(a: &str, b: &str) -> bool {
    fold(a) == fold(b)
}
