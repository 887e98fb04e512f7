//! Album and artist detail views.
//!
//! A `DetailView` owns a browse source and the list fed by it. It contributes
//! no ordering logic of its own; the album and artist flavours only add
//! read-only accessors over the details their browse fetched.

use std::path::PathBuf;
use std::sync::Arc;

use crate::browse::{AlbumBrowse, ArtistBrowse, BrowseSource, BrowseTarget};
use crate::catalog::Catalog;
use crate::list::{ListError, SortMode, SortableTrackList};

pub struct DetailView<B: BrowseSource> {
    browse: B,
    list: SortableTrackList,
}

pub type AlbumView = DetailView<AlbumBrowse>;
pub type ArtistView = DetailView<ArtistBrowse>;

impl<B: BrowseSource> DetailView<B> {
    /// Take ownership of `browse` and attach a fresh list to it.
    pub fn open(mut browse: B, sort_mode: SortMode) -> Result<Self, ListError> {
        let mut list = SortableTrackList::with_sort_mode(sort_mode);
        list.attach(&mut browse)?;
        log::info!("opened view for {}", browse.target());
        Ok(Self { browse, list })
    }

    pub fn target(&self) -> &BrowseTarget {
        self.browse.target()
    }

    pub fn browse(&self) -> &B {
        &self.browse
    }

    pub fn list(&self) -> &SortableTrackList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut SortableTrackList {
        &mut self.list
    }

    /// Forward pending browse events to the list.
    pub fn pump(&mut self) -> usize {
        self.list.pump()
    }

    /// Stop listening to the browse. The list keeps what it already has.
    pub fn dismiss(&mut self) {
        log::debug!("dismissing view for {}", self.browse.target());
        self.list.detach();
    }
}

impl AlbumView {
    pub fn open_album(
        catalog: Arc<dyn Catalog>,
        title: &str,
        page_size: usize,
        sort_mode: SortMode,
    ) -> Result<Self, ListError> {
        Self::open(AlbumBrowse::start(catalog, title, page_size), sort_mode)
    }

    /// Catalog spelling of the title once known, the requested one until then.
    pub fn album_title(&self) -> String {
        self.browse
            .details()
            .map(|d| d.title)
            .unwrap_or_else(|| self.target().name().to_string())
    }

    /// Name of the album artist, for linking to their artist view.
    pub fn artist_link(&self) -> Option<String> {
        self.browse.details().and_then(|d| d.artist)
    }

    pub fn year(&self) -> Option<u32> {
        self.browse.details().and_then(|d| d.year)
    }

    pub fn cover(&self) -> Option<PathBuf> {
        self.browse.details().and_then(|d| d.cover)
    }
}

impl ArtistView {
    pub fn open_artist(
        catalog: Arc<dyn Catalog>,
        name: &str,
        page_size: usize,
        sort_mode: SortMode,
    ) -> Result<Self, ListError> {
        Self::open(ArtistBrowse::start(catalog, name, page_size), sort_mode)
    }

    pub fn artist_name(&self) -> String {
        self.browse
            .details()
            .map(|d| d.name)
            .unwrap_or_else(|| self.target().name().to_string())
    }

    pub fn biography(&self) -> Option<String> {
        self.browse.details().and_then(|d| d.biography)
    }

    pub fn albums(&self) -> Vec<String> {
        self.browse.details().map(|d| d.albums).unwrap_or_default()
    }

    pub fn portrait(&self) -> Option<PathBuf> {
        self.browse.details().and_then(|d| d.portrait)
    }
}
