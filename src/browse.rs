//! Browse sources.
//!
//! A browse source fetches an album's or an artist's details and track
//! listing from the catalog on a worker thread, and reports progress as a
//! stream of `BrowseEvent`s. The stream can be taken once; whoever holds the
//! receiver decides when (and whether) events are handled. Dropping the
//! receiver stops the worker at its next send.

use std::fmt;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};

use crate::catalog::CatalogError;
use crate::track::TrackRef;

mod album;
mod artist;
mod worker;

pub use album::AlbumBrowse;
pub use artist::ArtistBrowse;

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseEvent {
    /// A fetch round started.
    Loading,
    /// A batch of tracks in source order. `is_final` marks the last batch.
    Progress { tracks: Vec<TrackRef>, is_final: bool },
    /// The browse stopped; no further events follow.
    Failed(CatalogError),
}

/// What a browse source is browsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BrowseTarget {
    Album(String),
    Artist(String),
}

impl BrowseTarget {
    pub fn name(&self) -> &str {
        match self {
            BrowseTarget::Album(name) | BrowseTarget::Artist(name) => name,
        }
    }
}

impl fmt::Display for BrowseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowseTarget::Album(title) => write!(f, "album \"{title}\""),
            BrowseTarget::Artist(name) => write!(f, "artist \"{name}\""),
        }
    }
}

pub trait BrowseSource {
    fn target(&self) -> &BrowseTarget;

    /// Hand out the event stream. Returns `None` once it has been taken.
    fn take_events(&mut self) -> Option<Receiver<BrowseEvent>>;
}

/// Details published by a browse worker once fetched.
pub type DetailsHandle<T> = Arc<Mutex<Option<T>>>;

#[cfg(test)]
mod tests;
