//! Sortable, drag-reorderable track lists fed by album and artist browses.
//!
//! The layers, leaves first:
//! - `catalog`: the catalog client boundary and an in-memory implementation;
//! - `browse`: worker-thread browses that page through the catalog;
//! - `list`: the `SortableTrackList` that merges, sorts and reorders entries;
//! - `view`: album and artist detail views tying a browse to a list.

pub mod browse;
pub mod catalog;
pub mod config;
pub mod list;
pub mod track;
pub mod view;

pub use list::{BrowseState, SortMode, SortableTrackList};
pub use track::{Track, TrackId, TrackRef};
pub use view::{AlbumView, ArtistView, DetailView};
