//! Sortable track list.
//!
//! `SortableTrackList` owns the ordered entries backing a detail view. It
//! merges tracks as a browse source reports them, switches between Natural,
//! Custom and field sort modes, and reorders entries via `move_entries` and
//! the drag-and-drop protocol in `drag`. Observers receive `ListChange`
//! deltas instead of full reloads.

mod change;
mod controller;
mod drag;
mod entry;
mod error;
mod order;
mod types;

pub use change::ListChange;
pub use controller::SortableTrackList;
pub use drag::{DragOrigin, DragPayload, DropOperation, ListId};
pub use entry::TrackEntry;
pub use error::{BrowseFailure, ListError};
pub use types::{BrowseState, SortField, SortMode, SortOrder};
