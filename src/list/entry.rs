use crate::track::{TrackId, TrackRef};

/// A track reference plus the list-local state kept alongside it.
#[derive(Debug, Clone)]
pub struct TrackEntry {
    pub(super) track: TrackRef,
    /// Arrival position; defines Natural order.
    pub(super) natural_index: usize,
    /// Position in the user's manual arrangement.
    pub(super) custom_index: usize,
    pub(super) selected: bool,
}

impl TrackEntry {
    pub(super) fn new(track: TrackRef, natural_index: usize, custom_index: usize) -> Self {
        Self {
            track,
            natural_index,
            custom_index,
            selected: false,
        }
    }

    pub fn track(&self) -> &TrackRef {
        &self.track
    }

    pub fn id(&self) -> &TrackId {
        &self.track.id
    }

    pub fn natural_index(&self) -> usize {
        self.natural_index
    }

    pub fn custom_index(&self) -> usize {
        self.custom_index
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }
}
