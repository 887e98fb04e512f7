//! Drag-and-drop protocol.
//!
//! A list is a drag source for its selection and a drop destination for
//! drags that started on itself. The origin token is what tells a
//! self-drop (a reorder) apart from a drag that started elsewhere.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::track::TrackId;

use super::controller::SortableTrackList;
use super::error::ListError;

static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a list instance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ListId(u64);

impl ListId {
    pub(super) fn next() -> Self {
        Self(NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragOrigin {
    pub list: ListId,
    /// Rows the dragged tracks occupied when the drag began, ascending.
    pub indices: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub tracks: Vec<TrackId>,
    pub origin: Option<DragOrigin>,
}

impl DragPayload {
    /// A payload with no originating list, e.g. from a file manager.
    pub fn external(tracks: Vec<TrackId>) -> Self {
        Self {
            tracks,
            origin: None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DropOperation {
    Move,
    Reject,
}

impl SortableTrackList {
    /// Start dragging the current selection. `None` when nothing is selected.
    pub fn begin_drag(&self) -> Option<DragPayload> {
        let indices = self.selected_indices();
        if indices.is_empty() {
            return None;
        }
        let tracks = indices
            .iter()
            .filter_map(|&row| self.get(row))
            .map(|e| e.id().clone())
            .collect();
        Some(DragPayload {
            tracks,
            origin: Some(DragOrigin {
                list: self.id(),
                indices,
            }),
        })
    }

    /// What dropping `payload` above `row` would do.
    pub fn validate_drop(&self, payload: &DragPayload, row: usize) -> DropOperation {
        match self.drop_indices(payload, row) {
            Ok(_) => DropOperation::Move,
            Err(_) => DropOperation::Reject,
        }
    }

    /// Complete a self-drop above `row` (clamped to `0..=len`).
    /// Returns the row where the dropped block now starts.
    pub fn accept_drop(&mut self, payload: &DragPayload, row: usize) -> Result<usize, ListError> {
        let indices = self.drop_indices(payload, row)?;
        let row = row.min(self.len());
        self.move_entries(indices, row)
    }

    fn drop_indices<'a>(&self, payload: &'a DragPayload, row: usize) -> Result<&'a [usize], ListError> {
        let origin = payload
            .origin
            .as_ref()
            .filter(|o| o.list == self.id())
            .ok_or(ListError::ForeignDrop)?;

        // The list may have changed under the gesture.
        let stale = origin.indices.len() != payload.tracks.len()
            || origin
                .indices
                .iter()
                .zip(&payload.tracks)
                .any(|(&i, id)| self.get(i).is_none_or(|e| e.id() != id));
        if stale {
            return Err(ListError::InvalidRange {
                indices: origin.indices.clone(),
                to_index: row,
                len: self.len(),
            });
        }
        Ok(&origin.indices)
    }
}
