use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::mpsc::{Receiver, TryRecvError};

use rand::{rng, seq::SliceRandom};

use crate::browse::{BrowseEvent, BrowseSource, BrowseTarget};
use crate::catalog::CatalogError;
use crate::track::{TrackId, TrackRef};

use super::change::{ListChange, Observers};
use super::drag::ListId;
use super::entry::TrackEntry;
use super::error::{BrowseFailure, ListError};
use super::order;
use super::types::{BrowseState, SortMode};

/// User-orderable list over tracks that arrive from a browse source.
///
/// All methods run on the thread that owns the list. Browse progress is
/// delivered through `pump`, which drains the attached source's channel.
#[derive(Debug)]
pub struct SortableTrackList {
    id: ListId,
    entries: Vec<TrackEntry>,
    members: HashSet<TrackId>,
    sort_mode: SortMode,
    browse_state: BrowseState,
    target: Option<BrowseTarget>,
    events: Option<Receiver<BrowseEvent>>,
    attached_once: bool,
    failure: Option<BrowseFailure>,
    next_natural: usize,
    observers: Observers,
}

impl Default for SortableTrackList {
    fn default() -> Self {
        Self::new()
    }
}

impl SortableTrackList {
    pub fn new() -> Self {
        Self::with_sort_mode(SortMode::Natural)
    }

    pub fn with_sort_mode(sort_mode: SortMode) -> Self {
        Self {
            id: ListId::next(),
            entries: Vec::new(),
            members: HashSet::new(),
            sort_mode,
            browse_state: BrowseState::NotStarted,
            target: None,
            events: None,
            attached_once: false,
            failure: None,
            next_natural: 0,
            observers: Observers::default(),
        }
    }

    pub fn id(&self) -> ListId {
        self.id
    }

    /// Ordered snapshot of the list.
    pub fn entries(&self) -> &[TrackEntry] {
        &self.entries
    }

    pub fn get(&self, row: usize) -> Option<&TrackEntry> {
        self.entries.get(row)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &TrackId) -> bool {
        self.members.contains(id)
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn browse_state(&self) -> BrowseState {
        self.browse_state
    }

    /// Set once the browse has failed.
    pub fn failure(&self) -> Option<&BrowseFailure> {
        self.failure.as_ref()
    }

    /// What the attached source is browsing, if the list was ever attached.
    pub fn target(&self) -> Option<&BrowseTarget> {
        self.target.as_ref()
    }

    /// Whether browse events are still being received.
    pub fn is_attached(&self) -> bool {
        self.events.is_some()
    }

    pub fn subscribe(&mut self) -> Receiver<ListChange> {
        self.observers.subscribe()
    }

    /// Bind `source` and start observing its events.
    ///
    /// A list can only ever be attached once.
    pub fn attach<S: BrowseSource + ?Sized>(&mut self, source: &mut S) -> Result<(), ListError> {
        if self.attached_once {
            return Err(ListError::AlreadyAttached);
        }
        let events = source
            .take_events()
            .ok_or_else(|| ListError::SourceConsumed(source.target().clone()))?;

        log::debug!("list {:?} attached to {}", self.id, source.target());
        self.attached_once = true;
        self.target = Some(source.target().clone());
        self.events = Some(events);
        self.set_state(BrowseState::Loading);
        Ok(())
    }

    /// Stop observing the source. Anything it sends afterwards is dropped.
    pub fn detach(&mut self) {
        if self.events.take().is_some() {
            log::debug!("list {:?} detached in state {}", self.id, self.browse_state);
        }
    }

    /// Handle every browse event that is already waiting, in order.
    /// Returns the number of events handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        loop {
            let Some(events) = self.events.as_ref() else {
                break;
            };
            let event = match events.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::warn!(
                        "browse stream for list {:?} closed in state {}",
                        self.id,
                        self.browse_state
                    );
                    self.handle_load_failure(CatalogError::Disconnected);
                    self.events = None;
                    break;
                }
            };

            handled += 1;
            match event {
                BrowseEvent::Loading => {
                    self.on_source_loading();
                }
                BrowseEvent::Progress { tracks, is_final } => {
                    self.on_source_progress(tracks, is_final);
                }
                BrowseEvent::Failed(error) => {
                    self.handle_load_failure(error);
                }
            }
        }
        handled
    }

    fn accepts_events(&self) -> bool {
        self.events.is_some() && !self.browse_state.is_terminal()
    }

    /// The source started fetching another batch.
    pub fn on_source_loading(&mut self) -> bool {
        if !self.accepts_events() {
            log::debug!("list {:?}: ignoring loading notification", self.id);
            return false;
        }
        if self.browse_state == BrowseState::PartiallyLoaded {
            self.set_state(BrowseState::Loading);
        }
        true
    }

    /// Merge a batch of tracks.
    ///
    /// New tracks take the next Natural and custom positions and are placed
    /// where the active sort mode puts them; existing entries never move.
    /// A track that is already present only has its metadata replaced.
    /// Returns `false` when the notification was dropped.
    pub fn on_source_progress(&mut self, tracks: Vec<TrackRef>, is_final: bool) -> bool {
        if !self.accepts_events() {
            log::debug!(
                "list {:?}: ignoring {} tracks in state {}",
                self.id,
                tracks.len(),
                self.browse_state
            );
            return false;
        }

        let first_new = self.next_natural;
        let mode = self.sort_mode;
        let mut updated: HashSet<TrackId> = HashSet::new();

        for track in tracks {
            if self.members.contains(&track.id) {
                if let Some(entry) = self.entries.iter_mut().find(|e| e.track.id == track.id) {
                    updated.insert(track.id.clone());
                    entry.track = track;
                }
                continue;
            }

            let entry = TrackEntry::new(track, self.next_natural, self.entries.len());
            self.next_natural += 1;
            self.members.insert(entry.id().clone());

            let row = self
                .entries
                .partition_point(|e| order::compare(e, &entry, mode) != Ordering::Greater);
            self.entries.insert(row, entry);
        }

        let inserted: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.natural_index >= first_new)
            .map(|(row, _)| row)
            .collect();
        if !inserted.is_empty() {
            self.observers.notify(ListChange::Inserted(inserted));
        }

        if !updated.is_empty() {
            let rows = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| updated.contains(e.id()))
                .map(|(row, _)| row)
                .collect();
            self.observers.notify(ListChange::Updated(rows));
        }

        if is_final {
            self.set_state(BrowseState::Loaded);
            self.events = None;
            log::debug!("list {:?} loaded with {} tracks", self.id, self.entries.len());
        } else {
            self.set_state(BrowseState::PartiallyLoaded);
        }
        true
    }

    /// Record a failed browse. Entries merged so far are kept.
    /// Only accepted while loading.
    pub fn handle_load_failure(&mut self, error: CatalogError) -> bool {
        if !self.accepts_events() {
            log::warn!(
                "list {:?}: ignoring browse failure in state {}: {error}",
                self.id,
                self.browse_state
            );
            return false;
        }

        let partial = self.entries.iter().map(|e| e.id().clone()).collect();
        let failure = BrowseFailure { error, partial };
        log::warn!("list {:?}: {failure}", self.id);

        self.failure = Some(failure);
        self.set_state(BrowseState::Failed);
        self.events = None;
        true
    }

    fn set_state(&mut self, state: BrowseState) {
        if self.browse_state != state {
            self.browse_state = state;
            self.observers.notify(ListChange::StateChanged(state));
        }
    }

    /// Reorder the visible list for `mode`. Custom positions are kept, so
    /// switching back to Custom restores the last manual arrangement.
    pub fn set_sort_mode(&mut self, mode: SortMode) {
        if mode == self.sort_mode {
            return;
        }
        self.sort_mode = mode;

        let mut perm: Vec<usize> = (0..self.entries.len()).collect();
        perm.sort_by(|&a, &b| order::compare(&self.entries[a], &self.entries[b], mode));
        let changed = perm.iter().enumerate().any(|(row, &old)| row != old);
        if changed {
            order::permute(&mut self.entries, &perm);
        }

        self.observers.notify(ListChange::SortModeChanged(mode));
        if changed {
            self.observers.notify(ListChange::Reordered(perm));
        }
    }

    /// Move the entries at `indices` as one block to `to_index`.
    ///
    /// `to_index` is a position in the list before the move (`0..=len`).
    /// The list switches to Custom mode and custom positions are renumbered.
    /// Returns the row where the block now starts.
    pub fn move_entries(&mut self, indices: &[usize], to_index: usize) -> Result<usize, ListError> {
        let sorted = order::validate_move(indices, to_index, self.entries.len())?;
        let start = order::move_block(&mut self.entries, &sorted, to_index);
        self.adopt_manual_order();
        self.observers.notify(ListChange::Moved {
            from: sorted,
            to: start,
        });
        Ok(start)
    }

    /// Randomly rearrange the list as a manual arrangement.
    pub fn shuffle(&mut self) {
        let mut perm: Vec<usize> = (0..self.entries.len()).collect();
        perm.shuffle(&mut rng());
        order::permute(&mut self.entries, &perm);
        self.adopt_manual_order();
        self.observers.notify(ListChange::Reordered(perm));
    }

    fn adopt_manual_order(&mut self) {
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.custom_index = i;
        }
        if self.sort_mode != SortMode::Custom {
            self.sort_mode = SortMode::Custom;
            self.observers
                .notify(ListChange::SortModeChanged(SortMode::Custom));
        }
    }

    /// Returns `false` when `row` is out of range.
    pub fn set_selected(&mut self, row: usize, selected: bool) -> bool {
        let Some(entry) = self.entries.get_mut(row) else {
            return false;
        };
        if entry.selected != selected {
            entry.selected = selected;
            self.observers.notify(ListChange::SelectionChanged);
        }
        true
    }

    pub fn toggle_selected(&mut self, row: usize) -> bool {
        match self.entries.get(row) {
            Some(entry) => {
                let selected = !entry.selected;
                self.set_selected(row, selected)
            }
            None => false,
        }
    }

    pub fn select_all(&mut self) {
        self.update_selection(|_| true);
    }

    pub fn select_none(&mut self) {
        self.update_selection(|_| false);
    }

    pub fn select_inverse(&mut self) {
        self.update_selection(|selected| !selected);
    }

    fn update_selection(&mut self, f: impl Fn(bool) -> bool) {
        let mut changed = false;
        for entry in &mut self.entries {
            let next = f(entry.selected);
            changed |= next != entry.selected;
            entry.selected = next;
        }
        if changed {
            self.observers.notify(ListChange::SelectionChanged);
        }
    }

    pub fn selected_indices(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.selected)
            .map(|(row, _)| row)
            .collect()
    }

    /// Selected tracks in visible order, for an external drop target.
    pub fn export_selection(&self) -> Vec<TrackRef> {
        self.entries
            .iter()
            .filter(|e| e.selected)
            .map(|e| e.track.clone())
            .collect()
    }
}
