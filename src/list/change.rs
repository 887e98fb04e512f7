use std::sync::mpsc::{self, Receiver, Sender};

use super::types::{BrowseState, SortMode};

/// Delta published to observers after a list operation.
///
/// Row numbers refer to the list as it is after the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChange {
    /// Newly merged entries, ascending.
    Inserted(Vec<usize>),
    /// Entries whose track metadata was replaced in place.
    Updated(Vec<usize>),
    /// Rows `from` (pre-move positions, ascending) now form one block
    /// starting at `to`.
    Moved { from: Vec<usize>, to: usize },
    /// Whole-list permutation: the entry now at row `i` was at `order[i]`.
    Reordered(Vec<usize>),
    SelectionChanged,
    SortModeChanged(SortMode),
    StateChanged(BrowseState),
}

/// Fan-out of `ListChange`s; observers that hung up are dropped.
#[derive(Debug, Default)]
pub(super) struct Observers {
    senders: Vec<Sender<ListChange>>,
}

impl Observers {
    pub(super) fn subscribe(&mut self) -> Receiver<ListChange> {
        let (tx, rx) = mpsc::channel();
        self.senders.push(tx);
        rx
    }

    pub(super) fn notify(&mut self, change: ListChange) {
        if self.senders.is_empty() {
            return;
        }
        self.senders.retain(|tx| tx.send(change.clone()).is_ok());
    }
}
