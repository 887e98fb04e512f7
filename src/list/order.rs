//! Ordering helpers for the list's entries.
//!
//! Sorting never mutates `custom_index`; moves are validated up front so a
//! rejected move leaves the entries untouched.

use std::cmp::Ordering;

use crate::track::Track;

use super::entry::TrackEntry;
use super::error::ListError;
use super::types::{SortField, SortMode, SortOrder};

pub(super) fn compare(a: &TrackEntry, b: &TrackEntry, mode: SortMode) -> Ordering {
    match mode {
        SortMode::Natural => a.natural_index.cmp(&b.natural_index),
        SortMode::Custom => a.custom_index.cmp(&b.custom_index),
        SortMode::Field(field, order) => {
            let ord = compare_field(&a.track, &b.track, field);
            let ord = match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            };
            ord.then_with(|| a.natural_index.cmp(&b.natural_index))
        }
    }
}

fn compare_field(a: &Track, b: &Track, field: SortField) -> Ordering {
    match field {
        SortField::Title => fold(Some(&a.title)).cmp(&fold(Some(&b.title))),
        SortField::Artist => fold(a.artist.as_ref()).cmp(&fold(b.artist.as_ref())),
        SortField::Album => fold(a.album.as_ref()).cmp(&fold(b.album.as_ref())),
        SortField::Duration => a.duration.cmp(&b.duration),
        SortField::TrackNumber => number_key(a).cmp(&number_key(b)),
    }
}

fn fold(s: Option<&String>) -> String {
    s.map(|v| v.trim().to_lowercase()).unwrap_or_default()
}

fn number_key(t: &Track) -> (u32, u32) {
    (t.disc_number.unwrap_or(1), t.track_number.unwrap_or(u32::MAX))
}

/// Check a move request and return its indices in ascending order.
pub(super) fn validate_move(
    indices: &[usize],
    to_index: usize,
    len: usize,
) -> Result<Vec<usize>, ListError> {
    let invalid = || ListError::InvalidRange {
        indices: indices.to_vec(),
        to_index,
        len,
    };

    if indices.is_empty() || to_index > len {
        return Err(invalid());
    }

    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    if sorted.len() != indices.len() || sorted.last().is_some_and(|&i| i >= len) {
        return Err(invalid());
    }
    Ok(sorted)
}

/// Pull `sorted` out of `items` and splice them back in as one block at
/// `to_index` (a position in the original list). Returns the block's new
/// starting row.
pub(super) fn move_block<T>(items: &mut Vec<T>, sorted: &[usize], to_index: usize) -> usize {
    let before = sorted.iter().filter(|&&i| i < to_index).count();

    let mut moved = Vec::with_capacity(sorted.len());
    let mut kept = Vec::with_capacity(items.len().saturating_sub(sorted.len()));
    let mut pending = sorted.iter().peekable();
    for (i, item) in items.drain(..).enumerate() {
        if pending.peek() == Some(&&i) {
            pending.next();
            moved.push(item);
        } else {
            kept.push(item);
        }
    }

    let start = to_index - before;
    kept.splice(start..start, moved);
    *items = kept;
    start
}

/// Rearrange `items` so that `items[new] = old_items[order[new]]`.
/// `order` must be a permutation of `0..items.len()`.
pub(super) fn permute<T>(items: &mut Vec<T>, order: &[usize]) {
    let mut slots: Vec<Option<T>> = items.drain(..).map(Some).collect();
    items.extend(
        order
            .iter()
            .filter_map(|&old| slots.get_mut(old).and_then(Option::take)),
    );
}
