use crate::browse::BrowseTarget;
use crate::catalog::CatalogError;
use crate::track::TrackId;

/// Contract violations reported synchronously by list operations.
/// A failed operation leaves the list unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    #[error("list was already attached to a browse source")]
    AlreadyAttached,

    #[error("browse events for {0} were already taken")]
    SourceConsumed(BrowseTarget),

    #[error("cannot move rows {indices:?} to {to_index} in a list of {len}")]
    InvalidRange {
        indices: Vec<usize>,
        to_index: usize,
        len: usize,
    },

    #[error("drop did not originate from this list")]
    ForeignDrop,
}

/// A failed browse, with the tracks merged before the failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("browse failed after {count} tracks: {error}", count = .partial.len())]
pub struct BrowseFailure {
    #[source]
    pub error: CatalogError,
    pub partial: Vec<TrackId>,
}
