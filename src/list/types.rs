use std::fmt;

/// Track attribute a list can be sorted by.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SortField {
    Title,
    Artist,
    Album,
    Duration,
    /// Disc number, then track number.
    TrackNumber,
}

impl SortField {
    pub const ALL: [SortField; 5] = [
        SortField::Title,
        SortField::Artist,
        SortField::Album,
        SortField::Duration,
        SortField::TrackNumber,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Artist => "artist",
            SortField::Album => "album",
            SortField::Duration => "duration",
            SortField::TrackNumber => "track number",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// How the visible ordering of a list is derived.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum SortMode {
    /// The order in which the browse source declared the tracks.
    #[default]
    Natural,
    /// The user's manual arrangement.
    Custom,
    /// Sorted by a track attribute. Ties keep Natural order.
    Field(SortField, SortOrder),
}

impl SortMode {
    /// Next mode in the `natural -> custom -> fields... -> natural` cycle.
    /// Field modes carry `order` along.
    pub fn cycled(self, order: SortOrder) -> Self {
        match self {
            SortMode::Natural => SortMode::Custom,
            SortMode::Custom => SortMode::Field(SortField::ALL[0], order),
            SortMode::Field(field, _) => SortField::ALL
                .iter()
                .position(|f| *f == field)
                .and_then(|i| SortField::ALL.get(i + 1))
                .map(|next| SortMode::Field(*next, order))
                .unwrap_or(SortMode::Natural),
        }
    }

    /// Same field with the direction flipped; other modes are unchanged.
    pub fn reversed(self) -> Self {
        match self {
            SortMode::Field(field, order) => SortMode::Field(field, order.flipped()),
            other => other,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Natural => f.write_str("natural"),
            SortMode::Custom => f.write_str("custom"),
            SortMode::Field(field, SortOrder::Ascending) => write!(f, "{} ↑", field.label()),
            SortMode::Field(field, SortOrder::Descending) => write!(f, "{} ↓", field.label()),
        }
    }
}

/// Loading lifecycle of the browse source feeding a list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum BrowseState {
    #[default]
    NotStarted,
    Loading,
    PartiallyLoaded,
    Loaded,
    Failed,
}

impl BrowseState {
    /// Loaded and Failed accept no further events.
    pub fn is_terminal(self) -> bool {
        matches!(self, BrowseState::Loaded | BrowseState::Failed)
    }
}

impl fmt::Display for BrowseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BrowseState::NotStarted => "not started",
            BrowseState::Loading => "loading",
            BrowseState::PartiallyLoaded => "partially loaded",
            BrowseState::Loaded => "loaded",
            BrowseState::Failed => "failed",
        };
        f.write_str(s)
    }
}
