use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tracklist/config.toml` or `~/.config/tracklist/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TRACKLIST__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub browse: BrowseSettings,
    pub list: ListSettings,
    pub ui: UiSettings,
    pub library: LibrarySettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowseSettings {
    /// Number of tracks requested from the catalog per page.
    pub page_size: usize,
    /// Simulated round-trip latency of the local catalog (milliseconds).
    /// Set to 0 to answer immediately.
    pub latency_ms: u64,
}

impl Default for BrowseSettings {
    fn default() -> Self {
        Self {
            page_size: 25,
            latency_ms: 150,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListSettings {
    /// Sort mode a freshly opened list starts in.
    pub default_sort: SortSetting,
    /// Whether field sorts start descending.
    pub descending: bool,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            default_sort: SortSetting::Natural,
            descending: false,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortSetting {
    #[serde(alias = "source", alias = "album-order")]
    Natural,
    #[serde(alias = "manual")]
    Custom,
    #[serde(alias = "name")]
    Title,
    Artist,
    Album,
    #[serde(alias = "length", alias = "time")]
    Duration,
    #[serde(alias = "track_number", alias = "number", alias = "track")]
    TrackNumber,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,

    /// Which track fields make up a row, and in what order.
    ///
    /// Example: ["number", "artist", "title"]
    pub display_fields: Vec<TrackField>,

    /// Separator used to join `display_fields`.
    pub display_separator: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ drag it, drop it, keep it ~ ".to_string(),
            display_fields: vec![TrackField::Number, TrackField::Artist, TrackField::Title],
            display_separator: " - ".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackField {
    Title,
    Artist,
    Album,
    /// Disc/track number, e.g. `07` or `2-07`.
    Number,
    Filename,
    Path,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}
