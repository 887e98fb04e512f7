use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};

use tracklist::browse::BrowseTarget;
use tracklist::catalog::{Catalog, MemoryCatalog, fixture, scan};
use tracklist::config::{self, SortSetting};
use tracklist::list::{SortField, SortMode, SortOrder, SortableTrackList};
use tracklist::view::{AlbumView, ArtistView};

pub const USAGE: &str = "usage: tracklist <catalog.toml | music-dir> (album|artist) <name>";

/// Command line: where the catalog comes from and what to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub source: PathBuf,
    pub target: BrowseTarget,
}

impl Invocation {
    /// Parse the arguments after the program name. Words after the kind are
    /// joined into the name, so quoting is optional.
    pub fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut args = args.into_iter();
        let (Some(source), Some(kind)) = (args.next(), args.next()) else {
            bail!(USAGE);
        };
        let name = args.collect::<Vec<_>>().join(" ");
        if name.trim().is_empty() {
            bail!(USAGE);
        }

        let target = match kind.to_ascii_lowercase().as_str() {
            "album" => BrowseTarget::Album(name),
            "artist" => BrowseTarget::Artist(name),
            other => bail!("unknown view kind {other:?}\n{USAGE}"),
        };

        Ok(Self {
            source: PathBuf::from(source),
            target,
        })
    }
}

pub fn initial_sort_order(settings: &config::ListSettings) -> SortOrder {
    if settings.descending {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    }
}

pub fn initial_sort_mode(settings: &config::ListSettings) -> SortMode {
    let order = initial_sort_order(settings);
    match settings.default_sort {
        SortSetting::Natural => SortMode::Natural,
        SortSetting::Custom => SortMode::Custom,
        SortSetting::Title => SortMode::Field(SortField::Title, order),
        SortSetting::Artist => SortMode::Field(SortField::Artist, order),
        SortSetting::Album => SortMode::Field(SortField::Album, order),
        SortSetting::Duration => SortMode::Field(SortField::Duration, order),
        SortSetting::TrackNumber => SortMode::Field(SortField::TrackNumber, order),
    }
}

/// A `.toml` source is a catalog fixture; anything else is scanned as a
/// music directory.
pub fn build_catalog(source: &Path, settings: &config::Settings) -> anyhow::Result<MemoryCatalog> {
    let is_fixture = source
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

    let catalog = if is_fixture {
        fixture::load(source)
            .with_context(|| format!("loading catalog fixture {}", source.display()))?
    } else {
        if !source.is_dir() {
            bail!("{} is neither a catalog fixture nor a directory", source.display());
        }
        scan::scan(source, &settings.library)
    };

    Ok(catalog.with_latency(Duration::from_millis(settings.browse.latency_ms)))
}

/// The detail view the host is showing.
pub enum OpenView {
    Album(AlbumView),
    Artist(ArtistView),
}

impl OpenView {
    pub fn open(
        catalog: Arc<dyn Catalog>,
        target: &BrowseTarget,
        settings: &config::Settings,
    ) -> anyhow::Result<Self> {
        let page_size = settings.browse.page_size;
        let sort_mode = initial_sort_mode(&settings.list);
        let view = match target {
            BrowseTarget::Album(title) => Self::Album(
                AlbumView::open_album(catalog, title, page_size, sort_mode)
                    .with_context(|| format!("opening {target}"))?,
            ),
            BrowseTarget::Artist(name) => Self::Artist(
                ArtistView::open_artist(catalog, name, page_size, sort_mode)
                    .with_context(|| format!("opening {target}"))?,
            ),
        };
        Ok(view)
    }

    pub fn list(&self) -> &SortableTrackList {
        match self {
            Self::Album(v) => v.list(),
            Self::Artist(v) => v.list(),
        }
    }

    pub fn list_mut(&mut self) -> &mut SortableTrackList {
        match self {
            Self::Album(v) => v.list_mut(),
            Self::Artist(v) => v.list_mut(),
        }
    }

    pub fn pump(&mut self) -> usize {
        match self {
            Self::Album(v) => v.pump(),
            Self::Artist(v) => v.pump(),
        }
    }

    pub fn dismiss(&mut self) {
        match self {
            Self::Album(v) => v.dismiss(),
            Self::Artist(v) => v.dismiss(),
        }
    }

    pub fn title(&self) -> String {
        match self {
            Self::Album(v) => v.album_title(),
            Self::Artist(v) => v.artist_name(),
        }
    }

    /// Read-only detail lines for the details pane.
    pub fn detail_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        match self {
            Self::Album(v) => {
                if let Some(artist) = v.artist_link() {
                    lines.push(format!("Artist: {artist}"));
                }
                if let Some(year) = v.year() {
                    lines.push(format!("Year: {year}"));
                }
                if let Some(cover) = v.cover() {
                    lines.push(format!("Cover: {}", cover.display()));
                }
            }
            Self::Artist(v) => {
                let albums = v.albums();
                if !albums.is_empty() {
                    lines.push(format!("Albums: {}", albums.join(", ")));
                }
                if let Some(bio) = v.biography() {
                    lines.push(bio);
                }
                if let Some(portrait) = v.portrait() {
                    lines.push(format!("Portrait: {}", portrait.display()));
                }
            }
        }
        lines
    }
}
