use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::thread;
use std::time::{Duration, Instant};

use super::*;
use crate::catalog::{AlbumInfo, ArtistInfo, Catalog, CatalogError, MemoryCatalog, TrackPage};
use crate::track::Track;

fn album(title: &str, artist: &str, year: u32, count: u32) -> (AlbumInfo, Vec<Track>) {
    let info = AlbumInfo {
        title: title.into(),
        artist: Some(artist.into()),
        year: Some(year),
        cover: None,
    };
    let tracks = (1..=count)
        .map(|n| {
            let mut t = Track::new(format!("{title}-{n}"), format!("{title} {n}"));
            t.track_number = Some(n);
            t
        })
        .collect();
    (info, tracks)
}

fn catalog() -> MemoryCatalog {
    let mut catalog = MemoryCatalog::new();
    let (info, tracks) = album("Later", "Band", 2020, 2);
    catalog.add_album(info, tracks);
    let (info, tracks) = album("Debut", "Band", 2001, 3);
    catalog.add_album(info, tracks);
    catalog.set_artist_details("band", Some("Formed in a garage.".into()), None);
    catalog
}

fn collect(rx: Receiver<BrowseEvent>) -> Vec<BrowseEvent> {
    let mut out = Vec::new();
    while let Ok(event) = rx.recv_timeout(Duration::from_secs(5)) {
        out.push(event);
    }
    out
}

/// Batch sizes with their final flags, `Loading` events skipped.
fn batches(events: &[BrowseEvent]) -> Vec<(usize, bool)> {
    events
        .iter()
        .filter_map(|e| match e {
            BrowseEvent::Progress { tracks, is_final } => Some((tracks.len(), *is_final)),
            _ => None,
        })
        .collect()
}

fn wait_finished(done: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if done() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

#[test]
fn album_browse_pages_through_tracks_and_publishes_details() {
    let mut browse = AlbumBrowse::start(Arc::new(catalog()), "debut", 2);
    let events = collect(browse.take_events().unwrap());

    assert_eq!(events[0], BrowseEvent::Loading);
    assert_eq!(batches(&events), vec![(2, false), (1, true)]);
    assert_eq!(events.len(), 4);

    let details = browse.details().unwrap();
    assert_eq!(details.title, "Debut");
    assert_eq!(details.year, Some(2001));
    assert!(wait_finished(|| browse.is_finished()));
}

#[test]
fn artist_browse_lists_albums_oldest_first() {
    let mut browse = ArtistBrowse::start(Arc::new(catalog()), "Band", 10);
    assert_eq!(browse.target(), &BrowseTarget::Artist("Band".into()));

    let events = collect(browse.take_events().unwrap());
    let ids: Vec<String> = events
        .iter()
        .filter_map(|e| match e {
            BrowseEvent::Progress { tracks, .. } => Some(tracks),
            _ => None,
        })
        .flatten()
        .map(|t| t.id.to_string())
        .collect();
    assert_eq!(
        ids,
        vec!["Debut-1", "Debut-2", "Debut-3", "Later-1", "Later-2"]
    );

    let details: ArtistInfo = browse.details().unwrap();
    assert_eq!(details.albums, vec!["Debut", "Later"]);
    assert_eq!(details.biography.as_deref(), Some("Formed in a garage."));
}

#[test]
fn events_can_only_be_taken_once() {
    let mut browse = AlbumBrowse::start(Arc::new(catalog()), "Later", 5);
    assert!(browse.take_events().is_some());
    assert!(browse.take_events().is_none());
}

#[test]
fn unknown_album_fails_before_any_tracks() {
    let mut browse = AlbumBrowse::start(Arc::new(catalog()), "Missing", 5);
    let events = collect(browse.take_events().unwrap());

    assert_eq!(
        events,
        vec![BrowseEvent::Failed(CatalogError::AlbumNotFound(
            "Missing".into()
        ))]
    );
    assert!(browse.details().is_none());
}

/// Serves one good page of an album, then breaks.
struct FlakyCatalog {
    inner: MemoryCatalog,
    stall: bool,
}

impl Catalog for FlakyCatalog {
    fn album(&self, title: &str) -> Result<AlbumInfo, CatalogError> {
        self.inner.album(title)
    }

    fn album_tracks(
        &self,
        title: &str,
        offset: usize,
        limit: usize,
    ) -> Result<TrackPage, CatalogError> {
        if offset == 0 {
            let mut page = self.inner.album_tracks(title, offset, limit)?;
            if self.stall {
                page.next_offset = Some(0);
            }
            return Ok(page);
        }
        Err(CatalogError::Unavailable("connection reset".into()))
    }

    fn artist(&self, name: &str) -> Result<ArtistInfo, CatalogError> {
        self.inner.artist(name)
    }

    fn artist_tracks(
        &self,
        name: &str,
        offset: usize,
        limit: usize,
    ) -> Result<TrackPage, CatalogError> {
        self.inner.artist_tracks(name, offset, limit)
    }
}

#[test]
fn page_errors_end_the_stream_with_a_failure() {
    let catalog = FlakyCatalog {
        inner: catalog(),
        stall: false,
    };
    let mut browse = AlbumBrowse::start(Arc::new(catalog), "Debut", 2);
    let events = collect(browse.take_events().unwrap());

    assert_eq!(batches(&events), vec![(2, false)]);
    assert_eq!(
        events.last(),
        Some(&BrowseEvent::Failed(CatalogError::Unavailable(
            "connection reset".into()
        )))
    );
}

#[test]
fn a_page_that_does_not_advance_is_reported() {
    let catalog = FlakyCatalog {
        inner: catalog(),
        stall: true,
    };
    let mut browse = AlbumBrowse::start(Arc::new(catalog), "Debut", 2);
    let events = collect(browse.take_events().unwrap());

    assert_eq!(
        events,
        vec![
            BrowseEvent::Loading,
            BrowseEvent::Failed(CatalogError::StalledPaging { offset: 0, next: 0 }),
        ]
    );
}

#[test]
fn dropping_the_receiver_stops_the_worker() {
    let mut catalog = MemoryCatalog::new().with_latency(Duration::from_millis(50));
    let (info, tracks) = album("Long", "Band", 1999, 200);
    catalog.add_album(info, tracks);

    let mut browse = AlbumBrowse::start(Arc::new(catalog), "Long", 1);
    let rx = browse.take_events().unwrap();
    assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
    drop(rx);

    // Paging to the end would take ten seconds.
    assert!(wait_finished(|| browse.is_finished()));
}

#[test]
fn targets_describe_themselves() {
    let album = BrowseTarget::Album("Blue".into());
    let artist = BrowseTarget::Artist("Joni".into());
    assert_eq!(album.to_string(), "album \"Blue\"");
    assert_eq!(artist.to_string(), "artist \"Joni\"");
    assert_eq!(artist.name(), "Joni");
}
