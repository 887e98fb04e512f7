use std::fs;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use tracklist::browse::BrowseTarget;
use tracklist::catalog::fixture;
use tracklist::config::{ListSettings, Settings, SortSetting};
use tracklist::list::{SortField, SortMode, SortOrder};

use super::event_loop::handle_key_event;
use super::startup::{Invocation, build_catalog, initial_sort_mode};
use super::{HostState, OpenView};

const CATALOG: &str = r#"
[[album]]
title = "Blue"
artist = "Joni Mitchell"
year = 1971

  [[album.track]]
  title = "All I Want"
  number = 1

  [[album.track]]
  title = "My Old Man"
  number = 2

  [[album.track]]
  title = "Little Green"
  number = 3

  [[album.track]]
  title = "Carey"
  number = 4
"#;

fn args(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn open_blue() -> (OpenView, HostState) {
    let catalog = fixture::from_toml_str(CATALOG).unwrap();
    let mut view = OpenView::open(
        Arc::new(catalog),
        &BrowseTarget::Album("Blue".into()),
        &Settings::default(),
    )
    .unwrap();
    let mut state = HostState::new(&mut view, SortOrder::Ascending);

    let deadline = Instant::now() + Duration::from_secs(5);
    while !view.list().browse_state().is_terminal() && Instant::now() < deadline {
        view.pump();
        thread::sleep(Duration::from_millis(2));
    }
    state.sync(&view);
    (view, state)
}

fn titles(view: &OpenView) -> Vec<String> {
    view.list()
        .entries()
        .iter()
        .map(|e| e.track().title.clone())
        .collect()
}

#[test]
fn invocation_joins_the_name_words() {
    let inv = Invocation::parse(args(&["lib.toml", "artist", "Joni", "Mitchell"])).unwrap();
    assert_eq!(inv.source.to_str(), Some("lib.toml"));
    assert_eq!(inv.target, BrowseTarget::Artist("Joni Mitchell".into()));

    let inv = Invocation::parse(args(&["~/Music", "ALBUM", "Blue"])).unwrap();
    assert_eq!(inv.target, BrowseTarget::Album("Blue".into()));
}

#[test]
fn invocation_rejects_incomplete_or_unknown_kinds() {
    assert!(Invocation::parse(args(&["lib.toml"])).is_err());
    assert!(Invocation::parse(args(&["lib.toml", "album"])).is_err());
    let err = Invocation::parse(args(&["lib.toml", "playlist", "x"])).unwrap_err();
    assert!(err.to_string().contains("playlist"));
}

#[test]
fn initial_sort_mode_follows_list_settings() {
    let mut settings = ListSettings::default();
    assert_eq!(initial_sort_mode(&settings), SortMode::Natural);

    settings.default_sort = SortSetting::Duration;
    settings.descending = true;
    assert_eq!(
        initial_sort_mode(&settings),
        SortMode::Field(SortField::Duration, SortOrder::Descending)
    );
}

#[test]
fn catalog_source_is_a_fixture_or_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lib.toml");
    fs::write(&path, CATALOG).unwrap();

    let catalog = build_catalog(&path, &Settings::default()).unwrap();
    assert_eq!(catalog.track_count(), 4);
    assert_eq!(catalog.latency(), Duration::from_millis(150));

    let scanned = build_catalog(dir.path(), &Settings::default()).unwrap();
    assert_eq!(scanned.track_count(), 0);

    assert!(build_catalog(&dir.path().join("missing"), &Settings::default()).is_err());
}

#[test]
fn grab_and_drop_moves_the_selection_above_the_cursor() {
    let (mut view, mut state) = open_blue();
    assert_eq!(titles(&view)[0], "All I Want");

    handle_key_event(key(' '), &mut view, &mut state);
    handle_key_event(key('j'), &mut view, &mut state);
    handle_key_event(key(' '), &mut view, &mut state);
    handle_key_event(key('m'), &mut view, &mut state);
    assert!(state.grabbed.is_some());

    handle_key_event(key('j'), &mut view, &mut state);
    handle_key_event(key('j'), &mut view, &mut state);
    assert_eq!(state.cursor, 3);
    handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &mut view, &mut state);

    assert_eq!(
        titles(&view),
        vec!["Little Green", "All I Want", "My Old Man", "Carey"]
    );
    assert_eq!(view.list().sort_mode(), SortMode::Custom);
    assert_eq!(state.cursor, 1);
    assert!(state.grabbed.is_none());
}

#[test]
fn export_fills_the_playlist_pane() {
    let (mut view, mut state) = open_blue();
    handle_key_event(key('a'), &mut view, &mut state);
    handle_key_event(key('y'), &mut view, &mut state);
    assert_eq!(state.playlist.len(), 4);

    handle_key_event(key('i'), &mut view, &mut state);
    handle_key_event(key('y'), &mut view, &mut state);
    assert_eq!(state.playlist.len(), 4);
}

#[test]
fn sort_keys_cycle_and_reverse() {
    let (mut view, mut state) = open_blue();
    handle_key_event(key('s'), &mut view, &mut state);
    assert_eq!(view.list().sort_mode(), SortMode::Custom);
    handle_key_event(key('s'), &mut view, &mut state);
    assert_eq!(
        view.list().sort_mode(),
        SortMode::Field(SortField::Title, SortOrder::Ascending)
    );
    assert_eq!(titles(&view)[0], "All I Want");

    handle_key_event(key('r'), &mut view, &mut state);
    assert_eq!(titles(&view)[0], "My Old Man");
    assert_eq!(state.order, SortOrder::Descending);

    // The cursor stays on its track through the reorder.
    state.sync(&view);
    assert_eq!(
        view.list().get(state.cursor).map(|e| e.track().title.as_str()),
        Some("All I Want")
    );
}

#[test]
fn quit_and_cancel_keys() {
    let (mut view, mut state) = open_blue();
    handle_key_event(key(' '), &mut view, &mut state);
    handle_key_event(key('m'), &mut view, &mut state);
    handle_key_event(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), &mut view, &mut state);
    assert!(state.grabbed.is_none());

    assert!(handle_key_event(key('q'), &mut view, &mut state));
}
