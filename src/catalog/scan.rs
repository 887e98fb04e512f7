//! Build a `MemoryCatalog` from a directory of audio files.
//!
//! Tracks are grouped into albums by their album tag (falling back to the
//! parent directory name) and album artist. A cover image sitting next to
//! an album's files is picked up as its cover reference.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::ItemKey;
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::track::Track;

use super::{AlbumInfo, MemoryCatalog};

const COVER_STEMS: &[&str] = &["cover", "folder", "front", "album"];
const COVER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

struct ScannedTrack {
    track: Track,
    album: String,
    album_artist: Option<String>,
}

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn non_empty(s: Option<impl AsRef<str>>) -> Option<String> {
    s.map(|v| v.as_ref().trim().to_string())
        .filter(|v| !v.is_empty())
}

fn read_track(path: &Path) -> ScannedTrack {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();

    let mut track = Track::new(path.to_string_lossy(), stem);
    track.path = Some(path.to_path_buf());

    let mut album: Option<String> = None;
    let mut album_artist: Option<String> = None;

    match Probe::open(path).and_then(|p| p.read()) {
        Ok(tagged) => {
            track.duration = Some(tagged.properties().duration());

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(title) = non_empty(tag.title()) {
                    track.title = title;
                }
                track.artist = non_empty(tag.artist());
                track.track_number = tag.track();
                track.disc_number = tag.disk();
                album = non_empty(tag.album());
                album_artist = non_empty(
                    tag.get(ItemKey::AlbumArtist)
                        .and_then(|item| item.value().text()),
                );
            }
        }
        Err(e) => log::debug!("no readable tags in {}: {e}", path.display()),
    }

    let album = album
        .or_else(|| {
            path.parent()
                .and_then(|p| p.file_name())
                .and_then(|s| s.to_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "Unknown Album".to_string());
    let album_artist = album_artist.or_else(|| track.artist.clone());

    ScannedTrack {
        track,
        album,
        album_artist,
    }
}

fn find_cover(dir: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    let mut candidates: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| {
            let stem = p.file_stem().and_then(|s| s.to_str()).map(str::to_ascii_lowercase);
            let ext = p.extension().and_then(|s| s.to_str()).map(str::to_ascii_lowercase);
            matches!(
                (stem, ext),
                (Some(stem), Some(ext))
                    if COVER_STEMS.contains(&stem.as_str())
                        && COVER_EXTENSIONS.contains(&ext.as_str())
            )
        })
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

pub fn scan(dir: &Path, settings: &LibrarySettings) -> MemoryCatalog {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut paths: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .map(|e| e.into_path())
        .filter(|p| {
            p.is_file() && (settings.include_hidden || !is_hidden(p)) && is_audio_file(p, settings)
        })
        .collect();
    paths.sort();

    // (album artist, album) -> position in `albums`, keeps first-seen order.
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut albums: Vec<(AlbumInfo, Vec<Track>)> = Vec::new();

    for path in &paths {
        let scanned = read_track(path);
        let key = (
            scanned.album_artist.as_deref().unwrap_or("").to_lowercase(),
            scanned.album.to_lowercase(),
        );

        let slot = *index.entry(key).or_insert_with(|| {
            let cover = path.parent().and_then(find_cover);
            albums.push((
                AlbumInfo {
                    title: scanned.album.clone(),
                    artist: scanned.album_artist.clone(),
                    year: None,
                    cover,
                },
                Vec::new(),
            ));
            albums.len() - 1
        });
        albums[slot].1.push(scanned.track);
    }

    let mut catalog = MemoryCatalog::new();
    for (info, tracks) in albums {
        catalog.add_album(info, tracks);
    }

    log::info!(
        "scanned {}: {} tracks in {} albums",
        dir.display(),
        catalog.track_count(),
        catalog.album_titles().len()
    );

    catalog
}
