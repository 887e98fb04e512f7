use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use crate::catalog::{CatalogError, TrackPage};

use super::{BrowseEvent, BrowseTarget};

/// Run a browse on its own thread.
///
/// `fetch_details` runs first; then `fetch_page` is called with increasing
/// offsets until the catalog reports the last page. Each page is announced
/// with `Loading` and delivered with `Progress`. The worker exits after the
/// final page, after the first error, or as soon as nobody is listening.
pub(super) fn spawn_browse_worker<D, P>(
    target: BrowseTarget,
    fetch_details: D,
    mut fetch_page: P,
    events: Sender<BrowseEvent>,
) -> JoinHandle<()>
where
    D: FnOnce() -> Result<(), CatalogError> + Send + 'static,
    P: FnMut(usize) -> Result<TrackPage, CatalogError> + Send + 'static,
{
    thread::spawn(move || {
        if let Err(e) = fetch_details() {
            log::warn!("{target}: details failed: {e}");
            let _ = events.send(BrowseEvent::Failed(e));
            return;
        }

        let mut offset = 0;
        loop {
            if events.send(BrowseEvent::Loading).is_err() {
                log::debug!("{target}: browse cancelled at offset {offset}");
                return;
            }

            let page = match fetch_page(offset) {
                Ok(page) => page,
                Err(e) => {
                    log::warn!("{target}: page at offset {offset} failed: {e}");
                    let _ = events.send(BrowseEvent::Failed(e));
                    return;
                }
            };

            if let Some(next) = page.next_offset.filter(|&next| next <= offset) {
                let _ = events.send(BrowseEvent::Failed(CatalogError::StalledPaging {
                    offset,
                    next,
                }));
                return;
            }

            let is_final = page.next_offset.is_none();
            let tracks = page.tracks.into_iter().map(Arc::new).collect();
            if events.send(BrowseEvent::Progress { tracks, is_final }).is_err() {
                log::debug!("{target}: browse cancelled at offset {offset}");
                return;
            }

            match page.next_offset {
                Some(next) => offset = next,
                None => {
                    log::debug!("{target}: browse complete");
                    return;
                }
            }
        }
    })
}
