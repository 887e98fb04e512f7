use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::catalog::{AlbumInfo, Catalog};

use super::worker::spawn_browse_worker;
use super::{BrowseEvent, BrowseSource, BrowseTarget, DetailsHandle};

/// Browse of one album: its details, then its tracks in disc/track order.
pub struct AlbumBrowse {
    target: BrowseTarget,
    details: DetailsHandle<AlbumInfo>,
    events: Option<Receiver<BrowseEvent>>,
    worker: JoinHandle<()>,
}

impl AlbumBrowse {
    pub fn start(catalog: Arc<dyn Catalog>, title: impl Into<String>, page_size: usize) -> Self {
        let title = title.into();
        let target = BrowseTarget::Album(title.clone());
        let details: DetailsHandle<AlbumInfo> = Arc::new(Mutex::new(None));
        let page_size = page_size.max(1);
        let (tx, rx) = mpsc::channel();

        let fetch_details = {
            let catalog = catalog.clone();
            let title = title.clone();
            let details = details.clone();
            move || {
                let info = catalog.album(&title)?;
                if let Ok(mut d) = details.lock() {
                    *d = Some(info);
                }
                Ok(())
            }
        };
        let fetch_page = move |offset| catalog.album_tracks(&title, offset, page_size);

        let worker = spawn_browse_worker(target.clone(), fetch_details, fetch_page, tx);

        Self {
            target,
            details,
            events: Some(rx),
            worker,
        }
    }

    /// Album details, once the worker has fetched them.
    pub fn details(&self) -> Option<AlbumInfo> {
        self.details.lock().ok().and_then(|d| d.clone())
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }
}

impl BrowseSource for AlbumBrowse {
    fn target(&self) -> &BrowseTarget {
        &self.target
    }

    fn take_events(&mut self) -> Option<Receiver<BrowseEvent>> {
        self.events.take()
    }
}
