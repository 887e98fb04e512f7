use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::catalog::{ArtistInfo, Catalog};

use super::worker::spawn_browse_worker;
use super::{BrowseEvent, BrowseSource, BrowseTarget, DetailsHandle};

/// Browse of an artist: biography and discography, then every track album
/// by album.
pub struct ArtistBrowse {
    target: BrowseTarget,
    details: DetailsHandle<ArtistInfo>,
    events: Option<Receiver<BrowseEvent>>,
    worker: JoinHandle<()>,
}

impl ArtistBrowse {
    pub fn start(catalog: Arc<dyn Catalog>, name: impl Into<String>, page_size: usize) -> Self {
        let name = name.into();
        let target = BrowseTarget::Artist(name.clone());
        let details: DetailsHandle<ArtistInfo> = Arc::new(Mutex::new(None));
        let page_size = page_size.max(1);
        let (tx, rx) = mpsc::channel();

        let fetch_details = {
            let catalog = catalog.clone();
            let name = name.clone();
            let details = details.clone();
            move || {
                let info = catalog.artist(&name)?;
                if let Ok(mut d) = details.lock() {
                    *d = Some(info);
                }
                Ok(())
            }
        };
        let fetch_page = move |offset| catalog.artist_tracks(&name, offset, page_size);

        let worker = spawn_browse_worker(target.clone(), fetch_details, fetch_page, tx);

        Self {
            target,
            details,
            events: Some(rx),
            worker,
        }
    }

    pub fn details(&self) -> Option<ArtistInfo> {
        self.details.lock().ok().and_then(|d| d.clone())
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }
}

impl BrowseSource for ArtistBrowse {
    fn target(&self) -> &BrowseTarget {
        &self.target
    }

    fn take_events(&mut self) -> Option<Receiver<BrowseEvent>> {
        self.events.take()
    }
}
