use crate::backend::Backend;
use crate::inflight::InFlightSet;
use crate::page::Page;
use std::{path::PathBuf, sync::Arc, time::Duration};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub page: Arc<Mutex<Page>>,
    pub backend: Arc<dyn Backend>,
    pub in_flight: InFlightSet,
    pub prefs_path: PathBuf,
    pub alert_ttl: Duration,
}

impl AppState {
    pub fn new(
        page: Page,
        backend: Arc<dyn Backend>,
        prefs_path: PathBuf,
        alert_ttl: Duration,
    ) -> Self {
        Self {
            page: Arc::new(Mutex::new(page)),
            backend,
            in_flight: InFlightSet::default(),
            prefs_path,
            alert_ttl,
        }
    }
}
