use std::sync::Arc;

use parking_lot::Mutex;

use crate::export::Exporter;
use crate::store::CvStore;

/// The single document store. Handlers lock it, mutate synchronously and
/// release it before any `.await`.
pub type SharedStore = Arc<Mutex<CvStore>>;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    /// Where `POST /api/v1/export` hands rendered documents.
    pub exporter: Arc<dyn Exporter>,
}

impl AppState {
    pub fn new(store: CvStore, exporter: Arc<dyn Exporter>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            exporter,
        }
    }
}
