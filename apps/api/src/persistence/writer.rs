//! Background persistence: saves every published snapshot off the request path.
//!
//! Snapshots arrive through the store's watch channel, so a burst of edits
//! collapses into one write of the newest document. The backend call runs on
//! the blocking pool; the store lock is never held while it runs.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::models::CvData;
use crate::persistence::{save_cv_data, StateStorage};

/// Runs until the store (the sending side) is dropped, after writing the last
/// snapshot it published.
pub async fn persist_updates(
    storage: Arc<dyn StateStorage>,
    mut updates: watch::Receiver<Arc<CvData>>,
) {
    while updates.changed().await.is_ok() {
        let snapshot = updates.borrow_and_update().clone();
        let backend = Arc::clone(&storage);
        let saved =
            tokio::task::spawn_blocking(move || save_cv_data(backend.as_ref(), &snapshot)).await;
        match saved {
            Ok(Ok(())) => debug!(backend = storage.name(), "CV persisted"),
            Ok(Err(e)) => warn!(backend = storage.name(), "Failed to persist CV: {e}"),
            Err(e) => warn!(backend = storage.name(), "Persistence task did not finish: {e}"),
        }
    }
    debug!(backend = storage.name(), "Store closed, persistence writer stopped");
}
