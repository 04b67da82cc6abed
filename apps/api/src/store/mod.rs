//! The document store: one `CvData`, the editor's UI state, and persistence.
//!
//! Mutations are synchronous. Each one replaces only the touched branch of
//! the document (entities sit behind `Arc`) and publishes the new snapshot to
//! every subscriber. Persistence is one of those subscribers: the writer task
//! from [`CvStore::spawn_persistence`] saves snapshots off the request path.
//! Storage failures are logged and otherwise ignored; the in-memory document
//! stays authoritative.

pub mod dispatch;
pub mod handlers;
pub mod image;
pub mod ui;

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::models::{
    initial_cv_data, CvData, DesignPatch, Entity, Patch, PersonalInfoPatch, SectionKey,
    SectionPatch,
};
use crate::persistence::writer::persist_updates;
use crate::persistence::{load_cv_data, LoadOutcome, StateStorage};

pub use ui::{EditorPanel, UiState};

pub struct CvStore {
    data: Arc<CvData>,
    ui: UiState,
    storage: Arc<dyn StateStorage>,
    updates: watch::Sender<Arc<CvData>>,
    load_outcome: LoadOutcome,
}

impl CvStore {
    /// Opens a store over `storage`, restoring (or migrating) whatever it holds.
    ///
    /// Reads the backend synchronously; call it from a blocking context.
    pub fn new(storage: Arc<dyn StateStorage>) -> Self {
        let (cv, load_outcome) = load_cv_data(storage.as_ref());
        let data = Arc::new(cv);
        let (updates, _) = watch::channel(Arc::clone(&data));
        Self {
            data,
            ui: UiState::default(),
            storage,
            updates,
            load_outcome,
        }
    }

    /// A store with nothing persisted outside the process.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(crate::persistence::MemoryStorage::new()))
    }

    pub fn cv_data(&self) -> &CvData {
        &self.data
    }

    /// Cheap handle on the current document.
    pub fn snapshot(&self) -> Arc<CvData> {
        Arc::clone(&self.data)
    }

    pub fn ui(&self) -> UiState {
        self.ui
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    /// Receives every document snapshot published after a mutation.
    pub fn subscribe(&self) -> watch::Receiver<Arc<CvData>> {
        self.updates.subscribe()
    }

    /// Starts the task that saves published snapshots to the backend.
    ///
    /// The task ends once the store is dropped and the last snapshot is written.
    pub fn spawn_persistence(&self) -> JoinHandle<()> {
        tokio::spawn(persist_updates(Arc::clone(&self.storage), self.subscribe()))
    }

    // ── collections ─────────────────────────────────────────────────────────

    /// Appends a default entity to `E`'s collection and returns a copy of it.
    pub fn add<E: Entity>(&mut self) -> E {
        self.mutate(|cv| E::collection_mut(cv).add().clone())
    }

    /// Merges `patch` into the entity with `id`. Unknown ids change nothing.
    pub fn update<E: Entity>(&mut self, id: &str, patch: E::Patch) -> bool {
        self.update_with::<E>(id, |entity| patch.apply(entity))
    }

    pub fn update_with<E: Entity>(&mut self, id: &str, f: impl FnOnce(&mut E)) -> bool {
        if !E::collection(&self.data).contains(id) {
            debug!(section = %E::SECTION, id, "Update for unknown entity ignored");
            return false;
        }
        self.mutate(|cv| E::collection_mut(cv).update_with(id, f))
    }

    /// Removes the entity with `id`. Unknown ids change nothing.
    pub fn remove<E: Entity>(&mut self, id: &str) -> bool {
        if !E::collection(&self.data).contains(id) {
            debug!(section = %E::SECTION, id, "Remove for unknown entity ignored");
            return false;
        }
        self.mutate(|cv| E::collection_mut(cv).remove(id))
    }

    // ── singletons ──────────────────────────────────────────────────────────

    pub fn update_personal_info(&mut self, patch: PersonalInfoPatch) {
        self.mutate(|cv| cv.update_personal_info(patch));
    }

    pub fn update_design(&mut self, patch: DesignPatch) {
        self.mutate(|cv| cv.update_design(patch));
    }

    pub fn update_section(&mut self, key: SectionKey, patch: SectionPatch) {
        self.mutate(|cv| cv.sections.update(key, patch));
    }

    /// Stores an already-encoded `data:` URL as the profile image.
    pub fn set_profile_image(&mut self, data_url: String) {
        self.mutate(|cv| cv.personal_info.profile_image = Some(data_url));
    }

    pub fn clear_profile_image(&mut self) {
        if self.data.personal_info.profile_image.is_some() {
            self.mutate(|cv| cv.personal_info.profile_image = None);
        }
    }

    /// Replaces the document with the initial defaults. UI state is kept.
    pub fn reset(&mut self) {
        self.data = Arc::new(initial_cv_data());
        self.commit();
    }

    // ── UI state ────────────────────────────────────────────────────────────

    pub fn set_active_section(&mut self, panel: Option<EditorPanel>) {
        self.ui.active_section = panel;
    }

    /// Flips preview mode and returns the new value.
    pub fn toggle_preview_mode(&mut self) -> bool {
        self.ui.is_preview_mode = !self.ui.is_preview_mode;
        self.ui.is_preview_mode
    }

    // ── internals ───────────────────────────────────────────────────────────

    fn mutate<R>(&mut self, f: impl FnOnce(&mut CvData) -> R) -> R {
        let result = f(Arc::make_mut(&mut self.data));
        self.commit();
        result
    }

    fn commit(&mut self) {
        self.updates.send_replace(Arc::clone(&self.data));
    }
}
