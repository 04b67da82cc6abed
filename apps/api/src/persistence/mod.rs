//! Durable storage for the CV document.
//!
//! The store writes one namespaced record per session:
//!
//! ```text
//! key:   "cv-builder-storage"
//! value: { "version": <u32>, "state": { "cvData": CvData } }
//! ```
//!
//! Only `cvData` is persisted. Reads never fail from the caller's point of
//! view: unreadable, corrupt or unmigratable payloads degrade to defaults.

pub mod file;
pub mod memory;
pub mod migrations;
pub mod redis_backend;
pub mod writer;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{initial_cv_data, CvData};
use migrations::{migrate, MigrationOutcome, CURRENT_VERSION};

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use redis_backend::RedisStorage;

pub const STORAGE_KEY: &str = "cv-builder-storage";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A string key-value store, shaped like browser local storage.
pub trait StateStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Backend name for logs.
    fn name(&self) -> &'static str;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersistedStateRef<'a> {
    cv_data: &'a CvData,
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    state: PersistedStateRef<'a>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState {
    cv_data: CvData,
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    version: u32,
    state: Value,
}

/// How the document in a freshly opened store came to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored yet.
    Fresh,
    /// Stored payload applied as-is.
    Restored,
    /// Stored payload upgraded from an older version.
    Migrated { from: u32 },
    /// Stored payload thrown away; defaults in use.
    Discarded { reason: String },
}

/// Serializes `cv` into the versioned envelope.
pub fn serialize_state(cv: &CvData) -> Result<String, StorageError> {
    Ok(serde_json::to_string(&EnvelopeRef {
        version: CURRENT_VERSION,
        state: PersistedStateRef { cv_data: cv },
    })?)
}

/// Parses a stored envelope, migrating older versions.
pub fn deserialize_state(raw: &str) -> (CvData, LoadOutcome) {
    let envelope: RawEnvelope = match serde_json::from_str(raw) {
        Ok(envelope) => envelope,
        Err(e) => return discarded(format!("unreadable envelope: {e}")),
    };

    let (state, outcome) = match migrate(envelope.version, envelope.state) {
        MigrationOutcome::Current(state) => (state, LoadOutcome::Restored),
        MigrationOutcome::Migrated { from, state } => (state, LoadOutcome::Migrated { from }),
        MigrationOutcome::Reset { reason, .. } => return discarded(reason),
    };

    match serde_json::from_value::<PersistedState>(state) {
        Ok(persisted) => (persisted.cv_data, outcome),
        Err(e) => discarded(format!("state does not match the document model: {e}")),
    }
}

fn discarded(reason: String) -> (CvData, LoadOutcome) {
    (initial_cv_data(), LoadOutcome::Discarded { reason })
}

/// Reads the document from `storage`, falling back to defaults on any failure.
pub fn load_cv_data(storage: &dyn StateStorage) -> (CvData, LoadOutcome) {
    let raw = match storage.get_item(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return (initial_cv_data(), LoadOutcome::Fresh),
        Err(e) => {
            warn!(backend = storage.name(), "Failed to read persisted CV: {e}");
            return discarded(format!("storage read failed: {e}"));
        }
    };

    let (cv, outcome) = deserialize_state(&raw);
    match &outcome {
        LoadOutcome::Migrated { from } => {
            info!(from, to = CURRENT_VERSION, "Migrated persisted CV state")
        }
        LoadOutcome::Discarded { reason } => {
            warn!(backend = storage.name(), "Discarded persisted CV state: {reason}")
        }
        LoadOutcome::Fresh | LoadOutcome::Restored => {}
    }
    (cv, outcome)
}

/// Writes the document to `storage`.
pub fn save_cv_data(storage: &dyn StateStorage, cv: &CvData) -> Result<(), StorageError> {
    let raw = serialize_state(cv)?;
    storage.set_item(STORAGE_KEY, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entities::{Project, ProjectPatch, Skill, SkillLevel, SkillPatch};
    use crate::models::{Entity, SectionKey, SectionPatch, TemplateId};
    use serde_json::json;

    fn populated() -> CvData {
        let mut cv = initial_cv_data();
        cv.personal_info.first_name = "Ada".to_string();
        cv.personal_info.profile_image = Some("data:image/png;base64,iVBORw0KGgo=".to_string());
        let id = cv.skills.add().id.clone();
        cv.skills.update(
            &id,
            SkillPatch {
                name: Some("Rust".to_string()),
                level: Some(SkillLevel::Expert),
                ..Default::default()
            },
        );
        let id = Project::collection_mut(&mut cv).add().id.clone();
        cv.projects.update(
            &id,
            ProjectPatch {
                technologies: Some(vec!["Axum".to_string(), "Tokio".to_string()]),
                ..Default::default()
            },
        );
        cv.sections.update(
            SectionKey::Projects,
            SectionPatch {
                visible: Some(false),
                order: Some(42),
            },
        );
        cv.design.template = TemplateId::Creative;
        cv
    }

    #[test]
    fn test_round_trip_is_deep_equal() {
        let cv = populated();
        let raw = serialize_state(&cv).unwrap();
        let (restored, outcome) = deserialize_state(&raw);
        assert_eq!(outcome, LoadOutcome::Restored);
        assert_eq!(restored, cv);
        assert_eq!(
            restored.skills.ids().collect::<Vec<_>>(),
            cv.skills.ids().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_envelope_layout() {
        let raw = serialize_state(&initial_cv_data()).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], json!(CURRENT_VERSION));
        assert!(value["state"]["cvData"]["personalInfo"].is_object());
        assert!(value["state"].get("activeSection").is_none());
    }

    #[test]
    fn test_corrupt_payload_discards() {
        let (cv, outcome) = deserialize_state("{not json");
        assert!(matches!(outcome, LoadOutcome::Discarded { .. }));
        assert_eq!(cv, initial_cv_data());
    }

    #[test]
    fn test_unknown_version_discards() {
        let raw = json!({
            "version": 99,
            "state": { "cvData": { "personalInfo": { "firstName": "X" } } }
        });
        let (cv, outcome) = deserialize_state(&raw.to_string());
        assert!(matches!(outcome, LoadOutcome::Discarded { .. }));
        assert_eq!(cv.personal_info.first_name, "");
    }

    #[test]
    fn test_v1_payload_is_migrated() {
        let raw = json!({
            "version": 1,
            "state": { "cvData": {
                "personalInfo": { "firstName": "Lin" },
                "design": { "template": "classic", "showPhoto": false }
            } }
        });
        let (cv, outcome) = deserialize_state(&raw.to_string());
        assert_eq!(outcome, LoadOutcome::Migrated { from: 1 });
        assert_eq!(cv.personal_info.first_name, "Lin");
        assert_eq!(cv.design.template, TemplateId::Classic);
        assert!(!cv.design.show_profile_image);
    }

    #[test]
    fn test_null_template_keeps_the_rest_of_the_document() {
        let raw = json!({
            "version": CURRENT_VERSION,
            "state": { "cvData": {
                "personalInfo": { "firstName": "Grace" },
                "design": { "template": null, "color": "#112233" }
            } }
        });
        let (cv, outcome) = deserialize_state(&raw.to_string());
        assert_eq!(outcome, LoadOutcome::Restored);
        assert_eq!(cv.personal_info.first_name, "Grace");
        assert_eq!(cv.design.template, TemplateId::Modern);
        assert_eq!(cv.design.color, "#112233");

        let numeric = raw.to_string().replace("null", "7");
        let (cv, outcome) = deserialize_state(&numeric);
        assert_eq!(outcome, LoadOutcome::Restored);
        assert_eq!(cv.design.template, TemplateId::Modern);
    }

    #[test]
    fn test_partial_section_entry_keeps_the_rest_of_the_document() {
        let raw = json!({
            "version": CURRENT_VERSION,
            "state": { "cvData": {
                "skills": [{ "id": "s1", "name": "Rust", "level": "Expert" }],
                "sections": { "skills": { "visible": false } }
            } }
        });
        let (cv, outcome) = deserialize_state(&raw.to_string());
        assert_eq!(outcome, LoadOutcome::Restored);
        assert_eq!(cv.skills.get("s1").unwrap().name, "Rust");
        assert!(!cv.sections.is_visible(SectionKey::Skills));
        assert_eq!(
            cv.sections.get(SectionKey::Skills).order,
            initial_cv_data().sections.get(SectionKey::Skills).order
        );
    }

    #[test]
    fn test_load_from_empty_storage_is_fresh() {
        let storage = MemoryStorage::new();
        let (cv, outcome) = load_cv_data(&storage);
        assert_eq!(outcome, LoadOutcome::Fresh);
        assert_eq!(cv, initial_cv_data());
    }

    #[test]
    fn test_save_then_load() {
        let storage = MemoryStorage::new();
        let cv = populated();
        save_cv_data(&storage, &cv).unwrap();
        let (loaded, outcome) = load_cv_data(&storage);
        assert_eq!(outcome, LoadOutcome::Restored);
        assert_eq!(loaded, cv);
        assert_eq!(Skill::collection(&loaded).len(), 1);
    }
}
