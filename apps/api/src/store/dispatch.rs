//! Runtime dispatch from a `SectionKey` to the typed store operations.

use serde_json::Value;

use crate::models::CvData;
use crate::store::CvStore;

/// Runs `$body` with `$entity` bound to the entity type behind `$key`.
macro_rules! with_entity {
    ($key:expr, $entity:ident => $body:expr) => {{
        use $crate::models::entities::*;
        use $crate::models::SectionKey;
        match $key {
            SectionKey::WorkExperience => {
                type $entity = WorkExperience;
                $body
            }
            SectionKey::Education => {
                type $entity = Education;
                $body
            }
            SectionKey::Skills => {
                type $entity = Skill;
                $body
            }
            SectionKey::Projects => {
                type $entity = Project;
                $body
            }
            SectionKey::Certifications => {
                type $entity = Certification;
                $body
            }
            SectionKey::Languages => {
                type $entity = Language;
                $body
            }
            SectionKey::Publications => {
                type $entity = Publication;
                $body
            }
            SectionKey::Awards => {
                type $entity = Award;
                $body
            }
            SectionKey::Volunteering => {
                type $entity = Volunteering;
                $body
            }
            SectionKey::References => {
                type $entity = Reference;
                $body
            }
            SectionKey::Hobbies => {
                type $entity = Hobby;
                $body
            }
        }
    }};
}

pub(crate) use with_entity;

use crate::models::SectionKey;

/// Appends a default entity to `key`'s collection; returns it as JSON.
pub fn add_by_key(store: &mut CvStore, key: SectionKey) -> Result<Value, serde_json::Error> {
    with_entity!(key, E => serde_json::to_value(store.add::<E>()))
}

/// Applies a JSON patch (camelCase fields, all optional) to one entity.
///
/// Returns `Ok(false)` for an unknown id. A patch whose fields have the wrong
/// types is rejected before the store is touched.
pub fn update_by_key(
    store: &mut CvStore,
    key: SectionKey,
    id: &str,
    patch: Value,
) -> Result<bool, serde_json::Error> {
    with_entity!(key, E => {
        let patch: <E as Entity>::Patch = serde_json::from_value(patch)?;
        Ok(store.update::<E>(id, patch))
    })
}

pub fn remove_by_key(store: &mut CvStore, key: SectionKey, id: &str) -> bool {
    with_entity!(key, E => store.remove::<E>(id))
}

/// One entity as a JSON object, if `id` exists in `key`'s collection.
pub fn entity_json(cv: &CvData, key: SectionKey, id: &str) -> Option<Value> {
    with_entity!(key, E => E::collection(cv).get(id).and_then(|e| serde_json::to_value(e).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_update_remove_by_key() {
        let mut store = CvStore::in_memory();
        let added = add_by_key(&mut store, SectionKey::Skills).unwrap();
        assert_eq!(added["level"], "Beginner");
        let id = added["id"].as_str().unwrap().to_string();

        let changed = update_by_key(
            &mut store,
            SectionKey::Skills,
            &id,
            json!({ "name": "Rust", "level": "Expert" }),
        )
        .unwrap();
        assert!(changed);
        let skill = entity_json(store.cv_data(), SectionKey::Skills, &id).unwrap();
        assert_eq!(skill["name"], "Rust");
        assert_eq!(skill["level"], "Expert");

        assert!(remove_by_key(&mut store, SectionKey::Skills, &id));
        assert!(!remove_by_key(&mut store, SectionKey::Skills, &id));
        assert_eq!(store.cv_data().skills.len(), 0);
    }

    #[test]
    fn test_update_unknown_id_is_silent() {
        let mut store = CvStore::in_memory();
        let patch = json!({ "title": "X" });
        let changed = update_by_key(&mut store, SectionKey::Awards, "ghost", patch).unwrap();
        assert!(!changed);
    }

    #[test]
    fn test_mistyped_patch_is_rejected() {
        let mut store = CvStore::in_memory();
        let added = add_by_key(&mut store, SectionKey::WorkExperience).unwrap();
        let id = added["id"].as_str().unwrap();
        let result = update_by_key(
            &mut store,
            SectionKey::WorkExperience,
            id,
            json!({ "current": "yes please" }),
        );
        assert!(result.is_err());
        assert!(!store.cv_data().work_experience.get(id).unwrap().current);
    }

    #[test]
    fn test_every_section_dispatches() {
        let mut store = CvStore::in_memory();
        for key in SectionKey::ALL {
            add_by_key(&mut store, key).unwrap();
            assert_eq!(store.cv_data().collection_len(key), 1, "{key}");
        }
    }
}
