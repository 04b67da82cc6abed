//! Arena-style entity collection: insertion-ordered, O(1) lookup by id.
//!
//! Entities live behind `Arc` so a cloned `CvData` snapshot shares every
//! entity it did not touch. `update` copies only the targeted entity when a
//! snapshot still holds it.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use uuid::Uuid;

use crate::models::entities::{Entity, Patch};

/// Returns a fresh opaque entity id.
pub fn new_entity_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: IndexMap<String, Arc<T>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }
}

impl<T: Entity> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.get(id).map(Arc::as_ref)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.values().map(Arc::as_ref)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.keys().map(String::as_str)
    }

    /// Appends a default entity with a fresh id and returns it.
    pub fn add(&mut self) -> &T {
        let mut id = new_entity_id();
        while self.items.contains_key(&id) {
            id = new_entity_id();
        }
        let entity = Arc::new(T::with_id(id.clone()));
        let (index, _) = self.items.insert_full(id, entity);
        &self.items[index]
    }

    /// Appends an existing entity. An empty or already-taken id is replaced.
    pub fn push(&mut self, mut entity: T) -> String {
        if entity.id().is_empty() || self.items.contains_key(entity.id()) {
            let mut id = new_entity_id();
            while self.items.contains_key(&id) {
                id = new_entity_id();
            }
            entity.set_id(id);
        }
        let id = entity.id().to_string();
        self.items.insert(id.clone(), Arc::new(entity));
        id
    }

    /// Merges `patch` into the entity with `id`. Returns false when absent.
    pub fn update(&mut self, id: &str, patch: T::Patch) -> bool {
        self.update_with(id, |entity| patch.apply(entity))
    }

    pub fn update_with(&mut self, id: &str, f: impl FnOnce(&mut T)) -> bool {
        match self.items.get_mut(id) {
            Some(slot) => {
                f(Arc::make_mut(slot));
                true
            }
            None => false,
        }
    }

    /// Removes the entity with `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: &str) -> bool {
        self.items.shift_remove(id).is_some()
    }

    /// True when both collections hold the same `Arc` for `id`.
    pub fn shares_entity(&self, other: &Self, id: &str) -> bool {
        match (self.items.get(id), other.items.get(id)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T: Entity + PartialEq> PartialEq for Collection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Serialize> Serialize for Collection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.items.len()))?;
        for entity in self.items.values() {
            seq.serialize_element(entity.as_ref())?;
        }
        seq.end()
    }
}

impl<'de, T: Entity> Deserialize<'de> for Collection<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CollectionVisitor<T>(PhantomData<T>);

        impl<'de, T: Entity> Visitor<'de> for CollectionVisitor<T> {
            type Value = Collection<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of entities")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut collection = Collection::new();
                while let Some(entity) = seq.next_element::<T>()? {
                    collection.push(entity);
                }
                Ok(collection)
            }
        }

        deserializer.deserialize_seq(CollectionVisitor(PhantomData))
    }
}
