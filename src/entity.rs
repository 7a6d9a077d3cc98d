// Copyright 2025 Cowboy AI, LLC.

//! Entities, stubs and the session-scoped entity cache
//!
//! An [`Entity`] is a locally cached business object. A [`Stub`] is a
//! lightweight `(type, id)` reference that has not been resolved to a live
//! object yet. The [`EntityCache`] keyed by `(type, id)` is the sole source
//! of truth for live objects within a session; it is only mutated from the
//! completion handlers of load, save and destroy operations.

use crate::object_types::ObjectType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Identifier of a security context.
pub type ContextId = i64;

/// A lightweight `(type, id)` reference to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stub {
    /// The referenced entity's type
    pub kind: ObjectType,
    /// The referenced entity's id
    pub id: u64,
}

impl Stub {
    /// Create a stub reference.
    pub fn new(kind: ObjectType, id: u64) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for Stub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// A locally cached business entity.
///
/// `id` is `None` while the entity is still being authored locally;
/// `created_at` is `None` until the backend has accepted it. The permission
/// rules treat an entity without `created_at` as "about to be created".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// The entity's type
    pub kind: ObjectType,
    /// Persisted id; `None` while authoring
    pub id: Option<u64>,
    /// Display title
    pub title: Option<String>,
    /// Security context the entity belongs to
    pub context: Option<ContextId>,
    /// Set by the backend on first persist
    pub created_at: Option<DateTime<Utc>>,
    /// Denormalized related-object references, kept current by the
    /// relationship store's refresh pass
    pub related: Vec<Stub>,
}

impl Entity {
    /// A persisted entity with the given identity.
    pub fn new(kind: ObjectType, id: u64) -> Self {
        Self {
            kind,
            id: Some(id),
            title: None,
            context: None,
            created_at: Some(Utc::now()),
            related: Vec::new(),
        }
    }

    /// An entity still being authored locally (not yet persisted).
    pub fn draft(kind: ObjectType) -> Self {
        Self {
            kind,
            id: None,
            title: None,
            context: None,
            created_at: None,
            related: Vec::new(),
        }
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the security context.
    pub fn with_context(mut self, context: ContextId) -> Self {
        self.context = Some(context);
        self
    }

    /// Whether the backend has accepted this entity.
    pub fn is_persisted(&self) -> bool {
        self.created_at.is_some()
    }

    /// The stub form of this entity, if it has an id.
    pub fn stub(&self) -> Option<Stub> {
        self.id.map(|id| Stub::new(self.kind, id))
    }
}

/// A reference to an entity: either an unresolved stub or a live cached
/// object. Callers must tolerate stubs that never resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityRef {
    /// Unresolved `(type, id)` reference
    Stub(Stub),
    /// Resolved reference to the cached entity
    Live(Arc<Entity>),
}

impl EntityRef {
    /// The referenced entity's type.
    pub fn kind(&self) -> ObjectType {
        match self {
            EntityRef::Stub(stub) => stub.kind,
            EntityRef::Live(entity) => entity.kind,
        }
    }

    /// The referenced entity's id, if known.
    pub fn id(&self) -> Option<u64> {
        match self {
            EntityRef::Stub(stub) => Some(stub.id),
            EntityRef::Live(entity) => entity.id,
        }
    }

    /// The stub form of this reference, if the id is known.
    pub fn stub(&self) -> Option<Stub> {
        match self {
            EntityRef::Stub(stub) => Some(*stub),
            EntityRef::Live(entity) => entity.stub(),
        }
    }

    /// Whether this reference is still unresolved.
    pub fn is_stub(&self) -> bool {
        matches!(self, EntityRef::Stub(_))
    }

    /// Resolve a stub against the cache, leaving it inert when the entity is
    /// not cached. Live references are returned unchanged.
    pub fn reify(self, cache: &EntityCache) -> EntityRef {
        match self {
            EntityRef::Stub(stub) => match cache.get(stub.kind, stub.id) {
                Some(entity) => EntityRef::Live(entity),
                None => EntityRef::Stub(stub),
            },
            live => live,
        }
    }
}

/// Session-scoped cache of live entities keyed by `(type, id)`.
#[derive(Debug, Clone, Default)]
pub struct EntityCache {
    inner: Arc<RwLock<HashMap<(ObjectType, u64), Arc<Entity>>>>,
}

impl EntityCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached entity.
    pub fn get(&self, kind: ObjectType, id: u64) -> Option<Arc<Entity>> {
        self.inner
            .read()
            .expect("entity cache lock poisoned")
            .get(&(kind, id))
            .cloned()
    }

    /// Insert or replace a persisted entity; returns the cached handle.
    /// Entities without an id cannot be cached and are returned as-is.
    pub fn insert(&self, entity: Entity) -> Arc<Entity> {
        let entity = Arc::new(entity);
        if let Some(id) = entity.id {
            self.inner
                .write()
                .expect("entity cache lock poisoned")
                .insert((entity.kind, id), Arc::clone(&entity));
        }
        entity
    }

    /// Get the cached entity for a stub, creating a bare entry when none
    /// exists yet (get-or-create-by-(type, id) semantics).
    pub fn get_or_create(&self, stub: Stub) -> Arc<Entity> {
        if let Some(entity) = self.get(stub.kind, stub.id) {
            return entity;
        }
        self.insert(Entity::new(stub.kind, stub.id))
    }

    /// Drop a cached entity.
    pub fn remove(&self, kind: ObjectType, id: u64) {
        self.inner
            .write()
            .expect("entity cache lock poisoned")
            .remove(&(kind, id));
    }

    /// Find a cached entity of a given kind by its title.
    pub fn find_by_title(&self, kind: ObjectType, title: &str) -> Option<Arc<Entity>> {
        self.inner
            .read()
            .expect("entity cache lock poisoned")
            .values()
            .find(|entity| entity.kind == kind && entity.title.as_deref() == Some(title))
            .cloned()
    }

    /// Number of cached entities.
    pub fn len(&self) -> usize {
        self.inner.read().expect("entity cache lock poisoned").len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached entity (session teardown).
    pub fn clear(&self) {
        self.inner
            .write()
            .expect("entity cache lock poisoned")
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_is_not_persisted() {
        let draft = Entity::draft(ObjectType::Control);
        assert!(!draft.is_persisted());
        assert!(draft.stub().is_none());

        let persisted = Entity::new(ObjectType::Control, 3);
        assert!(persisted.is_persisted());
        assert_eq!(persisted.stub(), Some(Stub::new(ObjectType::Control, 3)));
    }

    #[test]
    fn test_get_or_create_returns_same_entry() {
        let cache = EntityCache::new();
        let stub = Stub::new(ObjectType::Audit, 7);

        let first = cache.get_or_create(stub);
        let second = cache.get_or_create(stub);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_reify_resolves_cached_stub() {
        let cache = EntityCache::new();
        cache.insert(Entity::new(ObjectType::Program, 11).with_title("Main Program"));

        let reference = EntityRef::Stub(Stub::new(ObjectType::Program, 11)).reify(&cache);
        match reference {
            EntityRef::Live(entity) => {
                assert_eq!(entity.title.as_deref(), Some("Main Program"))
            }
            EntityRef::Stub(_) => panic!("expected live reference"),
        }
    }

    #[test]
    fn test_reify_leaves_unknown_stub_inert() {
        let cache = EntityCache::new();
        let reference = EntityRef::Stub(Stub::new(ObjectType::Program, 404)).reify(&cache);
        assert!(reference.is_stub());
        assert_eq!(reference.id(), Some(404));
    }

    #[test]
    fn test_entity_ref_serializes_in_both_forms() {
        let stub = EntityRef::Stub(Stub::new(ObjectType::Control, 5));
        let live = EntityRef::Live(Arc::new(
            Entity::new(ObjectType::Control, 5).with_title("Access Reviews"),
        ));

        let stub_json = serde_json::to_value(&stub).unwrap();
        let live_json = serde_json::to_value(&live).unwrap();
        assert_eq!(stub_json["Stub"]["id"], 5);
        assert_eq!(live_json["Live"]["title"], "Access Reviews");

        let back: EntityRef = serde_json::from_value(live_json).unwrap();
        assert_eq!(back.stub(), Some(Stub::new(ObjectType::Control, 5)));
    }

    #[test]
    fn test_find_by_title() {
        let cache = EntityCache::new();
        cache.insert(Entity::new(ObjectType::Role, 1).with_title("Auditor"));
        cache.insert(Entity::new(ObjectType::Role, 2).with_title("Reader"));

        let role = cache.find_by_title(ObjectType::Role, "Auditor").unwrap();
        assert_eq!(role.id, Some(1));
        assert!(cache.find_by_title(ObjectType::Role, "Editor").is_none());
    }

    #[test]
    fn test_clear_on_teardown() {
        let cache = EntityCache::new();
        cache.get_or_create(Stub::new(ObjectType::Audit, 1));
        cache.clear();
        assert!(cache.is_empty());
    }
}
