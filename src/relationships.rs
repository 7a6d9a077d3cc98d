// Copyright 2025 Cowboy AI, LLC.

//! Join edges and the relationship store
//!
//! Relations between entities materialize as join edges: small records that
//! name their model, their endpoints and an optional context. The store
//! persists edges through a pluggable backend, reifies stub endpoints from
//! the session cache and batches refreshes through a deduplicating queue.

use crate::entity::{ContextId, Entity, EntityCache, EntityRef, Stub};
use crate::errors::{DomainError, DomainResult};
use crate::object_types::ObjectType;
use async_trait::async_trait;
use futures::future;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use tracing::{debug, error, info};

/// The type constraint on one endpoint of a join model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKeyType {
    /// Any entity type may occupy the endpoint
    Any,
    /// Only this entity type may occupy the endpoint
    Fixed(ObjectType),
}

/// The closed set of join models backing canonical mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinKind {
    /// Generic typed relationship between any two entities
    Relationship,
    /// Assignment of a role to a person within a context
    UserRole,
    /// Association of a person with an arbitrary entity
    ObjectPerson,
    /// Ownership of an arbitrary entity by a person
    ObjectOwner,
    /// Attachment of a document to an arbitrary entity
    ObjectDocument,
    /// Inclusion of an arbitrary entity in an audit's scope
    AuditObject,
}

impl JoinKind {
    /// The endpoint names and type constraints for this model.
    pub fn join_keys(&self) -> &'static [(&'static str, JoinKeyType)] {
        match self {
            JoinKind::Relationship => {
                &[("source", JoinKeyType::Any), ("destination", JoinKeyType::Any)]
            }
            JoinKind::UserRole => &[
                ("person", JoinKeyType::Fixed(ObjectType::Person)),
                ("role", JoinKeyType::Fixed(ObjectType::Role)),
            ],
            JoinKind::ObjectPerson => &[
                ("person", JoinKeyType::Fixed(ObjectType::Person)),
                ("personable", JoinKeyType::Any),
            ],
            JoinKind::ObjectOwner => &[
                ("person", JoinKeyType::Fixed(ObjectType::Person)),
                ("ownable", JoinKeyType::Any),
            ],
            JoinKind::ObjectDocument => &[
                ("document", JoinKeyType::Fixed(ObjectType::Document)),
                ("documentable", JoinKeyType::Any),
            ],
            JoinKind::AuditObject => &[
                ("audit", JoinKeyType::Fixed(ObjectType::Audit)),
                ("auditable", JoinKeyType::Any),
            ],
        }
    }

    /// The backend collection name for this model.
    pub fn root_collection(&self) -> &'static str {
        match self {
            JoinKind::Relationship => "relationships",
            JoinKind::UserRole => "user_roles",
            JoinKind::ObjectPerson => "object_people",
            JoinKind::ObjectOwner => "object_owners",
            JoinKind::ObjectDocument => "object_documents",
            JoinKind::AuditObject => "audit_objects",
        }
    }
}

/// A join edge: one persisted relation instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinEdge {
    /// Persisted id; `None` until the backend accepts the edge
    pub id: Option<u64>,
    /// The join model this edge instantiates
    pub kind: JoinKind,
    /// Authorization context the edge lives in
    pub context: Option<ContextId>,
    /// Endpoint name to referenced entity, in model key order
    pub endpoints: IndexMap<String, EntityRef>,
    /// Model-specific attributes carried verbatim to the backend
    pub attrs: serde_json::Map<String, serde_json::Value>,
}

impl JoinEdge {
    /// A new unpersisted edge of the given model.
    pub fn new(kind: JoinKind) -> Self {
        Self {
            id: None,
            kind,
            context: None,
            endpoints: IndexMap::new(),
            attrs: serde_json::Map::new(),
        }
    }

    /// Set an endpoint by name.
    pub fn with_endpoint(mut self, key: impl Into<String>, target: EntityRef) -> Self {
        self.endpoints.insert(key.into(), target);
        self
    }

    /// Set the edge's context.
    pub fn with_context(mut self, context: ContextId) -> Self {
        self.context = Some(context);
        self
    }

    /// Set a model-specific attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attrs.insert(key.into(), value);
        self
    }

    /// The endpoint stored under `key`, if set.
    pub fn endpoint(&self, key: &str) -> Option<&EntityRef> {
        self.endpoints.get(key)
    }

    /// Whether the edge connects the two given entities, ignoring which
    /// endpoint holds which.
    pub fn connects(&self, a: Stub, b: Stub) -> bool {
        let stubs: Vec<Stub> = self.endpoints.values().filter_map(EntityRef::stub).collect();
        stubs.contains(&a) && stubs.contains(&b)
    }

    /// Validate endpoint names and type constraints against the model.
    pub fn validate(&self) -> DomainResult<()> {
        for (key, constraint) in self.kind.join_keys() {
            let endpoint = self.endpoints.get(*key).ok_or_else(|| {
                DomainError::ValidationError(format!(
                    "{} edge is missing its '{}' endpoint",
                    self.kind.root_collection(),
                    key
                ))
            })?;
            if let JoinKeyType::Fixed(expected) = constraint {
                if endpoint.kind() != *expected {
                    return Err(DomainError::ValidationError(format!(
                        "'{}' endpoint of a {} edge must be a {}, got {}",
                        key,
                        self.kind.root_collection(),
                        expected,
                        endpoint.kind()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Resolve stub endpoints against the cache where possible.
    pub fn reify(&mut self, cache: &EntityCache) {
        for endpoint in self.endpoints.values_mut() {
            *endpoint = endpoint.clone().reify(cache);
        }
    }
}

/// Persistence operations for join edges and entity refreshes.
#[async_trait]
pub trait JoinBackend: Send + Sync {
    /// Persist a new edge, returning it with its assigned id.
    async fn create(&self, edge: &JoinEdge) -> DomainResult<JoinEdge>;

    /// Destroy a persisted edge.
    async fn destroy(&self, edge: &JoinEdge) -> DomainResult<()>;

    /// Fetch the current state of the referenced entity.
    async fn refresh(&self, stub: Stub) -> DomainResult<Entity>;

    /// Look up a role entity by name.
    async fn find_role_by_name(&self, name: &str) -> DomainResult<Option<Entity>>;
}

/// Deduplicating refresh queue
///
/// Repeated enqueues of the same reference between triggers collapse into a
/// single fetch. `trigger` drains the queue, fetches every queued entity and
/// installs the results in the cache.
#[derive(Debug, Default)]
pub struct RefreshQueue {
    pending: RwLock<HashSet<Stub>>,
}

impl RefreshQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reference for refresh. Returns `false` if it was already
    /// queued.
    pub fn enqueue(&self, stub: Stub) -> bool {
        self.pending
            .write()
            .expect("refresh queue lock poisoned")
            .insert(stub)
    }

    /// Queue every identified endpoint of an edge for refresh.
    pub fn enqueue_edge(&self, edge: &JoinEdge) {
        for stub in edge.endpoints.values().filter_map(EntityRef::stub) {
            self.enqueue(stub);
        }
    }

    /// The number of distinct references queued.
    pub fn len(&self) -> usize {
        self.pending
            .read()
            .expect("refresh queue lock poisoned")
            .len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain the queue, fetch every queued entity and install the results
    /// in the cache. Returns the refreshed entities.
    pub async fn trigger(
        &self,
        backend: &dyn JoinBackend,
        cache: &EntityCache,
    ) -> DomainResult<Vec<Arc<Entity>>> {
        let drained: Vec<Stub> = self
            .pending
            .write()
            .expect("refresh queue lock poisoned")
            .drain()
            .collect();
        if drained.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Refreshing {} queued entities", drained.len());

        let fetches = drained.into_iter().map(|stub| backend.refresh(stub));
        let entities = future::try_join_all(fetches).await?;
        Ok(entities
            .into_iter()
            .map(|entity| cache.insert(entity))
            .collect())
    }
}

/// Store managing join edges over a persistence backend and an entity cache.
pub struct RelationshipStore {
    backend: Arc<dyn JoinBackend>,
    cache: EntityCache,
    edges: RwLock<Vec<JoinEdge>>,
    refresh_queue: RefreshQueue,
}

impl std::fmt::Debug for RelationshipStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelationshipStore")
            .field("edges", &self.edges)
            .finish_non_exhaustive()
    }
}

impl RelationshipStore {
    /// Create a store over a backend and the session's entity cache.
    pub fn new(backend: Arc<dyn JoinBackend>, cache: EntityCache) -> Self {
        Self {
            backend,
            cache,
            edges: RwLock::new(Vec::new()),
            refresh_queue: RefreshQueue::new(),
        }
    }

    /// The queue of endpoint refreshes scheduled by edge mutations.
    pub fn refresh_queue(&self) -> &RefreshQueue {
        &self.refresh_queue
    }

    /// Drain the refresh queue, fetching every queued endpoint into the
    /// session cache.
    pub async fn trigger_refresh(&self) -> DomainResult<Vec<Arc<Entity>>> {
        self.refresh_queue
            .trigger(self.backend.as_ref(), &self.cache)
            .await
    }

    /// Install already-persisted edges, resolving stub endpoints from the
    /// cache.
    pub fn load(&self, edges: impl IntoIterator<Item = JoinEdge>) {
        let mut store = self.edges.write().expect("edge store lock poisoned");
        for mut edge in edges {
            edge.reify(&self.cache);
            store.push(edge);
        }
    }

    /// The number of edges held.
    pub fn len(&self) -> usize {
        self.edges.read().expect("edge store lock poisoned").len()
    }

    /// Whether the store holds no edges.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validate and persist one edge.
    pub async fn create(&self, edge: JoinEdge) -> DomainResult<JoinEdge> {
        edge.validate()?;
        let persisted = self.backend.create(&edge).await?;
        info!(
            "Created {} edge {:?}",
            persisted.kind.root_collection(),
            persisted.id
        );
        self.edges
            .write()
            .expect("edge store lock poisoned")
            .push(persisted.clone());
        self.refresh_queue.enqueue_edge(&persisted);
        Ok(persisted)
    }

    /// Destroy a persisted edge and drop it from the store.
    pub async fn destroy(&self, edge: &JoinEdge) -> DomainResult<()> {
        self.backend.destroy(edge).await?;
        info!("Destroyed {} edge {:?}", edge.kind.root_collection(), edge.id);
        self.edges
            .write()
            .expect("edge store lock poisoned")
            .retain(|held| held.id != edge.id || held.kind != edge.kind);
        self.refresh_queue.enqueue_edge(edge);
        Ok(())
    }

    /// Persist a batch of edges, failing fast on the first error. Edges
    /// persisted before the failure remain persisted, and their endpoints
    /// stay queued for the next refresh.
    pub async fn create_all(&self, edges: Vec<JoinEdge>) -> DomainResult<Vec<JoinEdge>> {
        let mut persisted = Vec::with_capacity(edges.len());
        for edge in edges {
            persisted.push(self.create(edge).await?);
        }
        self.trigger_refresh().await?;
        Ok(persisted)
    }

    /// Persist a batch of edges, attempting every one. Failures are
    /// aggregated into a single batch error after all attempts finish.
    pub async fn create_all_settled(&self, edges: Vec<JoinEdge>) -> DomainResult<Vec<JoinEdge>> {
        let mut persisted = Vec::with_capacity(edges.len());
        let mut failures = Vec::new();
        for edge in edges {
            match self.create(edge).await {
                Ok(edge) => persisted.push(edge),
                Err(e) => {
                    error!("Batch edge creation failed: {}", e);
                    failures.push(e.to_string());
                }
            }
        }
        if let Err(e) = self.trigger_refresh().await {
            error!("Endpoint refresh after batch creation failed: {}", e);
            failures.push(e.to_string());
        }
        if failures.is_empty() {
            Ok(persisted)
        } else {
            Err(DomainError::BatchFailure(failures))
        }
    }

    /// Destroy a batch of edges, failing fast on the first error.
    pub async fn destroy_all(&self, edges: &[JoinEdge]) -> DomainResult<()> {
        for edge in edges {
            self.destroy(edge).await?;
        }
        self.trigger_refresh().await?;
        Ok(())
    }

    /// Destroy a batch of edges, attempting every one and aggregating the
    /// failures.
    pub async fn destroy_all_settled(&self, edges: &[JoinEdge]) -> DomainResult<()> {
        let mut failures = Vec::new();
        for edge in edges {
            if let Err(e) = self.destroy(edge).await {
                error!("Batch edge destruction failed: {}", e);
                failures.push(e.to_string());
            }
        }
        if let Err(e) = self.trigger_refresh().await {
            error!("Endpoint refresh after batch destruction failed: {}", e);
            failures.push(e.to_string());
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(DomainError::BatchFailure(failures))
        }
    }

    /// Find a held relationship edge connecting the two entities, in either
    /// direction.
    pub fn find_relationship(&self, a: Stub, b: Stub) -> Option<JoinEdge> {
        self.edges
            .read()
            .expect("edge store lock poisoned")
            .iter()
            .find(|edge| edge.kind == JoinKind::Relationship && edge.connects(a, b))
            .cloned()
    }

    /// Destroy the relationship edge connecting the two entities, if one is
    /// held. Returns whether an edge was removed.
    pub async fn remove_relationship(&self, a: Stub, b: Stub) -> DomainResult<bool> {
        match self.find_relationship(a, b) {
            Some(edge) => {
                self.destroy(&edge).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Assign a named role to a person within a context. The role entity is
    /// taken from the cache when present, otherwise fetched by name.
    pub async fn save_user_role(
        &self,
        person: Stub,
        role_name: &str,
        context: ContextId,
    ) -> DomainResult<JoinEdge> {
        let role = match self.cache.find_by_title(ObjectType::Role, role_name) {
            Some(role) => role,
            None => {
                let fetched = self
                    .backend
                    .find_role_by_name(role_name)
                    .await?
                    .ok_or_else(|| DomainError::RoleNotFound(role_name.to_string()))?;
                self.cache.insert(fetched)
            }
        };

        let edge = JoinEdge::new(JoinKind::UserRole)
            .with_endpoint("person", EntityRef::Stub(person))
            .with_endpoint("role", EntityRef::Live(role))
            .with_context(context);
        self.create(edge).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// In-memory backend assigning sequential ids.
    #[derive(Default)]
    struct MemoryBackend {
        next_id: AtomicU64,
        fail_on: Option<ObjectType>,
        role: Option<Entity>,
    }

    #[async_trait]
    impl JoinBackend for MemoryBackend {
        async fn create(&self, edge: &JoinEdge) -> DomainResult<JoinEdge> {
            if let Some(fail_on) = self.fail_on {
                if edge.endpoints.values().any(|e| e.kind() == fail_on) {
                    return Err(DomainError::PersistenceFailure {
                        operation: "create".to_string(),
                        message: format!("rejecting edges touching {}", fail_on),
                    });
                }
            }
            let mut persisted = edge.clone();
            persisted.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
            Ok(persisted)
        }

        async fn destroy(&self, _edge: &JoinEdge) -> DomainResult<()> {
            Ok(())
        }

        async fn refresh(&self, stub: Stub) -> DomainResult<Entity> {
            Ok(Entity::new(stub.kind, stub.id).with_title(format!("refreshed {}", stub)))
        }

        async fn find_role_by_name(&self, name: &str) -> DomainResult<Option<Entity>> {
            Ok(self.role.clone().filter(|r| r.title.as_deref() == Some(name)))
        }
    }

    fn relationship(a: Stub, b: Stub) -> JoinEdge {
        JoinEdge::new(JoinKind::Relationship)
            .with_endpoint("source", EntityRef::Stub(a))
            .with_endpoint("destination", EntityRef::Stub(b))
    }

    #[test]
    fn test_join_keys_constrain_fixed_endpoints() {
        let keys = JoinKind::UserRole.join_keys();
        assert_eq!(keys[0], ("person", JoinKeyType::Fixed(ObjectType::Person)));
        assert_eq!(keys[1], ("role", JoinKeyType::Fixed(ObjectType::Role)));
        assert_eq!(JoinKind::ObjectPerson.root_collection(), "object_people");
    }

    #[test]
    fn test_validate_rejects_missing_and_mistyped_endpoints() {
        let missing = JoinEdge::new(JoinKind::Relationship)
            .with_endpoint("source", EntityRef::Stub(Stub::new(ObjectType::Program, 1)));
        assert!(matches!(
            missing.validate(),
            Err(DomainError::ValidationError(_))
        ));

        let mistyped = JoinEdge::new(JoinKind::UserRole)
            .with_endpoint("person", EntityRef::Stub(Stub::new(ObjectType::Audit, 1)))
            .with_endpoint("role", EntityRef::Stub(Stub::new(ObjectType::Role, 2)));
        assert!(matches!(
            mistyped.validate(),
            Err(DomainError::ValidationError(_))
        ));
    }

    #[test]
    fn test_connects_is_direction_independent() {
        let a = Stub::new(ObjectType::Program, 1);
        let b = Stub::new(ObjectType::Audit, 2);
        let edge = relationship(a, b);
        assert!(edge.connects(a, b));
        assert!(edge.connects(b, a));
        assert!(!edge.connects(a, Stub::new(ObjectType::Audit, 3)));
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_holds_edge() {
        let store = RelationshipStore::new(Arc::new(MemoryBackend::default()), EntityCache::new());
        let edge = relationship(
            Stub::new(ObjectType::Program, 1),
            Stub::new(ObjectType::Control, 2),
        );
        let persisted = store.create(edge).await.unwrap();
        assert_eq!(persisted.id, Some(1));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_find_and_remove_relationship() {
        let store = RelationshipStore::new(Arc::new(MemoryBackend::default()), EntityCache::new());
        let a = Stub::new(ObjectType::Program, 1);
        let b = Stub::new(ObjectType::Control, 2);
        store.create(relationship(a, b)).await.unwrap();

        assert!(store.find_relationship(b, a).is_some());
        assert!(store.remove_relationship(b, a).await.unwrap());
        assert!(store.is_empty());
        assert!(!store.remove_relationship(a, b).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_all_fails_fast() {
        let backend = MemoryBackend {
            fail_on: Some(ObjectType::Vendor),
            ..Default::default()
        };
        let store = RelationshipStore::new(Arc::new(backend), EntityCache::new());
        let edges = vec![
            relationship(
                Stub::new(ObjectType::Program, 1),
                Stub::new(ObjectType::Control, 2),
            ),
            relationship(
                Stub::new(ObjectType::Program, 1),
                Stub::new(ObjectType::Vendor, 3),
            ),
            relationship(
                Stub::new(ObjectType::Program, 1),
                Stub::new(ObjectType::Issue, 4),
            ),
        ];
        let result = store.create_all(edges).await;
        assert!(matches!(result, Err(DomainError::PersistenceFailure { .. })));
        // The edge before the failure was persisted; the one after was not.
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_create_all_settled_aggregates_failures() {
        let backend = MemoryBackend {
            fail_on: Some(ObjectType::Vendor),
            ..Default::default()
        };
        let store = RelationshipStore::new(Arc::new(backend), EntityCache::new());
        let edges = vec![
            relationship(
                Stub::new(ObjectType::Program, 1),
                Stub::new(ObjectType::Vendor, 2),
            ),
            relationship(
                Stub::new(ObjectType::Program, 1),
                Stub::new(ObjectType::Issue, 3),
            ),
        ];
        match store.create_all_settled(edges).await {
            Err(DomainError::BatchFailure(failures)) => assert_eq!(failures.len(), 1),
            other => panic!("expected batch failure, got {:?}", other),
        }
        // The succeeding edge was still persisted.
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_queue_deduplicates() {
        let queue = RefreshQueue::new();
        let stub = Stub::new(ObjectType::Control, 7);
        assert!(queue.enqueue(stub));
        assert!(!queue.enqueue(stub));
        assert!(queue.enqueue(Stub::new(ObjectType::Control, 8)));
        assert_eq!(queue.len(), 2);

        let backend = MemoryBackend::default();
        let cache = EntityCache::new();
        let refreshed = queue.trigger(&backend, &cache).await.unwrap();
        assert_eq!(refreshed.len(), 2);
        assert!(queue.is_empty());
        assert!(cache.get(ObjectType::Control, 7).is_some());
    }

    #[tokio::test]
    async fn test_mutations_schedule_endpoint_refreshes() {
        let store = RelationshipStore::new(Arc::new(MemoryBackend::default()), EntityCache::new());
        let a = Stub::new(ObjectType::Program, 1);
        let b = Stub::new(ObjectType::Control, 2);
        let edge = store.create(relationship(a, b)).await.unwrap();
        assert_eq!(store.refresh_queue().len(), 2);

        let refreshed = store.trigger_refresh().await.unwrap();
        assert_eq!(refreshed.len(), 2);
        assert!(store.refresh_queue().is_empty());

        store.destroy(&edge).await.unwrap();
        assert_eq!(store.refresh_queue().len(), 2);
    }

    #[tokio::test]
    async fn test_destroy_all_refreshes_endpoints() {
        let cache = EntityCache::new();
        let store = RelationshipStore::new(Arc::new(MemoryBackend::default()), cache.clone());
        let a = Stub::new(ObjectType::Program, 1);
        let b = Stub::new(ObjectType::Control, 2);
        let edge = store.create(relationship(a, b)).await.unwrap();

        store.destroy_all(&[edge]).await.unwrap();
        assert!(store.is_empty());
        assert!(store.refresh_queue().is_empty());
        assert!(cache.get(ObjectType::Program, 1).is_some());
        assert!(cache.get(ObjectType::Control, 2).is_some());
    }

    #[tokio::test]
    async fn test_save_user_role_resolves_from_cache_then_backend() {
        let cache = EntityCache::new();
        cache.insert(Entity::new(ObjectType::Role, 5).with_title("Auditor"));
        let store = RelationshipStore::new(Arc::new(MemoryBackend::default()), cache);

        let edge = store
            .save_user_role(Stub::new(ObjectType::Person, 1), "Auditor", 3)
            .await
            .unwrap();
        assert_eq!(edge.kind, JoinKind::UserRole);
        assert_eq!(edge.context, Some(3));
        assert_eq!(
            edge.endpoint("role").and_then(EntityRef::stub),
            Some(Stub::new(ObjectType::Role, 5))
        );

        // Unknown role names fail with a role lookup error.
        let missing = store
            .save_user_role(Stub::new(ObjectType::Person, 1), "Ghost", 3)
            .await;
        assert!(matches!(missing, Err(DomainError::RoleNotFound(_))));
    }

    #[tokio::test]
    async fn test_save_user_role_falls_back_to_backend() {
        let backend = MemoryBackend {
            role: Some(Entity::new(ObjectType::Role, 9).with_title("Reader")),
            ..Default::default()
        };
        let cache = EntityCache::new();
        let store = RelationshipStore::new(Arc::new(backend), cache.clone());

        let edge = store
            .save_user_role(Stub::new(ObjectType::Person, 2), "Reader", 1)
            .await
            .unwrap();
        assert_eq!(
            edge.endpoint("role").and_then(EntityRef::stub),
            Some(Stub::new(ObjectType::Role, 9))
        );
        // The fetched role was installed in the cache.
        assert!(cache.find_by_title(ObjectType::Role, "Reader").is_some());
    }
}
