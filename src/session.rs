// Copyright 2025 Cowboy AI, LLC.

//! Explicit session context
//!
//! All state that the legacy design kept in ambient process-wide registries
//! (the entity cache, the counts cache, the current page object, the
//! permission tables) lives on an explicitly constructed [`Session`] passed
//! to each operation, with a creation/teardown lifecycle tied to a user
//! session.

use crate::entity::{ContextId, Entity, EntityCache, Stub};
use crate::object_types::ObjectType;
use crate::query::CountsCache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Actions a permission oracle can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Read an entity
    Read,
    /// Create an entity
    Create,
    /// Update an entity
    Update,
    /// Delete an entity
    Delete,
}

/// Collaborator answering permission questions about concrete entities.
pub trait PermissionOracle: Send + Sync {
    /// Whether the acting user may perform `action` on `entity`.
    fn is_allowed_for(&self, action: Action, entity: &Entity) -> bool;
}

/// A permission oracle with a fixed answer, useful for tests and for pages
/// that render without a signed-in user.
#[derive(Debug, Clone, Copy)]
pub struct StaticPermissions(pub bool);

impl PermissionOracle for StaticPermissions {
    fn is_allowed_for(&self, _action: Action, _entity: &Entity) -> bool {
        self.0
    }
}

/// The kind of page the user is on; drives operation inference and
/// relevance expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageContext {
    /// The user's dashboard
    Dashboard,
    /// The global object browser
    ObjectBrowser,
    /// A specific object's page
    Object(Stub),
    /// A snapshot view of a specific object's page
    SnapshotView(Stub),
}

impl PageContext {
    /// Whether this is the dashboard.
    pub fn is_dashboard(&self) -> bool {
        matches!(self, PageContext::Dashboard)
    }

    /// Whether this is the global object browser.
    pub fn is_object_browser(&self) -> bool {
        matches!(self, PageContext::ObjectBrowser)
    }

    /// Whether the page shows an audit.
    pub fn is_audit(&self) -> bool {
        matches!(
            self,
            PageContext::Object(stub) | PageContext::SnapshotView(stub)
                if stub.kind == ObjectType::Audit
        )
    }

    /// Whether the page shows historical (snapshot) content.
    pub fn is_snapshot(&self) -> bool {
        matches!(self, PageContext::SnapshotView(_))
    }

    /// The page's anchor object, if any.
    pub fn instance(&self) -> Option<Stub> {
        match self {
            PageContext::Object(stub) | PageContext::SnapshotView(stub) => Some(*stub),
            _ => None,
        }
    }
}

/// Per-user-session context carrying the caches and permission state that
/// every operation consults.
#[derive(Clone)]
pub struct Session {
    /// The local entity cache, sole source of truth for live objects
    pub cache: EntityCache,
    /// Asynchronously populated per-type widget counts
    pub counts: CountsCache,
    /// The page the user is on
    pub page: PageContext,
    /// Permission oracle for the acting user
    pub permissions: Arc<dyn PermissionOracle>,
    /// Security contexts in which the user may create relationships
    pub creatable_contexts: Vec<ContextId>,
}

impl Session {
    /// Open a session for a page with the given permission oracle.
    pub fn new(page: PageContext, permissions: Arc<dyn PermissionOracle>) -> Self {
        Self {
            cache: EntityCache::new(),
            counts: CountsCache::new(),
            page,
            permissions,
            creatable_contexts: Vec::new(),
        }
    }

    /// Set the security contexts in which the user may create relationships.
    pub fn with_creatable_contexts(mut self, contexts: Vec<ContextId>) -> Self {
        self.creatable_contexts = contexts;
        self
    }

    /// Tear the session down, dropping all cached state.
    pub fn close(self) {
        self.cache.clear();
        self.counts.clear();
        info!("session closed");
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("page", &self.page)
            .field("cached_entities", &self.cache.len())
            .field("creatable_contexts", &self.creatable_contexts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_context_predicates() {
        let audit_page = PageContext::Object(Stub::new(ObjectType::Audit, 5));
        assert!(audit_page.is_audit());
        assert!(!audit_page.is_dashboard());
        assert!(!audit_page.is_snapshot());

        let snapshot_page = PageContext::SnapshotView(Stub::new(ObjectType::Audit, 5));
        assert!(snapshot_page.is_audit());
        assert!(snapshot_page.is_snapshot());

        assert!(PageContext::Dashboard.is_dashboard());
        assert!(PageContext::ObjectBrowser.instance().is_none());
    }

    #[test]
    fn test_session_lifecycle() {
        let session = Session::new(PageContext::Dashboard, Arc::new(StaticPermissions(true)))
            .with_creatable_contexts(vec![1, 2]);
        session.cache.get_or_create(Stub::new(ObjectType::Program, 1));
        assert_eq!(session.cache.len(), 1);

        let cache = session.cache.clone();
        session.close();
        assert!(cache.is_empty());
    }
}
