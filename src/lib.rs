//! # GRC Domain
//!
//! Object-type relationship and configuration composition engine for a
//! governance, risk and compliance application.
//!
//! This crate provides the building blocks the application UI composes its
//! object pages from:
//! - **TypeGraph**: which child types each object page may list
//! - **ConfigComposer**: layered, mixin-based widget configuration
//! - **MappingRules**: whether two entities may relate, and who may relate them
//! - **RelationshipStore**: join edges over a pluggable persistence backend
//! - **Snapshots**: materialization of captured object state for audit views
//! - **Query building**: descriptors for the generic query endpoint and the
//!   shared per-type counts cache
//! - **Session**: explicit per-user context carrying the caches and
//!   permission state every operation consults
//!
//! ## Design Principles
//!
//! 1. **Closed type set**: the entity types are an enum, validated at startup
//! 2. **Pure composition**: config composition and rule evaluation are
//!    synchronous and side-effect-free, safe to call repeatedly
//! 3. **Explicit context**: no ambient globals; a [`Session`] is constructed,
//!    passed and torn down
//! 4. **Data over code**: the shipped configuration is plain data a
//!    deployment may replace wholesale

#![warn(missing_docs)]

mod composer;
mod defaults;
mod descriptor;
mod entity;
mod errors;
mod mapping_rules;
mod object_types;
mod query;
mod relationships;
mod session;
mod snapshots;
mod type_graph;

pub use composer::{
    ConfigComposer, LayerDef, LayerMap, LayerSet, LayerTransform, MixinRef, OverrideTable,
    SuppressionTable,
};
pub use defaults::{
    base_type_graph, default_composer, default_forbidden, default_layers,
    default_mapping_index, default_mapping_rules, default_overrides, default_suppressions,
    related_children,
};
pub use descriptor::{
    ChildOptions, DescriptorOverride, TreeViewOptions, WidgetDescriptor, ORDER_DEFAULT,
    ORDER_INFO, PRIORITY_THRESHOLD,
};
pub use entity::{ContextId, Entity, EntityCache, EntityRef, Stub};
pub use errors::{DomainError, DomainResult};
pub use mapping_rules::{
    derive_index, CanonicalMapping, ForbiddenSet, ForbiddenTypes, MapOptions, MapTarget,
    MappingIndex, MappingRules, TypeFilterOptions,
};
pub use object_types::ObjectType;
pub use query::{
    init_counts, tree_view_operation, CountsCache, ExportBlock, ExportRequest, FilterExpression,
    FilterParser, Paging, QueryBackend, QueryMode, QueryParamBuilder, QueryRequest, QueryResult,
    VerbatimFilterParser,
};
pub use relationships::{
    JoinBackend, JoinEdge, JoinKeyType, JoinKind, RefreshQueue, RelationshipStore,
};
pub use session::{Action, PageContext, PermissionOracle, Session, StaticPermissions};
pub use snapshots::{materialize, MaterializedView, Revision, Snapshot};
pub use type_graph::TypeGraph;
