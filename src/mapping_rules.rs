// Copyright 2025 Cowboy AI, LLC.

//! Mapping-permission rules
//!
//! Decides, for an ordered type pair, whether a relation is structurally
//! legal (a canonical mapping exists) and whether the acting user is
//! permitted to create or remove it. All decisions are boolean results the
//! caller branches on, never an error channel.

use crate::entity::Entity;
use crate::errors::DomainResult;
use crate::object_types::ObjectType;
use crate::relationships::JoinKind;
use crate::session::{Action, Session};
use crate::type_graph::TypeGraph;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

/// The designated relationship name and model between two entity types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalMapping {
    /// Mapping name; a leading `_` marks a private/internal mapping
    pub name: String,
    /// Concrete join model backing the mapping, if any
    pub model: Option<JoinKind>,
}

impl CanonicalMapping {
    /// A mapping backed by the generic relationship model.
    pub fn relationship(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: Some(JoinKind::Relationship),
        }
    }

    /// A named mapping without a concrete model.
    pub fn unbacked(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: None,
        }
    }

    /// Whether the name marks a private/internal mapping.
    pub fn is_private(&self) -> bool {
        self.name.starts_with('_')
    }
}

/// Index of canonical mappings keyed by ordered type pair, built at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingIndex {
    by_pair: HashMap<(ObjectType, ObjectType), CanonicalMapping>,
}

impl MappingIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the canonical mapping for an ordered pair.
    pub fn insert(&mut self, source: ObjectType, target: ObjectType, mapping: CanonicalMapping) {
        self.by_pair.insert((source, target), mapping);
    }

    /// The canonical mapping for an ordered pair.
    pub fn canonical(&self, source: ObjectType, target: ObjectType) -> Option<&CanonicalMapping> {
        self.by_pair.get(&(source, target))
    }

    /// The canonical mapping name for an ordered pair, including private
    /// names. Used when composing descriptors.
    pub fn canonical_name(&self, source: ObjectType, target: ObjectType) -> Option<&str> {
        self.canonical(source, target).map(|m| m.name.as_str())
    }

    /// The canonical mapping name with private/internal markers treated as
    /// absent. Used by the permission rules.
    pub fn public_canonical_name(
        &self,
        source: ObjectType,
        target: ObjectType,
    ) -> Option<&str> {
        self.canonical(source, target)
            .filter(|m| !m.is_private())
            .map(|m| m.name.as_str())
    }

    /// All types reachable from `source` via a canonical mapping.
    pub fn mappable_from(&self, source: ObjectType) -> BTreeSet<ObjectType> {
        self.by_pair
            .keys()
            .filter(|(s, _)| *s == source)
            .map(|(_, t)| *t)
            .collect()
    }
}

/// Per-type forbidden candidates: either an explicit list or everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForbiddenTypes {
    /// No child type may ever be offered as a mapping candidate
    All,
    /// These child types must never be offered
    These(Vec<ObjectType>),
}

/// Static table of disallowed pairs and per-type forbidden candidates.
///
/// Pair membership is direction-independent: the key is the two lower-cased
/// type names, sorted and space-joined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForbiddenSet {
    pairs: HashSet<String>,
    per_type: HashMap<ObjectType, ForbiddenTypes>,
}

impl ForbiddenSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The unordered, lower-cased pair key for two types.
    pub fn pair_key(a: ObjectType, b: ObjectType) -> String {
        let mut names = [a.lower_name(), b.lower_name()];
        names.sort();
        names.join(" ")
    }

    /// Forbid the pair, in either direction.
    pub fn forbid_pair(&mut self, a: ObjectType, b: ObjectType) {
        self.pairs.insert(Self::pair_key(a, b));
    }

    /// Whether the pair is forbidden, in either direction.
    pub fn contains_pair(&self, a: ObjectType, b: ObjectType) -> bool {
        self.pairs.contains(&Self::pair_key(a, b))
    }

    /// Set the forbidden candidate list for a type.
    pub fn set_for_type(&mut self, ty: ObjectType, forbidden: ForbiddenTypes) {
        self.per_type.insert(ty, forbidden);
    }

    /// The forbidden candidate list for a type, if one is configured.
    pub fn for_type(&self, ty: ObjectType) -> Option<&ForbiddenTypes> {
        self.per_type.get(&ty)
    }
}

/// The target of a prospective mapping: a realized entity or a bare type.
#[derive(Debug, Clone, Copy)]
pub enum MapTarget<'a> {
    /// A bare type descriptor; target-side permission checks are skipped
    Kind(ObjectType),
    /// A realized, persisted entity
    Instance(&'a Entity),
}

impl MapTarget<'_> {
    /// The target's type.
    pub fn kind(&self) -> ObjectType {
        match self {
            MapTarget::Kind(kind) => *kind,
            MapTarget::Instance(entity) => entity.kind,
        }
    }
}

/// Options for [`MappingRules::allowed_to_map`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MapOptions {
    /// Require a joinable mapping: a public canonical mapping must exist and
    /// the target's adjacency set must list the source type
    pub join: bool,
}

/// Options for [`MappingRules::mappable_types`].
#[derive(Debug, Clone, Default)]
pub struct TypeFilterOptions {
    /// Types that always appear in the candidate set
    pub whitelist: Vec<ObjectType>,
    /// Overrides the configured per-type forbidden list verbatim
    pub forbidden: Option<Vec<ObjectType>>,
}

/// Decision functions gating relationship mutations.
#[derive(Debug, Clone)]
pub struct MappingRules {
    graph: TypeGraph,
    forbidden: ForbiddenSet,
    index: MappingIndex,
}

impl MappingRules {
    /// Create the rules over an adjacency graph, a forbidden table and a
    /// canonical-mapping index.
    pub fn new(graph: TypeGraph, forbidden: ForbiddenSet, index: MappingIndex) -> Self {
        Self {
            graph,
            forbidden,
            index,
        }
    }

    /// The canonical-mapping index.
    pub fn index(&self) -> &MappingIndex {
        &self.index
    }

    /// Whether `source` may be mapped to (or, by symmetry, unmapped from)
    /// `target` by the session's acting user.
    pub fn allowed_to_map(
        &self,
        source: &Entity,
        target: MapTarget<'_>,
        options: MapOptions,
        session: &Session,
    ) -> bool {
        let source_type = source.kind;
        let target_type = target.kind();

        // Forbidden pairs reject regardless of any other check.
        if self.forbidden.contains_pair(source_type, target_type) {
            return false;
        }

        let canonical = self.index.canonical(source_type, target_type);
        let canonical_name = self.index.public_canonical_name(source_type, target_type);
        let joinable_listed = self.graph.contains_edge(target_type, source_type);

        if options.join && (canonical_name.is_none() || !joinable_listed) {
            return false;
        }
        if let Some(mapping) = canonical {
            if canonical_name.is_some() && mapping.model.is_none() {
                return false;
            }
        }

        let creatable = &session.creatable_contexts;
        let mut can_map = session.permissions.is_allowed_for(Action::Update, source)
            || source_type == ObjectType::Person
            || source
                .context
                .map_or(false, |context| creatable.contains(&context))
            // Mapping to a source that is about to be created is allowed.
            || !source.is_persisted();

        if let MapTarget::Instance(target) = target {
            can_map = can_map
                && (session.permissions.is_allowed_for(Action::Update, target)
                    || target_type == ObjectType::Person
                    || target
                        .context
                        .map_or(false, |context| creatable.contains(&context)));
        }
        can_map
    }

    /// The list of types that may be offered as mapping candidates for
    /// `ty`: the intersection of canonically reachable types and the
    /// adjacency set, minus the forbidden list, plus the whitelist.
    pub fn mappable_types(&self, ty: ObjectType, options: &TypeFilterOptions) -> Vec<ObjectType> {
        let canonical = self.index.mappable_from(ty);
        let adjacent: BTreeSet<ObjectType> = self.graph.neighbors(ty).iter().copied().collect();
        let mut result: BTreeSet<ObjectType> =
            canonical.intersection(&adjacent).copied().collect();

        let forbidden: Vec<ObjectType> = match &options.forbidden {
            Some(list) => list.clone(),
            None => match self.forbidden.for_type(ty) {
                Some(ForbiddenTypes::All) => {
                    result.clear();
                    Vec::new()
                }
                Some(ForbiddenTypes::These(list)) => list.clone(),
                None => Vec::new(),
            },
        };
        for ty in forbidden {
            result.remove(&ty);
        }
        result.extend(options.whitelist.iter().copied());
        result.into_iter().collect()
    }

    /// Whether `source` is a legal mapping candidate for `target`.
    pub fn is_mappable_type(
        &self,
        target: ObjectType,
        source: ObjectType,
        options: &TypeFilterOptions,
    ) -> bool {
        self.mappable_types(target, options).contains(&source)
    }
}

/// Derive a relationship-backed canonical mapping index from an adjacency
/// graph: every edge gets a `related_<collection>` mapping unless an
/// explicit special is supplied.
pub fn derive_index(
    graph: &TypeGraph,
    specials: impl IntoIterator<Item = (ObjectType, ObjectType, CanonicalMapping)>,
) -> DomainResult<MappingIndex> {
    let mut index = MappingIndex::new();
    for parent in graph.types() {
        for child in graph.neighbors(parent) {
            index.insert(
                parent,
                *child,
                CanonicalMapping::relationship(format!("related_{}", child.table_plural())),
            );
        }
    }
    for (source, target, mapping) in specials {
        index.insert(source, target, mapping);
    }
    Ok(index)
}
