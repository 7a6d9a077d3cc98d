// Copyright 2025 Cowboy AI, LLC.

//! Layered, mixin-based configuration composition
//!
//! Named layers contribute partial per-child-type behavior options. A layer
//! may reference other layers (recursively), invoke transform functions that
//! extend the accumulator in place, or inline literal partials. Resolution
//! flattens the references in declaration order, with a layer's own keys
//! merged last so its explicit declarations always win over anything its
//! mixins contributed.
//!
//! The composed output overlays, per (parent, child) pair and in rising
//! precedence: global descriptor overrides, per-parent descriptor overrides,
//! globally layered behavior options, per-parent layered behavior options.

use crate::descriptor::{DescriptorOverride, TreeViewOptions, WidgetDescriptor, ORDER_INFO};
use crate::errors::{DomainError, DomainResult};
use crate::mapping_rules::MappingIndex;
use crate::object_types::ObjectType;
use crate::type_graph::TypeGraph;
use indexmap::IndexMap;
use tracing::debug;

/// A flattened layer: behavior options per child type, in declaration order.
pub type LayerMap = IndexMap<ObjectType, TreeViewOptions>;

/// A transform mixin: extends the accumulator in place.
pub type LayerTransform = fn(&mut LayerMap);

/// One mixin reference declared on a layer.
#[derive(Clone)]
pub enum MixinRef {
    /// Reference to another named layer, resolved recursively
    Layer(String),
    /// A transform invoked with the current accumulator
    Transform(LayerTransform),
    /// A literal partial, shallow-merged as-is
    Literal(LayerMap),
}

impl std::fmt::Debug for MixinRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MixinRef::Layer(name) => f.debug_tuple("Layer").field(name).finish(),
            MixinRef::Transform(_) => f.write_str("Transform(..)"),
            MixinRef::Literal(map) => f.debug_tuple("Literal").field(map).finish(),
        }
    }
}

/// A named, partial layer definition.
#[derive(Debug, Clone, Default)]
pub struct LayerDef {
    mixins: Vec<MixinRef>,
    own: LayerMap,
}

impl LayerDef {
    /// Create an empty layer definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a reference to another named layer.
    pub fn mixin(mut self, name: impl Into<String>) -> Self {
        self.mixins.push(MixinRef::Layer(name.into()));
        self
    }

    /// Declare a transform mixin.
    pub fn transform(mut self, f: LayerTransform) -> Self {
        self.mixins.push(MixinRef::Transform(f));
        self
    }

    /// Declare a literal partial mixin.
    pub fn literal(mut self, map: LayerMap) -> Self {
        self.mixins.push(MixinRef::Literal(map));
        self
    }

    /// Set the layer's own options for one child type. Own keys are merged
    /// last during resolution and win over every mixin contribution.
    pub fn set(mut self, child: ObjectType, options: TreeViewOptions) -> Self {
        self.own.insert(child, options);
        self
    }
}

/// A table of named layer definitions.
#[derive(Debug, Clone, Default)]
pub struct LayerSet {
    layers: IndexMap<String, LayerDef>,
}

impl LayerSet {
    /// Create an empty layer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or replace a named layer.
    pub fn insert(&mut self, name: impl Into<String>, def: LayerDef) {
        self.layers.insert(name.into(), def);
    }

    /// Whether a layer with this name is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    /// Resolve a named layer into a flattened map.
    ///
    /// A reference to an undefined layer is logged and contributes nothing.
    /// A cyclic reference chain fails with [`DomainError::MixinCycle`].
    pub fn resolve(&self, name: &str) -> DomainResult<LayerMap> {
        let mut stack = Vec::new();
        self.resolve_inner(name, &mut stack)
    }

    fn resolve_inner(&self, name: &str, stack: &mut Vec<String>) -> DomainResult<LayerMap> {
        if stack.iter().any(|seen| seen == name) {
            let mut path = stack.clone();
            path.push(name.to_string());
            return Err(DomainError::MixinCycle {
                path: path.join(" -> "),
            });
        }
        let Some(def) = self.layers.get(name) else {
            debug!(layer = name, "undefined mixin layer, contributing nothing");
            return Ok(LayerMap::new());
        };

        stack.push(name.to_string());
        let mut acc = LayerMap::new();
        for mixin in &def.mixins {
            match mixin {
                MixinRef::Layer(other) => {
                    // Later mixins win on key collision: whole per-type
                    // entries replace, they are not merged field-wise.
                    acc.extend(self.resolve_inner(other, stack)?);
                }
                MixinRef::Transform(f) => f(&mut acc),
                MixinRef::Literal(map) => acc.extend(map.clone()),
            }
        }
        acc.extend(def.own.clone());
        stack.pop();
        Ok(acc)
    }
}

/// Descriptor-surface overrides, global and per parent type.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    /// Overrides applied for a child type on every parent
    pub all: IndexMap<ObjectType, DescriptorOverride>,
    /// Overrides applied for a child type on one specific parent
    pub per_parent: IndexMap<ObjectType, IndexMap<ObjectType, DescriptorOverride>>,
}

impl OverrideTable {
    /// Register a global override for a child type.
    pub fn set_all(&mut self, child: ObjectType, ov: DescriptorOverride) {
        self.all.insert(child, ov);
    }

    /// Register an override for a child type under one parent.
    pub fn set(&mut self, parent: ObjectType, child: ObjectType, ov: DescriptorOverride) {
        self.per_parent.entry(parent).or_default().insert(child, ov);
    }
}

/// Pair suppression table.
///
/// An entry with value `false` suppresses the widget entirely; `true`
/// re-enables it; absence means "no override". The per-parent entry takes
/// precedence over the global one.
#[derive(Debug, Clone, Default)]
pub struct SuppressionTable {
    all: IndexMap<ObjectType, bool>,
    per_parent: IndexMap<ObjectType, IndexMap<ObjectType, bool>>,
}

impl SuppressionTable {
    /// Never produce a widget for this child type, on any parent.
    pub fn suppress_all(&mut self, child: ObjectType) {
        self.all.insert(child, false);
    }

    /// Never produce a widget for this child type on this parent.
    pub fn suppress(&mut self, parent: ObjectType, child: ObjectType) {
        self.per_parent.entry(parent).or_default().insert(child, false);
    }

    /// Re-enable a child type on this parent, overriding a global entry.
    pub fn allow(&mut self, parent: ObjectType, child: ObjectType) {
        self.per_parent.entry(parent).or_default().insert(child, true);
    }

    /// Whether the (parent, child) pair is suppressed.
    pub fn suppressed(&self, parent: ObjectType, child: ObjectType) -> bool {
        if let Some(value) = self.per_parent.get(&parent).and_then(|row| row.get(&child)) {
            return !value;
        }
        self.all.get(&child).map(|value| !value).unwrap_or(false)
    }
}

/// Name of the layer consulted for behavior options on every parent type.
const ALL_LAYER: &str = "all";

/// Composes final widget descriptors from the adjacency graph, the override
/// tables and the layer set. Composition is synchronous, pure and
/// side-effect-free.
#[derive(Debug, Clone)]
pub struct ConfigComposer {
    graph: TypeGraph,
    overrides: OverrideTable,
    suppressions: SuppressionTable,
    layers: LayerSet,
    mappings: MappingIndex,
}

impl ConfigComposer {
    /// Create a composer over the given configuration.
    pub fn new(
        graph: TypeGraph,
        overrides: OverrideTable,
        suppressions: SuppressionTable,
        layers: LayerSet,
        mappings: MappingIndex,
    ) -> Self {
        Self {
            graph,
            overrides,
            suppressions,
            layers,
            mappings,
        }
    }

    /// The adjacency graph constraining candidate child types.
    pub fn graph(&self) -> &TypeGraph {
        &self.graph
    }

    /// Compose the widget descriptors for every legal, non-suppressed child
    /// of `parent`, sorted by display order with ties keeping the adjacency
    /// (lexicographic) order.
    pub fn compose(&self, parent: ObjectType) -> DomainResult<Vec<WidgetDescriptor>> {
        let global_options = self.resolve_if_defined(ALL_LAYER)?;
        let parent_options = self.resolve_if_defined(parent.name())?;

        let mut descriptors = Vec::new();
        for child in self.graph.neighbors(parent) {
            if self.suppressions.suppressed(parent, *child) {
                continue;
            }
            let mapping = self
                .mappings
                .canonical_name(parent, *child)
                .map(String::from);
            let mut descriptor = WidgetDescriptor::base(parent, *child, mapping);
            if let Some(ov) = self.overrides.all.get(child) {
                descriptor.apply(ov);
            }
            if let Some(ov) = self
                .overrides
                .per_parent
                .get(&parent)
                .and_then(|row| row.get(child))
            {
                descriptor.apply(ov);
            }
            if let Some(options) = global_options.get(child) {
                descriptor.content_controller_options.merge_from(options);
            }
            if let Some(options) = parent_options.get(child) {
                descriptor.content_controller_options.merge_from(options);
            }
            descriptors.push(descriptor);
        }
        // Stable sort: equal orders keep adjacency order.
        descriptors.sort_by_key(|d| d.order);
        Ok(descriptors)
    }

    /// Compose the descriptor for a single (parent, child) pair, or `None`
    /// if the pair is not adjacent or is suppressed.
    pub fn compose_pair(
        &self,
        parent: ObjectType,
        child: ObjectType,
    ) -> DomainResult<Option<WidgetDescriptor>> {
        Ok(self
            .compose(parent)?
            .into_iter()
            .find(|d| d.child == child))
    }

    /// The always-first informational widget for an object page.
    pub fn info_widget(&self, parent: ObjectType) -> WidgetDescriptor {
        let mut descriptor = WidgetDescriptor::base(parent, parent, None);
        descriptor.widget_id = "info".to_string();
        descriptor.widget_name = Some("Info".to_string());
        descriptor.order = ORDER_INFO;
        descriptor
    }

    fn resolve_if_defined(&self, name: &str) -> DomainResult<LayerMap> {
        if self.layers.contains(name) {
            self.layers.resolve(name)
        } else {
            Ok(LayerMap::new())
        }
    }
}
