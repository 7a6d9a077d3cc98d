// Copyright 2025 Cowboy AI, LLC.

//! Static type-adjacency graph
//!
//! For each entity type, the sorted set of types it may be related to. The
//! table is directed and is preserved exactly as configured: some rows are
//! intentionally asymmetric (e.g. a type's own row may omit a self-reference
//! that peer rows include), and no symmetrization is applied.

use crate::errors::DomainResult;
use crate::object_types::ObjectType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Directed adjacency table between object types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeGraph {
    adjacency: BTreeMap<ObjectType, Vec<ObjectType>>,
}

impl TypeGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the adjacency row for `parent`. The row is sorted and deduplicated.
    pub fn insert(&mut self, parent: ObjectType, children: impl IntoIterator<Item = ObjectType>) {
        let mut row: Vec<ObjectType> = children.into_iter().collect();
        row.sort();
        row.dedup();
        self.adjacency.insert(parent, row);
    }

    /// Build a graph from rows of type names, as they appear in widget
    /// configuration. Fails on the first unknown name.
    pub fn from_names<'a>(
        rows: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> DomainResult<Self> {
        let mut graph = Self::new();
        for (parent, children) in rows {
            let parent: ObjectType = parent.parse()?;
            let children = children
                .split_whitespace()
                .map(str::parse)
                .collect::<DomainResult<Vec<ObjectType>>>()?;
            graph.insert(parent, children);
        }
        Ok(graph)
    }

    /// The sorted adjacency row for `parent`; empty if the type has no row.
    pub fn neighbors(&self, parent: ObjectType) -> &[ObjectType] {
        self.adjacency.get(&parent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `parent`'s row lists `child`. Directional.
    pub fn contains_edge(&self, parent: ObjectType, child: ObjectType) -> bool {
        self.neighbors(parent).binary_search(&child).is_ok()
    }

    /// All types that have an adjacency row, in sorted order.
    pub fn types(&self) -> impl Iterator<Item = ObjectType> + '_ {
        self.adjacency.keys().copied()
    }

    /// Number of rows in the table.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}
