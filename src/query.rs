// Copyright 2025 Cowboy AI, LLC.

//! Query descriptor building
//!
//! Tree branches and badge counts are populated through a generic query
//! endpoint that accepts a list of descriptors, one per requested object
//! type. This module builds those descriptors, infers the relevance
//! operation from the page context and maintains the shared per-type counts
//! cache behind one batched count-mode request.

use crate::entity::Stub;
use crate::errors::{DomainError, DomainResult};
use crate::object_types::ObjectType;
use crate::session::Session;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// A filter tree in the shape the query endpoint accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterExpression {
    /// No filtering
    Empty,
    /// Relevance to an anchor entity under an operation keyword
    Relevant {
        /// The anchor entity's type name
        object_name: String,
        /// The relevance operation keyword
        operation: String,
        /// The anchor entity's ids
        ids: Vec<u64>,
    },
    /// An opaque expression produced by the filter parser
    Expr(serde_json::Value),
    /// Conjunction of two filter trees
    And(Box<FilterExpression>, Box<FilterExpression>),
}

impl FilterExpression {
    /// Whether the tree filters nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, FilterExpression::Empty)
    }
}

impl Default for FilterExpression {
    fn default() -> Self {
        FilterExpression::Empty
    }
}

/// Translates free text into filter trees and combines trees.
pub trait FilterParser: Send + Sync {
    /// Parse a free-text filter expression.
    fn parse(&self, text: &str) -> DomainResult<FilterExpression>;

    /// Combine two filter trees. Absent terms are omitted rather than
    /// wrapped.
    fn join(&self, left: FilterExpression, right: FilterExpression) -> FilterExpression {
        match (left, right) {
            (FilterExpression::Empty, right) => right,
            (left, FilterExpression::Empty) => left,
            (left, right) => FilterExpression::And(Box::new(left), Box::new(right)),
        }
    }
}

/// Parser treating any non-blank text as one opaque expression term.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerbatimFilterParser;

impl FilterParser for VerbatimFilterParser {
    fn parse(&self, text: &str) -> DomainResult<FilterExpression> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(FilterExpression::Empty);
        }
        Ok(FilterExpression::Expr(serde_json::Value::String(
            text.to_string(),
        )))
    }
}

/// Whether a descriptor requests result rows or per-type totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryMode {
    /// Return matching result rows
    Values,
    /// Return matching ids only
    Ids,
    /// Return the matching total only
    Count,
}

/// 1-based paging and ordering for one descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paging {
    /// 1-based page number
    pub current: Option<u64>,
    /// Page size
    pub page_size: Option<u64>,
    /// Sort key
    pub sort_by: Option<String>,
    /// Sort direction, `asc` or `desc`
    pub sort_direction: Option<String>,
}

impl Paging {
    /// The `[firstInclusive, lastExclusive)` window, when both page number
    /// and size are set.
    pub fn limit(&self) -> Option<[u64; 2]> {
        match (self.current, self.page_size) {
            (Some(current), Some(size)) if current >= 1 => {
                Some([(current - 1) * size, current * size])
            }
            _ => None,
        }
    }
}

/// One query descriptor as accepted by the query endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The requested object type's name
    pub object_name: String,
    /// The combined filter tree
    pub filters: FilterExpression,
    /// `[firstInclusive, lastExclusive)` row window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<[u64; 2]>,
    /// Sort specification, `"key"` or `"key desc"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    /// Requested fields; empty means all
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub fields: Vec<String>,
    /// Rows, ids or totals
    pub mode: QueryMode,
}

/// One result set returned by the query endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// The requested object type's name
    pub object_name: String,
    /// The matching total
    pub total: u64,
    /// Matching rows; empty in count mode
    #[serde(default)]
    pub values: Vec<serde_json::Value>,
}

/// Asynchronous query endpoint the descriptors are issued against.
#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Issue a batch of descriptors, one result per descriptor, in order.
    async fn query(&self, requests: &[QueryRequest]) -> DomainResult<Vec<QueryResult>>;

    /// Issue a bulk export request, returning serialized text.
    async fn export(&self, request: &ExportRequest) -> DomainResult<String>;
}

/// Infer the relevance operation for a target type from the page context.
///
/// Evaluated once per descriptor build: a dashboard page means ownership,
/// a person target means people relevance, an audit page means snapshot
/// relevance, anything else defers to the caller's override.
pub fn tree_view_operation(
    session: &Session,
    target: ObjectType,
    operation_override: Option<&str>,
) -> Option<String> {
    if session.page.is_dashboard() {
        return Some("owned".to_string());
    }
    if target == ObjectType::Person {
        return Some("related_people".to_string());
    }
    if session.page.is_audit() {
        return Some("relevant_snapshot".to_string());
    }
    operation_override.map(String::from)
}

/// Builder assembling one descriptor per requested object type.
#[derive(Debug, Clone, Default)]
pub struct QueryParamBuilder {
    relevant_to: Option<Stub>,
    operation_override: Option<String>,
    filter_text: Option<String>,
    extra_filter: Option<FilterExpression>,
    paging: Paging,
    fields: Vec<String>,
}

impl QueryParamBuilder {
    /// Create a builder with no filters, no paging and all fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope results to entities relevant to the anchor.
    pub fn relevant_to(mut self, anchor: Stub) -> Self {
        self.relevant_to = Some(anchor);
        self
    }

    /// Override the inferred relevance operation.
    pub fn operation(mut self, operation: impl Into<String>) -> Self {
        self.operation_override = Some(operation.into());
        self
    }

    /// Add a free-text filter expression.
    pub fn filter_text(mut self, text: impl Into<String>) -> Self {
        self.filter_text = Some(text.into());
        self
    }

    /// Add a caller-supplied filter tree.
    pub fn extra_filter(mut self, filter: FilterExpression) -> Self {
        self.extra_filter = Some(filter);
        self
    }

    /// Set paging and ordering.
    pub fn paging(mut self, paging: Paging) -> Self {
        self.paging = paging;
        self
    }

    /// Restrict the returned fields.
    pub fn fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }

    /// Build the descriptor for one object type.
    pub fn build(
        &self,
        target: ObjectType,
        session: &Session,
        parser: &dyn FilterParser,
    ) -> DomainResult<QueryRequest> {
        let mut filters = FilterExpression::Empty;

        if let Some(anchor) = self.relevant_to {
            let operation =
                tree_view_operation(session, target, self.operation_override.as_deref())
                    .unwrap_or_else(|| "relevant".to_string());
            filters = parser.join(
                filters,
                FilterExpression::Relevant {
                    object_name: anchor.kind.name().to_string(),
                    operation,
                    ids: vec![anchor.id],
                },
            );
        }
        if let Some(text) = &self.filter_text {
            filters = parser.join(filters, parser.parse(text)?);
        }
        if let Some(extra) = &self.extra_filter {
            filters = parser.join(filters, extra.clone());
        }

        let order_by = self.paging.sort_by.as_ref().map(|key| {
            match self.paging.sort_direction.as_deref() {
                Some(direction) => format!("{} {}", key, direction),
                None => key.clone(),
            }
        });

        Ok(QueryRequest {
            object_name: target.name().to_string(),
            filters,
            limit: self.paging.limit(),
            order_by,
            fields: self.fields.clone(),
            mode: QueryMode::Values,
        })
    }

    /// Build the count-mode descriptor for one object type.
    pub fn build_count(
        &self,
        target: ObjectType,
        session: &Session,
        parser: &dyn FilterParser,
    ) -> DomainResult<QueryRequest> {
        let mut request = self.build(target, session, parser)?;
        request.mode = QueryMode::Count;
        request.limit = None;
        request.fields = Vec::new();
        Ok(request)
    }
}

/// Shared per-type counts, populated asynchronously, read-through for
/// consumers.
#[derive(Debug, Clone, Default)]
pub struct CountsCache {
    inner: Arc<RwLock<HashMap<ObjectType, u64>>>,
}

impl CountsCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached count for a type, if populated.
    pub fn get(&self, ty: ObjectType) -> Option<u64> {
        self.inner
            .read()
            .expect("counts cache lock poisoned")
            .get(&ty)
            .copied()
    }

    /// Install a count for a type.
    pub fn set(&self, ty: ObjectType, count: u64) {
        self.inner
            .write()
            .expect("counts cache lock poisoned")
            .insert(ty, count);
    }

    /// Drop all cached counts.
    pub fn clear(&self) {
        self.inner
            .write()
            .expect("counts cache lock poisoned")
            .clear();
    }
}

/// Populate the session's counts cache with one batched count-mode request
/// across the given types.
pub async fn init_counts(
    backend: &dyn QueryBackend,
    session: &Session,
    builder: &QueryParamBuilder,
    types: &[ObjectType],
    parser: &dyn FilterParser,
) -> DomainResult<()> {
    if types.is_empty() {
        return Ok(());
    }
    let requests = types
        .iter()
        .map(|ty| builder.build_count(*ty, session, parser))
        .collect::<DomainResult<Vec<_>>>()?;

    let results = backend.query(&requests).await?;
    debug!("Fanning {} count results into the cache", results.len());
    for result in results {
        let ty: ObjectType = result
            .object_name
            .parse()
            .map_err(|_| DomainError::InvalidQuery(format!(
                "count result for unknown type '{}'",
                result.object_name
            )))?;
        session.counts.set(ty, result.total);
    }
    Ok(())
}

/// One block of a bulk export request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportBlock {
    /// The exported object type's name
    pub object_name: String,
    /// The block's filter tree
    pub filters: FilterExpression,
    /// Exported fields; empty means all
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub fields: Vec<String>,
}

/// A block-structured bulk export request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// One block per exported object type
    pub objects: Vec<ExportBlock>,
    /// Target serialization format
    pub export_to: String,
}

impl ExportRequest {
    /// An empty text export request.
    pub fn new(export_to: impl Into<String>) -> Self {
        Self {
            objects: Vec::new(),
            export_to: export_to.into(),
        }
    }

    /// Append one block for an object type.
    pub fn with_block(
        mut self,
        target: ObjectType,
        filters: FilterExpression,
        fields: Vec<String>,
    ) -> Self {
        self.objects.push(ExportBlock {
            object_name: target.name().to_string(),
            filters,
            fields,
        });
        self
    }
}
