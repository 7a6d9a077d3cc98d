// Copyright 2025 Cowboy AI, LLC.

//! Widget descriptors and their merge semantics
//!
//! A [`WidgetDescriptor`] is the composed, final record for a
//! (parent type, child type) pair. Overlays arrive as partial records:
//! [`DescriptorOverride`] for the descriptor surface itself and
//! [`TreeViewOptions`] for the nested content-controller behavior options.
//! Merging is deep for nested options and a straight replacement for
//! scalars and arrays.

use crate::object_types::ObjectType;
use serde::{Deserialize, Serialize};

/// Display order reserved for the always-first informational view.
pub const ORDER_INFO: u32 = 0;

/// Display order assigned when no override supplies one. Orders below
/// [`PRIORITY_THRESHOLD`] mark prioritized types; everything at or above it
/// falls back to alphabetical placement.
pub const ORDER_DEFAULT: u32 = 100;

/// Orders strictly below this value mark a prioritized child type.
pub const PRIORITY_THRESHOLD: u32 = 100;

/// Partial behavior options for the tree content controller.
///
/// Every field is optional; absence means "no opinion" and is distinct from
/// an explicit value. `child_options` describes recursive child sub-trees and
/// is replaced wholesale on merge, never merged element-wise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeViewOptions {
    /// Name of the binding used to populate this branch
    pub mapping: Option<String>,
    /// Whether edges may be mapped from this branch
    pub allow_mapping: Option<bool>,
    /// Whether new objects may be created from this branch
    pub allow_creating: Option<bool>,
    /// Whether the branch contents may be read
    pub allow_reading: Option<bool>,
    /// Whether child sub-trees are rendered
    pub draw_children: Option<bool>,
    /// View identifier for the branch body
    pub show_view: Option<String>,
    /// View identifier for the branch header
    pub header_view: Option<String>,
    /// View identifier for the branch footer
    pub footer_view: Option<String>,
    /// View identifier for the add-item affordance
    pub add_item_view: Option<String>,
    /// Recursive child sub-tree descriptors, bounded by construction depth
    pub child_options: Vec<ChildOptions>,
}

impl TreeViewOptions {
    /// Deep-merge `other` into `self`: present fields replace, absent fields
    /// keep the current value, and `child_options` is replaced wholesale
    /// when non-empty.
    pub fn merge_from(&mut self, other: &TreeViewOptions) {
        if other.mapping.is_some() {
            self.mapping = other.mapping.clone();
        }
        if other.allow_mapping.is_some() {
            self.allow_mapping = other.allow_mapping;
        }
        if other.allow_creating.is_some() {
            self.allow_creating = other.allow_creating;
        }
        if other.allow_reading.is_some() {
            self.allow_reading = other.allow_reading;
        }
        if other.draw_children.is_some() {
            self.draw_children = other.draw_children;
        }
        if other.show_view.is_some() {
            self.show_view = other.show_view.clone();
        }
        if other.header_view.is_some() {
            self.header_view = other.header_view.clone();
        }
        if other.footer_view.is_some() {
            self.footer_view = other.footer_view.clone();
        }
        if other.add_item_view.is_some() {
            self.add_item_view = other.add_item_view.clone();
        }
        if !other.child_options.is_empty() {
            self.child_options = other.child_options.clone();
        }
    }

    /// Whether no field carries a value.
    pub fn is_empty(&self) -> bool {
        *self == TreeViewOptions::default()
    }
}

/// Options for one recursive child sub-tree of a branch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChildOptions {
    /// Child model restriction; `None` means any cached entity type
    pub model: Option<ObjectType>,
    /// Behavior options for the sub-tree
    #[serde(flatten)]
    pub options: TreeViewOptions,
}

/// Partial per-pair override applied on the descriptor surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptorOverride {
    /// Overrides the widget id
    pub widget_id: Option<String>,
    /// Overrides the widget display name
    pub widget_name: Option<String>,
    /// Overrides the widget icon
    pub widget_icon: Option<String>,
    /// Overrides the display order
    pub order: Option<u32>,
    /// Deep-merged into the descriptor's behavior options
    pub content_controller_options: Option<TreeViewOptions>,
}

impl DescriptorOverride {
    /// An override that only sets the display order.
    pub fn order(order: u32) -> Self {
        Self {
            order: Some(order),
            ..Self::default()
        }
    }
}

/// The composed, final widget record for a (parent type, child type) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetDescriptor {
    /// The parent type whose page hosts this widget
    pub parent: ObjectType,
    /// The child type this widget lists
    pub child: ObjectType,
    /// Widget id, defaulting to the child's singular table name
    pub widget_id: String,
    /// Display name; `None` falls back to the child's title
    pub widget_name: Option<String>,
    /// Display icon
    pub widget_icon: Option<String>,
    /// Canonical mapping name for the pair, if one is configured
    pub mapping: Option<String>,
    /// Display order; 0 is reserved for the info view
    pub order: u32,
    /// Composed content-controller behavior options
    pub content_controller_options: TreeViewOptions,
}

impl WidgetDescriptor {
    /// Base descriptor for a pair before any overlays.
    pub fn base(parent: ObjectType, child: ObjectType, mapping: Option<String>) -> Self {
        Self {
            parent,
            child,
            widget_id: child.table_singular().to_string(),
            widget_name: None,
            widget_icon: None,
            mapping,
            order: ORDER_DEFAULT,
            content_controller_options: TreeViewOptions::default(),
        }
    }

    /// Apply a descriptor-surface override: scalars replace, nested options
    /// deep-merge.
    pub fn apply(&mut self, ov: &DescriptorOverride) {
        if let Some(widget_id) = &ov.widget_id {
            self.widget_id = widget_id.clone();
        }
        if ov.widget_name.is_some() {
            self.widget_name = ov.widget_name.clone();
        }
        if ov.widget_icon.is_some() {
            self.widget_icon = ov.widget_icon.clone();
        }
        if let Some(order) = ov.order {
            self.order = order;
        }
        if let Some(options) = &ov.content_controller_options {
            self.content_controller_options.merge_from(options);
        }
    }

    /// The mapping key used to populate the widget: the behavior-options
    /// binding when present, falling back to the canonical mapping name.
    pub fn mapping_key(&self) -> Option<&str> {
        self.content_controller_options
            .mapping
            .as_deref()
            .or(self.mapping.as_deref())
    }

    /// Whether mapping is allowed from this widget (defaults to true).
    pub fn allow_mapping(&self) -> bool {
        self.content_controller_options.allow_mapping.unwrap_or(true)
    }

    /// Whether creating is allowed from this widget (defaults to true).
    pub fn allow_creating(&self) -> bool {
        self.content_controller_options
            .allow_creating
            .unwrap_or(true)
    }

    /// Whether child sub-trees are drawn (defaults to false).
    pub fn draw_children(&self) -> bool {
        self.content_controller_options
            .draw_children
            .unwrap_or(false)
    }

    /// Whether this child type is prioritized over alphabetical placement.
    pub fn is_prioritized(&self) -> bool {
        self.order < PRIORITY_THRESHOLD
    }

    /// The widget display name, falling back to the child's title.
    pub fn display_name(&self) -> &str {
        self.widget_name
            .as_deref()
            .unwrap_or_else(|| self.child.title_singular())
    }
}
