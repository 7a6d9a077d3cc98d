// Copyright 2025 Cowboy AI, LLC.

//! Snapshot materialization
//!
//! Audits hold immutable snapshots of governed objects: a snapshot pins one
//! revision of one object inside the audit's scope. Materialization turns a
//! revision list plus the audit's snapshot records into display-ready views
//! of the captured object state, without touching any live entity.

use crate::entity::{ContextId, Stub};
use crate::object_types::ObjectType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// One captured state of a governed object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    /// The revision's id
    pub id: u64,
    /// The type of the captured object
    pub resource_type: ObjectType,
    /// The id of the captured object
    pub resource_id: u64,
    /// The captured object state as stored
    pub content: serde_json::Value,
}

/// A snapshot record: one revision pinned inside a parent's scope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The snapshot's id
    pub id: u64,
    /// The owning parent, typically an audit
    pub parent: Stub,
    /// The pinned revision
    pub revision_id: u64,
    /// Authorization context inherited from the parent
    pub context: Option<ContextId>,
}

/// Display-ready view of one captured object state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterializedView {
    /// The captured object's type
    pub kind: ObjectType,
    /// The captured object's id
    pub id: u64,
    /// API address of the captured object
    pub self_link: String,
    /// UI address of the live original
    pub original_link: String,
    /// UI address of the snapshot, when an owning snapshot exists
    pub view_link: Option<String>,
    /// Back-reference to the owning snapshot, when one exists
    pub snapshot: Option<Snapshot>,
    /// The captured state with child objects re-addressed
    pub content: serde_json::Map<String, serde_json::Value>,
}

/// Materialize views from revisions and the owning parent's snapshots.
///
/// Pure over its inputs. The output preserves the revision list's length and
/// order. A revision whose id no owned snapshot pins still materializes,
/// with the snapshot back-reference and view link unset.
pub fn materialize(revisions: &[Revision], owned: &[Snapshot]) -> Vec<MaterializedView> {
    let by_revision: HashMap<u64, &Snapshot> =
        owned.iter().map(|snap| (snap.revision_id, snap)).collect();

    revisions
        .iter()
        .map(|revision| {
            let snapshot = by_revision.get(&revision.id).copied();
            if snapshot.is_none() {
                debug!(
                    "No owning snapshot for revision {} ({} {})",
                    revision.id, revision.resource_type, revision.resource_id
                );
            }
            materialize_one(revision, snapshot)
        })
        .collect()
}

fn materialize_one(revision: &Revision, snapshot: Option<&Snapshot>) -> MaterializedView {
    let plural = revision.resource_type.table_plural();
    let mut content = match &revision.content {
        serde_json::Value::Object(map) => map.clone(),
        _ => serde_json::Map::new(),
    };
    readdress_custom_attributes(&mut content);

    MaterializedView {
        kind: revision.resource_type,
        id: revision.resource_id,
        self_link: format!("/api/{}/{}", plural, revision.resource_id),
        original_link: format!("/{}/{}", plural, revision.resource_id),
        view_link: snapshot.map(|snap| format!("/snapshots/{}", snap.id)),
        snapshot: snapshot.copied(),
        content,
    }
}

/// Captured custom attribute values carry stale addresses; rewrite each
/// child's links from its own id.
fn readdress_custom_attributes(content: &mut serde_json::Map<String, serde_json::Value>) {
    let Some(serde_json::Value::Array(values)) = content.get_mut("custom_attribute_values")
    else {
        return;
    };
    for value in values {
        let Some(child) = value.as_object_mut() else {
            continue;
        };
        let Some(id) = child.get("id").and_then(serde_json::Value::as_u64) else {
            continue;
        };
        let link = format!("/api/custom_attribute_values/{}", id);
        child.insert("self_link".to_string(), link.clone().into());
        child.insert("href".to_string(), link.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn revision(id: u64, kind: ObjectType, resource_id: u64) -> Revision {
        Revision {
            id,
            resource_type: kind,
            resource_id,
            content: json!({"title": format!("captured {}", resource_id)}),
        }
    }

    fn snapshot(id: u64, revision_id: u64) -> Snapshot {
        Snapshot {
            id,
            parent: Stub::new(ObjectType::Audit, 1),
            revision_id,
            context: Some(10),
        }
    }

    #[test]
    fn test_materialize_preserves_length_and_order() {
        let revisions = vec![
            revision(3, ObjectType::Control, 30),
            revision(1, ObjectType::Objective, 10),
            revision(2, ObjectType::Control, 20),
        ];
        let owned = vec![snapshot(101, 1), snapshot(102, 2), snapshot(103, 3)];

        let views = materialize(&revisions, &owned);
        assert_eq!(views.len(), 3);
        assert_eq!(views[0].id, 30);
        assert_eq!(views[1].id, 10);
        assert_eq!(views[2].id, 20);
    }

    #[test]
    fn test_materialize_addresses_views() {
        let revisions = vec![revision(1, ObjectType::Control, 42)];
        let owned = vec![snapshot(7, 1)];

        let view = &materialize(&revisions, &owned)[0];
        assert_eq!(view.self_link, "/api/controls/42");
        assert_eq!(view.original_link, "/controls/42");
        assert_eq!(view.view_link.as_deref(), Some("/snapshots/7"));
        assert_eq!(view.snapshot.map(|s| s.id), Some(7));
        assert_eq!(view.content["title"], json!("captured 42"));
    }

    #[test]
    fn test_missing_owning_snapshot_is_tolerated() {
        let revisions = vec![
            revision(1, ObjectType::Control, 42),
            revision(2, ObjectType::Objective, 43),
        ];
        let owned = vec![snapshot(7, 1)];

        let views = materialize(&revisions, &owned);
        assert_eq!(views.len(), 2);
        assert!(views[1].snapshot.is_none());
        assert!(views[1].view_link.is_none());
        assert_eq!(views[1].self_link, "/api/objectives/43");
    }

    #[test]
    fn test_irregular_plural_in_links() {
        let revisions = vec![revision(1, ObjectType::Policy, 5)];
        let view = &materialize(&revisions, &[])[0];
        assert_eq!(view.self_link, "/api/policies/5");
    }

    #[test]
    fn test_custom_attribute_values_are_readdressed() {
        let revisions = vec![Revision {
            id: 1,
            resource_type: ObjectType::Control,
            resource_id: 42,
            content: json!({
                "title": "c",
                "custom_attribute_values": [
                    {"id": 9, "attribute_value": "x", "self_link": "/api/controls/42"},
                    {"attribute_value": "no id"}
                ]
            }),
        }];

        let view = &materialize(&revisions, &[])[0];
        let values = view.content["custom_attribute_values"].as_array().unwrap();
        assert_eq!(values[0]["self_link"], json!("/api/custom_attribute_values/9"));
        assert_eq!(values[0]["href"], json!("/api/custom_attribute_values/9"));
        // Children without ids are carried through untouched.
        assert!(values[1].get("self_link").is_none());
    }

    #[test]
    fn test_non_object_content_yields_empty_map() {
        let revisions = vec![Revision {
            id: 1,
            resource_type: ObjectType::Control,
            resource_id: 1,
            content: json!(null),
        }];
        let view = &materialize(&revisions, &[])[0];
        assert!(view.content.is_empty());
    }
}
