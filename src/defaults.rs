// Copyright 2025 Cowboy AI, LLC.

//! Shipped default configuration
//!
//! The adjacency table, display orders, suppression entries, mixin layers
//! and mapping rules the application ships with. Everything here is plain
//! data fed into the engines in the other modules; a deployment may build
//! its own tables instead.

use crate::composer::{ConfigComposer, LayerDef, LayerSet, OverrideTable, SuppressionTable};
use crate::descriptor::{ChildOptions, DescriptorOverride, TreeViewOptions};
use crate::errors::DomainResult;
use crate::mapping_rules::{
    derive_index, CanonicalMapping, ForbiddenSet, ForbiddenTypes, MappingIndex, MappingRules,
};
use crate::object_types::ObjectType;
use crate::relationships::JoinKind;
use crate::type_graph::TypeGraph;

/// The shipped adjacency table: which child types each parent's page may
/// list. Deliberately asymmetric; rows are authored independently.
const BASE_ADJACENCY: &[(&str, &str)] = &[
    ("AccessGroup", "Audit Clause Contract Control Assessment DataAsset Facility Issue Market Objective OrgGroup Person Policy Process Product Program Project Regulation Request Section Standard System Vendor Snapshot"),
    ("Audit", "AccessGroup Clause Contract Control Assessment AssessmentTemplate DataAsset Facility Issue Market Objective OrgGroup Person Policy Process Product Program Project Regulation Request Section Standard System Vendor"),
    ("Clause", "AccessGroup Audit Contract Control Assessment DataAsset Facility Issue Market Objective OrgGroup Person Policy Process Product Program Project Regulation Request Section Standard System Vendor Snapshot"),
    ("Contract", "AccessGroup Audit Clause Control Assessment DataAsset Facility Issue Market Objective OrgGroup Person Process Product Program Project Request Section System Vendor Snapshot"),
    ("Control", "AccessGroup Audit Clause Contract Control Assessment DataAsset Facility Issue Market Objective OrgGroup Person Policy Process Product Program Project Regulation Request Section Standard System Vendor Snapshot"),
    ("Assessment", "AccessGroup Audit Clause Contract Control DataAsset Facility Issue Market Objective OrgGroup Person Policy Process Product Program Project Regulation Request Section Standard System Vendor"),
    ("DataAsset", "AccessGroup Audit Clause Contract Control Assessment DataAsset Facility Issue Market Objective OrgGroup Person Policy Process Product Program Project Regulation Request Section Standard System Vendor Snapshot"),
    ("Facility", "AccessGroup Audit Clause Contract Control Assessment DataAsset Facility Issue Market Objective OrgGroup Person Policy Process Product Program Project Regulation Request Section Standard System Vendor Snapshot"),
    ("Issue", "AccessGroup Audit Clause Contract Control Assessment DataAsset Facility Issue Market Objective OrgGroup Person Policy Process Product Program Project Regulation Request Section Standard System Vendor"),
    ("Market", "AccessGroup Audit Clause Contract Control Assessment DataAsset Facility Issue Market Objective OrgGroup Person Policy Process Product Program Project Regulation Request Section Standard System Vendor Snapshot"),
    ("Objective", "AccessGroup Audit Clause Contract Control Assessment DataAsset Facility Issue Market Objective OrgGroup Person Policy Process Product Program Project Regulation Request Section Standard System Vendor Snapshot"),
    ("OrgGroup", "AccessGroup Audit Clause Contract Control Assessment DataAsset Facility Issue Market Objective OrgGroup Person Policy Process Product Program Project Regulation Request Section Standard System Vendor Snapshot"),
    ("Person", "AccessGroup Audit Clause Contract Control Assessment DataAsset Facility Issue Market Objective OrgGroup Policy Process Product Program Project Regulation Request Section Standard System Vendor"),
    ("Policy", "AccessGroup Audit Clause Control Assessment DataAsset Facility Issue Market Objective OrgGroup Person Process Product Program Project Request Section System Vendor Snapshot"),
    ("Process", "AccessGroup Audit Clause Contract Control Assessment DataAsset Facility Issue Market Objective OrgGroup Person Policy Process Product Program Project Regulation Request Section Standard System Vendor Snapshot"),
    ("Product", "AccessGroup Audit Clause Contract Control Assessment DataAsset Facility Issue Market Objective OrgGroup Person Policy Process Product Program Project Regulation Request Section Standard System Vendor Snapshot"),
    ("Program", "AccessGroup Audit Clause Contract Control Assessment DataAsset Facility Issue Market Objective OrgGroup Person Policy Process Product Project Regulation Request Section Standard System Vendor"),
    ("Project", "AccessGroup Audit Clause Contract Control Assessment DataAsset Facility Issue Market Objective OrgGroup Person Policy Process Product Program Project Regulation Request Section Standard System Vendor"),
    ("Regulation", "AccessGroup Audit Clause Control Assessment DataAsset Facility Issue Market Objective OrgGroup Person Process Product Program Project Request Section System Vendor Snapshot"),
    ("Request", "AccessGroup Audit Clause Contract Control Assessment DataAsset Facility Issue Market Objective OrgGroup Person Policy Process Product Program Project Regulation Request Section Standard System Vendor"),
    ("Section", "AccessGroup Audit Clause Contract Control Assessment DataAsset Facility Issue Market Objective OrgGroup Person Policy Process Product Program Project Regulation Request Section Standard System Vendor Snapshot"),
    ("Standard", "AccessGroup Audit Clause Control Assessment DataAsset Facility Issue Market Objective OrgGroup Person Process Product Program Project Request Section System Vendor Snapshot"),
    ("System", "AccessGroup Audit Clause Contract Control Assessment DataAsset Facility Issue Market Objective OrgGroup Person Policy Process Product Program Project Regulation Request Section Standard System Vendor Snapshot"),
    ("Vendor", "AccessGroup Audit Clause Contract Control Assessment DataAsset Facility Issue Market Objective OrgGroup Person Policy Process Product Program Project Regulation Request Section Standard System Vendor Snapshot"),
    ("Snapshot", "AccessGroup Audit Contract Control Assessment DataAsset Facility Issue Market Objective OrgGroup Person Policy Process Product Program Project Regulation Request Section Standard System Vendor"),
];

/// Global display orders. Values below 100 mark prioritized types; 100 and
/// above fall back to alphabetical placement among their peers.
const GLOBAL_ORDERS: &[(ObjectType, u32)] = &[
    (ObjectType::Standard, 10),
    (ObjectType::Regulation, 20),
    (ObjectType::Contract, 30),
    (ObjectType::Section, 40),
    (ObjectType::Objective, 50),
    (ObjectType::Control, 60),
    (ObjectType::AccessGroup, 100),
    (ObjectType::Assessment, 110),
    (ObjectType::Audit, 120),
    (ObjectType::Clause, 130),
    (ObjectType::DataAsset, 140),
    (ObjectType::Facility, 160),
    (ObjectType::Issue, 170),
    (ObjectType::Market, 180),
    (ObjectType::OrgGroup, 190),
    (ObjectType::Policy, 210),
    (ObjectType::Process, 220),
    (ObjectType::Product, 230),
    (ObjectType::Program, 240),
    (ObjectType::Project, 250),
    (ObjectType::Request, 260),
    (ObjectType::System, 270),
    (ObjectType::Vendor, 280),
    (ObjectType::Snapshot, 290),
];

/// Audit pages re-prioritize their working set; the globally prioritized
/// directives move to slots keeping the remainder alphabetical.
const AUDIT_ORDERS: &[(ObjectType, u32)] = &[
    (ObjectType::Assessment, 10),
    (ObjectType::Request, 20),
    (ObjectType::Issue, 30),
    (ObjectType::AssessmentTemplate, 40),
    (ObjectType::Contract, 133),
    (ObjectType::Control, 137),
    (ObjectType::Objective, 182),
    (ObjectType::Regulation, 257),
    (ObjectType::Section, 263),
    (ObjectType::Standard, 267),
];

/// The shipped adjacency graph.
pub fn base_type_graph() -> DomainResult<TypeGraph> {
    TypeGraph::from_names(BASE_ADJACENCY.iter().copied())
}

fn named_override(id: &str, name: &str, icon: Option<&str>) -> DescriptorOverride {
    DescriptorOverride {
        widget_id: Some(id.to_string()),
        widget_name: Some(name.to_string()),
        widget_icon: icon.map(String::from),
        ..DescriptorOverride::default()
    }
}

/// The shipped descriptor-surface overrides: global display orders and
/// icons, plus per-parent reshaping for audits, programs and person pages.
pub fn default_overrides() -> OverrideTable {
    let mut table = OverrideTable::default();
    for (child, order) in GLOBAL_ORDERS {
        table.set_all(*child, DescriptorOverride::order(*order));
    }
    table.set_all(
        ObjectType::Document,
        DescriptorOverride {
            widget_icon: Some("fa fa-link".to_string()),
            order: Some(150),
            ..DescriptorOverride::default()
        },
    );
    table.set_all(
        ObjectType::Person,
        DescriptorOverride {
            widget_icon: Some("fa fa-person".to_string()),
            order: Some(200),
            ..DescriptorOverride::default()
        },
    );

    table.set(
        ObjectType::Contract,
        ObjectType::Clause,
        DescriptorOverride {
            widget_name: Some("Mapped Clauses".to_string()),
            ..DescriptorOverride::default()
        },
    );
    table.set(
        ObjectType::Program,
        ObjectType::Person,
        named_override("person", "People", Some("person")),
    );
    table.set(
        ObjectType::Control,
        ObjectType::Request,
        named_override("Request", "Requests", None),
    );
    table.set(
        ObjectType::Person,
        ObjectType::Request,
        named_override("Request", "Requests", None),
    );

    for (child, order) in AUDIT_ORDERS {
        table.set(ObjectType::Audit, *child, DescriptorOverride::order(*order));
    }
    table.set(
        ObjectType::Audit,
        ObjectType::Request,
        DescriptorOverride {
            order: Some(20),
            ..named_override("Request", "Requests", None)
        },
    );
    table.set(
        ObjectType::Audit,
        ObjectType::Program,
        named_override("program", "Program", Some("program")),
    );
    table.set(
        ObjectType::Audit,
        ObjectType::Person,
        DescriptorOverride {
            content_controller_options: Some(TreeViewOptions {
                mapping: Some("authorized_people".to_string()),
                allow_mapping: Some(false),
                allow_creating: Some(false),
                ..TreeViewOptions::default()
            }),
            ..named_override("person", "People", Some("person"))
        },
    );
    table
}

/// The shipped suppression table: no Document widget on any page.
pub fn default_suppressions() -> SuppressionTable {
    let mut table = SuppressionTable::default();
    table.suppress_all(ObjectType::Document);
    table
}

/// Recursive related-object sub-tree options of the given depth. Only the
/// outermost level draws its children.
pub fn related_children(depth: u32) -> Vec<ChildOptions> {
    if depth == 0 {
        return Vec::new();
    }
    vec![ChildOptions {
        model: None,
        options: TreeViewOptions {
            mapping: Some("related_objects".to_string()),
            show_view: Some("/base_objects/tree.mustache".to_string()),
            footer_view: Some("/base_objects/tree_footer.mustache".to_string()),
            add_item_view: Some("/base_objects/tree_add_item.mustache".to_string()),
            draw_children: Some(depth > 1),
            child_options: related_children(depth - 1),
            ..TreeViewOptions::default()
        },
    }]
}

const CHILD_TREE_DEPTH: u32 = 2;

fn branch(mapping: &str) -> TreeViewOptions {
    TreeViewOptions {
        mapping: Some(mapping.to_string()),
        draw_children: Some(true),
        child_options: related_children(CHILD_TREE_DEPTH),
        ..TreeViewOptions::default()
    }
}

fn branch_with_views(mapping: &str, show: &str, add_item: Option<&str>) -> TreeViewOptions {
    TreeViewOptions {
        show_view: Some(show.to_string()),
        footer_view: Some("/base_objects/tree_footer.mustache".to_string()),
        add_item_view: add_item.map(String::from),
        ..branch(mapping)
    }
}

fn governance_objects_layer() -> LayerDef {
    LayerDef::new()
        .set(
            ObjectType::Regulation,
            branch_with_views(
                "regulations",
                "/directives/tree.mustache",
                Some("/directives/tree_add_item.mustache"),
            ),
        )
        .set(
            ObjectType::Contract,
            branch_with_views("contracts", "/directives/tree.mustache", None),
        )
        .set(
            ObjectType::Policy,
            branch_with_views(
                "policies",
                "/directives/tree.mustache",
                Some("/directives/tree_add_item.mustache"),
            ),
        )
        .set(
            ObjectType::Standard,
            branch_with_views(
                "standards",
                "/directives/tree.mustache",
                Some("/directives/tree_add_item.mustache"),
            ),
        )
        .set(ObjectType::Control, branch("controls"))
        .set(ObjectType::Objective, branch("objectives"))
        .set(ObjectType::Section, branch("sections"))
        .set(ObjectType::Clause, branch("clauses"))
}

fn business_objects_layer() -> LayerDef {
    LayerDef::new()
        .set(
            ObjectType::Audit,
            TreeViewOptions {
                allow_mapping: Some(true),
                add_item_view: Some("/audits/tree_add_item.mustache".to_string()),
                ..branch("related_audits")
            },
        )
        .set(ObjectType::AccessGroup, branch("related_access_groups"))
        .set(ObjectType::DataAsset, branch("related_data_assets"))
        .set(ObjectType::Facility, branch("related_facilities"))
        .set(ObjectType::Market, branch("related_markets"))
        .set(ObjectType::OrgGroup, branch("related_org_groups"))
        .set(ObjectType::Vendor, branch("related_vendors"))
        .set(ObjectType::Process, branch("related_processes"))
        .set(ObjectType::Product, branch("related_products"))
        .set(ObjectType::Project, branch("related_projects"))
        .set(ObjectType::System, branch("related_systems"))
        .set(
            ObjectType::Assessment,
            TreeViewOptions {
                footer_view: Some("/base_objects/tree_footer.mustache".to_string()),
                ..branch("related_assessments")
            },
        )
        .set(ObjectType::Request, branch("related_requests"))
        .set(ObjectType::Document, branch("documents"))
        .set(ObjectType::Person, branch("people"))
        .set(ObjectType::Program, branch("programs"))
}

fn issues_layer() -> LayerDef {
    LayerDef::new().set(
        ObjectType::Issue,
        TreeViewOptions {
            footer_view: Some("/base_objects/tree_footer.mustache".to_string()),
            add_item_view: Some("/base_objects/tree_add_item.mustache".to_string()),
            ..branch("related_issues")
        },
    )
}

fn snapshots_layer() -> LayerDef {
    LayerDef::new().set(
        ObjectType::Snapshot,
        TreeViewOptions {
            draw_children: Some(false),
            show_view: Some("/snapshots/tree.mustache".to_string()),
            allow_mapping: Some(false),
            allow_creating: Some(false),
            ..branch("snapshots")
        },
    )
}

fn snapshot_parent_layer() -> LayerDef {
    LayerDef::new().set(
        ObjectType::Audit,
        branch_with_views(
            "snapshot_audit",
            "/audits/tree.mustache",
            Some("/base_objects/tree_add_item.mustache"),
        ),
    )
}

fn person_layer() -> LayerDef {
    let extended = |mapping: &str| TreeViewOptions {
        show_view: Some("/directives/tree.mustache".to_string()),
        ..branch(mapping)
    };
    LayerDef::new()
        .mixin("issues")
        .set(
            ObjectType::Request,
            branch_with_views(
                "open_audit_requests",
                "/requests/tree.mustache",
                Some("/requests/tree_add_item.mustache"),
            ),
        )
        .set(
            ObjectType::Program,
            branch("extended_related_programs_via_search"),
        )
        .set(
            ObjectType::Regulation,
            extended("extended_related_regulations_via_search"),
        )
        .set(
            ObjectType::Contract,
            extended("extended_related_contracts_via_search"),
        )
        .set(
            ObjectType::Standard,
            extended("extended_related_standards_via_search"),
        )
        .set(
            ObjectType::Policy,
            extended("extended_related_policies_via_search"),
        )
        .set(
            ObjectType::Audit,
            branch_with_views("extended_related_audits_via_search", "/audits/tree.mustache", None),
        )
        .set(
            ObjectType::Section,
            branch_with_views(
                "extended_related_sections_via_search",
                "/sections/tree.mustache",
                Some("/base_objects/tree_add_item.mustache"),
            ),
        )
        .set(
            ObjectType::Clause,
            branch_with_views(
                "extended_related_clauses_via_search",
                "/sections/tree.mustache",
                Some("/base_objects/tree_add_item.mustache"),
            ),
        )
        .set(
            ObjectType::Objective,
            branch_with_views(
                "extended_related_objectives_via_search",
                "/objectives/tree.mustache",
                Some("/base_objects/tree_add_item.mustache"),
            ),
        )
        .set(
            ObjectType::Control,
            branch_with_views(
                "extended_related_controls_via_search",
                "/controls/tree.mustache",
                Some("/base_objects/tree_add_item.mustache"),
            ),
        )
}

/// The shipped mixin layer set: shared fragments plus one layer per parent
/// type, mirroring each page's working set.
pub fn default_layers() -> LayerSet {
    let mut layers = LayerSet::new();
    layers.insert("governance_objects", governance_objects_layer());
    layers.insert("business_objects", business_objects_layer());
    layers.insert("issues", issues_layer());
    layers.insert("snapshots", snapshots_layer());
    layers.insert("snapshot_parent", snapshot_parent_layer());
    layers.insert(
        "objectives",
        LayerDef::new().set(
            ObjectType::Objective,
            branch_with_views(
                "objectives",
                "/objectives/tree.mustache",
                Some("/objectives/tree_add_item.mustache"),
            ),
        ),
    );
    layers.insert(
        "controls",
        LayerDef::new().set(
            ObjectType::Control,
            branch_with_views(
                "controls",
                "/controls/tree.mustache",
                Some("/controls/tree_add_item.mustache"),
            ),
        ),
    );
    layers.insert(
        "directive",
        LayerDef::new()
            .mixin("objectives")
            .mixin("controls")
            .mixin("business_objects")
            .set(ObjectType::Section, branch("sections"))
            .set(ObjectType::Clause, branch("clauses"))
            .set(ObjectType::Audit, branch("related_audits")),
    );

    layers.insert(
        "Program",
        LayerDef::new()
            .mixin("governance_objects")
            .mixin("objectives")
            .mixin("controls")
            .mixin("business_objects")
            .mixin("issues")
            .set(
                ObjectType::Audit,
                TreeViewOptions {
                    allow_mapping: Some(true),
                    header_view: Some("/audits/tree_header.mustache".to_string()),
                    ..branch_with_views(
                        "audits",
                        "/audits/tree.mustache",
                        Some("/audits/tree_add_item.mustache"),
                    )
                },
            )
            .set(
                ObjectType::Person,
                TreeViewOptions {
                    allow_reading: Some(true),
                    allow_mapping: Some(true),
                    allow_creating: Some(true),
                    show_view: Some(
                        "/people_roles/authorizations_by_person_tree.mustache".to_string(),
                    ),
                    footer_view: Some("/base_objects/tree_footer.mustache".to_string()),
                    ..branch("mapped_and_or_authorized_people")
                },
            ),
    );
    layers.insert(
        "Audit",
        LayerDef::new()
            .mixin("issues")
            .mixin("governance_objects")
            .mixin("business_objects")
            .set(
                ObjectType::Request,
                branch_with_views(
                    "active_requests",
                    "/requests/tree.mustache",
                    Some("/requests/tree_add_item.mustache"),
                ),
            )
            .set(
                ObjectType::Program,
                TreeViewOptions {
                    show_view: Some("/programs/tree.mustache".to_string()),
                    allow_mapping: Some(false),
                    allow_creating: Some(false),
                    ..branch("_program")
                },
            )
            .set(ObjectType::Section, branch("sections"))
            .set(ObjectType::Clause, branch("clauses"))
            .set(
                ObjectType::Assessment,
                TreeViewOptions {
                    allow_mapping: Some(true),
                    header_view: Some("/base_objects/tree_header.mustache".to_string()),
                    ..branch_with_views(
                        "related_assessments",
                        "/base_objects/tree.mustache",
                        Some("/assessments/tree_add_item.mustache"),
                    )
                },
            )
            .set(
                ObjectType::AssessmentTemplate,
                TreeViewOptions {
                    draw_children: Some(false),
                    allow_mapping: Some(false),
                    ..branch_with_views(
                        "related_assessment_templates",
                        "/base_objects/tree.mustache",
                        Some("/assessment_templates/tree_add_item.mustache"),
                    )
                },
            )
            .set(
                ObjectType::Person,
                TreeViewOptions {
                    allow_mapping: Some(false),
                    allow_creating: Some(false),
                    ..branch("authorized_people")
                },
            ),
    );
    for directive in ["Regulation", "Standard", "Policy", "Contract"] {
        layers.insert(directive, LayerDef::new().mixin("directive").mixin("issues"));
    }
    for governed in ["Clause", "Section", "Objective", "Control"] {
        layers.insert(
            governed,
            LayerDef::new()
                .mixin("governance_objects")
                .mixin("business_objects")
                .mixin("issues")
                .set(ObjectType::Audit, branch("related_audits")),
        );
    }
    layers.insert(
        "Request",
        LayerDef::new()
            .mixin("governance_objects")
            .mixin("business_objects")
            .mixin("issues")
            .set(
                ObjectType::Audit,
                TreeViewOptions {
                    allow_creating: Some(false),
                    allow_mapping: Some(false),
                    ..branch_with_views(
                        "audits",
                        "/audits/tree.mustache",
                        Some("/audits/tree_add_item.mustache"),
                    )
                },
            ),
    );
    layers.insert(
        "Assessment",
        LayerDef::new()
            .mixin("governance_objects")
            .mixin("business_objects")
            .mixin("issues")
            .set(
                ObjectType::Audit,
                TreeViewOptions {
                    allow_creating: Some(false),
                    allow_mapping: Some(true),
                    ..branch_with_views(
                        "related_audits",
                        "/audits/tree.mustache",
                        Some("/audits/tree_add_item.mustache"),
                    )
                },
            )
            .set(ObjectType::Section, branch("sections"))
            .set(ObjectType::Clause, branch("clauses"))
            .set(
                ObjectType::Request,
                branch_with_views(
                    "related_requests",
                    "/requests/tree.mustache",
                    Some("/requests/tree_add_item.mustache"),
                ),
            ),
    );
    layers.insert(
        "Issue",
        LayerDef::new()
            .mixin("governance_objects")
            .mixin("business_objects")
            .set(
                ObjectType::Control,
                branch_with_views(
                    "related_controls",
                    "/controls/tree.mustache",
                    Some("/base_objects/tree_add_item.mustache"),
                ),
            )
            .set(
                ObjectType::Issue,
                TreeViewOptions {
                    footer_view: Some("/base_objects/tree_footer.mustache".to_string()),
                    add_item_view: Some("/base_objects/tree_add_item.mustache".to_string()),
                    ..branch("related_issues")
                },
            )
            .set(
                ObjectType::Audit,
                branch_with_views(
                    "related_audits",
                    "/audits/tree.mustache",
                    Some("/base_objects/tree_add_item.mustache"),
                ),
            ),
    );
    layers.insert(
        "Snapshot",
        LayerDef::new()
            .mixin("governance_objects")
            .mixin("business_objects")
            .set(ObjectType::AccessGroup, branch("related_access_groups")),
    );
    for holder in [
        "AccessGroup",
        "DataAsset",
        "Facility",
        "Market",
        "OrgGroup",
        "Vendor",
        "Process",
        "Product",
        "Project",
        "System",
        "Document",
    ] {
        layers.insert(
            holder,
            LayerDef::new()
                .mixin("governance_objects")
                .mixin("business_objects")
                .mixin("issues")
                .mixin("snapshots")
                .mixin("snapshot_parent"),
        );
    }
    layers.insert("Person", person_layer());
    layers
}

/// The shipped forbidden table: pairs that must never relate, plus per-type
/// candidate exclusions.
pub fn default_forbidden() -> ForbiddenSet {
    let mut forbidden = ForbiddenSet::new();
    forbidden.forbid_pair(ObjectType::Audit, ObjectType::Program);
    forbidden.forbid_pair(ObjectType::Audit, ObjectType::Request);
    forbidden.forbid_pair(ObjectType::Program, ObjectType::RiskAssessment);
    forbidden.forbid_pair(ObjectType::Person, ObjectType::Risk);
    forbidden.forbid_pair(ObjectType::Person, ObjectType::Threat);

    forbidden.set_for_type(
        ObjectType::Program,
        ForbiddenTypes::These(vec![ObjectType::Audit, ObjectType::RiskAssessment]),
    );
    forbidden.set_for_type(
        ObjectType::Audit,
        ForbiddenTypes::These(vec![
            ObjectType::Assessment,
            ObjectType::Program,
            ObjectType::Request,
        ]),
    );
    forbidden.set_for_type(
        ObjectType::Assessment,
        ForbiddenTypes::These(vec![ObjectType::Workflow, ObjectType::TaskGroup]),
    );
    forbidden.set_for_type(
        ObjectType::Request,
        ForbiddenTypes::These(vec![
            ObjectType::Workflow,
            ObjectType::TaskGroup,
            ObjectType::Person,
            ObjectType::Audit,
        ]),
    );
    forbidden.set_for_type(ObjectType::Person, ForbiddenTypes::All);
    forbidden.set_for_type(ObjectType::AssessmentTemplate, ForbiddenTypes::All);
    forbidden
}

/// The shipped canonical-mapping index: `related_*` relationship mappings
/// derived from the graph, person and document pairs backed by their join
/// models, and the audit specials.
pub fn default_mapping_index(graph: &TypeGraph) -> DomainResult<MappingIndex> {
    let mut index = derive_index(graph, [])?;
    for parent in graph.types() {
        if graph.contains_edge(parent, ObjectType::Person) {
            index.insert(
                parent,
                ObjectType::Person,
                CanonicalMapping {
                    name: "people".to_string(),
                    model: Some(JoinKind::ObjectPerson),
                },
            );
        }
        // Document attachment is not adjacency-driven; every page may
        // carry documents even though no adjacency row lists them.
        index.insert(
            parent,
            ObjectType::Document,
            CanonicalMapping {
                name: "documents".to_string(),
                model: Some(JoinKind::ObjectDocument),
            },
        );
    }
    // Audits do not map their program; they belong to it.
    index.insert(
        ObjectType::Audit,
        ObjectType::Program,
        CanonicalMapping {
            name: "_program".to_string(),
            model: Some(JoinKind::Relationship),
        },
    );
    index.insert(
        ObjectType::Program,
        ObjectType::Audit,
        CanonicalMapping::relationship("audits"),
    );
    index.insert(
        ObjectType::Audit,
        ObjectType::Request,
        CanonicalMapping::relationship("active_requests"),
    );
    Ok(index)
}

/// The fully wired shipped composer.
pub fn default_composer() -> DomainResult<ConfigComposer> {
    let graph = base_type_graph()?;
    let index = default_mapping_index(&graph)?;
    Ok(ConfigComposer::new(
        graph,
        default_overrides(),
        default_suppressions(),
        default_layers(),
        index,
    ))
}

/// The fully wired shipped mapping rules.
pub fn default_mapping_rules() -> DomainResult<MappingRules> {
    let graph = base_type_graph()?;
    let index = default_mapping_index(&graph)?;
    Ok(MappingRules::new(graph, default_forbidden(), index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_graph_parses_and_is_asymmetric() {
        let graph = base_type_graph().unwrap();
        assert_eq!(graph.len(), 25);
        // Audit lists AssessmentTemplate but not vice versa.
        assert!(graph.contains_edge(ObjectType::Audit, ObjectType::AssessmentTemplate));
        assert!(!graph.contains_edge(ObjectType::AssessmentTemplate, ObjectType::Audit));
        // Snapshot rows never list Snapshot itself.
        assert!(!graph.contains_edge(ObjectType::Snapshot, ObjectType::Snapshot));
    }

    #[test]
    fn test_every_layer_resolves() {
        let graph = base_type_graph().unwrap();
        let layers = default_layers();
        for parent in graph.types() {
            if layers.contains(parent.name()) {
                layers
                    .resolve(parent.name())
                    .unwrap_or_else(|e| panic!("layer {} failed: {}", parent, e));
            }
        }
    }

    #[test]
    fn test_default_composer_composes_every_parent() {
        let composer = default_composer().unwrap();
        for parent in composer.graph().types().collect::<Vec<_>>() {
            let descriptors = composer.compose(parent).unwrap();
            assert!(!descriptors.is_empty(), "no widgets for {}", parent);
        }
    }

    #[test]
    fn test_document_widget_is_suppressed_everywhere() {
        let suppressions = default_suppressions();
        assert!(suppressions.suppressed(ObjectType::Program, ObjectType::Document));
        assert!(suppressions.suppressed(ObjectType::Audit, ObjectType::Document));
    }

    #[test]
    fn test_audit_program_mapping_is_private() {
        let graph = base_type_graph().unwrap();
        let index = default_mapping_index(&graph).unwrap();
        assert_eq!(
            index.canonical_name(ObjectType::Audit, ObjectType::Program),
            Some("_program")
        );
        assert_eq!(
            index.public_canonical_name(ObjectType::Audit, ObjectType::Program),
            None
        );
        assert_eq!(
            index.canonical_name(ObjectType::Program, ObjectType::Audit),
            Some("audits")
        );
    }

    #[test]
    fn test_related_children_depth() {
        let children = related_children(2);
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].options.draw_children, Some(true));
        let nested = &children[0].options.child_options;
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].options.draw_children, Some(false));
        assert!(nested[0].options.child_options.is_empty());
    }
}
