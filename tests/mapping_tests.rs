// Copyright 2025 Cowboy AI, LLC.

//! Mapping rules over the shipped defaults

use grc_domain::{
    default_mapping_rules, Entity, ForbiddenTypes, MapOptions, MapTarget, ObjectType,
    PageContext, Session, StaticPermissions, TypeFilterOptions,
};
use std::sync::Arc;
use test_case::test_case;

fn permissive_session() -> Session {
    Session::new(PageContext::Dashboard, Arc::new(StaticPermissions(true)))
}

#[test_case(ObjectType::Audit, ObjectType::Program; "audit program")]
#[test_case(ObjectType::Audit, ObjectType::Request; "audit request")]
#[test_case(ObjectType::Program, ObjectType::RiskAssessment; "program riskassessment")]
#[test_case(ObjectType::Person, ObjectType::Risk; "person risk")]
#[test_case(ObjectType::Person, ObjectType::Threat; "person threat")]
fn test_forbidden_pairs_reject_in_both_directions(a: ObjectType, b: ObjectType) {
    let rules = default_mapping_rules().unwrap();
    let session = permissive_session();

    let left = Entity::new(a, 1);
    let right = Entity::new(b, 2);
    assert!(!rules.allowed_to_map(
        &left,
        MapTarget::Instance(&right),
        MapOptions::default(),
        &session
    ));
    assert!(!rules.allowed_to_map(
        &right,
        MapTarget::Instance(&left),
        MapOptions::default(),
        &session
    ));
}

#[test]
fn test_audit_program_rejected_despite_full_permissions() {
    let rules = default_mapping_rules().unwrap();
    let session = permissive_session().with_creatable_contexts(vec![1]);

    let audit = Entity::new(ObjectType::Audit, 1).with_context(1);
    assert!(!rules.allowed_to_map(
        &audit,
        MapTarget::Kind(ObjectType::Program),
        MapOptions::default(),
        &session
    ));
}

#[test]
fn test_permitted_pair_passes_with_permissions() {
    let rules = default_mapping_rules().unwrap();
    let session = permissive_session();

    let program = Entity::new(ObjectType::Program, 1);
    let control = Entity::new(ObjectType::Control, 2);
    assert!(rules.allowed_to_map(
        &program,
        MapTarget::Instance(&control),
        MapOptions::default(),
        &session
    ));
}

#[test]
fn test_joinable_mapping_requires_reverse_adjacency() {
    let rules = default_mapping_rules().unwrap();
    let session = permissive_session();

    // Control pages list audits and audits list controls, so the joinable
    // requirement is satisfiable in both directions.
    let control = Entity::new(ObjectType::Control, 1);
    assert!(rules.allowed_to_map(
        &control,
        MapTarget::Kind(ObjectType::Audit),
        MapOptions { join: true },
        &session
    ));

    // The only Audit -> Program canonical mapping is private, so a joinable
    // mapping request is denied.
    let audit = Entity::new(ObjectType::Audit, 2);
    assert!(!rules.allowed_to_map(
        &audit,
        MapTarget::Kind(ObjectType::Program),
        MapOptions { join: true },
        &session
    ));
}

#[test]
fn test_denied_permissions_reject_unless_source_is_new() {
    let rules = default_mapping_rules().unwrap();
    let session = Session::new(PageContext::Dashboard, Arc::new(StaticPermissions(false)));

    let persisted = Entity::new(ObjectType::Program, 1);
    assert!(!rules.allowed_to_map(
        &persisted,
        MapTarget::Kind(ObjectType::Control),
        MapOptions::default(),
        &session
    ));

    let draft = Entity::draft(ObjectType::Program);
    assert!(rules.allowed_to_map(
        &draft,
        MapTarget::Kind(ObjectType::Control),
        MapOptions::default(),
        &session
    ));
}

#[test]
fn test_request_candidates_exclude_forbidden_types() {
    let rules = default_mapping_rules().unwrap();
    let candidates = rules.mappable_types(ObjectType::Request, &TypeFilterOptions::default());

    for excluded in [
        ObjectType::Workflow,
        ObjectType::TaskGroup,
        ObjectType::Person,
        ObjectType::Audit,
    ] {
        assert!(
            !candidates.contains(&excluded),
            "{} offered as a Request candidate",
            excluded
        );
    }
    // The rest of the adjacency row survives.
    assert!(candidates.contains(&ObjectType::Control));
    assert!(candidates.contains(&ObjectType::Program));
}

#[test_case(ObjectType::Person; "person")]
#[test_case(ObjectType::AssessmentTemplate; "assessment template")]
fn test_wildcard_forbidden_types_have_no_candidates(ty: ObjectType) {
    let rules = default_mapping_rules().unwrap();
    assert!(rules
        .mappable_types(ty, &TypeFilterOptions::default())
        .is_empty());
}

#[test]
fn test_candidates_never_include_forbidden_entries() {
    let rules = default_mapping_rules().unwrap();
    let graph = grc_domain::base_type_graph().unwrap();
    let forbidden = grc_domain::default_forbidden();

    for ty in graph.types() {
        let candidates = rules.mappable_types(ty, &TypeFilterOptions::default());
        if let Some(ForbiddenTypes::These(excluded)) = forbidden.for_type(ty) {
            for entry in excluded {
                assert!(
                    !candidates.contains(entry),
                    "{} offered on {} despite forbidden entry",
                    entry,
                    ty
                );
            }
        }
    }
}

#[test]
fn test_whitelist_extends_candidates() {
    let rules = default_mapping_rules().unwrap();
    let candidates = rules.mappable_types(
        ObjectType::Person,
        &TypeFilterOptions {
            whitelist: vec![ObjectType::Program],
            forbidden: None,
        },
    );
    assert_eq!(candidates, vec![ObjectType::Program]);
}

#[test]
fn test_is_mappable_type_agrees_with_candidate_list() {
    let rules = default_mapping_rules().unwrap();
    let options = TypeFilterOptions::default();
    assert!(rules.is_mappable_type(ObjectType::Program, ObjectType::Control, &options));
    assert!(!rules.is_mappable_type(ObjectType::Program, ObjectType::Audit, &options));
}
