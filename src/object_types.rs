// Copyright 2025 Cowboy AI, LLC.

//! The closed set of entity kinds known to the domain
//!
//! Every adjacency row, forbidden entry, canonical mapping and join endpoint
//! is expressed against this enum, so unknown type names are rejected at the
//! edge instead of failing deep inside composition.

use crate::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A kind of business entity.
///
/// Variants are declared in lexicographic name order so the derived `Ord`
/// matches ordering by type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectType {
    /// An access group
    AccessGroup,
    /// An assessment performed within an audit
    Assessment,
    /// A template for generating assessments
    AssessmentTemplate,
    /// An audit over a program
    Audit,
    /// A clause of a contract
    Clause,
    /// A contract directive
    Contract,
    /// A control
    Control,
    /// A data asset
    DataAsset,
    /// An attached document
    Document,
    /// A facility
    Facility,
    /// An issue raised against an object
    Issue,
    /// A market
    Market,
    /// An objective
    Objective,
    /// An organizational group
    OrgGroup,
    /// A person
    Person,
    /// A policy directive
    Policy,
    /// A business process
    Process,
    /// A product
    Product,
    /// A program
    Program,
    /// A project
    Project,
    /// A regulation directive
    Regulation,
    /// An audit request
    Request,
    /// A risk
    Risk,
    /// A risk assessment
    RiskAssessment,
    /// A permission role
    Role,
    /// A section of a directive
    Section,
    /// A point-in-time snapshot of another object
    Snapshot,
    /// A standard directive
    Standard,
    /// A system
    System,
    /// A workflow task group
    TaskGroup,
    /// A threat
    Threat,
    /// A vendor
    Vendor,
    /// A workflow
    Workflow,
}

impl ObjectType {
    /// All known object types, in lexicographic order.
    pub const ALL: &'static [ObjectType] = &[
        ObjectType::AccessGroup,
        ObjectType::Assessment,
        ObjectType::AssessmentTemplate,
        ObjectType::Audit,
        ObjectType::Clause,
        ObjectType::Contract,
        ObjectType::Control,
        ObjectType::DataAsset,
        ObjectType::Document,
        ObjectType::Facility,
        ObjectType::Issue,
        ObjectType::Market,
        ObjectType::Objective,
        ObjectType::OrgGroup,
        ObjectType::Person,
        ObjectType::Policy,
        ObjectType::Process,
        ObjectType::Product,
        ObjectType::Program,
        ObjectType::Project,
        ObjectType::Regulation,
        ObjectType::Request,
        ObjectType::Risk,
        ObjectType::RiskAssessment,
        ObjectType::Role,
        ObjectType::Section,
        ObjectType::Snapshot,
        ObjectType::Standard,
        ObjectType::System,
        ObjectType::TaskGroup,
        ObjectType::Threat,
        ObjectType::Vendor,
        ObjectType::Workflow,
    ];

    /// The canonical model name, e.g. `"OrgGroup"`.
    pub fn name(&self) -> &'static str {
        match self {
            ObjectType::AccessGroup => "AccessGroup",
            ObjectType::Assessment => "Assessment",
            ObjectType::AssessmentTemplate => "AssessmentTemplate",
            ObjectType::Audit => "Audit",
            ObjectType::Clause => "Clause",
            ObjectType::Contract => "Contract",
            ObjectType::Control => "Control",
            ObjectType::DataAsset => "DataAsset",
            ObjectType::Document => "Document",
            ObjectType::Facility => "Facility",
            ObjectType::Issue => "Issue",
            ObjectType::Market => "Market",
            ObjectType::Objective => "Objective",
            ObjectType::OrgGroup => "OrgGroup",
            ObjectType::Person => "Person",
            ObjectType::Policy => "Policy",
            ObjectType::Process => "Process",
            ObjectType::Product => "Product",
            ObjectType::Program => "Program",
            ObjectType::Project => "Project",
            ObjectType::Regulation => "Regulation",
            ObjectType::Request => "Request",
            ObjectType::Risk => "Risk",
            ObjectType::RiskAssessment => "RiskAssessment",
            ObjectType::Role => "Role",
            ObjectType::Section => "Section",
            ObjectType::Snapshot => "Snapshot",
            ObjectType::Standard => "Standard",
            ObjectType::System => "System",
            ObjectType::TaskGroup => "TaskGroup",
            ObjectType::Threat => "Threat",
            ObjectType::Vendor => "Vendor",
            ObjectType::Workflow => "Workflow",
        }
    }

    /// The singular table name, e.g. `"org_group"`. Used as the default
    /// widget id for a child type.
    pub fn table_singular(&self) -> &'static str {
        match self {
            ObjectType::AccessGroup => "access_group",
            ObjectType::Assessment => "assessment",
            ObjectType::AssessmentTemplate => "assessment_template",
            ObjectType::Audit => "audit",
            ObjectType::Clause => "clause",
            ObjectType::Contract => "contract",
            ObjectType::Control => "control",
            ObjectType::DataAsset => "data_asset",
            ObjectType::Document => "document",
            ObjectType::Facility => "facility",
            ObjectType::Issue => "issue",
            ObjectType::Market => "market",
            ObjectType::Objective => "objective",
            ObjectType::OrgGroup => "org_group",
            ObjectType::Person => "person",
            ObjectType::Policy => "policy",
            ObjectType::Process => "process",
            ObjectType::Product => "product",
            ObjectType::Program => "program",
            ObjectType::Project => "project",
            ObjectType::Regulation => "regulation",
            ObjectType::Request => "request",
            ObjectType::Risk => "risk",
            ObjectType::RiskAssessment => "risk_assessment",
            ObjectType::Role => "role",
            ObjectType::Section => "section",
            ObjectType::Snapshot => "snapshot",
            ObjectType::Standard => "standard",
            ObjectType::System => "system",
            ObjectType::TaskGroup => "task_group",
            ObjectType::Threat => "threat",
            ObjectType::Vendor => "vendor",
            ObjectType::Workflow => "workflow",
        }
    }

    /// The REST collection segment, e.g. `"org_groups"` in
    /// `/api/org_groups/{id}`.
    pub fn table_plural(&self) -> &'static str {
        match self {
            ObjectType::AccessGroup => "access_groups",
            ObjectType::Assessment => "assessments",
            ObjectType::AssessmentTemplate => "assessment_templates",
            ObjectType::Audit => "audits",
            ObjectType::Clause => "clauses",
            ObjectType::Contract => "contracts",
            ObjectType::Control => "controls",
            ObjectType::DataAsset => "data_assets",
            ObjectType::Document => "documents",
            ObjectType::Facility => "facilities",
            ObjectType::Issue => "issues",
            ObjectType::Market => "markets",
            ObjectType::Objective => "objectives",
            ObjectType::OrgGroup => "org_groups",
            ObjectType::Person => "people",
            ObjectType::Policy => "policies",
            ObjectType::Process => "processes",
            ObjectType::Product => "products",
            ObjectType::Program => "programs",
            ObjectType::Project => "projects",
            ObjectType::Regulation => "regulations",
            ObjectType::Request => "requests",
            ObjectType::Risk => "risks",
            ObjectType::RiskAssessment => "risk_assessments",
            ObjectType::Role => "roles",
            ObjectType::Section => "sections",
            ObjectType::Snapshot => "snapshots",
            ObjectType::Standard => "standards",
            ObjectType::System => "systems",
            ObjectType::TaskGroup => "task_groups",
            ObjectType::Threat => "threats",
            ObjectType::Vendor => "vendors",
            ObjectType::Workflow => "workflows",
        }
    }

    /// The human-readable singular title.
    pub fn title_singular(&self) -> &'static str {
        match self {
            ObjectType::AccessGroup => "Access Group",
            ObjectType::AssessmentTemplate => "Assessment Template",
            ObjectType::DataAsset => "Data Asset",
            ObjectType::OrgGroup => "Org Group",
            ObjectType::RiskAssessment => "Risk Assessment",
            ObjectType::TaskGroup => "Task Group",
            other => other.name(),
        }
    }

    /// Lower-cased name used when building unordered pair keys.
    pub fn lower_name(&self) -> String {
        self.name().to_lowercase()
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ObjectType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        ObjectType::ALL
            .iter()
            .find(|t| t.name() == s)
            .copied()
            .ok_or_else(|| DomainError::UnknownObjectType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_are_in_name_order() {
        for pair in ObjectType::ALL.windows(2) {
            assert!(
                pair[0].name() < pair[1].name(),
                "{} should sort before {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_derived_ord_matches_name_ord() {
        let mut by_variant = ObjectType::ALL.to_vec();
        by_variant.sort();
        let mut by_name = ObjectType::ALL.to_vec();
        by_name.sort_by_key(|t| t.name());
        assert_eq!(by_variant, by_name);
    }

    #[test]
    fn test_round_trip_names() {
        for ty in ObjectType::ALL {
            assert_eq!(ty.name().parse::<ObjectType>().unwrap(), *ty);
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = "Widget".parse::<ObjectType>().unwrap_err();
        assert!(matches!(err, DomainError::UnknownObjectType(name) if name == "Widget"));
    }

    #[test]
    fn test_irregular_plurals() {
        assert_eq!(ObjectType::Person.table_plural(), "people");
        assert_eq!(ObjectType::Policy.table_plural(), "policies");
        assert_eq!(ObjectType::Facility.table_plural(), "facilities");
        assert_eq!(ObjectType::Process.table_plural(), "processes");
    }

    #[test]
    fn test_titles() {
        assert_eq!(ObjectType::OrgGroup.title_singular(), "Org Group");
        assert_eq!(ObjectType::Audit.title_singular(), "Audit");
    }
}
