//! Evidence requirements - generic artifacts per family plus per-objective hints

use serde::Serialize;

use crate::core::models::{Revision, family_for_control};

use super::index::ControlIndex;

/// Generic evidence artifacts by family abbreviation
const EVIDENCE_CATEGORIES: [(&str, &[&str]); 17] = [
    ("AC", &["Access control policy", "User account listings", "Role and permission matrices", "Remote access configuration"]),
    ("AT", &["Security awareness training materials", "Training completion records", "Role-based training plans"]),
    ("AU", &["Audit logging policy", "Log configuration exports", "Log review records", "SIEM alert samples"]),
    ("CM", &["Baseline configurations", "Change control records", "Software inventory", "Hardening benchmarks"]),
    ("IA", &["Identity management procedures", "MFA configuration screenshots", "Password policy settings"]),
    ("IR", &["Incident response plan", "Incident tickets and reports", "Tabletop exercise results"]),
    ("MA", &["Maintenance logs", "Maintenance personnel authorizations", "Remote maintenance session records"]),
    ("MP", &["Media protection policy", "Media sanitization records", "Media marking samples"]),
    ("PS", &["Personnel screening records", "Termination and transfer checklists"]),
    ("PE", &["Facility access lists", "Visitor logs", "Physical access device inventory"]),
    ("RA", &["Risk assessment report", "Vulnerability scan results", "Remediation tracking"]),
    ("CA", &["System security plan", "Security control assessment reports", "Plan of action and milestones"]),
    ("SC", &["Network diagrams", "Boundary protection configuration", "Encryption and FIPS validation certificates"]),
    ("SI", &["Patch management records", "Malware protection configuration", "Security alert subscriptions"]),
    ("PL", &["Security policies and procedures", "Rules of behavior acknowledgments"]),
    ("SA", &["Security engineering documentation", "External service agreements", "Unsupported component register"]),
    ("SR", &["Supply chain risk management plan", "Supplier assessments", "Acquisition security requirements"]),
];

/// Evidence checklist for one control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceRequirements {
    /// Control id
    pub control_id: String,
    /// Control name
    pub control_name: String,
    /// Revision whose index answered
    pub revision: Revision,
    /// Family abbreviation, when resolvable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<&'static str>,
    /// Generic evidence artifacts for the family
    pub categories: Vec<&'static str>,
    /// One hint per objective
    pub objective_evidence: Vec<ObjectiveEvidence>,
}

/// Evidence hint for one objective
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveEvidence {
    /// Objective id
    pub objective_id: String,
    /// Generated hint
    pub evidence: String,
}

/// Evidence categories for a family abbreviation
#[must_use]
pub fn evidence_categories(abbreviation: &str) -> &'static [&'static str] {
    EVIDENCE_CATEGORIES
        .iter()
        .find(|(abbr, _)| abbr.eq_ignore_ascii_case(abbreviation))
        .map_or(&[][..], |(_, categories)| *categories)
}

/// Synthesize evidence requirements, checking the Rev 2 index before Rev 3
#[must_use]
pub fn resolve_evidence_requirements(
    r2: &ControlIndex,
    r3: &ControlIndex,
    control_id: &str,
) -> Option<EvidenceRequirements> {
    let (revision, control) = [(Revision::R2, r2), (Revision::R3, r3)]
        .into_iter()
        .find_map(|(revision, index)| index.get(control_id).map(|c| (revision, c)))?;

    let family = family_for_control(&control.control_id).map(|f| f.abbreviation);

    Some(EvidenceRequirements {
        control_id: control.control_id.clone(),
        control_name: control.control_name.clone(),
        revision,
        family,
        categories: family.map(evidence_categories).unwrap_or_default().to_vec(),
        objective_evidence: control
            .objectives
            .iter()
            .map(|o| ObjectiveEvidence {
                objective_id: o.id.clone(),
                evidence: format!("documentation or screenshot demonstrating: {}", o.text),
            })
            .collect(),
    })
}
