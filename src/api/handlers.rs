//! Pure API handlers
//!
//! Each handler takes typed input and the context it reads from and returns
//! `Result<T, ApiError>`. None of them touch global state; the snapshot
//! handlers take the clock as a parameter.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::catalog::Catalog;
use crate::core::models::{AssessmentSnapshot, Revision};
use crate::core::ports::{SnapshotRead, SnapshotStore};
use crate::core::services::{
    CrosswalkResolver, EvidenceRequirements, GapAnalyzer, MAX_SCORE, OdpLookup, ResolvedGuidance,
    migration_notes, summarize_poam,
};

use super::error::ApiError;
use super::types::{
    ControlIdRequest, ControlInfoData, ControlInfoRequest, CrosswalkData, CrosswalkRequest,
    FamiliesData, GapsData, GuidanceRequest, ImpactData, ImpactRequest, Lookup, NewControlsData,
    OdpData, PoamData, RevisionRequest, ScoreInfoData, ScoreInfoRequest, SearchData,
    SearchRequest, SearchResult, SnapshotData, SnapshotStatus, TailoringData, WriteBridgeData,
    WriteBridgeRequest,
};

/// Default number of search results
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Upper bound on search results
pub const MAX_RESULTS_LIMIT: usize = 100;

fn parse_revision(raw: Option<&str>) -> Result<Revision, ApiError> {
    raw.map_or(Ok(Revision::R2), |r| r.parse().map_err(ApiError::bad_request))
}

fn odp_data<'a>(resolver: &'a CrosswalkResolver, control_id: &str) -> Option<OdpData<'a>> {
    match resolver.resolve_odp(control_id) {
        OdpLookup::Found { source, set } => Some(OdpData {
            control_id: control_id.to_string(),
            source,
            title: &set.title,
            related: &set.related,
            parameters: &set.parameters,
        }),
        OdpLookup::NotFound { .. } => None,
    }
}

// =============================================================================
// CONTROLS
// =============================================================================

/// Look up one control by id
pub fn get_control_info<'a>(
    catalog: &'a Catalog,
    req: &ControlInfoRequest,
) -> Result<Lookup<ControlInfoData<'a>>, ApiError> {
    let revision = parse_revision(req.revision.as_deref())?;
    let id = req.control_id.trim();

    let Some(control) = catalog.index(revision).get(id) else {
        return Ok(Lookup::not_found(format!("Control {id} not found in {revision}")));
    };

    // Rev 2 controls carry the ODPs of their Rev 3 successor
    let odp_target = match revision {
        Revision::R3 => Some(id),
        Revision::R2 => catalog.crosswalk().resolve_mapping(id).map(|m| m.target.as_str()),
    };
    let odp = odp_target.and_then(|target| odp_data(catalog.crosswalk(), target));

    Ok(Lookup::found(ControlInfoData {
        revision,
        control,
        objective_count: control.objectives.len(),
        odp,
    }))
}

/// Keyword search over one revision
pub fn search_controls<'a>(
    catalog: &'a Catalog,
    req: &SearchRequest,
) -> Result<SearchData<'a>, ApiError> {
    let revision = parse_revision(req.revision.as_deref())?;
    let max_results = req.max_results.unwrap_or(DEFAULT_MAX_RESULTS).clamp(1, MAX_RESULTS_LIMIT);

    let results: Vec<SearchResult<'a>> = catalog
        .index(revision)
        .search(&req.query, max_results)
        .into_iter()
        .map(|hit| SearchResult {
            score: hit.score,
            control_id: &hit.control.control_id,
            control_name: &hit.control.control_name,
            family_name: &hit.control.family_name,
            description: &hit.control.description,
        })
        .collect();

    log::debug!("Search '{}' in {revision}: {} result(s)", req.query, results.len());

    Ok(SearchData {
        query: req.query.clone(),
        revision,
        total: results.len(),
        results,
    })
}

/// List families with their counts
pub fn list_families<'a>(
    catalog: &'a Catalog,
    req: &RevisionRequest,
) -> Result<FamiliesData<'a>, ApiError> {
    let revision = parse_revision(req.revision.as_deref())?;
    let index = catalog.index(revision);
    Ok(FamiliesData {
        revision,
        stats: index.stats(),
        families: index.families(),
    })
}

// =============================================================================
// CROSSWALK
// =============================================================================

/// Rev 2 to Rev 3 mapping with ODPs and migration notes
pub fn get_crosswalk<'a>(
    catalog: &'a Catalog,
    req: &CrosswalkRequest,
) -> Result<Lookup<CrosswalkData<'a>>, ApiError> {
    let id = req.rev2_id.trim();
    let Some(mapping) = catalog.crosswalk().resolve_mapping(id) else {
        return Ok(Lookup::not_found(format!("No Rev 3 mapping found for {id}")));
    };

    Ok(Lookup::found(CrosswalkData {
        rev2_id: id.to_string(),
        mapping,
        odp: odp_data(catalog.crosswalk(), &mapping.target),
        migration_notes: migration_notes(id, mapping),
    }))
}

/// DoD-defined ODP values for a Rev 3 control
pub fn get_odp_values<'a>(
    catalog: &'a Catalog,
    req: &ControlIdRequest,
) -> Result<Lookup<OdpData<'a>>, ApiError> {
    let id = req.control_id.trim();
    match catalog.crosswalk().resolve_odp(id) {
        OdpLookup::Found { source, set } => Ok(Lookup::found(OdpData {
            control_id: id.to_string(),
            source,
            title: &set.title,
            related: &set.related,
            parameters: &set.parameters,
        })),
        OdpLookup::NotFound { note } => Ok(Lookup::not_found(note)),
    }
}

/// Rev 3 requirements with no Rev 2 predecessor
pub fn get_new_rev3_controls() -> Result<NewControlsData, ApiError> {
    let controls = CrosswalkResolver::list_new_controls();
    Ok(NewControlsData {
        total: controls.len(),
        controls,
    })
}

/// Source 800-53 controls and tailoring
pub fn get_800_53_mapping<'a>(
    catalog: &'a Catalog,
    req: &ControlIdRequest,
) -> Result<Lookup<TailoringData<'a>>, ApiError> {
    let id = req.control_id.trim();
    Ok(catalog.crosswalk().resolve_tailoring(id).map_or_else(
        || Lookup::not_found(format!("No NIST SP 800-53 mapping found for {id}")),
        |record| {
            Lookup::found(TailoringData {
                control_id: id.to_string(),
                record,
            })
        },
    ))
}

// =============================================================================
// GUIDANCE AND EVIDENCE
// =============================================================================

/// Implementation guidance, optionally filtered by technology
pub fn get_implementation_guidance<'a>(
    catalog: &'a Catalog,
    req: &GuidanceRequest,
) -> Result<Lookup<ResolvedGuidance<'a>>, ApiError> {
    let id = req.control_id.trim();
    Ok(catalog
        .guidance()
        .resolve_guidance(id, req.technology.as_deref())
        .map_or_else(
            || Lookup::not_found(format!("No implementation guidance found for {id}")),
            Lookup::found,
        ))
}

/// Evidence checklist for a control
pub fn get_evidence_requirements(
    catalog: &Catalog,
    req: &ControlIdRequest,
) -> Result<Lookup<EvidenceRequirements>, ApiError> {
    let id = req.control_id.trim();
    Ok(catalog.evidence_requirements(id).map_or_else(
        || Lookup::not_found(format!("Control {id} not found in r2 or r3")),
        Lookup::found,
    ))
}

// =============================================================================
// SCORING
// =============================================================================

/// Point value of one control, or the methodology
pub fn get_sprs_score_info(
    catalog: &Catalog,
    req: &ScoreInfoRequest,
) -> Result<ScoreInfoData, ApiError> {
    let engine = catalog.score();
    let Some(id) = req.control_id.as_deref().map(str::trim).filter(|id| !id.is_empty()) else {
        return Ok(ScoreInfoData::Methodology(engine.methodology()));
    };

    Ok(ScoreInfoData::Control(engine.score_of(id).map_or_else(
        || Lookup::not_found(format!("{id} is not a scored NIST SP 800-171 Rev 2 requirement")),
        Lookup::found,
    )))
}

/// Score impact of a set of not-met controls
pub fn calculate_sprs_impact(
    catalog: &Catalog,
    req: &ImpactRequest,
) -> Result<ImpactData, ApiError> {
    let not_met: Vec<&str> = req.not_met.split(',').collect();
    let impact = catalog.score().compute_impact(&not_met);

    let warning = (!impact.blockers.is_empty()).then(|| {
        format!(
            "{} must be fully implemented and cannot be deferred to a POA&M",
            impact.blockers.join(", ")
        )
    });

    Ok(ImpactData {
        impact,
        max_score: MAX_SCORE,
        warning,
    })
}

// =============================================================================
// ASSESSMENT SNAPSHOT
// =============================================================================

fn not_fresh<T>(read: SnapshotRead, location: &str) -> SnapshotData<T> {
    match read {
        SnapshotRead::Stale {
            age_minutes,
            exported_at,
        } => {
            let age = age_minutes
                .map_or_else(|| "unknown age".to_string(), |m| format!("{m} minutes old"));
            SnapshotData {
                status: SnapshotStatus::Stale,
                data: None,
                age_minutes,
                exported_at,
                message: Some(format!(
                    "Assessment snapshot is stale ({age}); re-export it from the assessment tool"
                )),
            }
        },
        SnapshotRead::Absent | SnapshotRead::Fresh(_) => SnapshotData {
            status: SnapshotStatus::Absent,
            data: None,
            age_minutes: None,
            exported_at: None,
            message: Some(format!("No assessment snapshot found at {location}")),
        },
    }
}

fn fresh<T>(data: T, exported_at: Option<String>) -> SnapshotData<T> {
    SnapshotData {
        status: SnapshotStatus::Fresh,
        data: Some(data),
        age_minutes: None,
        exported_at,
        message: None,
    }
}

/// The current assessment snapshot, redacted
pub fn get_assessment_snapshot(
    store: &dyn SnapshotStore,
    now: DateTime<Utc>,
) -> Result<SnapshotData<Value>, ApiError> {
    match store.read_at(now) {
        SnapshotRead::Fresh(value) => {
            let exported_at = value.get("_exportedAt").and_then(Value::as_str).map(String::from);
            Ok(fresh(value, exported_at))
        },
        read => Ok(not_fresh(read, &store.location())),
    }
}

/// Prioritized gaps from the current snapshot
pub fn get_assessment_gaps(
    catalog: &Catalog,
    store: &dyn SnapshotStore,
    now: DateTime<Utc>,
) -> Result<GapsData, ApiError> {
    match store.read_at(now) {
        SnapshotRead::Fresh(value) => {
            let snapshot = AssessmentSnapshot::from_value(&value);
            let analyzer = GapAnalyzer::new(catalog.score(), catalog.index(Revision::R2));
            let report = analyzer.analyze(&snapshot.status_map());
            Ok(fresh(report, snapshot.exported_at))
        },
        read => Ok(not_fresh(read, &store.location())),
    }
}

/// POA&M summary from the current snapshot
pub fn get_poam_summary(
    catalog: &Catalog,
    store: &dyn SnapshotStore,
    now: DateTime<Utc>,
) -> Result<PoamData, ApiError> {
    match store.read_at(now) {
        SnapshotRead::Fresh(value) => {
            let snapshot = AssessmentSnapshot::from_value(&value);
            let summary = summarize_poam(&snapshot.poam_items, now.date_naive(), catalog.score());
            Ok(fresh(summary, snapshot.exported_at))
        },
        read => Ok(not_fresh(read, &store.location())),
    }
}

/// Replace the snapshot with caller-supplied JSON
pub fn write_assessment_bridge(
    store: &dyn SnapshotStore,
    req: &WriteBridgeRequest,
) -> Result<WriteBridgeData, ApiError> {
    let payload: Value = serde_json::from_str(&req.json_data)
        .map_err(|e| ApiError::bad_request(format!("jsonData is not valid JSON: {e}")))?;

    let written = store.write(payload)?;
    let exported_at =
        written.get("_exportedAt").and_then(Value::as_str).unwrap_or_default().to_string();

    log::info!("Assessment snapshot written to {}", store.location());

    Ok(WriteBridgeData {
        written: true,
        path: store.location(),
        exported_at,
    })
}
