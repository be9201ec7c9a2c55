//! TOML parser for catalog source files
//!
//! Each source file is plain data validated against [`SourceFile`]. A file may
//! contribute to any of the recognized collections; unknown keys are rejected.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::core::models::{CrosswalkEntry, Family, GuidanceEntry, OdpSet, TailoringRecord};

/// Largest source file accepted, in bytes
pub const MAX_SOURCE_BYTES: u64 = 8 * 1024 * 1024;

/// Errors that can occur when loading a source file
#[derive(Debug, Error)]
pub enum LoadError {
    /// File could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid TOML or does not match the schema
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// File exceeds [`MAX_SOURCE_BYTES`]
    #[error("file is {size} bytes, limit is {limit}")]
    TooLarge {
        /// Actual size
        size: u64,
        /// Limit
        limit: u64,
    },

    /// File parsed but violates an invariant
    #[error("invalid source: {0}")]
    Invalid(String),
}

/// A catalog source file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceFile {
    /// Rev 2 families
    #[serde(default)]
    pub families_r2: Vec<Family>,

    /// Rev 3 families
    #[serde(default)]
    pub families_r3: Vec<Family>,

    /// Rev 2 → Rev 3 crosswalk keyed by Rev 2 id
    #[serde(default)]
    pub crosswalk: Option<HashMap<String, CrosswalkEntry>>,

    /// Primary ODP table keyed by Rev 3 id
    #[serde(default)]
    pub odp: Option<HashMap<String, OdpSet>>,

    /// Migration ODP table keyed by Rev 3 id
    #[serde(default)]
    pub migration_odp: Option<HashMap<String, OdpSet>>,

    /// Implementation guidance keyed by any historical id spelling
    #[serde(default)]
    pub guidance: Option<HashMap<String, GuidanceEntry>>,

    /// 800-53 tailoring keyed by Rev 2 id
    #[serde(default)]
    pub nist_800_53: Option<HashMap<String, TailoringRecord>>,
}

impl SourceFile {
    /// Whether the file contributes nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.families_r2.is_empty()
            && self.families_r3.is_empty()
            && self.crosswalk.is_none()
            && self.odp.is_none()
            && self.migration_odp.is_none()
            && self.guidance.is_none()
            && self.nist_800_53.is_none()
    }
}

/// Parse and validate source text
///
/// # Errors
///
/// Returns an error if the text is not valid TOML, does not match the schema,
/// or violates an invariant.
pub fn parse_source(content: &str) -> Result<SourceFile, LoadError> {
    let file: SourceFile = toml::from_str(content)?;
    validate(&file)?;
    Ok(file)
}

/// Load and validate a source file
///
/// # Errors
///
/// Returns an error if the file cannot be read, is too large, or fails
/// [`parse_source`].
pub fn load_file(path: &Path) -> Result<SourceFile, LoadError> {
    let size = fs::metadata(path)?.len();
    if size > MAX_SOURCE_BYTES {
        return Err(LoadError::TooLarge {
            size,
            limit: MAX_SOURCE_BYTES,
        });
    }
    let content = fs::read_to_string(path)?;
    parse_source(&content)
}

fn invalid(message: String) -> LoadError {
    LoadError::Invalid(message)
}

fn validate(file: &SourceFile) -> Result<(), LoadError> {
    validate_families("families_r2", &file.families_r2)?;
    validate_families("families_r3", &file.families_r3)?;

    if let Some(crosswalk) = &file.crosswalk {
        for (source, entry) in crosswalk {
            if source.trim().is_empty() || entry.target.trim().is_empty() {
                return Err(invalid(format!("crosswalk entry '{source}' has an empty id")));
            }
        }
    }

    for (table, sets) in [("odp", &file.odp), ("migration_odp", &file.migration_odp)] {
        for (control, set) in sets.iter().flatten() {
            let mut seen = HashSet::new();
            for parameter in &set.parameters {
                if parameter.id.trim().is_empty() {
                    return Err(invalid(format!("{table}.{control} has a parameter with no id")));
                }
                if !seen.insert(parameter.id.as_str()) {
                    return Err(invalid(format!(
                        "{table}.{control} repeats parameter id {}",
                        parameter.id
                    )));
                }
            }
        }
    }

    Ok(())
}

fn validate_families(collection: &str, families: &[Family]) -> Result<(), LoadError> {
    let mut family_ids = HashSet::new();
    let mut control_ids = HashSet::new();

    for family in families {
        if family.id.trim().is_empty() {
            return Err(invalid(format!("{collection} has a family with no id")));
        }
        if !family_ids.insert(family.id.as_str()) {
            return Err(invalid(format!("{collection} repeats family {}", family.id)));
        }

        for control in &family.controls {
            if control.id.trim().is_empty() {
                return Err(invalid(format!("family {} has a control with no id", family.id)));
            }
            if !control_ids.insert(control.id.as_str()) {
                return Err(invalid(format!("{collection} repeats control {}", control.id)));
            }

            let mut objective_ids = HashSet::new();
            for objective in control.objectives() {
                if objective.id.trim().is_empty() {
                    return Err(invalid(format!("control {} has an objective with no id", control.id)));
                }
                if !objective_ids.insert(objective.id.as_str()) {
                    return Err(invalid(format!(
                        "control {} repeats objective {}",
                        control.id, objective.id
                    )));
                }
            }
        }
    }

    Ok(())
}
