//! cmmc-query - reference-data query engine for CMMC Level 2
//!
//! Answers structured questions about NIST SP 800-171 Rev 2 and Rev 3
//! controls: lookups, keyword search, revision crosswalks, DoD-defined
//! parameter values, implementation guidance, evidence checklists, SPRS
//! scoring, and gap and POA&M analysis of an exported assessment snapshot.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod api;
pub mod catalog;
pub mod config;
pub mod core;
pub mod output;
pub mod paths;
