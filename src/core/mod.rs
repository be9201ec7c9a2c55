//! Core domain logic for cmmc-query
//!
//! This module contains pure query logic with no I/O dependencies.
//! The snapshot handoff file is abstracted through a port trait.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Family, Control, CrosswalkEntry, ...)
//! - `services/` - Indexing, resolution, scoring and gap analysis
//! - `ports/` - Trait definitions for external dependencies

pub mod models;
pub mod ports;
pub mod services;
