//! Adapter implementations
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `toml/` - Catalog source files: parsing, validation, merging
//! - `file/` - The JSON assessment snapshot handoff file

pub mod file;
pub mod toml;
