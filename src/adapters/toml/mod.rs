//! TOML-backed catalog sources
//!
//! - [`parser`] - Read, deserialize and validate one source file
//! - [`loader`] - Load many files, merge collections, discover files on disk

pub mod loader;
pub mod parser;

pub use loader::{LoadReport, LoadedSources, RejectedSource, discover_sources, load_sources};
pub use parser::{LoadError, MAX_SOURCE_BYTES, SourceFile, load_file, parse_source};
