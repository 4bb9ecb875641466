//! Sample manifest for the showcase site.
//!
//! This crate loads the YAML manifest that lists the engine and samples
//! repositories and the samples to publish, and validates that every sample
//! maps to its own output directory.

pub mod language;
pub mod manifest;
pub mod sample;

pub use language::Language;
pub use manifest::{Manifest, ManifestError, RepositoryRef};
pub use sample::{app_name, SampleEntry};
