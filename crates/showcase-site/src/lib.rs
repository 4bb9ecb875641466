//! Static showcase site generator.
//!
//! Synchronizes the engine and samples repositories, builds every sample in
//! every language it supports with the engine's web build tool, stages the
//! artifacts into `site/<app>[-lua]/` and renders the index page.

pub mod builder;
pub mod index;
pub mod repo;
pub mod stage;
pub mod staging;
pub mod templates;

pub use builder::{BuildError, BuildResult, SiteBuilder, SiteConfig, SitePaths};
pub use repo::{RepoSync, SyncError};
pub use staging::{move_filtered, replace_directory, StageError};
pub use templates::{TemplateEngine, TemplateError};
