//! Manifest loading and validation.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Component, Path};

use serde::Deserialize;

use crate::language::Language;
use crate::sample::SampleEntry;

/// A repository URL pinned to a ref (branch, tag or commit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub url: String,
    pub rev: String,
}

/// The showcase manifest (`samples.yaml`).
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Engine repository URL
    pub repo: String,

    /// Engine repository ref
    pub repo_ref: String,

    /// Samples repository URL
    pub samples_repo: String,

    /// Samples repository ref
    pub samples_repo_ref: String,

    /// Samples to build, in index order
    #[serde(default)]
    pub samples: Vec<SampleEntry>,
}

/// Errors that can occur when loading a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in manifest: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("Sample '{0}' does not list any language")]
    NoLanguages(String),

    #[error("Sample '{path}' lists language '{language}' more than once")]
    DuplicateLanguage { path: String, language: Language },

    #[error("Sample path '{0}' appears more than once")]
    DuplicatePath(String),

    #[error("Sample path '{0}' must be a relative path inside the samples repository")]
    InvalidPath(String),

    #[error("Samples '{first}' and '{second}' share the app name '{app_name}'")]
    AppNameCollision {
        app_name: String,
        first: String,
        second: String,
    },

    #[error("Samples '{first}' and '{second}' both build into site/{dir}")]
    DirectoryCollision {
        dir: String,
        first: String,
        second: String,
    },
}

impl Manifest {
    /// Load and validate a manifest file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::parse(&content)
    }

    /// Parse and validate manifest YAML.
    pub fn parse(source: &str) -> Result<Self, ManifestError> {
        let manifest: Manifest = serde_yaml::from_str(source)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Engine repository.
    pub fn engine(&self) -> RepositoryRef {
        RepositoryRef {
            url: self.repo.clone(),
            rev: self.repo_ref.clone(),
        }
    }

    /// Samples repository.
    pub fn samples_repository(&self) -> RepositoryRef {
        RepositoryRef {
            url: self.samples_repo.clone(),
            rev: self.samples_repo_ref.clone(),
        }
    }

    /// Build matrix in execution order: every cpp build, then every lua build.
    pub fn tasks(&self) -> impl Iterator<Item = (&SampleEntry, Language)> + '_ {
        Language::ALL.into_iter().flat_map(move |language| {
            self.samples
                .iter()
                .filter(move |sample| sample.supports(language))
                .map(move |sample| (sample, language))
        })
    }

    /// Check the invariants the pipeline relies on.
    pub fn validate(&self) -> Result<(), ManifestError> {
        let mut paths = HashSet::new();
        let mut app_names: HashMap<String, &str> = HashMap::new();
        let mut dirs: HashMap<String, &str> = HashMap::new();

        for sample in &self.samples {
            if !is_relative_inside(&sample.path) {
                return Err(ManifestError::InvalidPath(sample.path.clone()));
            }

            if sample.langs.is_empty() {
                return Err(ManifestError::NoLanguages(sample.path.clone()));
            }

            let mut seen = HashSet::new();
            for language in &sample.langs {
                if !seen.insert(*language) {
                    return Err(ManifestError::DuplicateLanguage {
                        path: sample.path.clone(),
                        language: *language,
                    });
                }
            }

            if !paths.insert(sample.path.as_str()) {
                return Err(ManifestError::DuplicatePath(sample.path.clone()));
            }

            // "a_b" and "a b" normalize to the same app name.
            let app_name = sample.app_name();
            if let Some(first) = app_names.insert(app_name.clone(), &sample.path) {
                return Err(ManifestError::AppNameCollision {
                    app_name,
                    first: first.to_string(),
                    second: sample.path.clone(),
                });
            }

            // A cpp "x-lua" shares a directory with the lua build of "x".
            for language in &sample.langs {
                let dir = sample.dir_name(*language);
                if let Some(first) = dirs.insert(dir.clone(), &sample.path) {
                    return Err(ManifestError::DirectoryCollision {
                        dir,
                        first: first.to_string(),
                        second: sample.path.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

fn is_relative_inside(path: &str) -> bool {
    !path.trim().is_empty()
        && Path::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
