//! Showcase site builder.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Datelike;

use showcase_build::{
    BuildTask, BuildTool, ExternalTool, HighlightError, Highlighter, OutputSlot, ShellFile,
    SyntectHighlighter, ToolConfig, ToolError,
};
use showcase_manifest::{Manifest, ManifestError};

use crate::index::SiteIndex;
use crate::repo::{RepoSync, SyncError};
use crate::stage::stage_artifacts;
use crate::staging::{replace_directory, StageError};
use crate::templates::{ShellContext, TemplateEngine, TemplateError};

/// Template subdirectories copied verbatim into the site.
pub const RESOURCE_DIRS: &[&str] = &["css", "img", "js", "thumb"];

/// Configuration for building the showcase site.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Sample manifest
    pub manifest: PathBuf,

    /// Templates and static resources
    pub template_dir: PathBuf,

    /// Directory holding the clones, the shell file and the site
    pub work_dir: PathBuf,

    /// Engine clone, relative to the work directory
    pub engine_dir: PathBuf,

    /// Samples clone, relative to the work directory
    pub samples_dir: PathBuf,

    /// Base URL for browsing sample sources
    pub source_url: String,

    /// Highlighting theme
    pub theme: String,

    /// Engine build tool
    pub tool: ToolConfig,

    /// Synchronize repositories before building
    pub sync: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("samples.yaml"),
            template_dir: PathBuf::from("template"),
            work_dir: PathBuf::from("build"),
            engine_dir: PathBuf::from("supernova"),
            samples_dir: PathBuf::from("samples"),
            source_url: "https://github.com/supernovaengine/supernova-samples/blob/main"
                .to_string(),
            theme: showcase_build::highlight::DEFAULT_THEME.to_string(),
            tool: ToolConfig::default(),
            sync: true,
        }
    }
}

/// Absolute locations derived from a [`SiteConfig`].
#[derive(Debug, Clone)]
pub struct SitePaths {
    pub engine_root: PathBuf,
    pub samples_root: PathBuf,
    pub site_dir: PathBuf,
    pub shell_file: PathBuf,
    pub tool_output: PathBuf,
}

impl SiteConfig {
    /// Resolve every location the pipeline touches to an absolute path.
    pub fn paths(&self) -> Result<SitePaths, BuildError> {
        let work_dir = std::path::absolute(&self.work_dir).map_err(|source| BuildError::Path {
            path: self.work_dir.clone(),
            source,
        })?;

        let engine_root = work_dir.join(&self.engine_dir);

        Ok(SitePaths {
            samples_root: work_dir.join(&self.samples_dir),
            site_dir: work_dir.join("site"),
            shell_file: work_dir.join("sample_shell.html"),
            tool_output: engine_root.join(&self.tool.output_dir),
            engine_root,
        })
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of samples listed on the index
    pub samples: usize,

    /// Number of (sample, language) builds
    pub builds: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Site root
    pub site_dir: PathBuf,
}

/// Errors that can occur during build. Every one of them aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Stage(#[from] StageError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Highlight(#[from] HighlightError),

    #[error("Failed to read sample source {path}: {source}")]
    ReadSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to resolve {path}: {source}")]
    Path {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    fn write(path: &Path, source: io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Showcase site builder.
pub struct SiteBuilder {
    config: SiteConfig,
    paths: SitePaths,
    manifest: Manifest,
    tool: Box<dyn BuildTool>,
    highlighter: Box<dyn Highlighter>,
    templates: TemplateEngine,
    repos: RepoSync,
}

impl SiteBuilder {
    /// Create a builder, reading the manifest named in `config`.
    pub fn load(config: SiteConfig) -> Result<Self, BuildError> {
        let manifest = Manifest::load(&config.manifest)?;
        tracing::info!(
            "Loaded {} samples from {}",
            manifest.samples.len(),
            config.manifest.display()
        );
        Self::new(config, manifest)
    }

    /// Create a builder for an already loaded manifest.
    pub fn new(config: SiteConfig, manifest: Manifest) -> Result<Self, BuildError> {
        let paths = config.paths()?;
        let tool = ExternalTool::new(&config.tool, &paths.engine_root);
        let highlighter = SyntectHighlighter::new(&config.theme)?;
        let templates = TemplateEngine::from_dir(&config.template_dir)?;

        Ok(Self {
            config,
            paths,
            manifest,
            tool: Box::new(tool),
            highlighter: Box::new(highlighter),
            templates,
            repos: RepoSync::default(),
        })
    }

    /// Replace the engine build tool.
    pub fn with_tool(mut self, tool: Box<dyn BuildTool>) -> Self {
        self.tool = tool;
        self
    }

    /// Replace the source highlighter.
    pub fn with_highlighter(mut self, highlighter: Box<dyn Highlighter>) -> Self {
        self.highlighter = highlighter;
        self
    }

    /// Resolved locations used by this builder.
    pub fn paths(&self) -> &SitePaths {
        &self.paths
    }

    /// Bring the engine and samples clones to the manifest's refs.
    pub fn sync_repositories(&self) -> Result<(), BuildError> {
        self.repos.sync_manifest(&self.manifest, &self.paths)?;
        Ok(())
    }

    /// Build the whole site from scratch.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let site_dir = &self.paths.site_dir;

        // Always a clean rebuild
        if site_dir.exists() {
            fs::remove_dir_all(site_dir).map_err(|e| BuildError::write(site_dir, e))?;
        }
        fs::create_dir_all(site_dir).map_err(|e| BuildError::write(site_dir, e))?;

        self.copy_resources()?;

        if self.config.sync {
            self.sync_repositories()?;
        } else {
            tracing::info!("Skipping repository sync");
        }

        let slot = OutputSlot::new(&self.paths.tool_output);
        let mut index = SiteIndex::new(&self.manifest.samples);
        let year = chrono::Local::now().year();

        for (sample, language) in self.manifest.tasks() {
            let task = BuildTask::new(
                sample,
                language,
                &self.paths.samples_root,
                &self.config.source_url,
            );
            self.build_task(&task, &slot, year).await?;
            index.record_built(&sample.path, language);
        }

        let samples = self.write_index(&index, year)?;

        Ok(BuildResult {
            samples,
            builds: index.builds(),
            duration_ms: start.elapsed().as_millis() as u64,
            site_dir: site_dir.clone(),
        })
    }

    /// Copy static resources from the template directory.
    fn copy_resources(&self) -> Result<(), BuildError> {
        for dir in RESOURCE_DIRS {
            let src = self.config.template_dir.join(dir);
            if replace_directory(&src, &self.paths.site_dir.join(dir))? {
                tracing::debug!("Copied {}", src.display());
            } else {
                tracing::warn!("Resource directory not found: {}", src.display());
            }
        }
        Ok(())
    }

    /// Build one sample in one language and stage its artifacts.
    async fn build_task(
        &self,
        task: &BuildTask<'_>,
        slot: &OutputSlot,
        year: i32,
    ) -> Result<(), BuildError> {
        tracing::info!(
            "Building sample: {}, language: {}",
            task.sample.name,
            task.language.label()
        );

        let source =
            fs::read_to_string(&task.entry_file).map_err(|source| BuildError::ReadSource {
                path: task.entry_file.clone(),
                source,
            })?;

        let snippet = self.highlighter.highlight(&source, task.language)?;

        let (sample_change, sample_change_url) = task
            .switch
            .as_ref()
            .map(|s| (s.label.clone(), s.url.clone()))
            .unwrap_or_default();

        let shell = self.templates.render_shell(&ShellContext {
            code_snippet: snippet,
            sample_name: task.sample.name.clone(),
            sample_language: task.language.label().to_string(),
            sample_change,
            sample_change_url,
            sample_github_url: task.source_url.clone(),
            sample_output: task.sample.output.clone(),
            year,
        })?;

        // Removed when this function returns, however it returns.
        let shell_file = ShellFile::create(&self.paths.shell_file, &shell)
            .map_err(|e| BuildError::write(&self.paths.shell_file, e))?;

        let lease = slot.acquire().await;

        let invocation = task.invocation(&self.paths.engine_root, shell_file.path());
        tracing::debug!("Invoking {} for {}", self.tool.name(), invocation.app_name);
        self.tool.invoke(&invocation)?;

        let dir = stage_artifacts(&lease, &self.paths.site_dir, task)?;
        tracing::info!("Staged {}", dir.display());

        Ok(())
    }

    /// Render `index.html` and `samples.json`. Returns the number of entries.
    fn write_index(&self, index: &SiteIndex, year: i32) -> Result<usize, BuildError> {
        let site_dir = &self.paths.site_dir;
        let entries = index.entries(site_dir);

        let html = self.templates.render_index(&entries, year)?;
        let index_path = site_dir.join("index.html");
        fs::write(&index_path, html).map_err(|e| BuildError::write(&index_path, e))?;

        let catalogue_path = site_dir.join("samples.json");
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| BuildError::write(&catalogue_path, io::Error::other(e)))?;
        fs::write(&catalogue_path, json).map_err(|e| BuildError::write(&catalogue_path, e))?;

        Ok(entries.len())
    }
}
