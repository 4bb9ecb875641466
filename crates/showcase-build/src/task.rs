//! One (sample, language) build unit.

use std::path::{Path, PathBuf};

use showcase_manifest::{Language, SampleEntry};

use crate::traits::ToolInvocation;

/// Link to the same sample in its sibling language.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageSwitch {
    /// Link text, e.g. "Change to Lua sample"
    pub label: String,
    /// Relative URL of the sibling page
    pub url: String,
}

/// Everything needed to build and stage one sample in one language.
#[derive(Debug, Clone)]
pub struct BuildTask<'a> {
    pub sample: &'a SampleEntry,
    pub language: Language,

    /// Sample project directory
    pub project_dir: PathBuf,

    /// Source file shown on the sample page
    pub entry_file: PathBuf,

    /// Browsable URL of the entry file
    pub source_url: String,

    /// Present when the sample also exists in the other language
    pub switch: Option<LanguageSwitch>,
}

impl<'a> BuildTask<'a> {
    /// Derive the task parameters for `sample` built as `language`.
    pub fn new(
        sample: &'a SampleEntry,
        language: Language,
        samples_root: &Path,
        source_base_url: &str,
    ) -> Self {
        let project_dir = samples_root.join(&sample.path);
        let entry_file = project_dir.join(language.entry_file());

        let source_url = format!(
            "{}/{}/{}",
            source_base_url.trim_end_matches('/'),
            sample.path,
            language.entry_file()
        );

        let other = language.other();
        let switch = sample.supports(other).then(|| LanguageSwitch {
            label: format!("Change to {} sample", other.label()),
            url: format!("../{}", sample.dir_name(other)),
        });

        Self {
            sample,
            language,
            project_dir,
            entry_file,
            source_url,
            switch,
        }
    }

    /// Application name passed to the build tool.
    pub fn app_name(&self) -> String {
        self.sample.app_name()
    }

    /// Directory name under the site root.
    pub fn dir_name(&self) -> String {
        self.sample.dir_name(self.language)
    }

    /// Entry page the build tool produces.
    pub fn produced_page(&self) -> String {
        format!("{}.html", self.app_name())
    }

    /// Tool arguments for this task.
    pub fn invocation(&self, engine_root: &Path, shell_file: &Path) -> ToolInvocation {
        ToolInvocation {
            platform: "web".to_string(),
            project: self.project_dir.clone(),
            engine_root: engine_root.to_path_buf(),
            app_name: self.app_name(),
            shell_file: shell_file.to_path_buf(),
            suppress_flag: self.language.suppress_flag().to_string(),
        }
    }
}
