//! Configuration file structure (showcase.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;
use showcase_build::ToolConfig;
use showcase_site::SiteConfig;

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub tool: ToolSettings,
    #[serde(default)]
    pub site: SiteSettings,
}

#[derive(Debug, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_manifest")]
    pub manifest: String,
    #[serde(default = "default_templates")]
    pub templates: String,
    #[serde(default = "default_work_dir")]
    pub work_dir: String,
    #[serde(default = "default_engine_dir")]
    pub engine_dir: String,
    #[serde(default = "default_samples_dir")]
    pub samples_dir: String,
}

#[derive(Debug, Deserialize)]
pub struct ToolSettings {
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
    #[serde(default = "default_script")]
    pub script: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

#[derive(Debug, Deserialize)]
pub struct SiteSettings {
    #[serde(default = "default_source_url")]
    pub source_url: String,
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            templates: default_templates(),
            work_dir: default_work_dir(),
            engine_dir: default_engine_dir(),
            samples_dir: default_samples_dir(),
        }
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            script: default_script(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            theme: default_theme(),
        }
    }
}

fn default_manifest() -> String {
    "samples.yaml".to_string()
}
fn default_templates() -> String {
    "template".to_string()
}
fn default_work_dir() -> String {
    "build".to_string()
}
fn default_engine_dir() -> String {
    "supernova".to_string()
}
fn default_samples_dir() -> String {
    "samples".to_string()
}
fn default_interpreter() -> String {
    "python3".to_string()
}
fn default_script() -> String {
    "tools/supernova.py".to_string()
}
fn default_output_dir() -> String {
    "tools/build/web".to_string()
}
fn default_source_url() -> String {
    "https://github.com/supernovaengine/supernova-samples/blob/main".to_string()
}
fn default_theme() -> String {
    "InspiredGitHub".to_string()
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

impl ConfigFile {
    /// Site builder settings, with command line overrides applied.
    pub fn site_config(&self, manifest: Option<PathBuf>, work_dir: Option<PathBuf>) -> SiteConfig {
        SiteConfig {
            manifest: manifest.unwrap_or_else(|| PathBuf::from(&self.paths.manifest)),
            template_dir: PathBuf::from(&self.paths.templates),
            work_dir: work_dir.unwrap_or_else(|| PathBuf::from(&self.paths.work_dir)),
            engine_dir: PathBuf::from(&self.paths.engine_dir),
            samples_dir: PathBuf::from(&self.paths.samples_dir),
            source_url: self.site.source_url.clone(),
            theme: self.site.theme.clone(),
            tool: ToolConfig {
                interpreter: self.tool.interpreter.clone(),
                script: PathBuf::from(&self.tool.script),
                output_dir: PathBuf::from(&self.tool.output_dir),
            },
            sync: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();
        let config = load_config(&temp.path().join("showcase.toml")).unwrap();

        let site = config.site_config(None, None);

        assert_eq!(site.manifest, PathBuf::from("samples.yaml"));
        assert_eq!(site.work_dir, PathBuf::from("build"));
        assert_eq!(site.tool, ToolConfig::default());
        assert_eq!(site.theme, "InspiredGitHub");
    }

    #[test]
    fn reads_partial_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("showcase.toml");
        fs::write(
            &path,
            "[paths]\nwork_dir = \"out\"\n\n[tool]\ninterpreter = \"python\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        let site = config.site_config(None, None);

        assert_eq!(site.work_dir, PathBuf::from("out"));
        assert_eq!(site.manifest, PathBuf::from("samples.yaml"));
        assert_eq!(site.tool.interpreter, "python");
        assert_eq!(site.tool.script, PathBuf::from("tools/supernova.py"));
    }

    #[test]
    fn command_line_overrides_file() {
        let config = ConfigFile::default();

        let site = config.site_config(
            Some(PathBuf::from("other.yaml")),
            Some(PathBuf::from("tmp")),
        );

        assert_eq!(site.manifest, PathBuf::from("other.yaml"));
        assert_eq!(site.work_dir, PathBuf::from("tmp"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("showcase.toml");
        fs::write(&path, "[paths\nwork_dir = 1").unwrap();

        assert!(load_config(&path).is_err());
    }
}
