//! Scaffold a showcase project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use showcase_site::templates::{
    DEFAULT_INDEX_TEMPLATE, DEFAULT_SHELL_TEMPLATE, INDEX_TEMPLATE, SHELL_TEMPLATE,
};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing showcase...");

    scaffold(config_path, Path::new("."), yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Add thumbnails to template/thumb/ (default.png is used as fallback).");
    tracing::info!("Run 'showcase build' to build the site.");

    Ok(())
}

fn scaffold(config_path: &Path, root: &Path, yes: bool) -> Result<()> {
    let template_dir = root.join("template");

    // Check if templates already exist
    if template_dir.exists() {
        if !yes {
            tracing::warn!("template/ directory already exists. Use --yes to overwrite.");
            return Ok(());
        }
    } else {
        fs::create_dir_all(&template_dir).context("Failed to create template directory")?;
    }

    write_file(&root.join(config_path), DEFAULT_CONFIG, yes)?;
    write_file(&root.join("samples.yaml"), DEFAULT_MANIFEST, yes)?;
    write_file(&template_dir.join(INDEX_TEMPLATE), DEFAULT_INDEX_TEMPLATE, yes)?;
    write_file(&template_dir.join(SHELL_TEMPLATE), DEFAULT_SHELL_TEMPLATE, yes)?;

    for dir in showcase_site::builder::RESOURCE_DIRS {
        fs::create_dir_all(template_dir.join(dir))
            .with_context(|| format!("Failed to create template/{}", dir))?;
    }
    write_file(&template_dir.join("css/style.css"), DEFAULT_CSS, yes)?;

    Ok(())
}

fn write_file(path: &Path, contents: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        return Ok(());
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());
    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Showcase Configuration

[paths]
# Sample manifest
manifest = "samples.yaml"

# Templates and static resources (css, img, js, thumb)
templates = "template"

# Clones, temporary files and the built site
work_dir = "build"

[tool]
# Engine build tool, relative to the engine clone
interpreter = "python3"
script = "tools/supernova.py"
output_dir = "tools/build/web"

[site]
source_url = "https://github.com/supernovaengine/supernova-samples/blob/main"
theme = "InspiredGitHub"
"#;

const DEFAULT_MANIFEST: &str = r#"repo: https://github.com/supernovaengine/supernova.git
repoRef: main
samplesRepo: https://github.com/supernovaengine/supernova-samples.git
samplesRepoRef: main

samples:
  - name: Cube
    desc: A textured cube rotating in 3D
    path: cube
    langs: [cpp, lua]
"#;

const DEFAULT_CSS: &str = r#"body {
  font-family: system-ui, -apple-system, sans-serif;
  margin: 0 auto;
  max-width: 1100px;
  padding: 1rem;
}

.samples {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
  gap: 1.5rem;
  list-style: none;
  padding: 0;
}

.sample img {
  width: 100%;
}

.langs {
  display: flex;
  gap: 0.5rem;
  list-style: none;
  padding: 0;
}

canvas.emscripten {
  display: block;
  margin: 0 auto;
  max-width: 100%;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn scaffolds_project() {
        let temp = tempdir().unwrap();

        scaffold(Path::new("showcase.toml"), temp.path(), false).unwrap();

        assert!(temp.path().join("showcase.toml").exists());
        assert!(temp.path().join("template/index.html").exists());
        assert!(temp.path().join("template/sample_shell.html").exists());
        assert!(temp.path().join("template/thumb").is_dir());

        let manifest =
            showcase_manifest::Manifest::load(&temp.path().join("samples.yaml")).unwrap();
        assert_eq!(manifest.samples[0].path, "cube");
    }

    #[test]
    fn keeps_existing_templates_without_yes() {
        let temp = tempdir().unwrap();
        let template = temp.path().join("template");
        fs::create_dir_all(&template).unwrap();
        fs::write(template.join("index.html"), "custom").unwrap();

        scaffold(Path::new("showcase.toml"), temp.path(), false).unwrap();

        assert_eq!(
            fs::read_to_string(template.join("index.html")).unwrap(),
            "custom"
        );
        assert!(!temp.path().join("showcase.toml").exists());
    }

    #[test]
    fn overwrites_with_yes() {
        let temp = tempdir().unwrap();
        let template = temp.path().join("template");
        fs::create_dir_all(&template).unwrap();
        fs::write(template.join("index.html"), "custom").unwrap();

        scaffold(Path::new("showcase.toml"), temp.path(), true).unwrap();

        assert_eq!(
            fs::read_to_string(template.join("index.html")).unwrap(),
            DEFAULT_INDEX_TEMPLATE
        );
    }
}
