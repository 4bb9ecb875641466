//! Template engine for the sample shell and the site index.

use std::fs;
use std::path::Path;

use minijinja::{context, AutoEscape, Environment};

/// Shell template name.
pub const SHELL_TEMPLATE: &str = "sample_shell.html";

/// Index template name.
pub const INDEX_TEMPLATE: &str = "index.html";

/// Placeholder the web toolchain replaces with its loader script.
pub const SCRIPT_PLACEHOLDER: &str = "{{{ SCRIPT }}}";

/// A per-language link on the index page.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LanguageLink {
    /// Language label
    pub name: String,
    /// Sample directory, relative to the site root
    pub link: String,
}

/// One sample card on the index page.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct IndexEntry {
    pub name: String,
    /// Link of the first language
    pub url: String,
    pub description: String,
    /// Thumbnail, relative to the site root
    pub thumb: String,
    pub langs: Vec<LanguageLink>,
}

/// Bindings for the per-build shell.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ShellContext {
    pub code_snippet: String,
    pub sample_name: String,
    pub sample_language: String,
    pub sample_change: String,
    pub sample_change_url: String,
    pub sample_github_url: String,
    pub sample_output: Option<String>,
    pub year: i32,
}

/// Errors that can occur while loading or rendering templates.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Failed to read template {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render template: {0}")]
    Render(#[from] minijinja::Error),
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create an engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        // Bindings such as the highlighted snippet are already markup.
        env.set_auto_escape_callback(|_| AutoEscape::None);

        env.add_template(SHELL_TEMPLATE, DEFAULT_SHELL_TEMPLATE)
            .expect("Failed to add shell template");
        env.add_template(INDEX_TEMPLATE, DEFAULT_INDEX_TEMPLATE)
            .expect("Failed to add index template");

        Self { env }
    }

    /// Create an engine preferring templates found in `dir`.
    ///
    /// Templates missing from `dir` fall back to the built-in ones.
    pub fn from_dir(dir: &Path) -> Result<Self, TemplateError> {
        let mut engine = Self::new();

        for name in [SHELL_TEMPLATE, INDEX_TEMPLATE] {
            let path = dir.join(name);
            if !path.is_file() {
                tracing::debug!("Using built-in {} template", name);
                continue;
            }

            let source = fs::read_to_string(&path).map_err(|source| TemplateError::Read {
                path: path.display().to_string(),
                source,
            })?;
            engine.add(name, source)?;
            tracing::info!("Loaded template {}", path.display());
        }

        Ok(engine)
    }

    /// Register a template, replacing any template of the same name.
    pub fn add(&mut self, name: &str, source: String) -> Result<(), TemplateError> {
        self.env.add_template_owned(name.to_string(), source)?;
        Ok(())
    }

    /// Render the shell the build tool wraps around a compiled sample.
    pub fn render_shell(&self, context: &ShellContext) -> Result<String, TemplateError> {
        let tmpl = self.env.get_template(SHELL_TEMPLATE)?;

        Ok(tmpl.render(context! {
            emscripten => SCRIPT_PLACEHOLDER,
            code_snippet => &context.code_snippet,
            sample_name => &context.sample_name,
            sample_language => &context.sample_language,
            sample_change => &context.sample_change,
            sample_change_url => &context.sample_change_url,
            sample_github_url => &context.sample_github_url,
            sample_output => &context.sample_output,
            year => context.year,
        })?)
    }

    /// Render the site index.
    pub fn render_index(&self, samples: &[IndexEntry], year: i32) -> Result<String, TemplateError> {
        let tmpl = self.env.get_template(INDEX_TEMPLATE)?;

        Ok(tmpl.render(context! {
            samples_list => samples,
            year => year,
        })?)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Built-in shell template.
pub const DEFAULT_SHELL_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ sample_name }} ({{ sample_language }}) - Supernova samples</title>
  <link rel="stylesheet" href="../css/style.css">
</head>
<body>
  <header class="sample-header">
    <a href="../" class="back">All samples</a>
    <h1>{{ sample_name }} <span class="language">{{ sample_language }}</span></h1>
    {% if sample_change %}<a href="{{ sample_change_url }}" class="change">{{ sample_change }}</a>{% endif %}
  </header>
  <main>
    <canvas class="emscripten" id="canvas" oncontextmenu="event.preventDefault()" tabindex="-1"></canvas>
    {% if sample_output %}<pre id="output" class="output" data-kind="{{ sample_output }}"></pre>{% endif %}
    <section class="source">
      <a href="{{ sample_github_url }}" class="github">View source on GitHub</a>
      {{ code_snippet }}
    </section>
  </main>
  <footer>&copy; {{ year }} Supernova Engine</footer>
  <script>
    var Module = {
      canvas: document.getElementById('canvas'),
      print: function(text) {
        var output = document.getElementById('output');
        if (output) { output.textContent += text + "\n"; }
        console.log(text);
      }
    };
  </script>
  {{ emscripten }}
</body>
</html>"##;

/// Built-in index template.
pub const DEFAULT_INDEX_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Supernova samples</title>
  <link rel="stylesheet" href="css/style.css">
</head>
<body>
  <h1>Supernova samples</h1>
  <ul class="samples">
  {% for sample in samples_list %}
    <li class="sample">
      <a href="{{ sample.url }}"><img src="{{ sample.thumb }}" alt="{{ sample.name }}"></a>
      <h2><a href="{{ sample.url }}">{{ sample.name }}</a></h2>
      <p>{{ sample.description }}</p>
      <ul class="langs">
      {% for lang in sample.langs %}
        <li><a href="{{ lang.link }}">{{ lang.name }}</a></li>
      {% endfor %}
      </ul>
    </li>
  {% endfor %}
  </ul>
  <footer>&copy; {{ year }} Supernova Engine</footer>
</body>
</html>"##;
