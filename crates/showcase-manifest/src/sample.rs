//! Sample entries listed in the manifest.

use serde::{Deserialize, Deserializer};

use crate::language::Language;

/// One showcase program.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SampleEntry {
    /// Display name
    pub name: String,

    /// Short description shown on the index page
    #[serde(default)]
    pub desc: String,

    /// Location inside the samples repository
    pub path: String,

    /// Supported languages, in the order links are shown
    pub langs: Vec<Language>,

    /// Output tag passed through to the shell template
    #[serde(default, deserialize_with = "deserialize_output")]
    pub output: Option<String>,
}

impl SampleEntry {
    /// Application name handed to the build tool.
    pub fn app_name(&self) -> String {
        app_name(&self.path)
    }

    /// Site directory name for the given language.
    pub fn dir_name(&self, language: Language) -> String {
        format!("{}{}", self.app_name(), language.dir_suffix())
    }

    /// Whether the sample is available in `language`.
    pub fn supports(&self, language: Language) -> bool {
        self.langs.contains(&language)
    }

    /// Output tag, `"none"` when unset.
    pub fn output_kind(&self) -> &str {
        self.output.as_deref().unwrap_or("none")
    }
}

/// `output` is either a tag or a flag. `false`, null and empty strings mean
/// the sample has no output.
fn deserialize_output<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Output {
        Flag(bool),
        Tag(String),
    }

    Ok(match Option::<Output>::deserialize(deserializer)? {
        Some(Output::Flag(true)) => Some("true".to_string()),
        Some(Output::Tag(tag)) if !tag.trim().is_empty() => Some(tag),
        _ => None,
    })
}

/// Derive the application name from a sample path.
///
/// Underscores and spaces become hyphens.
pub fn app_name(path: &str) -> String {
    path.replace(['_', ' '], "-")
}
