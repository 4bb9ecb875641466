//! Syntax highlighting for the source snippet shown beside each sample.

use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use showcase_manifest::Language;

/// Inline style for the box around a snippet.
pub const SNIPPET_STYLE: &str = "overflow:auto;width:auto;border:solid gray;\
border-width:.1em .1em .1em .8em;padding:.2em .6em;margin:50px auto;";

/// Default highlighting theme.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// Errors that can occur when highlighting source code.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    #[error("Unknown highlighting theme: {0}")]
    UnknownTheme(String),

    #[error("Failed to highlight {language} source: {message}")]
    Render { language: Language, message: String },
}

/// Turns source text into self-contained, inline-styled HTML.
pub trait Highlighter: Send + Sync {
    fn highlight(&self, source: &str, language: Language) -> Result<String, HighlightError>;
}

/// Highlighter backed by syntect's bundled grammars and themes.
pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl SyntectHighlighter {
    /// Create a highlighter using one of syntect's bundled themes.
    pub fn new(theme: &str) -> Result<Self, HighlightError> {
        let mut themes = ThemeSet::load_defaults();
        let theme = themes
            .themes
            .remove(theme)
            .ok_or_else(|| HighlightError::UnknownTheme(theme.to_string()))?;

        Ok(Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, source: &str, language: Language) -> Result<String, HighlightError> {
        let syntax = self
            .syntaxes
            .find_syntax_by_extension(language.tag())
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());

        let html = highlighted_html_for_string(source, &self.syntaxes, syntax, &self.theme)
            .map_err(|e| HighlightError::Render {
                language,
                message: e.to_string(),
            })?;

        Ok(format!(r#"<div style="{}">{}</div>"#, SNIPPET_STYLE, html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlights_cpp() {
        let highlighter = SyntectHighlighter::new(DEFAULT_THEME).unwrap();

        let html = highlighter
            .highlight("int main() { return 0; }\n", Language::Cpp)
            .unwrap();

        assert!(html.starts_with("<div style=\"overflow:auto"));
        assert!(html.contains("<pre"));
        assert!(html.contains("<span style="));
        assert!(html.contains("main"));
    }

    #[test]
    fn highlights_lua() {
        let highlighter = SyntectHighlighter::new(DEFAULT_THEME).unwrap();

        let html = highlighter
            .highlight("local x = 1\nprint(x)\n", Language::Lua)
            .unwrap();

        assert!(html.contains("print"));
    }

    #[test]
    fn escapes_markup_in_source() {
        let highlighter = SyntectHighlighter::new(DEFAULT_THEME).unwrap();

        let html = highlighter
            .highlight("#include <vector>\n", Language::Cpp)
            .unwrap();

        assert!(html.contains("&lt;vector&gt;"));
    }

    #[test]
    fn rejects_unknown_theme() {
        let result = SyntectHighlighter::new("no-such-theme");
        assert!(matches!(result, Err(HighlightError::UnknownTheme(_))));
    }
}
