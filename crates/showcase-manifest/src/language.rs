//! Source languages a sample can be written in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Source language of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Cpp,
    Lua,
}

impl Language {
    /// Every language, in build order.
    pub const ALL: [Language; 2] = [Language::Cpp, Language::Lua];

    /// Manifest tag (`cpp`, `lua`).
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Cpp => "cpp",
            Self::Lua => "lua",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cpp => "C++",
            Self::Lua => "Lua",
        }
    }

    /// Entry file relative to the sample directory.
    pub fn entry_file(&self) -> &'static str {
        match self {
            Self::Cpp => "main.cpp",
            Self::Lua => "lua/main.lua",
        }
    }

    /// Build tool flag that disables the *other* language's initialization.
    pub fn suppress_flag(&self) -> &'static str {
        match self {
            Self::Cpp => "--no-lua-init",
            Self::Lua => "--no-cpp-init",
        }
    }

    /// Suffix appended to the app name for this language's site directory.
    pub fn dir_suffix(&self) -> &'static str {
        match self {
            Self::Cpp => "",
            Self::Lua => "-lua",
        }
    }

    /// The sibling language.
    pub fn other(&self) -> Language {
        match self {
            Self::Cpp => Self::Lua,
            Self::Lua => Self::Cpp,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpp_suppresses_lua() {
        assert_eq!(Language::Cpp.suppress_flag(), "--no-lua-init");
        assert_eq!(Language::Lua.suppress_flag(), "--no-cpp-init");
    }

    #[test]
    fn entry_files_follow_convention() {
        assert_eq!(Language::Cpp.entry_file(), "main.cpp");
        assert_eq!(Language::Lua.entry_file(), "lua/main.lua");
    }

    #[test]
    fn parses_manifest_tags() {
        let langs: Vec<Language> = serde_yaml::from_str("[cpp, lua]").unwrap();
        assert_eq!(langs, vec![Language::Cpp, Language::Lua]);

        let bad: Result<Vec<Language>, _> = serde_yaml::from_str("[rust]");
        assert!(bad.is_err());
    }

    #[test]
    fn other_is_symmetric() {
        for lang in Language::ALL {
            assert_eq!(lang.other().other(), lang);
            assert_ne!(lang.other(), lang);
        }
    }
}
