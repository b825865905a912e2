//! Language discrimination between the two providers spec.md §4.1 names.

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    JavaScript,
    TypeScript,
}

impl Language {
    /// Default extensions per provider (spec.md §4.1).
    pub fn from_extension(ext: Option<&str>) -> Option<Self> {
        match ext?.to_ascii_lowercase().as_str() {
            "js" | "cjs" | "mjs" | "jsx" => Some(Language::JavaScript),
            "ts" | "tsx" | "cts" | "mts" => Some(Language::TypeScript),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(".d.ts"))
        {
            return Some(Language::TypeScript);
        }
        Self::from_extension(path.extension().and_then(|e| e.to_str()))
    }

    pub fn candidate_extensions(&self) -> &'static [&'static str] {
        match self {
            Language::JavaScript => &["js", "cjs", "mjs", "jsx"],
            Language::TypeScript => &["ts", "tsx", "cts", "mts", "d.ts"],
        }
    }

    /// Read from the per-tool environment variable (spec.md §6): the scan
    /// binaries consult `TSNJS_SCAN_LANGUAGE`, the edit binaries
    /// `TSNJS_EDIT_LANGUAGE`. Values are `"javascript"` / `"typescript"`.
    pub fn from_env(var: &str, default: Language) -> Language {
        match std::env::var(var).ok().as_deref() {
            Some("typescript") => Language::TypeScript,
            Some("javascript") => Language::JavaScript,
            _ => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn detects_js_family() {
        for ext in ["js", "cjs", "mjs", "jsx"] {
            assert_eq!(Language::from_extension(Some(ext)), Some(Language::JavaScript));
        }
    }

    #[test]
    fn detects_ts_family() {
        for ext in ["ts", "tsx", "cts", "mts"] {
            assert_eq!(Language::from_extension(Some(ext)), Some(Language::TypeScript));
        }
    }

    #[test]
    fn detects_declaration_files() {
        assert_eq!(Language::from_path(&PathBuf::from("foo.d.ts")), Some(Language::TypeScript));
    }

    #[test]
    fn unknown_extension_is_none() {
        assert_eq!(Language::from_extension(Some("py")), None);
    }
}
