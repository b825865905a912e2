//! Dependency-ripple walker (spec.md §5): a bounded breadth-first traversal
//! over statically resolvable relative imports, starting from one seed file,
//! used to scope `--scan-targets` to a file's actual blast radius instead of
//! the whole workspace.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use tsnjs_core::FxHashSet;

use crate::language::Language;
use crate::parser::{ImportRecord, LanguageProvider};

/// Resolve a relative import specifier against the importing file's
/// directory, trying the importing language's candidate extensions and
/// `index.*` for directory imports. Returns `None` for non-relative
/// specifiers (bare package imports), which are out of scope for the
/// ripple (spec.md §5 Non-goals: no `node_modules` resolution).
pub fn resolve_relative_import(from_file: &Path, specifier: &str, language: Language) -> Option<PathBuf> {
    if !(specifier.starts_with("./") || specifier.starts_with("../")) {
        return None;
    }
    let dir = from_file.parent().unwrap_or_else(|| Path::new("."));
    let base = dir.join(specifier);

    if base.is_file() {
        return Some(base);
    }
    for ext in language.candidate_extensions() {
        let candidate = with_extension(&base, ext);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    for ext in language.candidate_extensions() {
        let candidate = base.join(format!("index.{ext}"));
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

fn with_extension(base: &Path, ext: &str) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Walk the import graph breadth-first from `seed`, bounded by
/// `max_depth`, returning every file reached (including the seed).
pub fn ripple(
    seed: &Path,
    max_depth: usize,
    parse_imports: impl Fn(&Path) -> (Language, Vec<ImportRecord>),
) -> Vec<PathBuf> {
    let mut visited: FxHashSet<PathBuf> = FxHashSet::default();
    let mut queue: VecDeque<(PathBuf, usize)> = VecDeque::new();
    queue.push_back((seed.to_path_buf(), 0));
    visited.insert(seed.to_path_buf());

    while let Some((path, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }
        let (language, imports) = parse_imports(&path);
        for import in imports {
            if let Some(resolved) = resolve_relative_import(&path, &import.specifier, language) {
                if visited.insert(resolved.clone()) {
                    queue.push_back((resolved, depth + 1));
                }
            }
        }
    }

    let mut out: Vec<PathBuf> = visited.into_iter().collect();
    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn resolves_sibling_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("util.js"), "module.exports = {};").unwrap();
        let from = dir.path().join("index.js");
        let resolved = resolve_relative_import(&from, "./util", Language::JavaScript);
        assert_eq!(resolved, Some(dir.path().join("util.js")));
    }

    #[test]
    fn ignores_bare_package_specifiers() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("index.js");
        assert_eq!(resolve_relative_import(&from, "lodash", Language::JavaScript), None);
    }

    #[test]
    fn resolves_directory_index() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("lib")).unwrap();
        fs::write(dir.path().join("lib/index.ts"), "export const x = 1;").unwrap();
        let from = dir.path().join("index.ts");
        let resolved = resolve_relative_import(&from, "./lib", Language::TypeScript);
        assert_eq!(resolved, Some(dir.path().join("lib/index.ts")));
    }
}
