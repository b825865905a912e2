//! Parallel, gitignore-aware workspace walker (spec.md §5 `--scan-targets`).
//! Same `ignore::WalkParallel` shape the teacher's scanner uses, with a
//! `std::sync::mpsc` channel standing in for its `crossbeam-channel` producer/
//! consumer handoff.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use tsnjs_core::ScanConfig;

use crate::language::Language;

pub const DEFAULT_IGNORES: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    ".next",
    ".nuxt",
    "coverage",
    ".nyc_output",
    "vendor",
];

/// One file discovered by the workspace walk, with its detected language
/// (`None` for files neither provider claims, which are skipped downstream).
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub file_size: u64,
    pub language: Option<Language>,
}

pub fn walk_workspace(root: &Path, config: &ScanConfig) -> Vec<DiscoveredFile> {
    let (tx, rx) = mpsc::channel();

    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .add_custom_ignore_filename(".tsnjsignore")
        .max_filesize(Some(config.effective_max_file_size()))
        .follow_links(config.follow_symlinks.unwrap_or(false));

    if config.effective_threads() > 0 {
        builder.threads(config.effective_threads());
    }

    let mut overrides = ignore::overrides::OverrideBuilder::new(root);
    for pattern in &config.include {
        let _ = overrides.add(pattern);
    }
    for pattern in DEFAULT_IGNORES {
        let _ = overrides.add(&format!("!{pattern}/**"));
        let _ = overrides.add(&format!("!{pattern}"));
    }
    for pattern in &config.extra_ignore {
        let _ = overrides.add(&format!("!{pattern}"));
    }
    if let Ok(built) = overrides.build() {
        builder.overrides(built);
    }

    builder.build_parallel().run(|| {
        let tx = tx.clone();
        Box::new(move |entry| {
            let Ok(entry) = entry else { return ignore::WalkState::Continue };
            let Some(ft) = entry.file_type() else { return ignore::WalkState::Continue };
            if !ft.is_file() {
                return ignore::WalkState::Continue;
            }
            let path = entry.path().to_path_buf();
            let file_size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            let language = Language::from_path(&path);
            let _ = tx.send(DiscoveredFile { path, file_size, language });
            ignore::WalkState::Continue
        })
    });

    drop(tx);
    let mut files: Vec<DiscoveredFile> = rx.into_iter().collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn walks_and_detects_languages() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.js"), "function f() {}").unwrap();
        fs::write(dir.path().join("b.ts"), "function g() {}").unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("node_modules/skip.js"), "function h() {}").unwrap();

        let files = walk_workspace(dir.path(), &ScanConfig::default());
        let names: Vec<_> = files
            .iter()
            .filter_map(|f| f.path.file_name().and_then(|n| n.to_str()))
            .collect();
        assert!(names.contains(&"a.js"));
        assert!(names.contains(&"b.ts"));
        assert!(!names.contains(&"skip.js"));
    }
}
