//! Workspace scanner and dependency-ripple walker (spec.md §5,
//! SPEC_FULL.md §2 `--scan-targets`). Discovery-only: this module never
//! writes to a file.

pub mod ripple;
pub mod search;
pub mod walker;

use std::path::{Path, PathBuf};

use tsnjs_core::ScanConfig;

use crate::parser::{FileRecord, LanguageProvider};
use crate::language::Language;

pub use ripple::{resolve_relative_import, ripple};
pub use search::{search_text, TextHit};
pub use walker::{walk_workspace, DiscoveredFile};

#[derive(Debug, Clone)]
pub struct ScanError {
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ScanReport {
    pub records: Vec<(PathBuf, FileRecord)>,
    pub errors: Vec<ScanError>,
}

/// Walk `root`, parse every file the given provider claims, and accumulate
/// per-file records. A parse failure is recorded and skipped rather than
/// aborting the walk (spec.md §5's non-fatal-skip scanner contract).
pub fn scan_workspace(root: &Path, config: &ScanConfig, provider: &dyn LanguageProvider, language: Language) -> ScanReport {
    let mut report = ScanReport::default();
    let files = walk_workspace(root, config);

    for file in files {
        if file.language != Some(language) {
            continue;
        }
        let source = match std::fs::read_to_string(&file.path) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(path = %file.path.display(), error = %e, "skipping unreadable file");
                report.errors.push(ScanError { path: file.path, message: e.to_string() });
                continue;
            }
        };
        let file_name = file.path.to_string_lossy().to_string();
        match provider.parse_source(&source, &file_name) {
            Ok(parsed) => {
                let record = provider.build_file_record(&parsed);
                report.records.push((file.path, record));
            }
            Err(e) => {
                tracing::warn!(path = %file.path.display(), error = %e, "skipping file with parse error");
                report.errors.push(ScanError { path: file.path, message: e.to_string() });
            }
        }
    }

    report
}
