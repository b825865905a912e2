//! `--scan-targets` (spec.md §5, SPEC_FULL.md §2 supplemented feature): a
//! non-fatal-skip parallel walk over one or more root directories.

use std::path::Path;

use serde_json::json;
use tsnjs_analysis::parser::LanguageProvider;
use tsnjs_analysis::scan::scan_workspace;
use tsnjs_analysis::Language;
use tsnjs_core::ScanConfig;

use crate::args::Args;
use crate::output::Report;

pub fn scan_targets(roots: &[String], provider: &dyn LanguageProvider, language: Language, args: &Args) -> Report {
    let mut config = ScanConfig::default();
    if let Some(exclude) = &args.exclude {
        config.extra_ignore.push(exclude.clone());
    }

    let mut files = Vec::new();
    let mut errors = Vec::new();

    for root in roots {
        let report = scan_workspace(Path::new(root), &config, provider, language);
        for (path, record) in report.records {
            files.push(json!({
                "path": path.display().to_string(),
                "language": record.language,
                "functionCount": record.function_count,
                "variableCount": record.variable_count,
                "constructorCount": record.constructor_count,
                "imports": record.imports.iter().map(|i| i.specifier.clone()).collect::<Vec<_>>(),
            }));
        }
        for error in report.errors {
            errors.push(json!({ "path": error.path.display().to_string(), "message": error.message }));
        }
    }

    Report::new("scan-targets", json!({ "fileCount": files.len(), "files": files, "errors": errors }))
}
