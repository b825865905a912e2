//! Dispatches a parsed `Args` to the operation it names and renders a
//! `Report`. One module per family of operations (listing, selector
//! resolution, guarded edits, context extraction, text search, workspace
//! scan), mirroring spec.md §2's C3-C6 component split.

mod context;
mod edit;
mod list;
mod resolve;
mod scan;
mod search;
mod shared;

use tsnjs_analysis::parser::LanguageProvider;
use tsnjs_analysis::Language;
use tsnjs_core::{ArgError, ErrorCode, TsnjsError};

use crate::args::Args;
use crate::output::Report;

/// Run whichever operation selector `args` set, against `provider`/`language`.
pub fn execute(args: &Args, provider: &dyn LanguageProvider, language: Language) -> Result<Report, TsnjsError> {
    if let Some(roots) = &args.scan_targets {
        return Ok(scan::scan_targets(roots, provider, language, args));
    }

    // Every remaining operation reads a single target file.
    let path = shared::require_file(args)?;
    let source = shared::read_source(path)?;
    let parsed = shared::parse_file(provider, path, &source)?;
    let inventory = shared::inventory_of(&parsed);
    let mapper = &parsed.mapper;

    if args.list_functions {
        return Ok(list::list_functions(&inventory, args));
    }
    if args.list_variables {
        return Ok(list::list_variables(&inventory, args));
    }
    if args.list_constructors {
        return Ok(list::list_constructors(&inventory, args));
    }
    if args.outline {
        return Ok(list::outline(&inventory, args));
    }
    if let Some(raw) = &args.locate {
        return resolve::locate(&inventory, raw, args, mapper);
    }
    if let Some(raw) = &args.locate_variable {
        return resolve::locate_variable(&inventory, raw, args, mapper);
    }
    if let Some(raw) = &args.extract {
        return resolve::extract(&inventory, &source, raw, args, mapper);
    }
    if let Some(raw) = &args.extract_variable {
        return resolve::extract_variable(&inventory, &source, raw, args, mapper);
    }
    if let Some(hashes) = &args.extract_hashes {
        return resolve::extract_hashes(&inventory, &source, hashes, args, mapper);
    }
    if let Some(raw) = &args.replace {
        return edit::replace(provider, path, &source, &inventory, raw, args, mapper);
    }
    if let Some(raw) = &args.replace_variable {
        return edit::replace_variable(provider, path, &source, &inventory, raw, args, mapper);
    }
    if let Some(raw) = &args.context_function {
        return context::context_function(&inventory, &source, raw, args, mapper);
    }
    if let Some(raw) = &args.context_variable {
        return context::context_variable(&inventory, &source, raw, args, mapper);
    }
    if let Some(raw) = &args.preview {
        return edit::preview(provider, path, &source, &inventory, raw, args, mapper);
    }
    if let Some(raw) = &args.preview_variable {
        return edit::preview_variable(provider, path, &source, &inventory, raw, args, mapper);
    }
    if let Some(query) = &args.search_text {
        return Ok(search::search(&source, query));
    }
    if let Some(raw) = &args.snipe {
        return resolve::snipe(&inventory, &source, raw, args, mapper);
    }

    Err(TsnjsError::Arg(ArgError::MissingRequired(
        "an operation selector (--list-functions, --locate, --replace, ...)".to_string(),
    )))
}

/// Print `report` in the requested mode and return the process exit code.
pub fn finish(result: Result<Report, TsnjsError>, json_mode: bool) -> i32 {
    match result {
        Ok(report) => {
            let is_error = report.is_error();
            report.print(json_mode);
            if is_error {
                1
            } else {
                0
            }
        }
        Err(e) => {
            let report = Report::error("error", e.to_string(), e.error_code());
            report.print(json_mode);
            1
        }
    }
}
