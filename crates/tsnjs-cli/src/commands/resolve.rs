//! `--locate`, `--locate-variable`, `--extract`, `--extract-variable`,
//! `--extract-hashes`, `--snipe`.

use serde_json::json;
use tsnjs_analysis::plan::{Plan, PlanMatch};
use tsnjs_analysis::selector::EntryOrigin;
use tsnjs_analysis::PositionMapper;
use tsnjs_core::{Inventory, Selector, TsnjsError};

use crate::args::Args;
use crate::commands::shared::{self, single_candidate};
use crate::output::Report;

pub fn locate(inventory: &Inventory, raw: &str, args: &Args, mapper: &PositionMapper) -> Result<Report, TsnjsError> {
    let candidates = shared::resolve_function(inventory, raw, args, mapper)?;
    locate_report("locate", inventory.functions.len(), &candidates, args, raw)
}

pub fn locate_variable(
    inventory: &Inventory,
    raw: &str,
    args: &Args,
    mapper: &PositionMapper,
) -> Result<Report, TsnjsError> {
    let candidates = shared::resolve_variable(inventory, raw, args, mapper)?;
    locate_report("locate-variable", inventory.variables.len(), &candidates, args, raw)
}

fn locate_report(
    operation: &'static str,
    _total: usize,
    candidates: &[tsnjs_analysis::selector::Candidate],
    args: &Args,
    raw: &str,
) -> Result<Report, TsnjsError> {
    let matches: Vec<PlanMatch> = candidates.iter().map(PlanMatch::from_candidate).collect();
    let plan = Plan::new(operation, raw, &selector_mode(raw), matches.clone(), args.allow_multiple);

    if let Some(path) = &args.emit_plan {
        plan.write_to(path).map_err(TsnjsError::Io)?;
    }

    Ok(Report::new(operation, json!({ "matches": matches, "summary": plan.summary })))
}

pub fn extract(
    inventory: &Inventory,
    source: &str,
    raw: &str,
    args: &Args,
    mapper: &PositionMapper,
) -> Result<Report, TsnjsError> {
    let candidates = shared::resolve_function(inventory, raw, args, mapper)?;
    extract_report("extract", source, candidates, args, raw)
}

pub fn extract_variable(
    inventory: &Inventory,
    source: &str,
    raw: &str,
    args: &Args,
    mapper: &PositionMapper,
) -> Result<Report, TsnjsError> {
    let candidates = shared::resolve_variable(inventory, raw, args, mapper)?;
    extract_report("extract-variable", source, candidates, args, raw)
}

fn extract_report(
    operation: &'static str,
    source: &str,
    candidates: Vec<tsnjs_analysis::selector::Candidate>,
    args: &Args,
    raw: &str,
) -> Result<Report, TsnjsError> {
    if args.allow_multiple {
        let snippets: Vec<_> = candidates
            .iter()
            .map(|c| json!({ "canonicalName": c.canonical_name, "hash": c.hash, "source": &source[c.span.bytes.start..c.span.bytes.end] }))
            .collect();
        return Ok(Report::new(operation, json!({ "matches": snippets })));
    }
    let candidate = single_candidate(candidates, raw)?;
    let snippet = &source[candidate.span.bytes.start..candidate.span.bytes.end];
    Ok(Report::new(
        operation,
        json!({
            "canonicalName": candidate.canonical_name,
            "hash": candidate.hash,
            "pathSignature": candidate.path_signature,
            "source": snippet,
        }),
    ))
}

pub fn extract_hashes(inventory: &Inventory, source: &str, hashes: &[String], args: &Args, mapper: &PositionMapper) -> Result<Report, TsnjsError> {
    let results: Vec<_> = hashes
        .iter()
        .map(|hash| {
            let selector = format!("hash:{hash}");
            match shared::resolve_function(inventory, &selector, args, mapper) {
                Ok(candidates) => {
                    let entries: Vec<_> = candidates
                        .iter()
                        .map(|c| json!({ "canonicalName": c.canonical_name, "source": &source[c.span.bytes.start..c.span.bytes.end] }))
                        .collect();
                    json!({ "hash": hash, "matches": entries })
                }
                Err(e) => json!({ "hash": hash, "error": e.to_string() }),
            }
        })
        .collect();
    Ok(Report::new("extract-hashes", json!({ "results": results })))
}

pub fn snipe(inventory: &Inventory, source: &str, raw: &str, args: &Args, mapper: &PositionMapper) -> Result<Report, TsnjsError> {
    let candidates = shared::resolve_any(inventory, raw, args, mapper)?;
    let candidate = single_candidate(candidates, raw)?;
    let kind = match candidate.origin {
        EntryOrigin::Function => "function",
        EntryOrigin::Variable => "variable",
    };
    Ok(Report::new(
        "snipe",
        json!({
            "kind": kind,
            "canonicalName": candidate.canonical_name,
            "hash": candidate.hash,
            "pathSignature": candidate.path_signature,
            "source": &source[candidate.span.bytes.start..candidate.span.bytes.end],
        }),
    ))
}

fn selector_mode(raw: &str) -> String {
    match Selector::parse(raw) {
        Selector::Name(_) => "name",
        Selector::Hash(_) => "hash",
        Selector::Path(_) => "path",
        Selector::Span(..) => "span",
        Selector::Position(_) => "position",
        Selector::LineCol(..) => "line-col",
        Selector::Glob(_) => "glob",
    }
    .to_string()
}
