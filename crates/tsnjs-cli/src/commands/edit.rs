//! `--replace`, `--replace-variable`, `--rename`, `--preview`,
//! `--preview-variable`: the C5 guarded-edit operations.

use std::path::Path;

use serde_json::json;
use similar::TextDiff;
use tsnjs_analysis::editor::guard::{run_replace, EntrySnapshot, ReplaceRequest};
use tsnjs_analysis::parser::LanguageProvider;
use tsnjs_analysis::plan::{Plan, PlanMatch};
use tsnjs_analysis::selector::{Candidate, EntryOrigin};
use tsnjs_analysis::PositionMapper;
use tsnjs_core::{GuardError, Inventory, TsnjsError};

use crate::args::Args;
use crate::commands::shared;
use crate::output::Report;

fn snapshot_for(inventory: &Inventory, candidate: &Candidate) -> EntrySnapshot {
    match candidate.origin {
        EntryOrigin::Function => {
            let entry = &inventory.functions[candidate.index];
            EntrySnapshot {
                origin: EntryOrigin::Function,
                span: entry.span,
                identifier_span: entry.identifier_span,
                hash: entry.hash.clone(),
                path_signature: entry.path_signature.clone(),
                node_kind: kind_string(&entry.kind),
            }
        }
        EntryOrigin::Variable => {
            let entry = &inventory.variables[candidate.index];
            EntrySnapshot {
                origin: EntryOrigin::Variable,
                span: entry.span,
                identifier_span: entry.identifier_span,
                hash: entry.hash.clone(),
                path_signature: entry.path_signature.clone(),
                node_kind: "variable-declarator".to_string(),
            }
        }
    }
}

fn kind_string(kind: &tsnjs_core::FunctionKind) -> String {
    serde_json::to_value(kind)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| "function".to_string())
}

#[allow(clippy::too_many_arguments)]
fn run_edit(
    operation: &'static str,
    provider: &dyn LanguageProvider,
    path: &Path,
    source: &str,
    inventory: &Inventory,
    candidate: Candidate,
    raw_selector: &str,
    args: &Args,
    dry_run: bool,
) -> Result<Report, TsnjsError> {
    let entry = snapshot_for(inventory, &candidate);
    let file_name = path.display().to_string();

    let rename_to = args.rename.as_deref();
    let replacement = if rename_to.is_some() {
        String::new()
    } else {
        shared::load_replacement(args, path)?
    };

    if rename_to.is_none() && replacement.trim().is_empty() {
        return Err(TsnjsError::Guard(GuardError::EmptyReplacement));
    }

    let expect_span = args.expect_span.as_deref().map(shared::parse_expect_span).transpose()?;
    let request = ReplaceRequest { expect_hash: args.expect_hash.as_deref(), expect_span, force: args.force };

    let outcome = run_replace(
        provider,
        &file_name,
        source,
        &entry,
        &replacement,
        args.replace_range,
        rename_to,
        &request,
    )
    .map_err(TsnjsError::Guard)?;

    let refused = outcome.report.refused();
    let mut diff = None;
    if args.emit_diff {
        if let Some(new_source) = &outcome.new_source {
            diff = Some(TextDiff::from_lines(source, new_source).unified_diff().header(&file_name, &file_name).to_string());
        }
    }

    if let Some(plan_path) = &args.emit_plan {
        let plan_match = PlanMatch::from_candidate(&candidate);
        let plan = Plan::new(operation, raw_selector, "resolved", vec![plan_match], args.allow_multiple)
            .with_guard(outcome.report.newline.clone(), outcome.report.clone());
        plan.write_to(plan_path).map_err(TsnjsError::Io)?;
    }

    let wrote = if !dry_run && args.fix && !refused {
        if let Some(new_source) = &outcome.new_source {
            tsnjs_analysis::editor::splice::write_atomic(path, new_source).map_err(TsnjsError::Io)?;
            true
        } else {
            false
        }
    } else {
        false
    };

    let mut payload = json!({
        "canonicalName": candidate.canonical_name,
        "guard": outcome.report,
        "written": wrote,
        "dryRun": dry_run || !args.fix,
    });
    if let Some(diff_text) = diff {
        payload["diff"] = json!(diff_text);
    }
    if refused {
        payload["error"] = json!("guard refused the replacement");
    }

    Ok(Report::new(operation, payload))
}

pub fn replace(
    provider: &dyn LanguageProvider,
    path: &Path,
    source: &str,
    inventory: &Inventory,
    raw: &str,
    args: &Args,
    mapper: &PositionMapper,
) -> Result<Report, TsnjsError> {
    let candidate = shared::single_candidate(shared::resolve_function(inventory, raw, args, mapper)?, raw)?;
    run_edit("replace", provider, path, source, inventory, candidate, raw, args, false)
}

pub fn replace_variable(
    provider: &dyn LanguageProvider,
    path: &Path,
    source: &str,
    inventory: &Inventory,
    raw: &str,
    args: &Args,
    mapper: &PositionMapper,
) -> Result<Report, TsnjsError> {
    let candidate = shared::single_candidate(shared::resolve_variable(inventory, raw, args, mapper)?, raw)?;
    run_edit("replace-variable", provider, path, source, inventory, candidate, raw, args, false)
}

pub fn preview(
    provider: &dyn LanguageProvider,
    path: &Path,
    source: &str,
    inventory: &Inventory,
    raw: &str,
    args: &Args,
    mapper: &PositionMapper,
) -> Result<Report, TsnjsError> {
    let candidate = shared::single_candidate(shared::resolve_function(inventory, raw, args, mapper)?, raw)?;
    run_edit("preview", provider, path, source, inventory, candidate, raw, args, true)
}

pub fn preview_variable(
    provider: &dyn LanguageProvider,
    path: &Path,
    source: &str,
    inventory: &Inventory,
    raw: &str,
    args: &Args,
    mapper: &PositionMapper,
) -> Result<Report, TsnjsError> {
    let candidate = shared::single_candidate(shared::resolve_variable(inventory, raw, args, mapper)?, raw)?;
    run_edit("preview-variable", provider, path, source, inventory, candidate, raw, args, true)
}
