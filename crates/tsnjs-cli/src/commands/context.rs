//! `--context-function`, `--context-variable`: print an entry's source plus
//! surrounding lines or its enclosing function/class, per spec.md §4.6's
//! context-op plan fields (`padding requested/applied`, `enclosing mode`,
//! `snippet offsets`).

use serde_json::json;
use tsnjs_analysis::plan::ContextInfo;
use tsnjs_analysis::PositionMapper;
use tsnjs_core::{Inventory, TsnjsError};

use crate::args::{Args, EnclosingMode};
use crate::commands::shared::{self, single_candidate};
use crate::output::Report;

fn enclosing_candidate<'a>(
    inventory: &'a Inventory,
    candidate: &tsnjs_analysis::selector::Candidate,
    mode: EnclosingMode,
) -> (usize, usize, &'a str) {
    match mode {
        EnclosingMode::Exact => (candidate.span.bytes.start, candidate.span.bytes.end, "exact"),
        EnclosingMode::Function => {
            // Innermost enclosing function is the smallest function entry
            // whose span strictly contains this candidate's span.
            let enclosing = inventory
                .functions
                .iter()
                .filter(|f| f.span.bytes.start <= candidate.span.bytes.start && f.span.bytes.end >= candidate.span.bytes.end)
                .min_by_key(|f| f.span.byte_length());
            match enclosing {
                Some(f) => (f.span.bytes.start, f.span.bytes.end, "function"),
                None => (candidate.span.bytes.start, candidate.span.bytes.end, "exact"),
            }
        }
        EnclosingMode::Class => {
            let enclosing = inventory
                .constructors
                .iter()
                .filter(|c| c.span.bytes.start <= candidate.span.bytes.start && c.span.bytes.end >= candidate.span.bytes.end)
                .min_by_key(|c| c.span.byte_length());
            match enclosing {
                Some(c) => (c.span.bytes.start, c.span.bytes.end, "class"),
                None => (candidate.span.bytes.start, candidate.span.bytes.end, "exact"),
            }
        }
    }
}

fn with_line_padding(source: &str, start: usize, end: usize, before: u32, after: u32) -> (usize, usize) {
    let mut padded_start = start;
    for _ in 0..before {
        match source[..padded_start].rfind('\n') {
            Some(pos) => padded_start = source[..pos].rfind('\n').map(|p| p + 1).unwrap_or(0),
            None => break,
        }
    }
    let mut padded_end = end;
    for _ in 0..after {
        match source[padded_end..].find('\n') {
            Some(offset) => padded_end += offset + 1,
            None => {
                padded_end = source.len();
                break;
            }
        }
    }
    (padded_start, padded_end)
}

fn run_context(
    operation: &'static str,
    inventory: &Inventory,
    source: &str,
    raw: &str,
    args: &Args,
    mapper: &PositionMapper,
    is_variable: bool,
) -> Result<Report, TsnjsError> {
    let candidates = if is_variable {
        shared::resolve_variable(inventory, raw, args, mapper)?
    } else {
        shared::resolve_function(inventory, raw, args, mapper)?
    };
    let candidate = single_candidate(candidates, raw)?;

    let (enclosing_start, enclosing_end, mode_label) = enclosing_candidate(inventory, &candidate, args.context_enclosing);
    let (padded_start, padded_end) =
        with_line_padding(source, enclosing_start, enclosing_end, args.context_before, args.context_after);

    let context = ContextInfo {
        padding_requested: (args.context_before, args.context_after),
        padding_applied: ((enclosing_start - padded_start) as u32, (padded_end - enclosing_end) as u32),
        enclosing_mode: mode_label.to_string(),
        snippet_byte_offsets: (padded_start, padded_end),
    };

    Ok(Report::new(
        operation,
        json!({
            "canonicalName": candidate.canonical_name,
            "context": context,
            "source": &source[padded_start..padded_end],
        }),
    ))
}

pub fn context_function(
    inventory: &Inventory,
    source: &str,
    raw: &str,
    args: &Args,
    mapper: &PositionMapper,
) -> Result<Report, TsnjsError> {
    run_context("context-function", inventory, source, raw, args, mapper, false)
}

pub fn context_variable(
    inventory: &Inventory,
    source: &str,
    raw: &str,
    args: &Args,
    mapper: &PositionMapper,
) -> Result<Report, TsnjsError> {
    run_context("context-variable", inventory, source, raw, args, mapper, true)
}
