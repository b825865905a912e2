//! Helpers shared by every operation: file I/O, selector resolution, and
//! replacement-snippet loading.

use std::fs;
use std::path::{Path, PathBuf};

use tsnjs_analysis::parser::{LanguageProvider, ParsedFile};
use tsnjs_analysis::selector::{self, Candidate};
use tsnjs_analysis::{collector, PositionMapper};
use tsnjs_core::{ArgError, Inventory, IoError, Selector, SelectorError, SpanUnit, TsnjsError};

use crate::args::Args;

pub fn read_source(path: &Path) -> Result<String, TsnjsError> {
    fs::read_to_string(path)
        .map_err(|e| {
            let io = if e.kind() == std::io::ErrorKind::NotFound {
                IoError::FileNotFound { path: path.display().to_string(), message: e.to_string() }
            } else {
                IoError::Other { path: path.display().to_string(), message: e.to_string() }
            };
            TsnjsError::Io(io)
        })
}

pub fn require_file(args: &Args) -> Result<&PathBuf, TsnjsError> {
    args.file.as_ref().ok_or_else(|| TsnjsError::Arg(ArgError::MissingRequired("--file".to_string())))
}

pub fn parse_file(provider: &dyn LanguageProvider, path: &Path, source: &str) -> Result<ParsedFile, TsnjsError> {
    let file_name = path.display().to_string();
    provider.parse_source(source, &file_name).map_err(TsnjsError::Parse)
}

pub fn inventory_of(parsed: &ParsedFile) -> Inventory {
    let mut inv = collector::collect(parsed);
    inv.sort_by_span();
    inv
}

/// Resolve a raw selector string against the function inventory.
pub fn resolve_function(
    inventory: &Inventory,
    raw_selector: &str,
    args: &Args,
    mapper: &PositionMapper,
) -> Result<Vec<Candidate>, TsnjsError> {
    let candidates = selector::candidates_from_functions(&inventory.functions);
    resolve_candidates(&candidates, raw_selector, args, mapper)
}

/// Resolve a raw selector string against the variable inventory.
pub fn resolve_variable(
    inventory: &Inventory,
    raw_selector: &str,
    args: &Args,
    mapper: &PositionMapper,
) -> Result<Vec<Candidate>, TsnjsError> {
    let candidates = selector::candidates_from_variables(&inventory.variables);
    resolve_candidates(&candidates, raw_selector, args, mapper)
}

/// Resolve a raw selector string against the combined function+variable
/// inventory — used only by `--snipe`, which spec.md §4.4 describes as
/// kind-agnostic ("the innermost entry whose span contains the position").
pub fn resolve_any(
    inventory: &Inventory,
    raw_selector: &str,
    args: &Args,
    mapper: &PositionMapper,
) -> Result<Vec<Candidate>, TsnjsError> {
    let mut candidates = selector::candidates_from_functions(&inventory.functions);
    candidates.extend(selector::candidates_from_variables(&inventory.variables));
    resolve_candidates(&candidates, raw_selector, args, mapper)
}

fn resolve_candidates(
    candidates: &[Candidate],
    raw_selector: &str,
    args: &Args,
    mapper: &PositionMapper,
) -> Result<Vec<Candidate>, TsnjsError> {
    let parsed_selector = Selector::parse(raw_selector);
    let refine = args
        .select
        .as_deref()
        .map(Selector::parse)
        .or_else(|| args.select_path.as_deref().map(|p| Selector::Path(p.to_string())));

    selector::resolve(candidates, &parsed_selector, refine.as_ref(), args.allow_multiple, mapper)
        .map_err(TsnjsError::Selector)
}

/// Either/or/or — spec.md §6's `--with` / `--with-file` / `--with-code`
/// replacement sources, in that precedence order.
pub fn load_replacement(args: &Args, target_file: &Path) -> Result<String, TsnjsError> {
    if let Some(path) = &args.with {
        return read_source(path);
    }
    if let Some(rel) = &args.with_file {
        let base = target_file.parent().unwrap_or_else(|| Path::new("."));
        return read_source(&base.join(rel));
    }
    if let Some(inline) = &args.with_code {
        return tsnjs_analysis::editor::inline::unescape_inline(inline).map_err(TsnjsError::Guard);
    }
    Err(TsnjsError::Arg(ArgError::MissingRequired("--with, --with-file, or --with-code".to_string())))
}

/// Parse spec.md §6's `--expect-span` grammar: `s:e` (char offsets) or
/// `byte:s:e` (byte offsets).
pub fn parse_expect_span(raw: &str) -> Result<(usize, usize, SpanUnit), TsnjsError> {
    let invalid = || TsnjsError::Arg(ArgError::InvalidValue { option: "--expect-span".to_string(), value: raw.to_string() });

    if let Some(rest) = raw.strip_prefix("byte:") {
        let (s, e) = rest.split_once(':').ok_or_else(invalid)?;
        return Ok((s.parse().map_err(|_| invalid())?, e.parse().map_err(|_| invalid())?, SpanUnit::Byte));
    }
    let (s, e) = raw.split_once(':').ok_or_else(invalid)?;
    Ok((s.parse().map_err(|_| invalid())?, e.parse().map_err(|_| invalid())?, SpanUnit::Char))
}

pub fn single_candidate(mut candidates: Vec<Candidate>, selector_desc: &str) -> Result<Candidate, TsnjsError> {
    if candidates.len() != 1 {
        return Err(TsnjsError::Selector(SelectorError::Ambiguous {
            selector: selector_desc.to_string(),
            count: candidates.len(),
            candidates: candidates.iter().map(|c| format!("{} ({})", c.canonical_name, c.hash)).collect(),
        }));
    }
    Ok(candidates.remove(0))
}

/// `--match`/`--exclude` glob filtering for list/outline output. Same
/// minimal `*`/`?` matcher the selector resolver uses internally, duplicated
/// here because it is a listing concern rather than a selector-resolution
/// one.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    fn helper(pat: &[char], txt: &[char]) -> bool {
        match pat.first() {
            None => txt.is_empty(),
            Some('*') => (0..=txt.len()).any(|i| helper(&pat[1..], &txt[i..])),
            Some('?') => !txt.is_empty() && helper(&pat[1..], &txt[1..]),
            Some(c) => txt.first() == Some(c) && helper(&pat[1..], &txt[1..]),
        }
    }
    let pat: Vec<char> = pattern.chars().collect();
    let txt: Vec<char> = text.chars().collect();
    helper(&pat, &txt)
}

pub fn passes_match_filters(name: &str, args: &Args) -> bool {
    if let Some(pattern) = &args.r#match {
        if !glob_match(pattern, name) {
            return false;
        }
    }
    if let Some(pattern) = &args.exclude {
        if glob_match(pattern, name) {
            return false;
        }
    }
    true
}
