//! Selector Resolver (C4, spec.md §4.4): matches a `Selector` against a
//! slice of addressable entries (functions or variables), applying the
//! five-step resolution algorithm and the position/snipe tie-break.

use tsnjs_core::{FunctionEntry, Selector, SelectorError, Span, SpanUnit, VariableEntry};

use crate::mapper::PositionMapper;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOrigin {
    Function,
    Variable,
}

/// A selector-addressable view over one `FunctionEntry`/`VariableEntry`,
/// carrying enough to match and tie-break without borrowing the original
/// inventory (so functions and variables can be resolved through the same
/// code path for `--snipe`).
#[derive(Debug, Clone)]
pub struct Candidate {
    pub origin: EntryOrigin,
    /// Index into the `Vec<FunctionEntry>`/`Vec<VariableEntry>` this
    /// candidate was built from.
    pub index: usize,
    pub name: String,
    pub canonical_name: String,
    pub span: Span,
    pub path_signature: String,
    pub hash: String,
}

pub fn candidates_from_functions(entries: &[FunctionEntry]) -> Vec<Candidate> {
    entries
        .iter()
        .enumerate()
        .map(|(index, e)| Candidate {
            origin: EntryOrigin::Function,
            index,
            name: e.name.clone(),
            canonical_name: e.canonical_name.clone(),
            span: e.span,
            path_signature: e.path_signature.clone(),
            hash: e.hash.clone(),
        })
        .collect()
}

pub fn candidates_from_variables(entries: &[VariableEntry]) -> Vec<Candidate> {
    entries
        .iter()
        .enumerate()
        .map(|(index, e)| Candidate {
            origin: EntryOrigin::Variable,
            index,
            name: e.name.clone(),
            canonical_name: e.canonical_name.clone(),
            span: e.span,
            path_signature: e.path_signature.clone(),
            hash: e.hash.clone(),
        })
        .collect()
}

fn matches_selector(candidate: &Candidate, selector: &Selector, mapper: &PositionMapper) -> bool {
    match selector {
        Selector::Name(s) => &candidate.name == s || &candidate.canonical_name == s,
        Selector::Hash(h) => &candidate.hash == h,
        Selector::Path(p) => &candidate.path_signature == p,
        Selector::Span(start, end, SpanUnit::Char) => {
            candidate.span.chars.start == *start && candidate.span.chars.end == *end
        }
        Selector::Span(start, end, SpanUnit::Byte) => {
            candidate.span.bytes.start == *start && candidate.span.bytes.end == *end
        }
        Selector::Position(byte) => {
            candidate.span.bytes.start <= *byte && *byte < candidate.span.bytes.end
        }
        Selector::LineCol(line, col) => match mapper.line_col_to_offset(*line, *col) {
            Some(offset) => candidate.span.chars.contains_offset(offset),
            None => false,
        },
        Selector::Glob(pattern) => {
            glob_match(pattern, &candidate.name) || glob_match(pattern, &candidate.canonical_name)
        }
    }
}

/// Is this selector a position query (`@byte` or `line:col`)? These always
/// resolve to a single innermost winner, per spec.md §4.4 step 6.
fn is_position_selector(selector: &Selector) -> bool {
    matches!(selector, Selector::Position(_) | Selector::LineCol(_, _))
}

fn describe(selector: &Selector) -> String {
    format!("{selector:?}")
}

/// Run the five/six-step resolution algorithm of spec.md §4.4 against
/// `candidates`, which the caller has already filtered by kind (function vs.
/// variable — step 1).
pub fn resolve(
    candidates: &[Candidate],
    selector: &Selector,
    refine: Option<&Selector>,
    allow_multiple: bool,
    mapper: &PositionMapper,
) -> Result<Vec<Candidate>, SelectorError> {
    let mut matches: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| matches_selector(c, selector, mapper))
        .collect();

    if let Some(r) = refine {
        matches.retain(|c| matches_selector(c, r, mapper));
    }

    if matches.is_empty() {
        return Err(SelectorError::NotFound { selector: describe(selector) });
    }

    let resolved: Vec<Candidate> = if is_position_selector(selector) {
        vec![tie_break(matches).clone()]
    } else {
        matches.into_iter().cloned().collect()
    };

    if resolved.len() > 1 && !allow_multiple {
        return Err(SelectorError::Ambiguous {
            selector: describe(selector),
            count: resolved.len(),
            candidates: resolved
                .iter()
                .map(|c| format!("{} ({})", c.canonical_name, c.hash))
                .collect(),
        });
    }

    Ok(resolved)
}

/// innermost span wins; ties broken by smaller `span.start`, then
/// lexicographically smaller `pathSignature` (spec.md §4.4 step 6).
fn tie_break<'a>(mut matches: Vec<&'a Candidate>) -> &'a Candidate {
    matches.sort_by(|a, b| {
        a.span
            .byte_length()
            .cmp(&b.span.byte_length())
            .then(a.span.bytes.start.cmp(&b.span.bytes.start))
            .then(a.path_signature.cmp(&b.path_signature))
    });
    matches[0]
}

/// Minimal `*`/`?` glob matcher over a flat string (no path-segment
/// semantics, as spec.md §4.4 only uses globs over names).
fn glob_match(pattern: &str, text: &str) -> bool {
    fn helper(pat: &[char], txt: &[char]) -> bool {
        match pat.first() {
            None => txt.is_empty(),
            Some('*') => {
                (0..=txt.len()).any(|i| helper(&pat[1..], &txt[i..]))
            }
            Some('?') => !txt.is_empty() && helper(&pat[1..], &txt[1..]),
            Some(c) => txt.first() == Some(c) && helper(&pat[1..], &txt[1..]),
        }
    }
    let pat: Vec<char> = pattern.chars().collect();
    let txt: Vec<char> = text.chars().collect();
    helper(&pat, &txt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsnjs_core::ExportKind;

    fn entry(name: &str, canonical: &str, start: usize, end: usize, hash: &str, path: &str) -> FunctionEntry {
        FunctionEntry {
            name: name.to_string(),
            canonical_name: canonical.to_string(),
            scope_chain: vec![canonical.to_string()],
            kind: tsnjs_core::FunctionKind::FunctionDeclaration,
            export_kind: ExportKind::None,
            exported: false,
            is_async: false,
            is_generator: false,
            replaceable: true,
            span: Span::new(start, end, start, end),
            identifier_span: None,
            path_signature: path.to_string(),
            hash: hash.to_string(),
        }
    }

    #[test]
    fn resolves_by_name() {
        let entries = vec![entry("alpha", "exports.alpha", 0, 10, "h1", "p1")];
        let candidates = candidates_from_functions(&entries);
        let mapper = PositionMapper::new("");
        let resolved = resolve(&candidates, &Selector::Name("exports.alpha".into()), None, false, &mapper).unwrap();
        assert_eq!(resolved.len(), 1);
    }

    #[test]
    fn not_found_errors() {
        let entries = vec![entry("alpha", "exports.alpha", 0, 10, "h1", "p1")];
        let candidates = candidates_from_functions(&entries);
        let mapper = PositionMapper::new("");
        let err = resolve(&candidates, &Selector::Name("missing".into()), None, false, &mapper).unwrap_err();
        assert!(matches!(err, SelectorError::NotFound { .. }));
    }

    #[test]
    fn ambiguous_without_allow_multiple() {
        let entries = vec![
            entry("f", "f", 0, 10, "h1", "p1"),
            entry("f", "f", 20, 30, "h2", "p2"),
        ];
        let candidates = candidates_from_functions(&entries);
        let mapper = PositionMapper::new("");
        let err = resolve(&candidates, &Selector::Name("f".into()), None, false, &mapper).unwrap_err();
        assert!(matches!(err, SelectorError::Ambiguous { .. }));
        let ok = resolve(&candidates, &Selector::Name("f".into()), None, true, &mapper).unwrap();
        assert_eq!(ok.len(), 2);
    }

    #[test]
    fn position_tie_breaks_to_innermost() {
        let entries = vec![
            entry("outer", "outer", 0, 100, "h1", "p1"),
            entry("inner", "inner", 10, 20, "h2", "p2"),
        ];
        let candidates = candidates_from_functions(&entries);
        let mapper = PositionMapper::new("");
        let resolved = resolve(&candidates, &Selector::Position(15), None, false, &mapper).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "inner");
    }

    #[test]
    fn glob_matches_prefix() {
        assert!(glob_match("handle*", "handleClick"));
        assert!(!glob_match("handle*", "onClick"));
    }

    #[test]
    fn resolution_is_deterministic_across_repeated_runs() {
        let entries = vec![
            entry("handleClick", "handleClick", 0, 10, "h1", "p1"),
            entry("handleHover", "handleHover", 20, 30, "h2", "p2"),
            entry("handleFocus", "handleFocus", 40, 50, "h3", "p3"),
        ];
        let candidates = candidates_from_functions(&entries);
        let mapper = PositionMapper::new("");
        let first = resolve(&candidates, &Selector::Glob("handle*".into()), None, true, &mapper).unwrap();
        for _ in 0..5 {
            let again = resolve(&candidates, &Selector::Glob("handle*".into()), None, true, &mapper).unwrap();
            let first_names: Vec<&str> = first.iter().map(|c| c.name.as_str()).collect();
            let again_names: Vec<&str> = again.iter().map(|c| c.name.as_str()).collect();
            assert_eq!(first_names, again_names);
        }
    }
}
