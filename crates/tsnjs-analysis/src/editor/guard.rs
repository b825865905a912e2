//! Guard pipeline (C5, spec.md §4.5): hash, span, path, syntax, newline,
//! result, evaluated in order and all recorded even when bypassed.

use serde::{Deserialize, Serialize};
use tsnjs_core::{GuardError, Span, SpanUnit};

use crate::collector;
use crate::parser::LanguageProvider;
use crate::selector::EntryOrigin;

use super::newline::{self, NewlineReport};
use super::splice;

/// Render a `FunctionEntry`'s kind the same way `EntrySnapshot::node_kind`
/// tags it (kebab-case variant name), so the path guard can compare pre-
/// and post-edit structural shape as plain strings.
fn function_kind_tag(entry: &tsnjs_core::FunctionEntry) -> String {
    serde_json::to_value(entry.kind).ok().and_then(|v| v.as_str().map(str::to_string)).unwrap_or_else(|| format!("{:?}", entry.kind))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardStatus {
    Ok,
    Mismatch,
    Bypass,
    None,
    Changed,
    Unchanged,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashGuardReport {
    pub status: GuardStatus,
    pub expected: Option<String>,
    pub actual: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpanGuardReport {
    pub status: GuardStatus,
    pub expected: Option<(usize, usize, SpanUnit)>,
    pub actual_chars: (usize, usize),
    pub actual_bytes: (usize, usize),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathGuardReport {
    pub status: GuardStatus,
    pub path_signature: String,
    pub structural_match: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultGuardReport {
    pub status: GuardStatus,
    pub after_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardReport {
    pub hash: HashGuardReport,
    pub span: SpanGuardReport,
    pub path: PathGuardReport,
    pub newline: NewlineReport,
    pub result: ResultGuardReport,
}

impl GuardReport {
    /// True if a non-bypassable guard recorded a hard failure — the file on
    /// disk must stay byte-identical (spec.md §8 "guard completeness").
    pub fn refused(&self) -> bool {
        self.hash.status == GuardStatus::Mismatch
            || self.span.status == GuardStatus::Mismatch
            || self.path.status == GuardStatus::Mismatch
    }
}

/// A selector-kind-neutral snapshot of the entry being replaced, carrying
/// just what the guard pipeline needs.
#[derive(Debug, Clone)]
pub struct EntrySnapshot {
    pub origin: EntryOrigin,
    pub span: Span,
    pub identifier_span: Option<Span>,
    pub hash: String,
    pub path_signature: String,
    /// Structural kind tag used by the path guard's shape check (e.g.
    /// `"function-declaration"`, `"arrow-function"`, `"variable-declarator"`).
    pub node_kind: String,
}

pub struct ReplaceRequest<'a> {
    pub expect_hash: Option<&'a str>,
    pub expect_span: Option<(usize, usize, SpanUnit)>,
    pub force: bool,
}

pub struct ReplaceOutcome {
    pub report: GuardReport,
    /// `Some` only when every non-bypassable guard passed; write it to
    /// apply the change.
    pub new_source: Option<String>,
}

/// Run the full guard pipeline for a whole-span (or rename) replacement.
#[allow(clippy::too_many_arguments)]
pub fn run_replace(
    provider: &dyn LanguageProvider,
    file_name: &str,
    original_source: &str,
    entry: &EntrySnapshot,
    raw_replacement: &str,
    replace_range: Option<(usize, usize)>,
    rename_to: Option<&str>,
    request: &ReplaceRequest,
) -> Result<ReplaceOutcome, GuardError> {
    // Stage 1: hash guard.
    let hash_report = match request.expect_hash {
        None => HashGuardReport { status: GuardStatus::None, expected: None, actual: entry.hash.clone() },
        Some(expected) if expected == entry.hash => {
            HashGuardReport { status: GuardStatus::Ok, expected: Some(expected.to_string()), actual: entry.hash.clone() }
        }
        Some(expected) if request.force => {
            tracing::debug!(expected, actual = %entry.hash, "hash mismatch bypassed with --force");
            HashGuardReport { status: GuardStatus::Bypass, expected: Some(expected.to_string()), actual: entry.hash.clone() }
        }
        Some(expected) => {
            HashGuardReport { status: GuardStatus::Mismatch, expected: Some(expected.to_string()), actual: entry.hash.clone() }
        }
    };

    // Stage 2: span guard.
    let (actual_chars, actual_bytes) = ((entry.span.chars.start, entry.span.chars.end), (entry.span.bytes.start, entry.span.bytes.end));
    let span_report = match request.expect_span {
        None => SpanGuardReport { status: GuardStatus::None, expected: None, actual_chars, actual_bytes },
        Some((s, e, unit)) => {
            let matches = match unit {
                SpanUnit::Char => actual_chars == (s, e),
                SpanUnit::Byte => actual_bytes == (s, e),
            };
            if matches {
                SpanGuardReport { status: GuardStatus::Ok, expected: Some((s, e, unit)), actual_chars, actual_bytes }
            } else if request.force {
                SpanGuardReport { status: GuardStatus::Bypass, expected: Some((s, e, unit)), actual_chars, actual_bytes }
            } else {
                SpanGuardReport { status: GuardStatus::Mismatch, expected: Some((s, e, unit)), actual_chars, actual_bytes }
            }
        }
    };

    if hash_report.status == GuardStatus::Mismatch || span_report.status == GuardStatus::Mismatch {
        return Ok(ReplaceOutcome {
            report: GuardReport {
                hash: hash_report,
                span: span_report,
                path: PathGuardReport { status: GuardStatus::None, path_signature: entry.path_signature.clone(), structural_match: true },
                newline: newline::evaluate(original_source, raw_replacement).1,
                result: ResultGuardReport { status: GuardStatus::Unchanged, after_hash: None },
            },
            new_source: None,
        });
    }

    // Stage 5 runs before the write so we know the final bytes; numbering
    // follows spec.md (newline guard is stage 5, syntax is stage 4) but the
    // newline-normalised text is what must pass the syntax guard.
    let (normalised_replacement, newline_report) = newline::evaluate(original_source, raw_replacement);

    let spliced = if let Some(new_name) = rename_to {
        let id_span = entry.identifier_span.unwrap_or(entry.span);
        splice::splice_rename(original_source, &id_span, new_name)
    } else if let Some((rel_start, rel_end)) = replace_range {
        splice::splice_range(original_source, &entry.span, rel_start, rel_end, &normalised_replacement)
            .map_err(|_| GuardError::RangeOutOfBounds { start: rel_start, end: rel_end })?
    } else {
        splice::splice_span(original_source, &entry.span, &normalised_replacement)
    };

    // Stage 4: syntax guard. Not bypassable.
    let reparsed_new = provider
        .parse_source(&spliced, file_name)
        .map_err(GuardError::InvalidReplacement)?;
    if reparsed_new.root().has_error() {
        return Err(GuardError::InvalidReplacement(tsnjs_core::ParseError::Syntax {
            file: file_name.to_string(),
            message: "replacement produces a file with syntax errors".to_string(),
            line: 0,
            column: 0,
        }));
    }

    // Stage 3: path guard. Splicing never moves an entry's own span start
    // (rename only touches the identifier sub-span; whole-span and ranged
    // replacements fill the same interval), so the post-edit entry starting
    // at the same byte offset is the one that replaced this entry — find it
    // and compare structural kind against the pre-edit snapshot.
    let new_inventory = collector::collect(&reparsed_new);
    let start = entry.span.bytes.start;
    let after_kind: Option<String> = match entry.origin {
        EntryOrigin::Function => new_inventory.functions.iter().find(|f| f.span.bytes.start == start).map(function_kind_tag),
        EntryOrigin::Variable => new_inventory.variables.iter().find(|v| v.span.bytes.start == start).map(|_| "variable-declarator".to_string()),
    };
    let structural_match = after_kind.as_deref() == Some(entry.node_kind.as_str());
    let path_status = if after_kind.is_none() {
        if request.force { GuardStatus::Bypass } else { GuardStatus::Mismatch }
    } else if structural_match {
        GuardStatus::Ok
    } else if request.force {
        GuardStatus::Bypass
    } else {
        GuardStatus::Mismatch
    };
    let path_report = PathGuardReport { status: path_status, path_signature: entry.path_signature.clone(), structural_match };

    if path_report.status == GuardStatus::Mismatch {
        return Ok(ReplaceOutcome {
            report: GuardReport { hash: hash_report, span: span_report, path: path_report, newline: newline_report, result: ResultGuardReport { status: GuardStatus::Unchanged, after_hash: None } },
            new_source: None,
        });
    }

    // Stage 6: result guard.
    let after = match entry.origin {
        EntryOrigin::Function => new_inventory.functions.iter().find(|f| f.span.bytes.start == start).map(|f| f.hash.clone()),
        EntryOrigin::Variable => new_inventory.variables.iter().find(|v| v.span.bytes.start == start).map(|v| v.hash.clone()),
    };
    let result_status = match &after {
        Some(h) if *h == entry.hash => GuardStatus::Unchanged,
        Some(_) => GuardStatus::Changed,
        None => GuardStatus::Changed,
    };

    Ok(ReplaceOutcome {
        report: GuardReport {
            hash: hash_report,
            span: span_report,
            path: path_report,
            newline: newline_report,
            result: ResultGuardReport { status: result_status, after_hash: after },
        },
        new_source: Some(spliced),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::newline::NewlineStyle;
    use crate::parser::JavaScriptProvider;

    fn snapshot_for(provider: &JavaScriptProvider, source: &str, canonical: &str) -> EntrySnapshot {
        let parsed = provider.parse_source(source, "a.js").unwrap();
        let inv = collector::collect(&parsed);
        let f = inv.functions.iter().find(|f| f.canonical_name == canonical).unwrap();
        EntrySnapshot {
            origin: EntryOrigin::Function,
            span: f.span,
            identifier_span: f.identifier_span,
            hash: f.hash.clone(),
            path_signature: f.path_signature.clone(),
            node_kind: "function-declaration".to_string(),
        }
    }

    #[test]
    fn replace_succeeds_and_reports_changed() {
        let provider = JavaScriptProvider;
        let source = "export function alpha() { return 1; }";
        let entry = snapshot_for(&provider, source, "exports.alpha");
        let request = ReplaceRequest { expect_hash: None, expect_span: None, force: false };
        let outcome = run_replace(
            &provider, "a.js", source, &entry,
            "export function alpha() { return 2; }", None, None, &request,
        ).unwrap();
        assert!(!outcome.report.refused());
        assert_eq!(outcome.report.result.status, GuardStatus::Changed);
        assert!(outcome.new_source.unwrap().contains("return 2"));
    }

    #[test]
    fn hash_mismatch_refuses_without_force() {
        let provider = JavaScriptProvider;
        let source = "export function alpha() { return 1; }";
        let entry = snapshot_for(&provider, source, "exports.alpha");
        let request = ReplaceRequest { expect_hash: Some("wrong-hash"), expect_span: None, force: false };
        let outcome = run_replace(
            &provider, "a.js", source, &entry,
            "export function alpha() { return 2; }", None, None, &request,
        ).unwrap();
        assert!(outcome.report.refused());
        assert!(outcome.new_source.is_none());
    }

    #[test]
    fn hash_mismatch_bypassed_with_force() {
        let provider = JavaScriptProvider;
        let source = "export function alpha() { return 1; }";
        let entry = snapshot_for(&provider, source, "exports.alpha");
        let request = ReplaceRequest { expect_hash: Some("wrong-hash"), expect_span: None, force: true };
        let outcome = run_replace(
            &provider, "a.js", source, &entry,
            "export function alpha() { return 2; }", None, None, &request,
        ).unwrap();
        assert!(!outcome.report.refused());
        assert_eq!(outcome.report.hash.status, GuardStatus::Bypass);
        assert!(outcome.new_source.is_some());
    }

    #[test]
    fn rename_replaces_only_identifier() {
        let provider = JavaScriptProvider;
        let source = "export function alpha() { return 'alpha'; }";
        let entry = snapshot_for(&provider, source, "exports.alpha");
        let request = ReplaceRequest { expect_hash: None, expect_span: None, force: false };
        let outcome = run_replace(&provider, "a.js", source, &entry, "", None, Some("alphaRenamed"), &request).unwrap();
        assert_eq!(outcome.new_source.unwrap(), "export function alphaRenamed() { return 'alpha'; }");
    }

    #[test]
    fn idempotent_replacement_is_unchanged() {
        let provider = JavaScriptProvider;
        let source = "export function alpha() { return 1; }";
        let entry = snapshot_for(&provider, source, "exports.alpha");
        let request = ReplaceRequest { expect_hash: None, expect_span: None, force: false };
        let replacement_text = source[entry.span.bytes.start..entry.span.bytes.end].to_string();
        let outcome = run_replace(&provider, "a.js", source, &entry, &replacement_text, None, None, &request).unwrap();
        assert_eq!(outcome.report.result.status, GuardStatus::Unchanged);
    }

    #[test]
    fn structural_drift_without_force_is_mismatch() {
        let provider = JavaScriptProvider;
        let source = "export function alpha() { return 'alpha'; }";
        let entry = snapshot_for(&provider, source, "exports.alpha");
        let request = ReplaceRequest { expect_hash: None, expect_span: None, force: false };
        let outcome = run_replace(
            &provider, "a.js", source, &entry,
            "const alpha = () => { return 'alpha'; };", None, None, &request,
        ).unwrap();
        assert!(outcome.report.refused());
        assert_eq!(outcome.report.path.status, GuardStatus::Mismatch);
        assert!(!outcome.report.path.structural_match);
        assert!(outcome.new_source.is_none());
    }

    #[test]
    fn structural_drift_bypassed_with_force_rewrites_file() {
        let provider = JavaScriptProvider;
        let source = "export function alpha() { return 'alpha'; }";
        let entry = snapshot_for(&provider, source, "exports.alpha");
        let request = ReplaceRequest { expect_hash: None, expect_span: None, force: true };
        let outcome = run_replace(
            &provider, "a.js", source, &entry,
            "const alpha = () => { return 'alpha'; };", None, None, &request,
        ).unwrap();
        assert!(!outcome.report.refused());
        assert_eq!(outcome.report.path.status, GuardStatus::Bypass);
        assert!(outcome.new_source.unwrap().starts_with("const alpha"));
    }

    #[test]
    fn guard_soundness_reparse_succeeds_and_hash_matches_placed_bytes() {
        let provider = JavaScriptProvider;
        let source = "export function alpha() { return 1; }\nexport function beta() { return 2; }\n";
        let entry = snapshot_for(&provider, source, "exports.alpha");
        let request = ReplaceRequest { expect_hash: None, expect_span: None, force: false };
        let replacement = "export function alpha() { return 'three'; }";
        let outcome = run_replace(&provider, "a.js", source, &entry, replacement, None, None, &request).unwrap();
        assert!(!outcome.report.refused());
        let new_source = outcome.new_source.unwrap();

        // The syntax guard's reparse must have actually succeeded (no error
        // nodes), and the result guard's recorded hash must be the hash of
        // the bytes the replacement was placed at, not some stale value.
        let reparsed = provider.parse_source(&new_source, "a.js").unwrap();
        assert!(!reparsed.root().has_error());
        let placed_start = entry.span.bytes.start;
        let placed_end = placed_start + replacement.len();
        let placed_bytes = &new_source.as_bytes()[placed_start..placed_end];
        assert_eq!(outcome.report.result.after_hash.as_deref(), Some(tsnjs_core::hash_span(placed_bytes).as_str()));
        assert_eq!(outcome.report.newline.file_style, NewlineStyle::Lf);
        assert_eq!(outcome.report.newline.target_style, NewlineStyle::Lf);
    }

    fn variable_snapshot_for(provider: &JavaScriptProvider, source: &str, canonical: &str) -> EntrySnapshot {
        let parsed = provider.parse_source(source, "a.js").unwrap();
        let inv = collector::collect(&parsed);
        let v = inv.variables.iter().find(|v| v.canonical_name == canonical).unwrap();
        EntrySnapshot {
            origin: EntryOrigin::Variable,
            span: v.span,
            identifier_span: v.identifier_span,
            hash: v.hash.clone(),
            path_signature: v.path_signature.clone(),
            node_kind: "variable-declarator".to_string(),
        }
    }

    #[test]
    fn crlf_file_keeps_its_style_with_lf_replacement() {
        let provider = JavaScriptProvider;
        let source = "const x = 1;\r\nconst y = 2;\r\n";
        let entry = variable_snapshot_for(&provider, source, "y");
        let request = ReplaceRequest { expect_hash: None, expect_span: None, force: false };
        let replacement = "y = {\n  a: 1,\n  b: 2,\n}";
        let outcome = run_replace(&provider, "a.js", source, &entry, replacement, None, None, &request).unwrap();
        assert!(!outcome.report.refused());
        assert_eq!(outcome.report.newline.file_style, NewlineStyle::Crlf);
        assert_eq!(outcome.report.newline.target_style, NewlineStyle::Crlf);
        assert!(outcome.report.newline.converted);
        assert!(outcome.report.newline.byte_delta > 0);
        let new_source = outcome.new_source.unwrap();
        assert!(new_source.contains("\r\n"));
        assert!(!new_source.replace("\r\n", "").contains('\n'));
    }
}
