//! Plan/Digest Emitter (C6, spec.md §4.6): a deterministic, versioned JSON
//! record of an operation's match set, guard outcome, and intended change,
//! emitted to an explicit path before or alongside the write.

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tsnjs_core::{IoError, SpanUnit};

use crate::editor::newline::NewlineReport;
use crate::editor::GuardReport;
use crate::selector::Candidate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanMatch {
    pub name: String,
    pub canonical_name: String,
    pub hash: String,
    pub path_signature: String,
    pub span_chars: (usize, usize),
    pub span_bytes: (usize, usize),
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_span: Option<(usize, usize, SpanUnit)>,
}

impl PlanMatch {
    pub fn from_candidate(candidate: &Candidate) -> Self {
        PlanMatch {
            name: candidate.name.clone(),
            canonical_name: candidate.canonical_name.clone(),
            hash: candidate.hash.clone(),
            path_signature: candidate.path_signature.clone(),
            span_chars: (candidate.span.chars.start, candidate.span.chars.end),
            span_bytes: (candidate.span.bytes.start, candidate.span.bytes.end),
            expected_hash: None,
            expected_span: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    pub match_count: usize,
    pub allow_multiple: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate_span_chars: Option<(usize, usize)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate_span_bytes: Option<(usize, usize)>,
}

impl PlanSummary {
    pub fn from_matches(matches: &[PlanMatch], allow_multiple: bool) -> Self {
        let aggregate_span_chars = aggregate(matches.iter().map(|m| m.span_chars));
        let aggregate_span_bytes = aggregate(matches.iter().map(|m| m.span_bytes));
        PlanSummary { match_count: matches.len(), allow_multiple, aggregate_span_chars, aggregate_span_bytes }
    }
}

fn aggregate(spans: impl Iterator<Item = (usize, usize)>) -> Option<(usize, usize)> {
    spans.fold(None, |acc, (s, e)| match acc {
        None => Some((s, e)),
        Some((a, b)) => Some((a.min(s), b.max(e))),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextInfo {
    pub padding_requested: (u32, u32),
    pub padding_applied: (u32, u32),
    pub enclosing_mode: String,
    pub snippet_byte_offsets: (usize, usize),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub version: u32,
    pub operation: String,
    pub selector: String,
    pub selector_mode: String,
    pub generated_at: String,
    pub summary: PlanSummary,
    pub matches: Vec<PlanMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newline: Option<NewlineReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guard: Option<GuardReport>,
}

impl Plan {
    pub fn new(operation: &str, selector: &str, selector_mode: &str, matches: Vec<PlanMatch>, allow_multiple: bool) -> Self {
        Plan {
            version: 1,
            operation: operation.to_string(),
            selector: selector.to_string(),
            selector_mode: selector_mode.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            summary: PlanSummary::from_matches(&matches, allow_multiple),
            matches,
            context: None,
            newline: None,
            guard: None,
        }
    }

    pub fn with_context(mut self, context: ContextInfo) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_guard(mut self, newline: NewlineReport, guard: GuardReport) -> Self {
        self.newline = Some(newline);
        self.guard = Some(guard);
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), IoError> {
        let body = self.to_json().map_err(|e| IoError::WriteFailed { path: path.display().to_string(), message: e.to_string() })?;
        fs::write(path, body).map_err(|e| IoError::WriteFailed { path: path.display().to_string(), message: e.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::EntryOrigin;
    use tsnjs_core::Span;

    fn candidate(name: &str, start: usize, end: usize) -> Candidate {
        Candidate {
            origin: EntryOrigin::Function,
            index: 0,
            name: name.to_string(),
            canonical_name: format!("exports.{name}"),
            span: Span::new(start, end, start, end),
            path_signature: "p".to_string(),
            hash: "h".to_string(),
        }
    }

    #[test]
    fn summary_aggregates_span_range() {
        let matches = vec![PlanMatch::from_candidate(&candidate("a", 0, 10)), PlanMatch::from_candidate(&candidate("b", 20, 40))];
        let summary = PlanSummary::from_matches(&matches, true);
        assert_eq!(summary.match_count, 2);
        assert_eq!(summary.aggregate_span_chars, Some((0, 40)));
    }

    #[test]
    fn plan_serialises_deterministically_modulo_timestamp() {
        let matches = vec![PlanMatch::from_candidate(&candidate("alpha", 0, 10))];
        let plan = Plan::new("locate", "exports.alpha", "name", matches, false);
        let json = plan.to_json().unwrap();
        assert!(json.contains("\"version\": 1"));
        assert!(json.contains("\"operation\": \"locate\""));
    }
}
