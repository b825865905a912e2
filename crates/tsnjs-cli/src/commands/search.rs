//! `--search-text` (SPEC_FULL.md §2 supplemented operation).

use serde_json::json;
use tsnjs_analysis::scan::search_text;

use crate::output::Report;

pub fn search(source: &str, query: &str) -> Report {
    let hits = search_text(source, query);
    Report::new("search-text", json!({ "query": query, "count": hits.len(), "hits": hits.iter().map(|h| json!({
        "line": h.line,
        "column": h.column,
        "byteOffset": h.byte_offset,
        "matchedText": h.matched_text,
    })).collect::<Vec<_>>() }))
}
