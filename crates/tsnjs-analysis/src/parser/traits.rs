//! `LanguageProvider` — the pluggable parser seam spec.md §4.1 names
//! (`parseSource`, `collectFunctions`, `collectVariables`, `buildFileRecord`,
//! `resolveCandidateExtensions`).

use tsnjs_core::{ConstructorEntry, FunctionEntry, ParseError, VariableEntry};

use super::types::{FileRecord, ParsedFile};

pub trait LanguageProvider: Send + Sync {
    /// Parse source text into a typed AST rooted at a module, failing with
    /// `ParseError` on malformed input. Must not normalise whitespace or
    /// newlines.
    fn parse_source(&self, source: &str, file_name: &str) -> Result<ParsedFile, ParseError>;

    /// Walk the parsed file and return the function/class-method/
    /// constructor-callable inventory (excludes plain constructors, which
    /// live in `collect_constructors`).
    fn collect_functions(&self, parsed: &ParsedFile) -> Vec<FunctionEntry>;

    /// Walk the parsed file and return the declaration/declarator/binding
    /// variable inventory, including CommonJS export assignments that are
    /// not callables.
    fn collect_variables(&self, parsed: &ParsedFile) -> Vec<VariableEntry>;

    /// Walk the parsed file and return one entry per class (explicit or
    /// implicit constructor).
    fn collect_constructors(&self, parsed: &ParsedFile) -> Vec<ConstructorEntry>;

    /// Build the lightweight per-file record the workspace scanner
    /// accumulates (import specifiers, counts) without keeping the AST
    /// around afterward.
    fn build_file_record(&self, parsed: &ParsedFile) -> FileRecord;

    /// Extensions this provider claims by default (spec.md §4.1).
    fn resolve_candidate_extensions(&self) -> &'static [&'static str];
}
