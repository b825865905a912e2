//! `tree-sitter-typescript`-backed `LanguageProvider`. Picks the TSX grammar
//! for `.tsx` files and the plain TypeScript grammar otherwise.

use tree_sitter::Parser;
use tsnjs_core::{ConstructorEntry, FunctionEntry, ParseError, VariableEntry};

use crate::collector;
use crate::language::Language;
use crate::mapper::PositionMapper;

use super::imports::collect_imports;
use super::traits::LanguageProvider;
use super::types::{FileRecord, ParsedFile};

#[derive(Debug, Default)]
pub struct TypeScriptProvider;

impl LanguageProvider for TypeScriptProvider {
    fn parse_source(&self, source: &str, file_name: &str) -> Result<ParsedFile, ParseError> {
        let mut parser = Parser::new();
        let grammar = if file_name.ends_with(".tsx") {
            tree_sitter_typescript::LANGUAGE_TSX
        } else {
            tree_sitter_typescript::LANGUAGE_TYPESCRIPT
        };
        parser.set_language(&grammar.into()).map_err(|_| ParseError::Syntax {
            file: file_name.to_string(),
            message: "failed to load grammar".into(),
            line: 0,
            column: 0,
        })?;
        let tree = parser.parse(source, None).ok_or_else(|| ParseError::Syntax {
            file: file_name.to_string(),
            message: "tree-sitter returned no tree".into(),
            line: 0,
            column: 0,
        })?;
        if tree.root_node().has_error() {
            tracing::debug!(file = file_name, "typescript parse produced error nodes, continuing best-effort");
        }
        Ok(ParsedFile {
            tree,
            source: source.to_string(),
            language: Language::TypeScript,
            mapper: PositionMapper::new(source),
        })
    }

    fn collect_functions(&self, parsed: &ParsedFile) -> Vec<FunctionEntry> {
        collector::collect(parsed).functions
    }

    fn collect_variables(&self, parsed: &ParsedFile) -> Vec<VariableEntry> {
        collector::collect(parsed).variables
    }

    fn collect_constructors(&self, parsed: &ParsedFile) -> Vec<ConstructorEntry> {
        collector::collect(parsed).constructors
    }

    fn build_file_record(&self, parsed: &ParsedFile) -> FileRecord {
        let inventory = collector::collect(parsed);
        FileRecord {
            language: Language::TypeScript,
            function_count: inventory.functions.len(),
            variable_count: inventory.variables.len(),
            constructor_count: inventory.constructors.len(),
            imports: collect_imports(parsed),
        }
    }

    fn resolve_candidate_extensions(&self) -> &'static [&'static str] {
        &["ts", "tsx", "cts", "mts"]
    }
}
