//! `tree-sitter-javascript`-backed `LanguageProvider`.

use tree_sitter::Parser;
use tsnjs_core::{ConstructorEntry, FunctionEntry, ParseError, VariableEntry};

use crate::collector;
use crate::language::Language;
use crate::mapper::PositionMapper;

use super::imports::collect_imports;
use super::traits::LanguageProvider;
use super::types::{FileRecord, ParsedFile};

#[derive(Debug, Default)]
pub struct JavaScriptProvider;

impl LanguageProvider for JavaScriptProvider {
    fn parse_source(&self, source: &str, file_name: &str) -> Result<ParsedFile, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .map_err(|_| ParseError::Syntax {
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
            tracing::debug!(file = file_name, "javascript parse produced error nodes, continuing best-effort");
        }
        Ok(ParsedFile {
            tree,
            source: source.to_string(),
            language: Language::JavaScript,
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
            language: Language::JavaScript,
            function_count: inventory.functions.len(),
            variable_count: inventory.variables.len(),
            constructor_count: inventory.constructors.len(),
            imports: collect_imports(parsed),
        }
    }

    fn resolve_candidate_extensions(&self) -> &'static [&'static str] {
        &["js", "jsx", "mjs", "cjs"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_function() {
        let provider = JavaScriptProvider;
        let parsed = provider.parse_source("function alpha() { return 1; }", "a.js").unwrap();
        let functions = provider.collect_functions(&parsed);
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].name, "alpha");
        assert_eq!(functions[0].canonical_name, "alpha");
    }

    #[test]
    fn collects_commonjs_export() {
        let provider = JavaScriptProvider;
        let parsed = provider
            .parse_source("module.exports.run = function() { return 2; };", "a.js")
            .unwrap();
        let functions = provider.collect_functions(&parsed);
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].canonical_name, "module.exports.run");
    }

    #[test]
    fn records_require_import() {
        let provider = JavaScriptProvider;
        let parsed = provider.parse_source("const fs = require('fs');", "a.js").unwrap();
        let record = provider.build_file_record(&parsed);
        assert_eq!(record.imports.len(), 1);
        assert_eq!(record.imports[0].specifier, "fs");
    }
}
