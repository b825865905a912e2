//! Parser output types shared by both language providers.

use tsnjs_core::Span;

use crate::language::Language;
use crate::mapper::PositionMapper;

/// A parsed file: the tree-sitter tree, the owned source, the detected
/// language, and a `PositionMapper` built once for this parse.
pub struct ParsedFile {
    pub tree: tree_sitter::Tree,
    pub source: String,
    pub language: Language,
    pub mapper: PositionMapper,
}

impl ParsedFile {
    pub fn root(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    pub fn source_bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }

    /// Build a `Span` from a tree-sitter node's byte range, deriving the
    /// char range via the mapper.
    pub fn span_of(&self, node: &tree_sitter::Node) -> Span {
        let byte_start = node.start_byte();
        let byte_end = node.end_byte();
        Span::new(
            self.mapper.byte_to_char(byte_start),
            self.mapper.byte_to_char(byte_end),
            byte_start,
            byte_end,
        )
    }

    pub fn text_of(&self, node: &tree_sitter::Node) -> &str {
        node.utf8_text(self.source_bytes()).unwrap_or_default()
    }
}

/// A statically resolvable import/require, used by the dependency ripple
/// walker (spec.md §5) and the workspace scanner's file record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    pub specifier: String,
    pub span: Span,
}

/// The per-file record the workspace scanner accumulates (spec.md §4.1,
/// `buildFileRecord`).
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub language: Language,
    pub function_count: usize,
    pub variable_count: usize,
    pub constructor_count: usize,
    pub imports: Vec<ImportRecord>,
}
