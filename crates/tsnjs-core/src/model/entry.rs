//! The three inventory entry kinds the Symbol Collector (C3) emits.

use serde::{Deserialize, Serialize};

use super::hash::EntryHash;
use super::span::Span;

/// What kind of callable/declaration an entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FunctionKind {
    FunctionDeclaration,
    FunctionExpression,
    ArrowFunction,
    ClassMethod,
    Class,
    Constructor,
}

/// How an entry is exported, per spec.md §3/§4.3 naming rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportKind {
    None,
    Named,
    Default,
    CommonjsDefault,
    CommonjsNamed,
}

/// A callable entity: function declaration/expression, arrow, class method
/// (including getter/setter/static/private), object-literal method,
/// constructor, or host-call callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionEntry {
    pub name: String,
    pub canonical_name: String,
    pub scope_chain: Vec<String>,
    pub kind: FunctionKind,
    pub export_kind: ExportKind,
    pub exported: bool,
    pub is_async: bool,
    pub is_generator: bool,
    pub replaceable: bool,
    pub span: Span,
    pub identifier_span: Option<Span>,
    pub path_signature: String,
    pub hash: EntryHash,
}

impl FunctionEntry {
    /// Invariant: identifierSpan, when present, is strictly contained in span.
    pub fn identifier_span_valid(&self) -> bool {
        match &self.identifier_span {
            Some(id) => id.contained_in(&self.span),
            None => true,
        }
    }
}

/// The granularity at which a `VariableEntry` addresses a declaration, per
/// spec.md §3/§4.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetMode {
    Declaration,
    Declarator,
    Binding,
}

/// A declarator, a binding within a declarator, or a CommonJS
/// `module.exports.x = …` / `exports.x = …` assignment (modelled as a
/// variable so it shares the function-like selector surface).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableEntry {
    pub name: String,
    pub canonical_name: String,
    pub scope_chain: Vec<String>,
    pub export_kind: ExportKind,
    pub exported: bool,
    pub replaceable: bool,
    pub span: Span,
    pub identifier_span: Option<Span>,
    pub path_signature: String,
    pub hash: EntryHash,
    pub initializer_type: Option<String>,
    pub target_mode: TargetMode,
    /// `true` for `module.exports.x = …` / `exports.x = …` style entries.
    pub is_assignment: bool,
}

/// Class metadata and constructor addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConstructorKind {
    Explicit,
    Implicit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorEntry {
    pub class_name: String,
    pub canonical_name: String,
    pub kind: ConstructorKind,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub params_rendered: String,
    pub span: Span,
    pub identifier_span: Option<Span>,
    pub path_signature: String,
    /// `None` when `kind == Implicit` — an implicit constructor has no
    /// source span of its own to hash.
    pub hash: Option<EntryHash>,
}

/// All three inventories produced by one collector pass over a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub functions: Vec<FunctionEntry>,
    pub variables: Vec<VariableEntry>,
    pub constructors: Vec<ConstructorEntry>,
}

impl Inventory {
    /// Sort all three lists by `span.start`, as spec.md §4.3 "ordering &
    /// stability" requires when printed.
    pub fn sort_by_span(&mut self) {
        self.functions.sort_by_key(|e| e.span.bytes.start);
        self.variables.sort_by_key(|e| e.span.bytes.start);
        self.constructors.sort_by_key(|e| e.span.bytes.start);
    }
}
