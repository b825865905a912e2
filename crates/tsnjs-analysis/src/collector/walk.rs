//! The single-pass AST walk that builds all three inventories (spec.md
//! §4.3). Dispatches on tree-sitter node kind, depth-first, pre-order —
//! the same "walk once, match on `node.kind()`" shape the teacher's GAST
//! normalizer uses for the TypeScript/JavaScript dialect.

use tree_sitter::Node;
use tsnjs_core::model::entry::{ConstructorKind, FunctionKind, TargetMode};
use tsnjs_core::{ConstructorEntry, ExportKind, FunctionEntry, Inventory, Span, VariableEntry};

use super::naming::{host_call_label, HOST_CALLS};
use super::path_signature::PathBuilder;
use crate::parser::types::ParsedFile;

/// Scope threaded down the walk: the canonical-name prefix built so far and
/// the joiner to use for the next segment (`.` at module/export scope,
/// ` > ` once inside a class or a host-call callback, per spec.md §4.3).
#[derive(Clone)]
struct Scope {
    prefix: String,
    joiner: &'static str,
}

impl Scope {
    fn root() -> Self {
        Scope { prefix: String::new(), joiner: "." }
    }

    fn canonical_for(&self, label: &str) -> String {
        if self.prefix.is_empty() {
            label.to_string()
        } else {
            format!("{}{}{}", self.prefix, self.joiner, label)
        }
    }

    fn child(&self, canonical: String, joiner: &'static str) -> Self {
        Scope { prefix: canonical, joiner }
    }
}

pub fn collect(parsed: &ParsedFile) -> Inventory {
    let mut out = Inventory::default();
    let root = parsed.root();
    let path = PathBuilder::new().pushed(root.kind(), 0);
    walk(parsed, &root, &Scope::root(), false, ExportKind::None, &path, &mut out);
    out.sort_by_span();
    out
}

/// `exported`/`export_kind` are passed down from an enclosing `export`
/// wrapper so the function/variable/class immediately inside it is tagged
/// correctly; they reset to `(false, None)` for every recursion that is not
/// itself the direct child of an export.
#[allow(clippy::too_many_arguments)]
fn walk(
    parsed: &ParsedFile,
    node: &Node,
    scope: &Scope,
    exported: bool,
    export_kind: ExportKind,
    path: &PathBuilder,
    out: &mut Inventory,
) {
    match node.kind() {
        "program" | "statement_block" | "class_body" => {
            recurse_children(parsed, node, scope, path, out);
        }

        "export_statement" => handle_export(parsed, node, scope, path, out),

        "function_declaration" | "function_expression" | "generator_function_declaration" => {
            handle_function(
                parsed, node, scope, exported, export_kind, FunctionKind::FunctionDeclaration,
                path, out,
            );
        }

        "arrow_function" => {
            handle_function(
                parsed, node, scope, exported, export_kind, FunctionKind::ArrowFunction, path, out,
            );
        }

        "class_declaration" | "class" => {
            handle_class(parsed, node, scope, exported, export_kind, path, out);
        }

        "lexical_declaration" | "variable_declaration" => {
            handle_variable_declaration(parsed, node, scope, exported, export_kind, path, out);
        }

        "assignment_expression" => {
            handle_assignment(parsed, node, scope, path, out);
        }

        "method_definition" => {
            // Reached outside a class body (object-literal method); class
            // members are handled directly by `handle_class`.
            let name = method_name(parsed, node);
            let child_scope = scope.child(scope.canonical_for(&name), scope.joiner);
            push_function_entry(parsed, node, &child_scope, false, ExportKind::None, FunctionKind::ClassMethod, path, out);
            if let Some(body) = node.child_by_field_name("body") {
                let body_path = path.pushed(body.kind(), 0);
                walk(parsed, &body, &child_scope, false, ExportKind::None, &body_path, out);
            }
        }

        "call_expression" => handle_call(parsed, node, scope, path, out),

        "expression_statement" => {
            if let Some(inner) = node.named_child(0) {
                let child_path = path.pushed(inner.kind(), 0);
                walk(parsed, &inner, scope, false, ExportKind::None, &child_path, out);
            }
        }

        _ => recurse_children(parsed, node, scope, path, out),
    }
}

fn recurse_children(parsed: &ParsedFile, node: &Node, scope: &Scope, path: &PathBuilder, out: &mut Inventory) {
    let mut cursor = node.walk();
    for (idx, child) in node.named_children(&mut cursor).enumerate() {
        let child_path = path.pushed(child.kind(), idx);
        walk(parsed, &child, scope, false, ExportKind::None, &child_path, out);
    }
}

fn ident_text<'a>(parsed: &'a ParsedFile, node: &Node) -> &'a str {
    parsed.text_of(node)
}

fn is_async(node: &Node) -> bool {
    has_token_child(node, "async")
}

fn is_generator(node: &Node) -> bool {
    has_token_child(node, "*") || node.kind() == "generator_function_declaration"
}

fn has_token_child(node: &Node, token: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor).any(|c| c.kind() == token)
}

// ---------------------------------------------------------------------
// export

fn handle_export(parsed: &ParsedFile, node: &Node, scope: &Scope, path: &PathBuilder, out: &mut Inventory) {
    let is_default = has_token_child(node, "default");
    let decl = node
        .child_by_field_name("declaration")
        .or_else(|| node.child_by_field_name("value"));

    let Some(decl) = decl else {
        // `export { a, b }` / `export * from "..."` — re-export clauses
        // reference existing bindings rather than declaring new ones.
        return;
    };

    let decl_path = path.pushed(decl.kind(), 0);
    if is_default {
        let child_scope = scope.child(scope.canonical_for("exports.default"), scope.joiner);
        walk(parsed, &decl, &child_scope, true, ExportKind::Default, &decl_path, out);
    } else {
        let child_scope = scope.child(scope.canonical_for("exports"), scope.joiner);
        walk(parsed, &decl, &child_scope, true, ExportKind::Named, &decl_path, out);
    }
}

// ---------------------------------------------------------------------
// functions

#[allow(clippy::too_many_arguments)]
fn handle_function(
    parsed: &ParsedFile,
    node: &Node,
    scope: &Scope,
    exported: bool,
    export_kind: ExportKind,
    kind: FunctionKind,
    path: &PathBuilder,
    out: &mut Inventory,
) {
    let name = node
        .child_by_field_name("name")
        .map(|n| ident_text(parsed, &n).to_string())
        .unwrap_or_else(|| "callback".to_string());

    let label = if exported {
        match export_kind {
            ExportKind::Default => "default".to_string(),
            _ => name.clone(),
        }
    } else {
        name.clone()
    };
    let canonical = scope.canonical_for(&label);
    let child_scope = scope.child(canonical.clone(), scope.joiner);

    push_function_entry(parsed, node, &Scope { prefix: canonical, joiner: scope.joiner }, exported, export_kind, kind, path, out);

    if let Some(body) = node.child_by_field_name("body") {
        let body_path = path.pushed(body.kind(), 0);
        walk(parsed, &body, &child_scope, false, ExportKind::None, &body_path, out);
    }
}

#[allow(clippy::too_many_arguments)]
fn push_function_entry(
    parsed: &ParsedFile,
    node: &Node,
    scope_at_self: &Scope,
    exported: bool,
    export_kind: ExportKind,
    kind: FunctionKind,
    path: &PathBuilder,
    out: &mut Inventory,
) {
    let name = node
        .child_by_field_name("name")
        .map(|n| ident_text(parsed, &n).to_string())
        .unwrap_or_else(|| "callback".to_string());
    let identifier_span = node.child_by_field_name("name").map(|n| parsed.span_of(&n));
    let span = parsed.span_of(node);
    let hash = tsnjs_core::hash_span(span.slice_bytes(parsed.source_bytes()));

    out.functions.push(FunctionEntry {
        name,
        canonical_name: scope_at_self.prefix.clone(),
        scope_chain: scope_at_self.prefix.split(scope_at_self.joiner).map(String::from).collect(),
        kind,
        export_kind,
        exported,
        is_async: is_async(node),
        is_generator: is_generator(node),
        replaceable: true,
        span,
        identifier_span,
        path_signature: path.signature(),
        hash,
    });
}

// ---------------------------------------------------------------------
// classes

fn handle_class(
    parsed: &ParsedFile,
    node: &Node,
    scope: &Scope,
    exported: bool,
    export_kind: ExportKind,
    path: &PathBuilder,
    out: &mut Inventory,
) {
    let name = node
        .child_by_field_name("name")
        .map(|n| ident_text(parsed, &n).to_string())
        .unwrap_or_else(|| "anonymous".to_string());

    let label = if exported && export_kind == ExportKind::Default { "default".to_string() } else { name.clone() };
    let canonical = scope.canonical_for(&label);
    let class_scope = Scope { prefix: canonical.clone(), joiner: " > " };

    push_function_entry(parsed, node, &Scope { prefix: canonical.clone(), joiner: scope.joiner }, exported, export_kind, FunctionKind::Class, path, out);

    let extends = heritage_superclass(parsed, node);
    let implements = heritage_implements(parsed, node);

    let mut explicit_ctor: Option<(Span, tsnjs_core::EntryHash, String, PathBuilder)> = None;

    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for (idx, member) in body.named_children(&mut cursor).enumerate() {
            let member_path = path.pushed(member.kind(), idx);
            if member.kind() == "method_definition" {
                let mname = method_name(parsed, &member);
                if mname == "constructor" {
                    let span = parsed.span_of(&member);
                    let hash = tsnjs_core::hash_span(span.slice_bytes(parsed.source_bytes()));
                    let params = member
                        .child_by_field_name("parameters")
                        .map(|p| ident_text(parsed, &p).to_string())
                        .unwrap_or_default();
                    explicit_ctor = Some((span, hash, params, member_path.clone()));
                    continue;
                }
                let modifier = method_modifier(&member);
                let member_label = match &modifier {
                    Some(m) => format!("{m} > {mname}"),
                    None => mname.clone(),
                };
                let member_canonical = format!("{}{}{}", class_scope.prefix, class_scope.joiner, member_label);
                let member_scope = Scope { prefix: member_canonical.clone(), joiner: " > " };
                push_function_entry(
                    parsed, &member, &Scope { prefix: member_canonical.clone(), joiner: " > " },
                    false, ExportKind::None, FunctionKind::ClassMethod, &member_path, out,
                );
                if let Some(mbody) = member.child_by_field_name("body") {
                    let mbody_path = member_path.pushed(mbody.kind(), 0);
                    walk(parsed, &mbody, &member_scope, false, ExportKind::None, &mbody_path, out);
                }
            }
        }
    }

    let (kind, span, identifier_span, hash, params_rendered, ctor_path) = match explicit_ctor {
        Some((span, hash, params, p)) => (
            ConstructorKind::Explicit,
            span,
            node.child_by_field_name("name").map(|n| parsed.span_of(&n)),
            Some(hash),
            params,
            p,
        ),
        None => (
            ConstructorKind::Implicit,
            parsed.span_of(node),
            None,
            None,
            String::new(),
            path.pushed("implicit_constructor", 0),
        ),
    };

    out.constructors.push(ConstructorEntry {
        class_name: name,
        canonical_name: format!("{}{}constructor", class_scope.prefix, class_scope.joiner),
        kind,
        extends,
        implements,
        params_rendered,
        span,
        identifier_span,
        path_signature: ctor_path.signature(),
        hash,
    });
}

fn heritage_superclass(parsed: &ParsedFile, node: &Node) -> Option<String> {
    node.child_by_field_name("superclass").map(|n| ident_text(parsed, &n).to_string())
}

fn heritage_implements(parsed: &ParsedFile, node: &Node) -> Vec<String> {
    // TypeScript `implements` clauses surface as a `class_heritage` child
    // containing an `implements_clause`; kept best-effort since the JS
    // grammar has no such node.
    let mut out = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "class_heritage" {
            let mut hc = child.walk();
            for clause in child.children(&mut hc) {
                if clause.kind() == "implements_clause" {
                    let mut tc = clause.walk();
                    for t in clause.named_children(&mut tc) {
                        out.push(ident_text(parsed, &t).to_string());
                    }
                }
            }
        }
    }
    out
}

fn method_name(parsed: &ParsedFile, node: &Node) -> String {
    node.child_by_field_name("name")
        .map(|n| ident_text(parsed, &n).to_string())
        .unwrap_or_else(|| "callback".to_string())
}

fn method_modifier(node: &Node) -> Option<String> {
    if has_token_child(node, "static") {
        Some("static".to_string())
    } else if has_token_child(node, "get") {
        Some("get".to_string())
    } else if has_token_child(node, "set") {
        Some("set".to_string())
    } else {
        None
    }
}

// ---------------------------------------------------------------------
// variables

#[allow(clippy::too_many_arguments)]
fn handle_variable_declaration(
    parsed: &ParsedFile,
    node: &Node,
    scope: &Scope,
    exported: bool,
    export_kind: ExportKind,
    path: &PathBuilder,
    out: &mut Inventory,
) {
    let decl_span = parsed.span_of(node);
    let decl_hash = tsnjs_core::hash_span(decl_span.slice_bytes(parsed.source_bytes()));

    let mut cursor = node.walk();
    let declarators: Vec<Node> = node
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "variable_declarator")
        .collect();

    let Some(first) = declarators.first() else { return };
    let first_name = declarator_name_text(parsed, first);

    out.variables.push(VariableEntry {
        name: first_name.clone(),
        canonical_name: scope.canonical_for(&first_name),
        scope_chain: scope.prefix.split(scope.joiner).map(String::from).collect(),
        export_kind,
        exported,
        replaceable: true,
        span: decl_span,
        identifier_span: first.child_by_field_name("name").map(|n| parsed.span_of(&n)),
        path_signature: path.signature(),
        hash: decl_hash,
        initializer_type: first.child_by_field_name("value").map(|n| n.kind().to_string()),
        target_mode: TargetMode::Declaration,
        is_assignment: false,
    });

    for (idx, declarator) in declarators.iter().enumerate() {
        let dpath = path.pushed(declarator.kind(), idx);
        handle_declarator(parsed, declarator, scope, exported, export_kind, &dpath, out);
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_declarator(
    parsed: &ParsedFile,
    node: &Node,
    scope: &Scope,
    exported: bool,
    export_kind: ExportKind,
    path: &PathBuilder,
    out: &mut Inventory,
) {
    let name = declarator_name_text(parsed, node);
    let span = parsed.span_of(node);
    let hash = tsnjs_core::hash_span(span.slice_bytes(parsed.source_bytes()));

    out.variables.push(VariableEntry {
        name: name.clone(),
        canonical_name: scope.canonical_for(&name),
        scope_chain: scope.prefix.split(scope.joiner).map(String::from).collect(),
        export_kind,
        exported,
        replaceable: true,
        span,
        identifier_span: node.child_by_field_name("name").map(|n| parsed.span_of(&n)),
        path_signature: path.signature(),
        hash,
        initializer_type: node.child_by_field_name("value").map(|n| n.kind().to_string()),
        target_mode: TargetMode::Declarator,
        is_assignment: false,
    });

    if let Some(pattern) = node.child_by_field_name("name") {
        collect_bindings(parsed, &pattern, scope, exported, export_kind, path, out);
    }

    // A simple (non-destructured) binding initialised to a function/arrow
    // is additionally addressable as a FunctionEntry, per spec.md §3.
    if let Some(init) = node.child_by_field_name("value") {
        let is_simple_name = node
            .child_by_field_name("name")
            .map(|n| n.kind() == "identifier")
            .unwrap_or(false);
        if is_simple_name {
            let canonical = scope.canonical_for(&name);
            let fn_scope = Scope { prefix: canonical, joiner: scope.joiner };
            let init_path = path.pushed(init.kind(), 0);
            match init.kind() {
                "function_expression" | "arrow_function" => {
                    handle_function(
                        parsed, &init, &Scope { prefix: fn_scope.prefix.clone(), joiner: fn_scope.joiner },
                        false, ExportKind::None,
                        if init.kind() == "arrow_function" { FunctionKind::ArrowFunction } else { FunctionKind::FunctionExpression },
                        &init_path, out,
                    );
                    // Overwrite the entry's canonical/export metadata with
                    // the variable's, since `handle_function` above treated
                    // it as unexported by default.
                    if let Some(last) = out.functions.last_mut() {
                        last.exported = exported;
                        last.export_kind = export_kind;
                    }
                }
                "class" => {
                    handle_class(parsed, &init, &Scope { prefix: scope.prefix.clone(), joiner: scope.joiner }, exported, export_kind, &init_path, out);
                }
                _ => {
                    walk(parsed, &init, &fn_scope, false, ExportKind::None, &init_path, out);
                }
            }
        } else {
            let init_path = path.pushed(init.kind(), 0);
            walk(parsed, &init, scope, false, ExportKind::None, &init_path, out);
        }
    }
}

fn declarator_name_text(parsed: &ParsedFile, declarator: &Node) -> String {
    match declarator.child_by_field_name("name") {
        Some(n) if n.kind() == "identifier" => ident_text(parsed, &n).to_string(),
        Some(n) => parsed.text_of(&n).to_string(),
        None => "destructured".to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn collect_bindings(
    parsed: &ParsedFile,
    pattern: &Node,
    scope: &Scope,
    exported: bool,
    export_kind: ExportKind,
    path: &PathBuilder,
    out: &mut Inventory,
) {
    match pattern.kind() {
        "identifier" => {
            let name = ident_text(parsed, pattern).to_string();
            let span = parsed.span_of(pattern);
            out.variables.push(VariableEntry {
                name: name.clone(),
                canonical_name: scope.canonical_for(&name),
                scope_chain: scope.prefix.split(scope.joiner).map(String::from).collect(),
                export_kind,
                exported,
                replaceable: true,
                span,
                identifier_span: Some(span),
                path_signature: path.signature(),
                hash: tsnjs_core::hash_span(span.slice_bytes(parsed.source_bytes())),
                initializer_type: None,
                target_mode: TargetMode::Binding,
                is_assignment: false,
            });
        }
        "object_pattern" => {
            let mut cursor = pattern.walk();
            for (idx, child) in pattern.named_children(&mut cursor).enumerate() {
                let cpath = path.pushed(child.kind(), idx);
                match child.kind() {
                    "shorthand_property_identifier_pattern" => {
                        let name = ident_text(parsed, &child).to_string();
                        push_single_binding(parsed, &child, &name, scope, exported, export_kind, &cpath, out);
                    }
                    "pair_pattern" => {
                        let bound_name = child
                            .child_by_field_name("value")
                            .map(|v| declarator_name_text(parsed, &pair_as_declarator_like(&v)))
                            .unwrap_or_default();
                        let name = if bound_name.is_empty() {
                            child.child_by_field_name("key").map(|k| ident_text(parsed, &k).to_string()).unwrap_or_default()
                        } else {
                            bound_name
                        };
                        push_single_binding(parsed, &child, &name, scope, exported, export_kind, &cpath, out);
                    }
                    "rest_pattern" => {
                        if let Some(inner) = child.named_child(0) {
                            let name = format!("...{}", ident_text(parsed, &inner));
                            push_single_binding(parsed, &child, &name, scope, exported, export_kind, &cpath, out);
                        }
                    }
                    _ => {}
                }
            }
        }
        "array_pattern" => {
            let mut cursor = pattern.walk();
            for (idx, child) in pattern.named_children(&mut cursor).enumerate() {
                let cpath = path.pushed(child.kind(), idx);
                match child.kind() {
                    "identifier" => collect_bindings(parsed, &child, scope, exported, export_kind, &cpath, out),
                    "assignment_pattern" => {
                        if let Some(left) = child.child_by_field_name("left") {
                            collect_bindings(parsed, &left, scope, exported, export_kind, &cpath, out);
                        }
                    }
                    "rest_pattern" => {
                        if let Some(inner) = child.named_child(0) {
                            let name = format!("...{}", ident_text(parsed, &inner));
                            push_single_binding(parsed, &child, &name, scope, exported, export_kind, &cpath, out);
                        }
                    }
                    _ => {}
                }
            }
        }
        "assignment_pattern" => {
            if let Some(left) = pattern.child_by_field_name("left") {
                collect_bindings(parsed, &left, scope, exported, export_kind, path, out);
            }
        }
        _ => {}
    }
}

/// `pair_pattern`'s `value` field is itself a pattern node, not a
/// declarator; this lets us reuse `declarator_name_text`'s "identifier or
/// raw text" fallback uniformly.
fn pair_as_declarator_like<'a>(node: &Node<'a>) -> Node<'a> {
    *node
}

#[allow(clippy::too_many_arguments)]
fn push_single_binding(
    parsed: &ParsedFile,
    span_node: &Node,
    name: &str,
    scope: &Scope,
    exported: bool,
    export_kind: ExportKind,
    path: &PathBuilder,
    out: &mut Inventory,
) {
    let span = parsed.span_of(span_node);
    out.variables.push(VariableEntry {
        name: name.to_string(),
        canonical_name: scope.canonical_for(name),
        scope_chain: scope.prefix.split(scope.joiner).map(String::from).collect(),
        export_kind,
        exported,
        replaceable: true,
        span,
        identifier_span: Some(span),
        path_signature: path.signature(),
        hash: tsnjs_core::hash_span(span.slice_bytes(parsed.source_bytes())),
        initializer_type: None,
        target_mode: TargetMode::Binding,
        is_assignment: false,
    });
}

// ---------------------------------------------------------------------
// commonjs assignments: module.exports = …, module.exports.x = …, exports.x = …

fn handle_assignment(parsed: &ParsedFile, node: &Node, scope: &Scope, path: &PathBuilder, out: &mut Inventory) {
    let Some(left) = node.child_by_field_name("left") else { return };
    let Some(right) = node.child_by_field_name("right") else { return };

    if let Some((canonical, export_kind)) = commonjs_target(parsed, &left) {
        match right.kind() {
            "function_expression" | "arrow_function" => {
                let fn_scope = Scope { prefix: canonical, joiner: "." };
                let right_path = path.pushed(right.kind(), 0);
                handle_function(
                    parsed, &right, &fn_scope, true, export_kind,
                    if right.kind() == "arrow_function" { FunctionKind::ArrowFunction } else { FunctionKind::FunctionExpression },
                    &right_path, out,
                );
            }
            "class" => {
                let class_scope = Scope { prefix: canonical, joiner: "." };
                let right_path = path.pushed(right.kind(), 0);
                handle_class(parsed, &right, &class_scope, true, export_kind, &right_path, out);
            }
            _ => {
                let span = parsed.span_of(node);
                let hash = tsnjs_core::hash_span(span.slice_bytes(parsed.source_bytes()));
                out.variables.push(VariableEntry {
                    name: canonical.clone(),
                    canonical_name: canonical,
                    scope_chain: vec!["module.exports".to_string()],
                    export_kind,
                    exported: true,
                    replaceable: true,
                    span,
                    identifier_span: Some(parsed.span_of(&left)),
                    path_signature: path.signature(),
                    hash,
                    initializer_type: Some(right.kind().to_string()),
                    target_mode: TargetMode::Declaration,
                    is_assignment: true,
                });
            }
        }
    } else {
        let right_path = path.pushed(right.kind(), 0);
        walk(parsed, &right, scope, false, ExportKind::None, &right_path, out);
    }
}

/// Resolve a CommonJS export target (`module.exports`, `module.exports.x`,
/// `exports.x`) from an assignment's left-hand side, returning its
/// canonical name and export kind.
fn commonjs_target(parsed: &ParsedFile, left: &Node) -> Option<(String, ExportKind)> {
    let dotted = member_chain_text(parsed, left)?;
    if dotted == "module.exports" {
        Some((dotted, ExportKind::CommonjsDefault))
    } else if dotted.starts_with("module.exports.") || dotted.starts_with("exports.") {
        Some((dotted, ExportKind::CommonjsNamed))
    } else {
        None
    }
}

fn member_chain_text(parsed: &ParsedFile, node: &Node) -> Option<String> {
    match node.kind() {
        "identifier" => Some(ident_text(parsed, node).to_string()),
        "member_expression" => {
            let object = node.child_by_field_name("object")?;
            let property = node.child_by_field_name("property")?;
            let base = member_chain_text(parsed, &object)?;
            Some(format!("{base}.{}", ident_text(parsed, &property)))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------
// host-call callbacks: describe(...), test(...), beforeEach(...), etc.

fn handle_call(parsed: &ParsedFile, node: &Node, scope: &Scope, path: &PathBuilder, out: &mut Inventory) {
    let callee_text = node
        .child_by_field_name("function")
        .and_then(|f| if f.kind() == "identifier" { Some(ident_text(parsed, &f).to_string()) } else { None });

    let Some(args) = node.child_by_field_name("arguments") else { return };
    let mut cursor = args.walk();
    let arg_nodes: Vec<Node> = args.named_children(&mut cursor).collect();

    let is_host_call = callee_text.as_deref().map(|c| HOST_CALLS.contains(&c)).unwrap_or(false);
    let first_string_arg = arg_nodes.first().and_then(|a| {
        if a.kind() == "string" {
            Some(parsed.text_of(a).trim_matches(|c| c == '\'' || c == '"' || c == '`').to_string())
        } else {
            None
        }
    });

    for (idx, arg) in arg_nodes.iter().enumerate() {
        let arg_path = path.pushed(arg.kind(), idx);
        if is_host_call && matches!(arg.kind(), "function_expression" | "arrow_function") {
            let callee = callee_text.as_deref().unwrap_or("call");
            let label = host_call_label(callee, first_string_arg.as_deref());
            let with_label = scope.canonical_for(&label);
            let with_callback = format!("{with_label} > callback");
            let inner_name = arg.child_by_field_name("name").map(|n| ident_text(parsed, &n).to_string());
            let final_canonical = match &inner_name {
                Some(n) => format!("{with_callback} > {n}"),
                None => with_callback,
            };
            let callback_scope = Scope { prefix: final_canonical.clone(), joiner: " > " };
            push_function_entry(
                parsed, arg, &Scope { prefix: final_canonical, joiner: " > " }, false, ExportKind::None,
                if arg.kind() == "arrow_function" { FunctionKind::ArrowFunction } else { FunctionKind::FunctionExpression },
                &arg_path, out,
            );
            if let Some(body) = arg.child_by_field_name("body") {
                let body_path = arg_path.pushed(body.kind(), 0);
                walk(parsed, &body, &callback_scope, false, ExportKind::None, &body_path, out);
            }
        } else {
            walk(parsed, arg, scope, false, ExportKind::None, &arg_path, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{JavaScriptProvider, LanguageProvider};

    fn collect_js(source: &str) -> Inventory {
        let parsed = JavaScriptProvider.parse_source(source, "a.js").unwrap();
        collect(&parsed)
    }

    #[test]
    fn exported_function_declaration_gets_exports_prefix() {
        let inv = collect_js("export function alpha() { return 1; }");
        let f = inv.functions.iter().find(|f| f.name == "alpha").unwrap();
        assert_eq!(f.canonical_name, "exports.alpha");
        assert!(f.exported);
        assert_eq!(f.kind, FunctionKind::FunctionDeclaration);
    }

    #[test]
    fn commonjs_assignment_collects_as_variable() {
        let inv = collect_js("exports.alpha = function() { return 1; };");
        let v = inv.variables.iter().find(|v| v.canonical_name == "exports.alpha").unwrap();
        assert!(v.is_assignment);
    }

    #[test]
    fn nested_host_call_callback_builds_spec_path() {
        let source = "describe('mission_timers', () => {\n  beforeEach(() => {});\n  test('x', function callbackFn() {\n    return 1;\n  });\n});";
        let inv = collect_js(source);
        let expected = "call:describe:mission_timers > callback > call:test:x > callback > callbackFn";
        let f = inv.functions.iter().find(|f| f.canonical_name == expected);
        assert!(f.is_some(), "expected canonical name {expected:?} in {:#?}", inv.functions.iter().map(|f| &f.canonical_name).collect::<Vec<_>>());
        let f = f.unwrap();
        let extracted = &source[f.span.bytes.start..f.span.bytes.end];
        assert_eq!(hash_span(extracted.as_bytes()), f.hash);
    }

    #[test]
    fn snipe_position_resolves_to_innermost_enclosing_function() {
        use crate::mapper::PositionMapper;
        use crate::selector::{candidates_from_functions, resolve};
        use tsnjs_core::Selector;

        let source = "export function alpha() { return 'alpha'; }";
        let inv = collect_js(source);
        let mapper = PositionMapper::new(source);
        let offset = mapper.line_col_to_offset(1, 8).unwrap();
        let byte = mapper.char_to_byte(offset);

        let locate = inv.functions.iter().find(|f| f.canonical_name == "exports.alpha").unwrap();

        let candidates = candidates_from_functions(&inv.functions);
        let resolved = resolve(&candidates, &Selector::Position(byte), None, false, &mapper).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].canonical_name, "exports.alpha");
        assert_eq!(resolved[0].hash, locate.hash);
    }
}
