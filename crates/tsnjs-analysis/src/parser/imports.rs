//! Import/require discovery shared by both language providers, used to
//! populate `FileRecord` for the workspace scanner and the dependency
//! ripple walker (spec.md §5).

use tree_sitter::Node;

use super::types::{ImportRecord, ParsedFile};

pub fn collect_imports(parsed: &ParsedFile) -> Vec<ImportRecord> {
    let mut out = Vec::new();
    walk(parsed, &parsed.root(), &mut out);
    out
}

fn walk(parsed: &ParsedFile, node: &Node, out: &mut Vec<ImportRecord>) {
    match node.kind() {
        "import_statement" => {
            if let Some(source) = node.child_by_field_name("source") {
                out.push(ImportRecord {
                    specifier: unquote(parsed.text_of(&source)),
                    span: parsed.span_of(&source),
                });
            }
        }
        "call_expression" => {
            let is_require = node
                .child_by_field_name("function")
                .map(|f| f.kind() == "identifier" && parsed.text_of(&f) == "require")
                .unwrap_or(false);
            if is_require {
                if let Some(args) = node.child_by_field_name("arguments") {
                    if let Some(first) = args.named_child(0) {
                        if first.kind() == "string" {
                            out.push(ImportRecord {
                                specifier: unquote(parsed.text_of(&first)),
                                span: parsed.span_of(&first),
                            });
                        }
                    }
                }
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        walk(parsed, &child, out);
    }
}

fn unquote(text: &str) -> String {
    text.trim_matches(|c| c == '\'' || c == '"' || c == '`').to_string()
}
