//! Output rendering: a single JSON object in `--json` mode, a formatted
//! text report otherwise — mirroring spec.md §6's "stdout is a single JSON
//! object carrying `operation`, the operation-specific payload, and (for
//! edits) a `guard` block" contract.

use serde::Serialize;
use serde_json::{json, Value};

/// One CLI invocation's rendered result: an operation name, a JSON payload,
/// and (for edits) the guard block spec.md §6 requires alongside it.
pub struct Report {
    pub operation: &'static str,
    pub payload: Value,
}

impl Report {
    pub fn new(operation: &'static str, payload: impl Serialize) -> Self {
        Report { operation, payload: serde_json::to_value(payload).expect("report payload always serialises") }
    }

    pub fn error(operation: &'static str, message: String, code: &'static str) -> Self {
        Report { operation, payload: json!({ "error": message, "code": code }) }
    }

    fn as_json(&self) -> Value {
        let mut obj = json!({ "operation": self.operation });
        if let Value::Object(map) = &mut obj {
            if let Value::Object(payload) = &self.payload {
                for (k, v) in payload {
                    map.insert(k.clone(), v.clone());
                }
            } else {
                map.insert("result".to_string(), self.payload.clone());
            }
        }
        obj
    }

    pub fn print(&self, json_mode: bool) {
        if json_mode {
            println!("{}", serde_json::to_string_pretty(&self.as_json()).expect("report serialises"));
        } else {
            print_text(self.operation, &self.payload);
        }
    }

    /// `true` when this report represents a refusal (non-zero exit).
    pub fn is_error(&self) -> bool {
        self.payload.get("error").is_some()
    }
}

fn print_text(operation: &str, payload: &Value) {
    println!("== {operation} ==");
    print_value(payload, 0);
}

fn print_value(value: &Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                match v {
                    Value::Object(_) | Value::Array(_) => {
                        println!("{pad}{k}:");
                        print_value(v, indent + 1);
                    }
                    _ => println!("{pad}{k}: {}", render_scalar(v)),
                }
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                match item {
                    Value::Object(_) | Value::Array(_) => {
                        println!("{pad}[{i}]:");
                        print_value(item, indent + 1);
                    }
                    _ => println!("{pad}- {}", render_scalar(item)),
                }
            }
        }
        other => println!("{pad}{}", render_scalar(other)),
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
