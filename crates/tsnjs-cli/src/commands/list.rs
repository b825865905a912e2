//! `--list-functions`, `--list-variables`, `--list-constructors`, `--outline`.

use serde_json::json;
use tsnjs_core::Inventory;

use crate::args::Args;
use crate::commands::shared::passes_match_filters;
use crate::output::Report;

pub fn list_functions(inventory: &Inventory, args: &Args) -> Report {
    let entries: Vec<_> = inventory.functions.iter().filter(|f| passes_match_filters(&f.name, args)).collect();
    Report::new("list-functions", json!({ "count": entries.len(), "functions": entries }))
}

pub fn list_variables(inventory: &Inventory, args: &Args) -> Report {
    let entries: Vec<_> = inventory.variables.iter().filter(|v| passes_match_filters(&v.name, args)).collect();
    Report::new("list-variables", json!({ "count": entries.len(), "variables": entries }))
}

pub fn list_constructors(inventory: &Inventory, args: &Args) -> Report {
    let entries: Vec<_> =
        inventory.constructors.iter().filter(|c| passes_match_filters(&c.class_name, args)).collect();
    Report::new("list-constructors", json!({ "count": entries.len(), "constructors": entries }))
}

pub fn outline(inventory: &Inventory, args: &Args) -> Report {
    let functions: Vec<_> = inventory.functions.iter().filter(|f| passes_match_filters(&f.name, args)).collect();
    let variables: Vec<_> = inventory.variables.iter().filter(|v| passes_match_filters(&v.name, args)).collect();
    let constructors: Vec<_> =
        inventory.constructors.iter().filter(|c| passes_match_filters(&c.class_name, args)).collect();
    Report::new(
        "outline",
        json!({
            "functions": functions,
            "variables": variables,
            "constructors": constructors,
        }),
    )
}
