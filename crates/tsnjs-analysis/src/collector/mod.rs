//! The Symbol Collector (C3): walks a parsed file once and produces the
//! function/variable/constructor inventory.

mod naming;
mod path_signature;
mod walk;

use tsnjs_core::Inventory;

use crate::parser::types::ParsedFile;

/// Run the collector over a parsed file.
pub fn collect(parsed: &ParsedFile) -> Inventory {
    walk::collect(parsed)
}
