//! # tsnjs-core
//!
//! Language-neutral foundation for the tsnjs symbol-addressing engine: the
//! span/hash/entry data model, the error taxonomy, scan/edit config, and the
//! selector grammar. Every other crate in the workspace depends on this one.

pub mod collections;
pub mod config;
pub mod error;
pub mod model;
pub mod selector;

pub use collections::{FxHashMap, FxHashSet};
pub use config::{EditConfig, ScanConfig};
pub use error::{ArgError, ErrorCode, GuardError, IoError, ParseError, SelectorError, TsnjsError};
pub use model::{
    hash_content, hash_span, ConstructorEntry, ConstructorKind, EntryHash, ExportKind,
    FunctionEntry, FunctionKind, Inventory, Span, TargetMode, VariableEntry,
};
pub use selector::{Selector, SpanUnit};
