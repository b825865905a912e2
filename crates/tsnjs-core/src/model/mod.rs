//! Language-neutral data model shared by every component of the engine.

pub mod entry;
pub mod hash;
pub mod span;

pub use entry::{
    ConstructorEntry, ConstructorKind, ExportKind, FunctionEntry, FunctionKind, Inventory,
    TargetMode, VariableEntry,
};
pub use hash::{hash_content, hash_span, EntryHash};
pub use span::{ByteSpan, CharSpan, Span};
