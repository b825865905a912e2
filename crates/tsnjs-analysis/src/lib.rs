//! # tsnjs-analysis
//!
//! The six core components of the symbol-addressing and guarded-edit
//! engine (C1-C6), plus the workspace scanner and dependency-ripple walker:
//! tree-sitter-backed parsing, the position mapper, the symbol collector,
//! the selector resolver, the guarded editor, and the plan emitter.

pub mod collector;
pub mod editor;
pub mod language;
pub mod mapper;
pub mod parser;
pub mod plan;
pub mod scan;
pub mod selector;

pub use language::Language;
pub use mapper::PositionMapper;
pub use parser::{JavaScriptProvider, LanguageProvider, TypeScriptProvider};
pub use plan::Plan;
