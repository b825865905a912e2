//! Parser seam (spec.md §4.1): tree-sitter-backed `LanguageProvider`
//! implementations for JavaScript and TypeScript.

pub mod imports;
pub mod javascript;
pub mod traits;
pub mod typescript;
pub mod types;

pub use javascript::JavaScriptProvider;
pub use traits::LanguageProvider;
pub use typescript::TypeScriptProvider;
pub use types::{FileRecord, ImportRecord, ParsedFile};
