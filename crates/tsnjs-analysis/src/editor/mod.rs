//! Guarded Editor (C5, spec.md §4.5): the hash/span/path/syntax/newline/
//! result guard pipeline, byte-range splicing, atomic writes, newline
//! normalisation, and `--with-code` inline-snippet unescaping.

pub mod guard;
pub mod inline;
pub mod newline;
pub mod splice;

pub use guard::{EntrySnapshot, GuardReport, GuardStatus, ReplaceOutcome, ReplaceRequest};
