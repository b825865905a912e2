//! Shared collection aliases (mirrors the teacher's
//! `types::collections::{FxHashMap, FxHashSet}`).

pub type FxHashMap<K, V> = std::collections::HashMap<K, V, rustc_hash::FxBuildHasher>;
pub type FxHashSet<T> = std::collections::HashSet<T, rustc_hash::FxBuildHasher>;
