//! Scanner configuration — controls the workspace scanner and dependency
//! ripple walker (spec.md §5, §6 `--scan-targets`).

use serde::{Deserialize, Serialize};

/// Configuration for the directory-scan subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum file size in bytes. Default: 1MB (1_048_576).
    pub max_file_size: Option<u64>,
    /// Number of threads. 0 = auto-detect.
    pub threads: Option<usize>,
    /// Include glob patterns — if non-empty, only matching paths are scanned.
    #[serde(default)]
    pub include: Vec<String>,
    /// Additional ignore patterns beyond `.gitignore`/`.tsnjsignore`.
    #[serde(default)]
    pub extra_ignore: Vec<String>,
    /// Follow symbolic links. Default: false.
    pub follow_symlinks: Option<bool>,
    /// Maximum depth for the dependency-ripple BFS (spec.md §5). Default: 8.
    pub ripple_max_depth: Option<usize>,
}

impl ScanConfig {
    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(1_048_576)
    }

    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(0)
    }

    pub fn effective_ripple_max_depth(&self) -> usize {
        self.ripple_max_depth.unwrap_or(8)
    }
}

/// Configuration for guard defaults on editing operations (spec.md §4.5,
/// §6 modifiers `--force`, `--allow-multiple`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditConfig {
    /// Bypass non-bypassable-only guards are never covered by this; this
    /// controls whether hash/span/path mismatches are fatal. Default: false.
    pub force: Option<bool>,
    /// Allow selector resolution to match more than one entry. Default:
    /// false.
    pub allow_multiple: Option<bool>,
    /// Preview only; never write. Default: false (i.e. `--fix` required to
    /// write, matching spec.md §4.5's dry-run-by-default editor contract).
    pub fix: Option<bool>,
}

impl EditConfig {
    pub fn effective_force(&self) -> bool {
        self.force.unwrap_or(false)
    }

    pub fn effective_allow_multiple(&self) -> bool {
        self.allow_multiple.unwrap_or(false)
    }

    pub fn effective_fix(&self) -> bool {
        self.fix.unwrap_or(false)
    }
}
