//! CLI flags (spec.md §6). One flat flag struct shared by all four binaries;
//! each binary fixes the operating mode (edit vs. scan) and default
//! language, letting the flag surface stay identical across the pair.

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariableTarget {
    Declaration,
    Declarator,
    Binding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnclosingMode {
    Exact,
    Function,
    Class,
}

/// Flags for the symbol-addressing and guarded-edit engine.
#[derive(Parser, Debug)]
#[command(name = "tsnjs", version, about = "AST-aware symbol addressing and guarded edit engine for JS/TS")]
pub struct Args {
    // ==================== Operation selectors (mutually exclusive) ====================
    /// List every function/method/constructor entry in the file.
    #[arg(long, group = "operation")]
    pub list_functions: bool,

    /// List every variable declaration/declarator/binding entry in the file.
    #[arg(long, group = "operation")]
    pub list_variables: bool,

    /// List every class constructor entry in the file.
    #[arg(long, group = "operation")]
    pub list_constructors: bool,

    /// Print a combined outline of functions, variables, and constructors.
    #[arg(long, group = "operation")]
    pub outline: bool,

    /// Resolve a function selector and report its addressing metadata.
    #[arg(long, group = "operation")]
    pub locate: Option<String>,

    /// Resolve a variable selector and report its addressing metadata.
    #[arg(long, group = "operation")]
    pub locate_variable: Option<String>,

    /// Resolve a function selector and print its exact source span.
    #[arg(long, group = "operation")]
    pub extract: Option<String>,

    /// Resolve a variable selector and print its exact source span.
    #[arg(long, group = "operation")]
    pub extract_variable: Option<String>,

    /// Extract every function entry whose hash appears in this comma-separated list.
    #[arg(long, group = "operation", value_delimiter = ',')]
    pub extract_hashes: Option<Vec<String>>,

    /// Replace a function entry's span under the guard pipeline.
    #[arg(long, group = "operation")]
    pub replace: Option<String>,

    /// Replace a variable entry's span under the guard pipeline.
    #[arg(long, group = "operation")]
    pub replace_variable: Option<String>,

    /// Rename the identifier of the entry matched by `--replace`/`--replace-variable`.
    #[arg(long)]
    pub rename: Option<String>,

    /// Print the resolved function entry's source plus surrounding context.
    #[arg(long, group = "operation")]
    pub context_function: Option<String>,

    /// Print the resolved variable entry's source plus surrounding context.
    #[arg(long, group = "operation")]
    pub context_variable: Option<String>,

    /// Dry-run a function replacement: print the guard report and unified diff without writing.
    #[arg(long, group = "operation")]
    pub preview: Option<String>,

    /// Dry-run a variable replacement: print the guard report and unified diff without writing.
    #[arg(long, group = "operation")]
    pub preview_variable: Option<String>,

    /// Scan the file for a literal substring or regex, reporting line/column hits.
    #[arg(long, group = "operation")]
    pub search_text: Option<String>,

    /// Resolve the innermost entry containing a byte offset (`@128`) or `line:col` position.
    #[arg(long, group = "operation")]
    pub snipe: Option<String>,

    /// Walk a comma-separated list of root directories and report per-file inventories.
    #[arg(long, group = "operation", value_delimiter = ',')]
    pub scan_targets: Option<Vec<String>>,

    // ==================== Modifiers ====================
    /// The target source file. Required for every operation except `--scan-targets`.
    #[arg(long)]
    pub file: Option<std::path::PathBuf>,

    /// Replacement source, read from this file path.
    #[arg(long)]
    pub with: Option<std::path::PathBuf>,

    /// Replacement source, read from a path relative to the target file's directory.
    #[arg(long)]
    pub with_file: Option<std::path::PathBuf>,

    /// Replacement source, given inline (shell-escaped: `\"`, `\\` are unescaped).
    #[arg(long)]
    pub with_code: Option<String>,

    /// Replace only a sub-interval `s:e` (byte offsets relative to the entry's own span).
    #[arg(long, value_parser = parse_range)]
    pub replace_range: Option<(usize, usize)>,

    /// Require the entry's current hash to equal this digest before replacing.
    #[arg(long)]
    pub expect_hash: Option<String>,

    /// Require the entry's current span (`s:e` char offsets, or `byte:s:e`) before replacing.
    #[arg(long)]
    pub expect_span: Option<String>,

    /// Refine the selector match with a secondary selector (`hash:<h>` or `path:<sig>`).
    #[arg(long)]
    pub select: Option<String>,

    /// Refine the selector match to a specific path signature.
    #[arg(long)]
    pub select_path: Option<String>,

    /// Which granularity of variable entry a variable selector addresses.
    #[arg(long, value_enum, default_value_t = VariableTarget::Declarator)]
    pub variable_target: VariableTarget,

    /// Permit the selector to resolve to more than one entry.
    #[arg(long)]
    pub allow_multiple: bool,

    /// Bypass a hash/span/path guard mismatch; the bypass is still recorded in the report.
    #[arg(long)]
    pub force: bool,

    /// Actually write the file. Without this flag, edit operations preview only.
    #[arg(long)]
    pub fix: bool,

    /// Emit machine-readable JSON instead of a formatted text report.
    #[arg(long)]
    pub json: bool,

    /// Write a plan/digest record describing this operation to this path.
    #[arg(long)]
    pub emit_plan: Option<std::path::PathBuf>,

    /// Include a unified diff of the proposed change in the output.
    #[arg(long)]
    pub emit_diff: bool,

    /// Lines of context to include before a `--context-*` snippet.
    #[arg(long, default_value_t = 0)]
    pub context_before: u32,

    /// Lines of context to include after a `--context-*` snippet.
    #[arg(long, default_value_t = 0)]
    pub context_after: u32,

    /// What the context snippet expands to enclose.
    #[arg(long, value_enum, default_value_t = EnclosingMode::Exact)]
    pub context_enclosing: EnclosingMode,

    /// Only include entries whose name matches this glob in list/outline output.
    #[arg(long)]
    pub r#match: Option<String>,

    /// Exclude entries whose name matches this glob from list/outline output.
    #[arg(long)]
    pub exclude: Option<String>,
}

fn parse_range(raw: &str) -> Result<(usize, usize), String> {
    let (s, e) = raw.split_once(':').ok_or_else(|| format!("expected s:e, got {raw:?}"))?;
    let s = s.parse::<usize>().map_err(|_| format!("invalid start offset: {s:?}"))?;
    let e = e.parse::<usize>().map_err(|_| format!("invalid end offset: {e:?}"))?;
    Ok((s, e))
}
