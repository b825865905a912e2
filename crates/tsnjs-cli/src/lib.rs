//! # tsnjs-cli
//!
//! Flag parsing, operation dispatch, and output rendering for the four
//! `tsnjs` binaries. Each binary fixes a `LanguageProvider` and a default
//! `Language`, installs a `tracing` subscriber, parses `Args`, and calls
//! [`run`].

pub mod args;
pub mod commands;
pub mod output;

use clap::Parser;
use tsnjs_analysis::parser::LanguageProvider;
use tsnjs_analysis::Language;

pub use args::Args;
pub use output::Report;

/// Install the `RUST_LOG`-driven subscriber every binary shares (spec.md's
/// ambient logging requirement; default level `warn`).
pub fn install_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .try_init();
}

/// Shared binary entry point: parse `Args`, run the requested operation
/// against `provider`/`language`, print the report, and return the process
/// exit code.
pub fn run(provider: &dyn LanguageProvider, language: Language) -> i32 {
    install_tracing();
    let args = Args::parse();
    let json_mode = args.json;
    let result = commands::execute(&args, provider, language);
    commands::finish(result, json_mode)
}
