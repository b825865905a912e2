//! End-to-end coverage of spec.md §8's seed scenarios, driving `Args` and
//! `commands::execute` the same way a `tsnjs` binary's `run()` does, against
//! real temp files on disk.

use clap::Parser;
use tsnjs_analysis::parser::JavaScriptProvider;
use tsnjs_analysis::Language;
use tsnjs_cli::args::Args;
use tsnjs_cli::commands;

fn write_temp(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.js");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

// Scenario 1: `--replace exports.alpha --rename alphaRenamed --fix` only
// substitutes the identifier, leaving the rest of the function body intact.
#[test]
fn scenario_1_rename_with_fix_writes_only_the_identifier() {
    let (_dir, path) = write_temp("export function alpha() { return 'alpha'; }\n");
    let args = Args::parse_from([
        "tsnjs",
        "--file",
        path.to_str().unwrap(),
        "--replace",
        "exports.alpha",
        "--rename",
        "alphaRenamed",
        "--fix",
        "--json",
    ]);
    let report = commands::execute(&args, &JavaScriptProvider, Language::JavaScript).unwrap();
    assert!(!report.is_error());
    assert_eq!(report.payload["written"], true);

    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert_eq!(on_disk, "export function alphaRenamed() { return 'alpha'; }\n");
}

// Scenario 2: a stale `--expect-hash` refuses the edit and leaves the file
// untouched; adding `--force` bypasses the mismatch and writes it.
#[test]
fn scenario_2_hash_drift_refuses_then_force_bypasses() {
    let (_dir, path) = write_temp("export function alpha() { return 1; }\n");

    let refuse_args = Args::parse_from([
        "tsnjs",
        "--file",
        path.to_str().unwrap(),
        "--replace",
        "exports.alpha",
        "--with-code",
        "export function alpha() { return 2; }",
        "--expect-hash",
        "stale-hash-value",
        "--fix",
    ]);
    let refused = commands::execute(&refuse_args, &JavaScriptProvider, Language::JavaScript).unwrap();
    assert!(refused.is_error());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "export function alpha() { return 1; }\n");

    let force_args = Args::parse_from([
        "tsnjs",
        "--file",
        path.to_str().unwrap(),
        "--replace",
        "exports.alpha",
        "--with-code",
        "export function alpha() { return 2; }",
        "--expect-hash",
        "stale-hash-value",
        "--force",
        "--fix",
    ]);
    let forced = commands::execute(&force_args, &JavaScriptProvider, Language::JavaScript).unwrap();
    assert!(!forced.is_error());
    assert_eq!(forced.payload["written"], true);
    assert!(std::fs::read_to_string(&path).unwrap().contains("return 2"));
}

// Scenario 3: a CRLF file keeps its line-ending style even when the
// replacement text is supplied with bare LF newlines.
#[test]
fn scenario_3_crlf_file_preserves_its_newline_style() {
    let (_dir, path) = write_temp("const x = 1;\r\nexport function alpha() {\r\n  return 1;\r\n}\r\n");
    let args = Args::parse_from([
        "tsnjs",
        "--file",
        path.to_str().unwrap(),
        "--replace",
        "exports.alpha",
        "--with-code",
        "export function alpha() {\n  return 2;\n}",
        "--fix",
    ]);
    let report = commands::execute(&args, &JavaScriptProvider, Language::JavaScript).unwrap();
    assert!(!report.is_error());

    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert!(on_disk.contains("\r\n"));
    assert!(!on_disk.replace("\r\n", "").contains('\n'));
}

// Without `--fix`, `--replace` previews the guard report but never touches
// the file on disk (spec.md §6's dry-run-by-default contract).
#[test]
fn replace_without_fix_is_a_dry_run() {
    let (_dir, path) = write_temp("export function alpha() { return 1; }\n");
    let args = Args::parse_from([
        "tsnjs",
        "--file",
        path.to_str().unwrap(),
        "--replace",
        "exports.alpha",
        "--with-code",
        "export function alpha() { return 2; }",
    ]);
    let report = commands::execute(&args, &JavaScriptProvider, Language::JavaScript).unwrap();
    assert!(!report.is_error());
    assert_eq!(report.payload["written"], false);
    assert_eq!(report.payload["dryRun"], true);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "export function alpha() { return 1; }\n");
}
