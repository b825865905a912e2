//! Workspace scan and symbol-collection throughput over synthetic file trees.

use std::fs;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::TempDir;
use tsnjs_core::ScanConfig;

use tsnjs_analysis::parser::LanguageProvider;
use tsnjs_analysis::{collector, scan, JavaScriptProvider};

fn make_workspace(files: usize) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..files {
        let path = dir.path().join(format!("module_{i}.js"));
        fs::write(path, format!("export function fn{i}() {{ return {i}; }}\n")).unwrap();
    }
    let node_modules = dir.path().join("node_modules");
    fs::create_dir(&node_modules).unwrap();
    fs::write(node_modules.join("ignored.js"), "function ignored() {}").unwrap();
    dir
}

fn make_source(functions: usize) -> String {
    let mut out = String::new();
    for i in 0..functions {
        out.push_str(&format!(
            "export function fn{i}(a, b) {{\n  const sum = a + b + {i};\n  return sum;\n}}\n"
        ));
    }
    out
}

fn bench_walk_workspace(c: &mut Criterion) {
    for size in [10usize, 100, 500] {
        let dir = make_workspace(size);
        let config = ScanConfig::default();

        c.bench_function(&format!("walk_workspace_{size}_files"), |b| {
            b.iter(|| {
                let files = scan::walk_workspace(black_box(dir.path()), black_box(&config));
                black_box(files.len());
            })
        });
    }
}

fn bench_collect_inventory(c: &mut Criterion) {
    let provider = JavaScriptProvider;

    for size in [10usize, 100, 1_000] {
        let source = make_source(size);
        let parsed = provider.parse_source(&source, "bench.js").unwrap();

        c.bench_function(&format!("collect_inventory_{size}_functions"), |b| {
            b.iter(|| {
                let inventory = collector::collect(black_box(&parsed));
                black_box(inventory.functions.len());
            })
        });
    }
}

criterion_group!(benches, bench_walk_workspace, bench_collect_inventory);
criterion_main!(benches);
