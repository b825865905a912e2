//! Guard pipeline benchmark: replace throughput over a range of file sizes.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tsnjs_analysis::editor::guard::{run_replace, EntrySnapshot, ReplaceRequest};
use tsnjs_analysis::selector::EntryOrigin;
use tsnjs_analysis::{JavaScriptProvider, LanguageProvider};

fn make_source(functions: usize) -> String {
    let mut out = String::new();
    for i in 0..functions {
        out.push_str(&format!("export function fn{i}() {{ return {i}; }}\n"));
    }
    out
}

fn bench_guard_pipeline(c: &mut Criterion) {
    let provider = JavaScriptProvider;

    for size in [10usize, 100, 1_000] {
        let source = make_source(size);
        let parsed = provider.parse_source(&source, "bench.js").unwrap();
        let inventory = tsnjs_analysis::collector::collect(&parsed);
        let target = inventory.functions.last().unwrap();
        let entry = EntrySnapshot {
            origin: EntryOrigin::Function,
            span: target.span,
            identifier_span: target.identifier_span,
            hash: target.hash.clone(),
            path_signature: target.path_signature.clone(),
            node_kind: "function-declaration".to_string(),
        };
        let replacement = source[entry.span.bytes.start..entry.span.bytes.end].replace("return", "return 1 + ");

        c.bench_function(&format!("guard_replace_{size}_functions"), |b| {
            b.iter(|| {
                let request = ReplaceRequest { expect_hash: None, expect_span: None, force: false };
                let outcome = run_replace(
                    black_box(&provider),
                    "bench.js",
                    black_box(&source),
                    black_box(&entry),
                    black_box(&replacement),
                    None,
                    None,
                    &request,
                )
                .unwrap();
                black_box(outcome);
            })
        });
    }
}

criterion_group!(benches, bench_guard_pipeline);
criterion_main!(benches);
